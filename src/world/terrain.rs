//! Terrain generation from Perlin noise
//!
//! The grid is produced once per world and never mutated afterwards.

use noise::{NoiseFn, Perlin};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::types::Vec2;

/// Biome of a single tile, derived from its height
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerrainType {
    Water,
    Sand,
    Soil,
    Rock,
}

impl TerrainType {
    pub const ALL: [TerrainType; 4] = [
        TerrainType::Water,
        TerrainType::Sand,
        TerrainType::Soil,
        TerrainType::Rock,
    ];

    /// Classify a normalized height in [0, 1]
    pub fn from_height(height: f32) -> Self {
        if height <= 0.4 {
            TerrainType::Water
        } else if height <= 0.45 {
            TerrainType::Sand
        } else if height <= 0.75 {
            TerrainType::Soil
        } else {
            TerrainType::Rock
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.name() == name.to_lowercase())
    }

    pub fn name(&self) -> &'static str {
        match self {
            TerrainType::Water => "water",
            TerrainType::Sand => "sand",
            TerrainType::Soil => "soil",
            TerrainType::Rock => "rock",
        }
    }
}

impl fmt::Display for TerrainType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    pub height: f32,
    pub terrain: TerrainType,
}

/// Row-major grid of tiles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TerrainGrid {
    pub width: usize,
    pub height: usize,
    /// World units per tile edge
    pub tile_size: f32,
    tiles: Vec<Tile>,
}

impl TerrainGrid {
    /// Sample a `width` x `height` grid. `zoom` stretches the noise: larger
    /// values give larger landmasses.
    pub fn generate(width: usize, height: usize, tile_size: f32, zoom: f64, seed: u32) -> Self {
        let perlin = Perlin::new(seed);
        let zoom = if zoom > 0.0 { zoom } else { 1.0 };

        let mut tiles = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                let raw = perlin.get([x as f64 / zoom, y as f64 / zoom]);
                let h = (raw * 0.5 + 0.5).clamp(0.0, 1.0) as f32;
                tiles.push(Tile {
                    height: h,
                    terrain: TerrainType::from_height(h),
                });
            }
        }

        Self {
            width,
            height,
            tile_size,
            tiles,
        }
    }

    /// A grid of one terrain type everywhere
    pub fn uniform(width: usize, height: usize, tile_size: f32, terrain: TerrainType) -> Self {
        let height_value = match terrain {
            TerrainType::Water => 0.2,
            TerrainType::Sand => 0.42,
            TerrainType::Soil => 0.6,
            TerrainType::Rock => 0.9,
        };
        Self {
            width,
            height,
            tile_size,
            tiles: vec![
                Tile {
                    height: height_value,
                    terrain,
                };
                width * height
            ],
        }
    }

    pub fn get(&self, x: usize, y: usize) -> Option<&Tile> {
        if x < self.width && y < self.height {
            self.tiles.get(y * self.width + x)
        } else {
            None
        }
    }

    /// Tile under a world position, if inside the grid
    pub fn tile_at(&self, position: Vec2) -> Option<&Tile> {
        if position.x < 0.0 || position.y < 0.0 || self.tile_size <= 0.0 {
            return None;
        }
        let x = (position.x / self.tile_size) as usize;
        let y = (position.y / self.tile_size) as usize;
        self.get(x, y)
    }

    /// World-space origin (top-left corner) of a tile
    pub fn tile_origin(&self, x: usize, y: usize) -> Vec2 {
        Vec2::new(x as f32 * self.tile_size, y as f32 * self.tile_size)
    }

    /// Coordinates of every tile matching `accept`
    pub fn tiles_where(&self, accept: impl Fn(TerrainType) -> bool) -> Vec<(usize, usize)> {
        self.tiles
            .iter()
            .enumerate()
            .filter(|(_, tile)| accept(tile.terrain))
            .map(|(i, _)| (i % self.width, i / self.width))
            .collect()
    }

    /// World extent in world units
    pub fn world_size(&self) -> Vec2 {
        Vec2::new(
            self.width as f32 * self.tile_size,
            self.height as f32 * self.tile_size,
        )
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_height_thresholds() {
        assert_eq!(TerrainType::from_height(0.0), TerrainType::Water);
        assert_eq!(TerrainType::from_height(0.399), TerrainType::Water);
        // A height exactly on a boundary stays in the lower band
        assert_eq!(TerrainType::from_height(0.4), TerrainType::Water);
        assert_eq!(TerrainType::from_height(0.41), TerrainType::Sand);
        assert_eq!(TerrainType::from_height(0.45), TerrainType::Sand);
        assert_eq!(TerrainType::from_height(0.46), TerrainType::Soil);
        assert_eq!(TerrainType::from_height(0.75), TerrainType::Soil);
        assert_eq!(TerrainType::from_height(0.76), TerrainType::Rock);
        assert_eq!(TerrainType::from_height(1.0), TerrainType::Rock);
    }

    #[test]
    fn test_generation_is_deterministic_per_seed() {
        let a = TerrainGrid::generate(16, 12, 32.0, 8.0, 7);
        let b = TerrainGrid::generate(16, 12, 32.0, 8.0, 7);
        assert_eq!(a, b);
        assert_eq!(a.len(), 16 * 12);
        assert!(a.get(15, 11).is_some());
        assert!(a.get(16, 0).is_none());
    }

    #[test]
    fn test_heights_are_normalized() {
        let grid = TerrainGrid::generate(20, 20, 10.0, 5.0, 3);
        for y in 0..20 {
            for x in 0..20 {
                let tile = grid.get(x, y).unwrap();
                assert!((0.0..=1.0).contains(&tile.height));
                assert_eq!(tile.terrain, TerrainType::from_height(tile.height));
            }
        }
    }

    #[test]
    fn test_tile_at_maps_world_coordinates() {
        let grid = TerrainGrid::uniform(4, 4, 10.0, TerrainType::Soil);
        assert!(grid.tile_at(Vec2::new(39.9, 0.0)).is_some());
        assert!(grid.tile_at(Vec2::new(40.0, 0.0)).is_none());
        assert!(grid.tile_at(Vec2::new(-1.0, 5.0)).is_none());
    }

    #[test]
    fn test_tiles_where_filters_by_terrain() {
        let grid = TerrainGrid::uniform(3, 2, 10.0, TerrainType::Sand);
        assert_eq!(grid.tiles_where(|t| t == TerrainType::Sand).len(), 6);
        assert!(grid.tiles_where(|t| t == TerrainType::Rock).is_empty());
        assert_eq!(grid.tiles_where(|_| true)[4], (1, 1));
    }
}
