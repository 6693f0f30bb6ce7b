//! Camera transforms between screen pixels and world units
//!
//! Handles viewport positioning, zoom and coordinate transforms.

use crate::core::types::Vec2;

/// Camera over the world
#[derive(Debug, Clone)]
pub struct Camera {
    /// World position shown at the viewport's top-left corner
    pub offset: Vec2,
    /// Zoom level (1.0 = one world unit per pixel)
    pub zoom: f32,
    /// Viewport size in pixels
    pub viewport_size: (f32, f32),
    /// World extent used for clamping pans
    pub world_size: Option<Vec2>,
}

impl Camera {
    pub fn new(viewport_width: f32, viewport_height: f32) -> Self {
        Self {
            offset: Vec2::ZERO,
            zoom: 1.0,
            viewport_size: (viewport_width, viewport_height),
            world_size: None,
        }
    }

    pub fn with_world_size(mut self, world_size: Vec2) -> Self {
        self.world_size = Some(world_size);
        self
    }

    /// Convert world coordinates to screen coordinates
    pub fn world_to_screen(&self, world_pos: Vec2) -> (f32, f32) {
        let relative = world_pos - self.offset;
        (relative.x * self.zoom, relative.y * self.zoom)
    }

    /// Convert screen coordinates to world coordinates
    pub fn screen_to_world(&self, screen_x: f32, screen_y: f32) -> Vec2 {
        Vec2::new(
            screen_x / self.zoom + self.offset.x,
            screen_y / self.zoom + self.offset.y,
        )
    }

    /// Pan by a screen-space drag delta
    pub fn pan_pixels(&mut self, dx: f32, dy: f32) {
        self.offset.x -= dx / self.zoom;
        self.offset.y -= dy / self.zoom;
        self.clamp_to_world();
    }

    /// Adjust zoom level, clamped to [0.25, 4.0], keeping the world point
    /// under the given screen position fixed
    pub fn zoom_at(&mut self, delta: f32, screen_x: f32, screen_y: f32) {
        let anchor = self.screen_to_world(screen_x, screen_y);
        self.zoom = (self.zoom * (1.0 + delta)).clamp(0.25, 4.0);
        self.offset = Vec2::new(
            anchor.x - screen_x / self.zoom,
            anchor.y - screen_y / self.zoom,
        );
        self.clamp_to_world();
    }

    fn clamp_to_world(&mut self) {
        if let Some(world) = self.world_size {
            let visible_w = self.viewport_size.0 / self.zoom;
            let visible_h = self.viewport_size.1 / self.zoom;
            self.offset.x = self.offset.x.clamp(0.0, (world.x - visible_w).max(0.0));
            self.offset.y = self.offset.y.clamp(0.0, (world.y - visible_h).max(0.0));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screen_to_world_accounts_for_pan() {
        let mut camera = Camera::new(800.0, 600.0);
        assert_eq!(camera.screen_to_world(100.0, 50.0), Vec2::new(100.0, 50.0));

        camera.pan_pixels(-40.0, -10.0);
        assert_eq!(camera.offset, Vec2::new(40.0, 10.0));
        assert_eq!(camera.screen_to_world(100.0, 50.0), Vec2::new(140.0, 60.0));
    }

    #[test]
    fn test_round_trip_with_zoom() {
        let mut camera = Camera::new(800.0, 600.0);
        camera.zoom = 2.0;
        camera.offset = Vec2::new(10.0, 20.0);
        let (sx, sy) = camera.world_to_screen(Vec2::new(30.0, 40.0));
        assert_eq!((sx, sy), (40.0, 40.0));
        assert_eq!(camera.screen_to_world(sx, sy), Vec2::new(30.0, 40.0));
    }

    #[test]
    fn test_zoom_clamp_and_anchor() {
        let mut camera = Camera::new(800.0, 600.0);
        let anchor = camera.screen_to_world(200.0, 100.0);
        camera.zoom_at(1.0, 200.0, 100.0);
        assert_eq!(camera.zoom, 2.0);
        assert_eq!(camera.screen_to_world(200.0, 100.0), anchor);

        camera.zoom_at(100.0, 0.0, 0.0);
        assert!(camera.zoom <= 4.0);
        camera.zoom_at(-0.99, 0.0, 0.0);
        assert!(camera.zoom >= 0.25);
    }

    #[test]
    fn test_pan_clamped_to_world() {
        let mut camera = Camera::new(100.0, 100.0).with_world_size(Vec2::new(300.0, 300.0));
        camera.pan_pixels(1_000.0, 1_000.0);
        assert_eq!(camera.offset, Vec2::ZERO);
        camera.pan_pixels(-1_000.0, -1_000.0);
        assert_eq!(camera.offset, Vec2::new(200.0, 200.0));
    }
}
