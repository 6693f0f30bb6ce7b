//! Pointer input - turn clicks into actor selection or build commands

pub mod camera;

use crate::command::Command;
use crate::core::types::{EntityId, Vec2};
use crate::data::blueprints::BlueprintKind;
use crate::world::state::WorldState;

pub use camera::Camera;

/// What a click resolved to
#[derive(Debug, Clone, PartialEq)]
pub enum ClickAction {
    SelectActor(EntityId),
    Enqueue(Command),
    Nothing,
}

/// Routes clicks using the current camera and build tool
#[derive(Debug, Clone)]
pub struct InputRouter {
    pub camera: Camera,
    /// Blueprint placed on click, if a build tool is selected
    pub build_tool: Option<BlueprintKind>,
}

impl InputRouter {
    pub fn new(camera: Camera) -> Self {
        Self {
            camera,
            build_tool: None,
        }
    }

    /// Resolve a click at screen coordinates. With a build tool selected the
    /// click places a blueprint; otherwise it selects the actor under it.
    pub fn click(&self, screen_x: f32, screen_y: f32, state: &WorldState) -> ClickAction {
        let point = self.camera.screen_to_world(screen_x, screen_y);
        self.click_world(point, state)
    }

    pub fn click_world(&self, point: Vec2, state: &WorldState) -> ClickAction {
        if let Some(kind) = self.build_tool {
            return ClickAction::Enqueue(Command::BuildAction {
                kind,
                location: point,
            });
        }
        match state.actor_at(point) {
            Some(actor) => ClickAction::SelectActor(actor.id),
            None => ClickAction::Nothing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::SimulationConfig;
    use crate::entity::Entity;
    use crate::world::terrain::{TerrainGrid, TerrainType};

    fn world() -> (WorldState, EntityId) {
        let mut state = WorldState::new(TerrainGrid::uniform(10, 10, 20.0, TerrainType::Soil), 0);
        let actor = Entity::actor(EntityId::new(), Vec2::new(60.0, 60.0), &SimulationConfig::default());
        let id = actor.id;
        state.entities.push(actor);
        (state, id)
    }

    #[test]
    fn test_click_selects_actor_under_cursor() {
        let (state, id) = world();
        let mut camera = Camera::new(200.0, 200.0);
        camera.offset = Vec2::new(50.0, 50.0);
        let router = InputRouter::new(camera);

        assert_eq!(router.click(10.0, 10.0, &state), ClickAction::SelectActor(id));
        assert_eq!(router.click(150.0, 150.0, &state), ClickAction::Nothing);
    }

    #[test]
    fn test_click_with_build_tool_enqueues_blueprint() {
        let (state, _) = world();
        let mut router = InputRouter::new(Camera::new(200.0, 200.0));
        router.build_tool = Some(BlueprintKind::GrassSeed);

        assert_eq!(
            router.click(60.0, 60.0, &state),
            ClickAction::Enqueue(Command::BuildAction {
                kind: BlueprintKind::GrassSeed,
                location: Vec2::new(60.0, 60.0),
            })
        );
    }
}
