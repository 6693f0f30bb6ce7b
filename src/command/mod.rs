//! External commands and the queue they wait in
//!
//! Producers (input handling, UI) only push. The session drains the queue
//! at the start of its next pulse: control commands go to the time keeper
//! or reset the world, world commands are handed to the next advance.

pub mod executor;

use serde::{Deserialize, Serialize};

use crate::core::types::{EntityId, Vec2};
use crate::data::blueprints::BlueprintKind;
use crate::entity::Entity;

pub use executor::apply_world_commands;

/// Any command a player or UI can issue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Command {
    ResetWorld,
    BuildAction { kind: BlueprintKind, location: Vec2 },
    UpdateActor { id: EntityId, actor: Box<Entity> },
    FastForward,
    Pause,
    Resume,
}

/// Commands applied inside a world advance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WorldCommand {
    BuildAction { kind: BlueprintKind, location: Vec2 },
    UpdateActor { id: EntityId, actor: Box<Entity> },
}

impl Command {
    /// The in-tick form of this command, if it is one
    pub fn into_world_command(self) -> Option<WorldCommand> {
        match self {
            Command::BuildAction { kind, location } => {
                Some(WorldCommand::BuildAction { kind, location })
            }
            Command::UpdateActor { id, actor } => Some(WorldCommand::UpdateActor { id, actor }),
            Command::ResetWorld | Command::FastForward | Command::Pause | Command::Resume => None,
        }
    }
}

/// Single-writer append / drain buffer
#[derive(Debug, Default)]
pub struct CommandQueue {
    pending: Vec<Command>,
}

impl CommandQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, command: Command) {
        self.pending.push(command);
    }

    /// Take every queued command in arrival order, leaving the queue empty
    pub fn drain(&mut self) -> Vec<Command> {
        std::mem::take(&mut self.pending)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drain_empties_queue_in_order() {
        let mut queue = CommandQueue::new();
        queue.push(Command::Pause);
        queue.push(Command::BuildAction {
            kind: BlueprintKind::Stockpile,
            location: Vec2::new(1.0, 2.0),
        });

        let drained = queue.drain();
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[0], Command::Pause);
        assert!(queue.is_empty());
        assert!(queue.drain().is_empty());
    }

    #[test]
    fn test_control_commands_are_not_world_commands() {
        assert!(Command::FastForward.into_world_command().is_none());
        assert!(Command::ResetWorld.into_world_command().is_none());
        let build = Command::BuildAction {
            kind: BlueprintKind::TreeSeed,
            location: Vec2::ZERO,
        };
        assert!(matches!(
            build.into_world_command(),
            Some(WorldCommand::BuildAction { kind: BlueprintKind::TreeSeed, .. })
        ));
    }
}
