//! Simulation session - owns the current snapshot and drives it forward
//!
//! The session is the only writer of world state. Readers get an
//! `Arc<WorldState>` that is never mutated after publication.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::command::{Command, CommandQueue, WorldCommand};
use crate::core::config::SimulationConfig;
use crate::core::error::{Result, SimError};
use crate::core::types::{Tick, Timestamp};
use crate::data::GameData;
use crate::simulation::tick::advance;
use crate::simulation::timekeeper::{PulseAction, TimeKeeper, TimeKeeperState};
use crate::world::generation::generate_world;
use crate::world::state::WorldState;

/// Result of one session pulse
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PulseOutcome {
    Advanced { tick: Tick, timestamp: Timestamp },
    Held,
    /// The world is far behind wall-clock time; send `Command::FastForward`
    /// to catch up or `Command::Resume` to be asked again
    FastForwardPrompt { gap_ms: i64 },
}

pub struct Session {
    state: Arc<WorldState>,
    data: Arc<GameData>,
    config: SimulationConfig,
    timekeeper: TimeKeeper,
    queue: CommandQueue,
    /// World commands waiting for the next advance
    pending: Vec<WorldCommand>,
    rng: ChaCha8Rng,
    advances: u64,
}

impl Session {
    /// Start a session on a freshly generated world
    pub fn new(config: SimulationConfig, data: GameData, now: Timestamp) -> Result<Self> {
        config.validate().map_err(SimError::ConfigError)?;
        let mut rng = make_rng(&config);
        let state = generate_world(&config, &data, now, &mut rng);
        Ok(Self::assemble(state, config, data, rng))
    }

    /// Resume a session from a saved snapshot
    pub fn from_state(state: WorldState, config: SimulationConfig, data: GameData) -> Result<Self> {
        config.validate().map_err(SimError::ConfigError)?;
        let rng = make_rng(&config);
        Ok(Self::assemble(state, config, data, rng))
    }

    fn assemble(
        state: WorldState,
        config: SimulationConfig,
        data: GameData,
        rng: ChaCha8Rng,
    ) -> Self {
        Self {
            state: Arc::new(state),
            data: Arc::new(data),
            timekeeper: TimeKeeper::new(&config),
            config,
            queue: CommandQueue::new(),
            pending: Vec::new(),
            rng,
            advances: 0,
        }
    }

    /// Current published snapshot
    pub fn snapshot(&self) -> Arc<WorldState> {
        Arc::clone(&self.state)
    }

    pub fn data(&self) -> Arc<GameData> {
        Arc::clone(&self.data)
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn timekeeper(&self) -> &TimeKeeper {
        &self.timekeeper
    }

    /// Number of world advances performed by this session
    pub fn advance_count(&self) -> u64 {
        self.advances
    }

    /// Queue a command for the next pulse
    pub fn enqueue(&mut self, command: Command) {
        self.queue.push(command);
    }

    /// Drain queued commands, then let the time keeper decide whether the
    /// world advances
    pub fn pulse(&mut self, now: Timestamp) -> Result<PulseOutcome> {
        if !self.queue.is_empty() {
            debug!(count = self.queue.len(), "Draining queued commands");
        }
        for command in self.queue.drain() {
            match command {
                Command::ResetWorld => self.reset(now),
                Command::FastForward => self.timekeeper.fast_forward(),
                Command::Pause => self.timekeeper.pause(),
                Command::Resume => self.timekeeper.resume(),
                other => {
                    if let Some(world_command) = other.into_world_command() {
                        self.pending.push(world_command);
                    }
                }
            }
        }

        match self.timekeeper.pulse(now, self.state.timestamp) {
            PulseAction::Hold => Ok(PulseOutcome::Held),
            PulseAction::PromptFastForward { gap_ms } => {
                info!(gap_ms, "World is behind wall-clock time");
                Ok(PulseOutcome::FastForwardPrompt { gap_ms })
            }
            PulseAction::Advance { target } => {
                let next = advance(
                    &self.state,
                    &self.data,
                    &self.config,
                    target,
                    &self.pending,
                    &mut self.rng,
                )?;
                self.pending.clear();
                if next.is_game_over && !self.state.is_game_over {
                    warn!(tick = next.tick, "Game over");
                }
                self.state = Arc::new(next);
                self.advances += 1;
                Ok(PulseOutcome::Advanced {
                    tick: self.state.tick,
                    timestamp: self.state.timestamp,
                })
            }
        }
    }

    /// Fast-forward to `now` without waiting between pulses. Returns the
    /// number of advances it took.
    pub fn catch_up(&mut self, now: Timestamp) -> Result<u64> {
        let before = self.advances;
        self.timekeeper.fast_forward();
        while self.timekeeper.state() == TimeKeeperState::FastForwarding {
            self.pulse(now)?;
        }
        Ok(self.advances - before)
    }

    /// Replace the world with a newly generated one
    fn reset(&mut self, now: Timestamp) {
        self.pending.clear();
        let state = generate_world(&self.config, &self.data, now, &mut self.rng);
        self.state = Arc::new(state);
        info!("World reset");
    }
}

fn make_rng(config: &SimulationConfig) -> ChaCha8Rng {
    match config.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Vec2;
    use crate::data::blueprints::BlueprintKind;

    fn session(now: Timestamp) -> Session {
        Session::new(SimulationConfig::seeded(7), GameData::with_defaults(), now).unwrap()
    }

    #[test]
    fn test_snapshots_are_not_mutated() {
        let mut s = session(0);
        let before = s.snapshot();
        s.pulse(100).unwrap();
        let after = s.snapshot();

        assert_eq!(before.tick, 0);
        assert_eq!(after.tick, 1);
        assert!(!Arc::ptr_eq(&before, &after));
    }

    #[test]
    fn test_build_command_lands_on_next_advance() {
        let mut s = session(0);
        s.enqueue(Command::BuildAction {
            kind: BlueprintKind::Stockpile,
            location: Vec2::new(10.0, 10.0),
        });
        s.pulse(100).unwrap();
        assert_eq!(s.snapshot().blueprints().count(), 1);
    }

    #[test]
    fn test_world_commands_wait_while_paused() {
        let mut s = session(0);
        s.enqueue(Command::Pause);
        s.enqueue(Command::BuildAction {
            kind: BlueprintKind::Stockpile,
            location: Vec2::new(10.0, 10.0),
        });
        assert_eq!(s.pulse(100).unwrap(), PulseOutcome::Held);
        assert_eq!(s.snapshot().blueprints().count(), 0);

        s.enqueue(Command::Resume);
        assert!(matches!(s.pulse(200).unwrap(), PulseOutcome::Advanced { .. }));
        assert_eq!(s.snapshot().blueprints().count(), 1);
    }

    #[test]
    fn test_long_absence_prompts_then_catches_up() {
        let mut s = session(0);
        let now = 60_000;
        assert_eq!(
            s.pulse(now).unwrap(),
            PulseOutcome::FastForwardPrompt { gap_ms: 60_000 }
        );
        assert_eq!(s.snapshot().timestamp, 0);

        let calls = s.catch_up(now).unwrap();
        assert_eq!(calls, 12);
        assert_eq!(s.snapshot().timestamp, now);
        assert_eq!(s.timekeeper().state(), TimeKeeperState::Running);
    }

    #[test]
    fn test_reset_generates_new_world() {
        let mut s = session(0);
        s.pulse(100).unwrap();
        s.enqueue(Command::ResetWorld);
        s.pulse(5_000).unwrap();
        let state = s.snapshot();
        assert_eq!(state.actor_count(), 1);
        assert!(state.tick <= 1);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = SimulationConfig {
            catch_up_increment_ms: 0,
            ..SimulationConfig::default()
        };
        assert!(Session::new(config, GameData::with_defaults(), 0).is_err());
    }
}
