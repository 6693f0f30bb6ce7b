//! Time keeping - decides how far the world may advance on each pulse
//!
//! No single advance ever moves more than one catch-up increment past the
//! world's last timestamp, however long the world was left alone.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::info;

use crate::core::config::SimulationConfig;
use crate::core::types::Timestamp;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeKeeperState {
    Running,
    Paused,
    FastForwarding,
}

/// What the caller should do after a pulse
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PulseAction {
    /// Advance the world to `target`
    Advance { target: Timestamp },
    /// Leave the world as is
    Hold,
    /// The gap to wall-clock time is too large; ask the player whether to
    /// fast-forward. The keeper is now paused.
    PromptFastForward { gap_ms: i64 },
}

#[derive(Debug, Clone)]
pub struct TimeKeeper {
    state: TimeKeeperState,
    threshold_ms: i64,
    increment_ms: i64,
    interval: Duration,
}

impl TimeKeeper {
    pub fn new(config: &SimulationConfig) -> Self {
        Self {
            state: TimeKeeperState::Running,
            threshold_ms: config.fast_forward_threshold_ms,
            increment_ms: config.catch_up_increment_ms.max(1),
            interval: Duration::from_millis(config.tick_interval_ms.max(1)),
        }
    }

    pub fn state(&self) -> TimeKeeperState {
        self.state
    }

    /// Delay before the next pulse; `None` while fast-forwarding means
    /// pulse again immediately
    pub fn pulse_interval(&self) -> Option<Duration> {
        match self.state {
            TimeKeeperState::FastForwarding => None,
            TimeKeeperState::Running | TimeKeeperState::Paused => Some(self.interval),
        }
    }

    /// Start catching up to wall-clock time
    pub fn fast_forward(&mut self) {
        self.transition(TimeKeeperState::FastForwarding);
    }

    pub fn pause(&mut self) {
        self.transition(TimeKeeperState::Paused);
    }

    pub fn resume(&mut self) {
        if self.state == TimeKeeperState::Paused {
            self.transition(TimeKeeperState::Running);
        }
    }

    /// One scheduling pulse at wall-clock `now` for a world last reconciled
    /// at `last`
    pub fn pulse(&mut self, now: Timestamp, last: Timestamp) -> PulseAction {
        let gap = now - last;
        match self.state {
            TimeKeeperState::Paused => PulseAction::Hold,

            TimeKeeperState::Running => {
                if gap > self.threshold_ms {
                    self.transition(TimeKeeperState::Paused);
                    PulseAction::PromptFastForward { gap_ms: gap }
                } else if gap < 0 {
                    PulseAction::Hold
                } else {
                    PulseAction::Advance {
                        target: now.min(last + self.increment_ms),
                    }
                }
            }

            TimeKeeperState::FastForwarding => {
                let target = now.min(last + self.increment_ms).max(last);
                if target >= now {
                    self.transition(TimeKeeperState::Running);
                }
                PulseAction::Advance { target }
            }
        }
    }

    fn transition(&mut self, to: TimeKeeperState) {
        if self.state != to {
            info!(from = ?self.state, to = ?to, "Time keeper state change");
            self.state = to;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keeper() -> TimeKeeper {
        TimeKeeper::new(&SimulationConfig {
            fast_forward_threshold_ms: 5_000,
            catch_up_increment_ms: 5_000,
            ..SimulationConfig::default()
        })
    }

    #[test]
    fn test_starts_running_and_advances_to_now() {
        let mut tk = keeper();
        assert_eq!(tk.state(), TimeKeeperState::Running);
        assert_eq!(tk.pulse(1_100, 1_000), PulseAction::Advance { target: 1_100 });
    }

    #[test]
    fn test_large_gap_pauses_and_prompts() {
        let mut tk = keeper();
        assert_eq!(
            tk.pulse(100_000, 0),
            PulseAction::PromptFastForward { gap_ms: 100_000 }
        );
        assert_eq!(tk.state(), TimeKeeperState::Paused);
        // Stays paused with the world pinned
        assert_eq!(tk.pulse(200_000, 0), PulseAction::Hold);
    }

    #[test]
    fn test_gap_at_threshold_does_not_prompt() {
        let mut tk = keeper();
        assert_eq!(tk.pulse(5_000, 0), PulseAction::Advance { target: 5_000 });
    }

    #[test]
    fn test_fast_forward_steps_by_increment_then_runs() {
        let mut tk = keeper();
        tk.fast_forward();
        assert_eq!(tk.pulse_interval(), None);

        let now = 12_000;
        let mut last = 0;
        let mut steps = Vec::new();
        while tk.state() == TimeKeeperState::FastForwarding {
            match tk.pulse(now, last) {
                PulseAction::Advance { target } => {
                    assert!(target - last <= 5_000);
                    steps.push(target);
                    last = target;
                }
                other => panic!("unexpected {other:?}"),
            }
        }
        assert_eq!(steps, vec![5_000, 10_000, 12_000]);
        assert_eq!(tk.state(), TimeKeeperState::Running);
        assert!(tk.pulse_interval().is_some());
    }

    #[test]
    fn test_pause_and_resume() {
        let mut tk = keeper();
        tk.pause();
        assert_eq!(tk.pulse(1_000, 900), PulseAction::Hold);
        tk.resume();
        assert_eq!(tk.state(), TimeKeeperState::Running);
        assert_eq!(tk.pulse(1_000, 900), PulseAction::Advance { target: 1_000 });
    }

    #[test]
    fn test_resume_does_not_cancel_fast_forward() {
        let mut tk = keeper();
        tk.fast_forward();
        tk.resume();
        assert_eq!(tk.state(), TimeKeeperState::FastForwarding);
    }
}
