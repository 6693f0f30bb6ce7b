//! Simulation systems: the per-tick world update, resource lifecycle and
//! the time keeping that schedules it

pub mod harvest;
pub mod intent;
pub mod regrowth;
pub mod session;
pub mod tick;
pub mod timekeeper;

pub use intent::{Intent, Movement};
pub use session::{PulseOutcome, Session};
pub use tick::advance;
pub use timekeeper::{PulseAction, TimeKeeper, TimeKeeperState};
