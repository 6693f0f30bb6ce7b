//! Actor behavior engine
//!
//! A behavior graph is consulted once per tick and yields a single intent.

pub mod condition;
pub mod decide;
pub mod graph;

pub use condition::{Comparison, Condition, QuantitySource};
pub use decide::decide;
pub use graph::{BehaviorGraph, Edge, EdgeLabel, Node, NodeId, NodeKind, Objective};
