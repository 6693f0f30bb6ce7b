//! Condition nodes - compare one actor quantity against a threshold

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::data::items::ItemKind;
use crate::entity::actor::Actor;

/// Tolerance for `=` and `!=` on float gauges
const EQ_EPSILON: f32 = 1e-4;

/// Where a condition reads its number from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", content = "item", rename_all = "snake_case")]
pub enum QuantitySource {
    Hunger,
    Thirst,
    /// Health divided by max health
    HealthRatio,
    /// Total held quantity of one item
    Item(ItemKind),
}

impl QuantitySource {
    pub fn read(&self, actor: &Actor) -> f32 {
        match self {
            QuantitySource::Hunger => actor.vitals.hunger,
            QuantitySource::Thirst => actor.vitals.thirst,
            QuantitySource::HealthRatio => actor.vitals.health_ratio(),
            QuantitySource::Item(item) => actor.inventory.quantity(*item) as f32,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Comparison {
    #[serde(rename = "=")]
    Eq,
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = ">=")]
    Gte,
    #[serde(rename = "<=")]
    Lte,
    #[serde(rename = "!=")]
    Neq,
}

impl Comparison {
    pub fn parse(symbol: &str) -> Option<Self> {
        match symbol.trim() {
            "=" | "==" => Some(Comparison::Eq),
            ">" => Some(Comparison::Gt),
            "<" => Some(Comparison::Lt),
            ">=" => Some(Comparison::Gte),
            "<=" => Some(Comparison::Lte),
            "!=" => Some(Comparison::Neq),
            _ => None,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Comparison::Eq => "=",
            Comparison::Gt => ">",
            Comparison::Lt => "<",
            Comparison::Gte => ">=",
            Comparison::Lte => "<=",
            Comparison::Neq => "!=",
        }
    }

    pub fn compare(&self, value: f32, threshold: f32) -> bool {
        match self {
            Comparison::Eq => (value - threshold).abs() <= EQ_EPSILON,
            Comparison::Gt => value > threshold,
            Comparison::Lt => value < threshold,
            Comparison::Gte => value >= threshold,
            Comparison::Lte => value <= threshold,
            Comparison::Neq => (value - threshold).abs() > EQ_EPSILON,
        }
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub source: QuantitySource,
    pub op: Comparison,
    pub threshold: f32,
}

impl Condition {
    pub fn new(source: QuantitySource, op: Comparison, threshold: f32) -> Self {
        Self {
            source,
            op,
            threshold,
        }
    }

    pub fn evaluate(&self, actor: &Actor) -> bool {
        self.op.compare(self.source.read(actor), self.threshold)
    }
}
