//! Behavior graph - an arena of nodes plus a list of labeled edges
//!
//! Graphs are authored outside the simulation and may contain cycles, so
//! traversal is always bounded by `hop_limit()`.

use serde::{Deserialize, Serialize};

use crate::behavior::condition::{Comparison, Condition, QuantitySource};
use crate::core::error::{Result, SimError};
use crate::data::items::ItemKind;
use crate::data::resources::ResourceKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub u32);

/// What an actor works towards once traversal reaches a goal node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "objective", content = "target", rename_all = "snake_case")]
pub enum Objective {
    CollectResource(ResourceKind),
    /// Recipe id
    CraftItem(String),
    BuildStructure,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NodeKind {
    Entry,
    Condition(Condition),
    Goal { objective: Objective },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub kind: NodeKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeLabel {
    True,
    False,
}

impl From<bool> for EdgeLabel {
    fn from(value: bool) -> Self {
        if value {
            EdgeLabel::True
        } else {
            EdgeLabel::False
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub from: NodeId,
    pub to: NodeId,
    #[serde(default)]
    pub label: Option<EdgeLabel>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BehaviorGraph {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
}

impl BehaviorGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node with the next free id
    pub fn add_node(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(
            self.nodes
                .iter()
                .map(|n| n.id.0 + 1)
                .max()
                .unwrap_or(0),
        );
        self.nodes.push(Node { id, kind });
        id
    }

    pub fn add_entry(&mut self) -> NodeId {
        self.add_node(NodeKind::Entry)
    }

    pub fn add_condition(&mut self, source: QuantitySource, op: Comparison, threshold: f32) -> NodeId {
        self.add_node(NodeKind::Condition(Condition::new(source, op, threshold)))
    }

    pub fn add_goal(&mut self, objective: Objective) -> NodeId {
        self.add_node(NodeKind::Goal { objective })
    }

    /// Unlabeled edge, used out of the entry node
    pub fn connect(&mut self, from: NodeId, to: NodeId) {
        self.edges.push(Edge {
            from,
            to,
            label: None,
        });
    }

    /// Edge taken when a condition evaluates to `when`
    pub fn connect_when(&mut self, from: NodeId, when: bool, to: NodeId) {
        self.edges.push(Edge {
            from,
            to,
            label: Some(when.into()),
        });
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn entry(&self) -> Option<NodeId> {
        self.nodes
            .iter()
            .find(|n| matches!(n.kind, NodeKind::Entry))
            .map(|n| n.id)
    }

    /// First outgoing edge of `from`, regardless of label
    pub fn first_successor(&self, from: NodeId) -> Option<NodeId> {
        self.edges.iter().find(|e| e.from == from).map(|e| e.to)
    }

    /// Outgoing edge of `from` carrying `label`
    pub fn successor(&self, from: NodeId, label: EdgeLabel) -> Option<NodeId> {
        self.edges
            .iter()
            .find(|e| e.from == from && e.label == Some(label))
            .map(|e| e.to)
    }

    /// Maximum number of nodes a single traversal may visit
    pub fn hop_limit(&self) -> usize {
        (self.nodes.len() * 2).max(1)
    }

    /// Structural check: unique node ids, exactly one entry node, and every
    /// edge endpoint present
    pub fn validate(&self) -> Result<()> {
        for (i, node) in self.nodes.iter().enumerate() {
            if self.nodes[..i].iter().any(|n| n.id == node.id) {
                return Err(SimError::InvalidGraph(format!(
                    "duplicate node id {}",
                    node.id.0
                )));
            }
        }

        let entries = self
            .nodes
            .iter()
            .filter(|n| matches!(n.kind, NodeKind::Entry))
            .count();
        if entries != 1 {
            return Err(SimError::InvalidGraph(format!(
                "expected exactly one entry node, found {}",
                entries
            )));
        }

        for edge in &self.edges {
            for end in [edge.from, edge.to] {
                if self.node(end).is_none() {
                    return Err(SimError::InvalidGraph(format!(
                        "edge {} -> {} references missing node {}",
                        edge.from.0, edge.to.0, end.0
                    )));
                }
            }
        }

        Ok(())
    }

    /// Default survival routine: keep one drink and one food in stock when
    /// running low, gather ten sticks and ten stones, then build
    pub fn forager() -> Self {
        let mut g = Self::new();

        let entry = g.add_entry();
        let thirsty = g.add_condition(QuantitySource::Thirst, Comparison::Lt, 0.5);
        let no_water = g.add_condition(QuantitySource::Item(ItemKind::Water), Comparison::Lt, 1.0);
        let fetch_water = g.add_goal(Objective::CollectResource(ResourceKind::Pond));
        let hungry = g.add_condition(QuantitySource::Hunger, Comparison::Lt, 0.5);
        let no_food = g.add_condition(QuantitySource::Item(ItemKind::Berry), Comparison::Lt, 1.0);
        let pick_berries = g.add_goal(Objective::CollectResource(ResourceKind::BerryBush));
        let few_sticks = g.add_condition(QuantitySource::Item(ItemKind::Stick), Comparison::Lt, 10.0);
        let gather_sticks = g.add_goal(Objective::CollectResource(ResourceKind::Stick));
        let few_stones = g.add_condition(QuantitySource::Item(ItemKind::Stone), Comparison::Lt, 10.0);
        let gather_stones = g.add_goal(Objective::CollectResource(ResourceKind::Stone));
        let build = g.add_goal(Objective::BuildStructure);

        g.connect(entry, thirsty);
        g.connect_when(thirsty, true, no_water);
        g.connect_when(thirsty, false, hungry);
        g.connect_when(no_water, true, fetch_water);
        g.connect_when(no_water, false, hungry);
        g.connect_when(hungry, true, no_food);
        g.connect_when(hungry, false, few_sticks);
        g.connect_when(no_food, true, pick_berries);
        g.connect_when(no_food, false, few_sticks);
        g.connect_when(few_sticks, true, gather_sticks);
        g.connect_when(few_sticks, false, few_stones);
        g.connect_when(few_stones, true, gather_stones);
        g.connect_when(few_stones, false, build);

        g
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forager_is_valid() {
        let graph = BehaviorGraph::forager();
        assert!(graph.validate().is_ok());
        assert_eq!(graph.entry(), Some(NodeId(0)));
        assert_eq!(graph.hop_limit(), graph.nodes().len() * 2);
    }

    #[test]
    fn test_empty_graph_has_no_entry() {
        let graph = BehaviorGraph::new();
        assert!(graph.entry().is_none());
        assert_eq!(graph.hop_limit(), 1);
        assert!(matches!(graph.validate(), Err(SimError::InvalidGraph(_))));
    }

    #[test]
    fn test_two_entries_rejected() {
        let mut graph = BehaviorGraph::new();
        graph.add_entry();
        graph.add_entry();
        assert!(graph.validate().is_err());
    }

    #[test]
    fn test_dangling_edge_rejected() {
        let mut graph = BehaviorGraph::new();
        let entry = graph.add_entry();
        graph.connect(entry, NodeId(99));
        let err = graph.validate().unwrap_err();
        assert!(err.to_string().contains("99"));
    }

    #[test]
    fn test_successor_by_label() {
        let mut graph = BehaviorGraph::new();
        let cond = graph.add_condition(QuantitySource::Hunger, Comparison::Lt, 0.5);
        let yes = graph.add_goal(Objective::BuildStructure);
        let no = graph.add_goal(Objective::CraftItem("rope".into()));
        graph.connect_when(cond, false, no);
        graph.connect_when(cond, true, yes);

        assert_eq!(graph.successor(cond, EdgeLabel::True), Some(yes));
        assert_eq!(graph.successor(cond, EdgeLabel::False), Some(no));
        assert_eq!(graph.first_successor(cond), Some(no));
    }

    #[test]
    fn test_graph_json_shape() {
        let mut graph = BehaviorGraph::new();
        let entry = graph.add_entry();
        let goal = graph.add_goal(Objective::CollectResource(ResourceKind::Tree));
        graph.connect(entry, goal);

        let json = serde_json::to_string(&graph).unwrap();
        assert!(json.contains(r#""objective":"collect_resource","target":"tree""#));
        let back: BehaviorGraph = serde_json::from_str(&json).unwrap();
        assert_eq!(back, graph);
    }
}
