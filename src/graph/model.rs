use crate::foundation::core::{Point, Rect, Rgba8, Size, point_repr, size_repr};
use crate::foundation::error::{GraphshotError, GraphshotResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Height of the title bar drawn above a node's origin.
pub const NODE_TITLE_HEIGHT: f64 = 30.0;
/// Width of a collapsed node's title pill.
pub const NODE_COLLAPSED_WIDTH: f64 = 80.0;
/// Vertical distance between consecutive slots.
pub const NODE_SLOT_HEIGHT: f64 = 20.0;

/// Stable node identifier.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct NodeId(pub u64);

/// A graph node as seen by the snapshot renderer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Identifier, unique within a graph.
    pub id: NodeId,
    /// Display title.
    #[serde(default)]
    pub title: String,
    /// Top-left of the body in graph space (the title bar sits above it).
    #[serde(with = "point_repr")]
    pub pos: Point,
    /// Body size.
    #[serde(with = "size_repr")]
    pub size: Size,
    /// Collapsed nodes render as a title pill only.
    #[serde(default)]
    pub collapsed: bool,
    /// Number of input slots on the left edge.
    #[serde(default)]
    pub inputs: u32,
    /// Number of output slots on the right edge.
    #[serde(default)]
    pub outputs: u32,
    /// Title bar colour override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Rgba8>,
    /// Body colour override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bgcolor: Option<Rgba8>,
    /// Set when the node instantiates a sub-graph.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subgraph: Option<String>,
}

impl Node {
    /// Plain node with no slots.
    pub fn new(id: u64, pos: Point, size: Size) -> Self {
        Self {
            id: NodeId(id),
            title: String::new(),
            pos,
            size,
            collapsed: false,
            inputs: 0,
            outputs: 0,
            color: None,
            bgcolor: None,
            subgraph: None,
        }
    }

    /// Builder-style slot counts.
    pub fn with_slots(mut self, inputs: u32, outputs: u32) -> Self {
        self.inputs = inputs;
        self.outputs = outputs;
        self
    }

    /// Footprint in graph space: `pos` plus the stored `size`, excluding the title bar.
    ///
    /// Collapsed nodes keep their stored size here so bounds stay stable when toggling.
    pub fn footprint(&self) -> Rect {
        Rect::from_origin_size(self.pos, self.size)
    }

    /// Node-local anchor of input slot `slot`.
    pub fn input_anchor(&self, slot: u32) -> Point {
        if self.collapsed {
            return Point::new(0.0, -NODE_TITLE_HEIGHT * 0.5);
        }
        Point::new(0.0, slot_offset_y(slot))
    }

    /// Node-local anchor of output slot `slot`.
    pub fn output_anchor(&self, slot: u32) -> Point {
        if self.collapsed {
            return Point::new(self.size.width.min(NODE_COLLAPSED_WIDTH), -NODE_TITLE_HEIGHT * 0.5);
        }
        Point::new(self.size.width, slot_offset_y(slot))
    }
}

fn slot_offset_y(slot: u32) -> f64 {
    NODE_SLOT_HEIGHT * 0.7 + f64::from(slot) * NODE_SLOT_HEIGHT
}

/// A connection from an output slot to an input slot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Link {
    /// Link identifier.
    pub id: u64,
    /// Source node.
    pub origin: NodeId,
    /// Output slot on the source node.
    #[serde(default)]
    pub origin_slot: u32,
    /// Destination node.
    pub target: NodeId,
    /// Input slot on the destination node.
    #[serde(default)]
    pub target_slot: u32,
    /// Data type carried by the link; drives colour lookup.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

/// Ordered collection of nodes and the links between them.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Graph {
    /// Nodes in native (draw) order.
    #[serde(default)]
    pub nodes: Vec<Node>,
    /// Links in native order.
    #[serde(default)]
    pub links: Vec<Link>,
}

impl Graph {
    /// Empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Graph holding `nodes` and no links.
    pub fn from_nodes(nodes: Vec<Node>) -> Self {
        Self {
            nodes,
            links: Vec::new(),
        }
    }

    /// `true` when the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Look up a node by id.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Check id uniqueness and that every link references existing nodes and slots.
    pub fn validate(&self) -> GraphshotResult<()> {
        let mut seen = BTreeSet::new();
        for n in &self.nodes {
            if !seen.insert(n.id) {
                return Err(GraphshotError::validation(format!(
                    "duplicate node id {}",
                    n.id.0
                )));
            }
        }

        for l in &self.links {
            let origin = self.node(l.origin).ok_or_else(|| {
                GraphshotError::validation(format!(
                    "link {} references missing origin node {}",
                    l.id, l.origin.0
                ))
            })?;
            let target = self.node(l.target).ok_or_else(|| {
                GraphshotError::validation(format!(
                    "link {} references missing target node {}",
                    l.id, l.target.0
                ))
            })?;
            if l.origin_slot >= origin.outputs {
                return Err(GraphshotError::validation(format!(
                    "link {} uses output slot {} but node {} has {} outputs",
                    l.id, l.origin_slot, origin.id.0, origin.outputs
                )));
            }
            if l.target_slot >= target.inputs {
                return Err(GraphshotError::validation(format!(
                    "link {} uses input slot {} but node {} has {} inputs",
                    l.id, l.target_slot, target.id.0, target.inputs
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/graph/model.rs"]
mod tests;
