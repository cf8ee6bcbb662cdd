use crate::foundation::core::{Bounds, Rect};
use crate::graph::model::Node;

/// Computes the rectangle enclosing a node set's rendered footprint.
pub trait BoundsCalculator {
    /// Return `None` when the set is empty or its extents are ill-defined.
    fn calculate(&self, nodes: &[Node]) -> Option<Bounds>;
}

/// Default calculator: union of each node's [`Node::footprint`].
#[derive(Clone, Copy, Debug, Default)]
pub struct FootprintBounds;

impl BoundsCalculator for FootprintBounds {
    fn calculate(&self, nodes: &[Node]) -> Option<Bounds> {
        calculate_node_bounds(nodes)
    }
}

impl<F> BoundsCalculator for F
where
    F: Fn(&[Node]) -> Option<Bounds>,
{
    fn calculate(&self, nodes: &[Node]) -> Option<Bounds> {
        self(nodes)
    }
}

/// Union of node footprints (position plus size), not just anchor points.
pub fn calculate_node_bounds(nodes: &[Node]) -> Option<Bounds> {
    let mut acc: Option<Rect> = None;
    for node in nodes {
        let r = node.footprint();
        if !(r.x0.is_finite() && r.y0.is_finite() && r.x1.is_finite() && r.y1.is_finite()) {
            return None;
        }
        if node.size.width < 0.0 || node.size.height < 0.0 {
            return None;
        }
        acc = Some(match acc {
            Some(a) => a.union(r),
            None => r,
        });
    }

    let bounds = Bounds::from_rect(acc?);
    bounds.is_well_defined().then_some(bounds)
}

#[cfg(test)]
#[path = "../../tests/unit/graph/bounds.rs"]
mod tests;
