use crate::foundation::error::{GraphshotError, GraphshotResult};
use crate::graph::model::Graph;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Editor-side graph state: the root graph, its sub-graphs and the current focus.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Workspace {
    /// Top-level graph.
    #[serde(default)]
    pub root: Graph,
    /// Sub-graph definitions keyed by id.
    #[serde(default)]
    pub subgraphs: BTreeMap<String, Graph>,
    /// Sub-graph the user has navigated into, if any.
    #[serde(default)]
    pub focused: Option<String>,
}

impl Workspace {
    /// Workspace with only a root graph.
    pub fn new(root: Graph) -> Self {
        Self {
            root,
            ..Self::default()
        }
    }

    /// Top-level graph.
    pub fn root(&self) -> &Graph {
        &self.root
    }

    /// Focused sub-graph, when the focus id resolves.
    pub fn focused_subgraph(&self) -> Option<&Graph> {
        self.focused.as_ref().and_then(|id| self.subgraphs.get(id))
    }

    /// The graph an export should target: focused sub-graph first, else the root.
    pub fn active_graph(&self) -> &Graph {
        self.focused_subgraph().unwrap_or(&self.root)
    }

    /// Focus a sub-graph by id (`None` returns to the root).
    pub fn focus(&mut self, id: Option<&str>) -> GraphshotResult<()> {
        match id {
            None => self.focused = None,
            Some(id) if self.subgraphs.contains_key(id) => self.focused = Some(id.to_owned()),
            Some(id) => {
                return Err(GraphshotError::validation(format!(
                    "unknown subgraph '{id}'"
                )));
            }
        }
        Ok(())
    }

    /// Validate the root and every sub-graph.
    pub fn validate(&self) -> GraphshotResult<()> {
        self.root.validate()?;
        for (id, g) in &self.subgraphs {
            g.validate()
                .map_err(|e| GraphshotError::validation(format!("subgraph '{id}': {e}")))?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/graph/workspace.rs"]
mod tests;
