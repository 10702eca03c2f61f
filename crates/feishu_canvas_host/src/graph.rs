//! The owning graph as seen from a node.

use crate::node::NodeId;

/// Host graph services reachable from a node instance.
///
/// Nodes hold this only weakly (see [`NodeInstance::graph`](crate::node::NodeInstance::graph)).
pub trait GraphHandle: Send + Sync {
    /// Asks the host scheduler to run the graph from `step` for `node_id`.
    ///
    /// Fire-and-forget: the request is handed to the host and this returns
    /// immediately.
    fn run_step(&self, step: usize, node_id: NodeId);
}
