//! Driver error type

use thiserror::Error;

use crate::snapshot::SnapshotError;
use crate::transport::TransportError;

/// Error type for driver operations
#[derive(Debug, Error)]
pub enum DriverError {
    /// Session or node failure from the transport layer
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Snapshot file failure from the codec
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),

    /// The same node id was reached twice within one traversal
    #[error("cycle detected in namespace at node {node_id}")]
    TraversalCycle { node_id: String },

    /// Traversal descended past the defensive depth bound
    #[error("traversal exceeded maximum depth {max_depth} at node {node_id}")]
    DepthExceeded { node_id: String, max_depth: usize },
}
