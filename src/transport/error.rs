//! Transport error taxonomy

use thiserror::Error;

/// Error type for session and node operations
///
/// None of these are retried by the core: connection and resolution failures
/// surface immediately, while `ValueUnavailable` is absorbed during traversal
/// (a container with no readable value is not an error).
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network/handshake failure while opening a session
    #[error("failed to connect to {url}: {reason}")]
    Connection { url: String, reason: String },

    /// The configured node path does not exist on the server
    #[error("node path not found: {path}")]
    NodeResolution { path: String },

    /// A single node's value cannot be read
    #[error("value unavailable for node {node_id}")]
    ValueUnavailable { node_id: String },

    /// A value write was rejected by the node
    #[error("write rejected for node {node_id}: {reason}")]
    WriteRejected { node_id: String, reason: String },
}
