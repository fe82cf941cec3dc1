//! Transport seam between the driver core and a panel server
//!
//! The core only ever talks to the server through these three traits, so a
//! real OPC UA session and the in-memory [`sim`] panel are interchangeable.
//! The handles are blocking and single-owner: a `Session` must not be shared
//! across threads without external synchronization.

pub mod error;
pub mod sim;

pub use error::TransportError;
pub use sim::{SimConnector, SimNode, SimSession};

use crate::snapshot::Value;

/// A capability handle to one server-side node
pub trait NodeHandle: Sized {
    /// Display name of the node
    fn name(&self) -> String;

    /// Stable node identifier, valid for the lifetime of the session
    fn node_id(&self) -> String;

    /// Read the node's current value
    ///
    /// Pure containers have no value and fail with
    /// [`TransportError::ValueUnavailable`].
    fn value(&self) -> Result<Value, TransportError>;

    /// Write a new value to the node
    fn write_value(&self, value: &Value) -> Result<(), TransportError>;

    /// Enumerate the node's direct children
    fn children(&self) -> Vec<Self>;
}

/// An open connection to a panel server
pub trait Session {
    type Node: NodeHandle;

    /// Resolve a node by browse path relative to the objects node
    fn resolve(&self, path: &[&str]) -> Result<Self::Node, TransportError>;

    /// Close the session; releasing an already-closed session is a no-op
    fn close(&mut self);
}

/// Factory that opens sessions against an endpoint URL
pub trait Connector {
    type Session: Session;

    fn open(&self, url: &str) -> Result<Self::Session, TransportError>;
}
