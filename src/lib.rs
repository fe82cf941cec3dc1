pub mod driver;
pub mod snapshot;
pub mod transport;

pub use driver::{discover, Driver, DriverConfig, DriverError};
pub use snapshot::{
    export, load, perturb, perturb_with, ExclusionSet, SnapshotError, Value, Variable,
    VariableSet, DEFAULT_JITTER,
};
pub use transport::{Connector, NodeHandle, Session, SimConnector, SimNode, TransportError};
