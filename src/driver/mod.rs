//! Tree walker and driver facade

pub mod error;
pub mod facade;
pub mod walker;

pub use error::DriverError;
pub use facade::{Driver, DriverConfig};
pub use walker::{discover, MAX_DEPTH};
