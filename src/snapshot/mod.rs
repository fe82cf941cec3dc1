//! Snapshot model, file codec, and perturbation engine

pub mod codec;
pub mod model;
pub mod perturb;

pub use codec::{export, load, SnapshotError};
pub use model::{ExclusionSet, Value, Variable, VariableSet};
pub use perturb::{perturb, perturb_with, DEFAULT_JITTER};
