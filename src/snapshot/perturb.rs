//! Randomized perturbation of snapshot values
//!
//! Produces synthetic test data from an exported snapshot: numeric values
//! are jittered within a bounded offset and booleans are redrawn, while
//! excluded tags and string values pass through untouched.

use rand::Rng;
use tracing::trace;

use super::model::{ExclusionSet, Value, VariableSet};

/// Default jitter bound applied to numeric values
pub const DEFAULT_JITTER: f64 = 10.0;

/// Perturb a variable set using the process-local RNG
///
/// Not reproducible across runs; tests wanting determinism should call
/// [`perturb_with`] with a seeded RNG.
pub fn perturb(set: &VariableSet, exclude: &ExclusionSet, jitter: f64) -> VariableSet {
    perturb_with(set, exclude, jitter, &mut rand::rng())
}

/// Perturb a variable set, drawing randomness from `rng`
///
/// For each variable, in input order:
/// - names in `exclude` are copied unchanged;
/// - numeric values get a uniform offset in `[-jitter, +jitter]`;
/// - booleans are redrawn uniformly (an even chance of flipping);
/// - strings are copied unchanged.
///
/// The output has the same length and order as the input, and only `value`
/// fields of non-excluded numeric/boolean entries may differ.
pub fn perturb_with<R: Rng>(
    set: &VariableSet,
    exclude: &ExclusionSet,
    jitter: f64,
    rng: &mut R,
) -> VariableSet {
    set.iter()
        .map(|variable| {
            let mut out = variable.clone();
            if exclude.contains(&out.name) {
                return out;
            }
            match out.value {
                Value::Number(v) => {
                    let offset = rng.random_range(-jitter..=jitter);
                    trace!(name = %out.name, offset, "jittered numeric value");
                    out.value = Value::Number(v + offset);
                }
                Value::Bool(_) => {
                    out.value = Value::Bool(rng.random_bool(0.5));
                }
                Value::Text(_) => {}
            }
            out
        })
        .collect()
}
