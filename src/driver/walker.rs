//! Recursive discovery of panel variables
//!
//! Walks the namespace depth-first from a resolved root, collecting one
//! record per readable node in pre-order. Namespaces are expected to be
//! acyclic trees, but the walk still tracks visited node ids and bounds its
//! depth so a misconfigured server cannot recurse forever.

use std::collections::HashSet;

use tracing::debug;

use crate::driver::error::DriverError;
use crate::snapshot::{ExclusionSet, Variable, VariableSet};
use crate::transport::{NodeHandle, TransportError};

/// Defensive recursion bound; real panel namespaces are a handful of levels
pub const MAX_DEPTH: usize = 32;

/// Discover all variables under `root`, skipping names in `exclude`
///
/// Excluded nodes are assumed to be leaves and are not descended into. A
/// node whose value read fails contributes no record but is still traversed
/// for children; a childless node with no readable value is skipped silently.
pub fn discover<N: NodeHandle>(
    root: &N,
    exclude: &ExclusionSet,
) -> Result<VariableSet, DriverError> {
    let mut variables = Vec::new();
    let mut visited = HashSet::new();
    walk(root, exclude, &mut visited, &mut variables, 1)?;
    debug!(count = variables.len(), "discovery pass complete");
    Ok(VariableSet::new(variables))
}

fn walk<N: NodeHandle>(
    node: &N,
    exclude: &ExclusionSet,
    visited: &mut HashSet<String>,
    out: &mut Vec<Variable>,
    depth: usize,
) -> Result<(), DriverError> {
    for child in node.children() {
        let name = child.name();
        if exclude.contains(&name) {
            debug!(name = %name, "skipping excluded node");
            continue;
        }

        let node_id = child.node_id();
        if !visited.insert(node_id.clone()) {
            return Err(DriverError::TraversalCycle { node_id });
        }
        if depth > MAX_DEPTH {
            return Err(DriverError::DepthExceeded {
                node_id,
                max_depth: MAX_DEPTH,
            });
        }

        match child.value() {
            Ok(value) => out.push(Variable {
                name,
                node_id,
                value,
            }),
            Err(TransportError::ValueUnavailable { .. }) => {}
            Err(err) => return Err(err.into()),
        }

        walk(&child, exclude, visited, out, depth + 1)?;
    }
    Ok(())
}
