//! Driver facade: session lifecycle plus the discover/export/load entry points

use std::path::Path;

use tracing::{debug, info, warn};

use crate::driver::error::DriverError;
use crate::driver::walker;
use crate::snapshot::{self, ExclusionSet, VariableSet};
use crate::transport::{Connector, NodeHandle, Session, TransportError};

/// Browse name of the variable container under the panel node
const TAGS_NODE: &str = "Tags";

/// Endpoint and namespace configuration for one driver connection
#[derive(Debug, Clone)]
pub struct DriverConfig {
    pub server_address: String,
    pub server_port: u16,
    pub protocol: String,
    pub objects_node_name: String,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            server_address: "localhost".to_string(),
            server_port: 4870,
            protocol: "opc.tcp".to_string(),
            objects_node_name: "WinCC Panel RT".to_string(),
        }
    }
}

impl DriverConfig {
    /// Endpoint URL in `protocol://address:port` form
    pub fn url(&self) -> String {
        format!(
            "{}://{}:{}",
            self.protocol, self.server_address, self.server_port
        )
    }
}

/// A connected panel driver
///
/// Owns its session exclusively and releases it on every exit path: dropping
/// the driver closes the session exactly once, and an explicit
/// [`disconnect`](Driver::disconnect) afterwards is a no-op.
pub struct Driver<S: Session> {
    session: Option<S>,
    root: S::Node,
}

impl<S: Session> std::fmt::Debug for Driver<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Driver").finish_non_exhaustive()
    }
}

impl<S: Session> Driver<S> {
    /// Open a session and resolve the variable root
    ///
    /// Connection and resolution failures surface immediately and are never
    /// retried; the session is released if root resolution fails.
    pub fn connect<C>(connector: &C, config: &DriverConfig) -> Result<Self, DriverError>
    where
        C: Connector<Session = S>,
    {
        let url = config.url();
        let mut session = connector.open(&url)?;

        let root = match session.resolve(&[&config.objects_node_name, TAGS_NODE]) {
            Ok(root) => root,
            Err(err) => {
                session.close();
                return Err(err.into());
            }
        };

        info!(url = %url, panel = %config.objects_node_name, "connected to panel");
        Ok(Self {
            session: Some(session),
            root,
        })
    }

    /// Discover all variables under the resolved root
    pub fn variables(&self) -> Result<VariableSet, DriverError> {
        walker::discover(&self.root, &ExclusionSet::empty())
    }

    /// Discover and export the current variables to a snapshot file
    ///
    /// Returns the exported set.
    pub fn export_variables(&self, path: &Path) -> Result<VariableSet, DriverError> {
        let set = self.variables()?;
        snapshot::export(&set, path)?;
        Ok(set)
    }

    /// Load a snapshot file
    pub fn load_variables(&self, path: &Path) -> Result<VariableSet, DriverError> {
        Ok(snapshot::load(path)?)
    }

    /// Write snapshot values back to the panel, matching nodes by name
    ///
    /// Best-effort: names that no longer resolve, or writes the node
    /// rejects, are logged and skipped. Returns the number of values applied.
    pub fn apply_variables(&self, set: &VariableSet) -> Result<usize, DriverError> {
        let mut applied = 0;
        for variable in set {
            let Some(node) = find_by_name(&self.root, &variable.name, 1) else {
                warn!(name = %variable.name, "variable not found on panel, skipping");
                continue;
            };
            match node.write_value(&variable.value) {
                Ok(()) => applied += 1,
                Err(TransportError::WriteRejected { reason, .. }) => {
                    warn!(name = %variable.name, reason = %reason, "write rejected, skipping");
                }
                Err(err) => return Err(err.into()),
            }
        }
        debug!(applied, total = set.len(), "applied snapshot to panel");
        Ok(applied)
    }

    /// Release the session; repeated calls are no-ops
    pub fn disconnect(&mut self) {
        if let Some(mut session) = self.session.take() {
            session.close();
            debug!("session released");
        }
    }
}

impl<S: Session> Drop for Driver<S> {
    fn drop(&mut self) {
        self.disconnect();
    }
}

fn find_by_name<N: NodeHandle>(node: &N, name: &str, depth: usize) -> Option<N> {
    if depth > walker::MAX_DEPTH {
        return None;
    }
    for child in node.children() {
        if child.name() == name {
            return Some(child);
        }
        if let Some(found) = find_by_name(&child, name, depth + 1) {
            return Some(found);
        }
    }
    None
}
