//! Snapshot file round-trip
//!
//! A snapshot is a pretty-printed JSON array of `{name, node_id, value}`
//! records in discovery order, one document per file. Export replaces the
//! target atomically so a failed write never leaves a truncated document.

use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::debug;

use super::model::VariableSet;

/// Error type for snapshot export/load operations
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// Target path could not be written
    #[error("failed to write snapshot {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// File is not a well-formed snapshot document
    #[error("failed to parse snapshot {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// File could not be opened or read
    #[error("failed to read snapshot {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Serialize a variable set to `path`
///
/// Writes to a temp file in the target directory and renames it into place,
/// so the prior file is untouched unless the full document was written.
pub fn export(set: &VariableSet, path: &Path) -> Result<(), SnapshotError> {
    let write_err = |source| SnapshotError::Write {
        path: path.to_path_buf(),
        source,
    };

    let dir = path.parent().filter(|p| !p.as_os_str().is_empty());
    let mut staged = NamedTempFile::new_in(dir.unwrap_or_else(|| Path::new(".")))
        .map_err(write_err)?;

    serde_json::to_writer_pretty(&mut staged, set).map_err(|e| write_err(e.into()))?;
    staged.write_all(b"\n").map_err(write_err)?;
    staged
        .persist(path)
        .map_err(|e| write_err(e.error))?;

    debug!(path = %path.display(), count = set.len(), "exported snapshot");
    Ok(())
}

/// Parse a snapshot file back into a variable set
///
/// Fails without returning a partial set if any record is malformed or is
/// missing a required field. Extra fields on a record are ignored.
pub fn load(path: &Path) -> Result<VariableSet, SnapshotError> {
    let file = File::open(path).map_err(|source| SnapshotError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let set: VariableSet =
        serde_json::from_reader(BufReader::new(file)).map_err(|source| SnapshotError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    debug!(path = %path.display(), count = set.len(), "loaded snapshot");
    Ok(set)
}
