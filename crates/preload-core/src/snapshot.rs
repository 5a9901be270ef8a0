//! Snapshot file: the resolved items of one batch run, as pretty-printed JSON.
//!
//! The file is a single array of objects, one per found item, each holding the
//! item's metadata followed by `download_url`. Non-ASCII text is written as-is.
//! Writes go to a temp file in the destination directory that is renamed over
//! the destination, so a failed write never leaves a partial snapshot behind.

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

use crate::item::{Record, ResolvedItem};

const INDENT: &[u8] = b"    ";

#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    /// Destination not writable (missing directory, permissions, disk full, ...).
    #[error("failed to write snapshot {}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to serialize snapshot")]
    Serialize(#[source] serde_json::Error),
    #[error("failed to read snapshot {}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse snapshot {}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

fn io_error(path: &Path, source: std::io::Error) -> SnapshotError {
    SnapshotError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Write `items` to `dest`, replacing any existing file.
pub fn write_snapshot(items: &[ResolvedItem], dest: &Path) -> Result<(), SnapshotError> {
    let dir = match dest.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| io_error(dest, e))?;

    {
        let mut writer = BufWriter::new(tmp.as_file_mut());
        let mut ser = Serializer::with_formatter(&mut writer, PrettyFormatter::with_indent(INDENT));
        items.serialize(&mut ser).map_err(|e| {
            if e.is_io() {
                io_error(dest, e.into())
            } else {
                SnapshotError::Serialize(e)
            }
        })?;
        writer.write_all(b"\n").map_err(|e| io_error(dest, e))?;
        writer.flush().map_err(|e| io_error(dest, e))?;
    }
    tmp.as_file().sync_all().map_err(|e| io_error(dest, e))?;
    tmp.persist(dest).map_err(|e| io_error(dest, e.error))?;

    tracing::debug!(path = %dest.display(), items = items.len(), "snapshot written");
    Ok(())
}

/// Read a snapshot back as a list of entries (metadata + `download_url`).
pub fn read_snapshot(path: &Path) -> Result<Vec<Record>, SnapshotError> {
    let bytes = std::fs::read(path).map_err(|source| SnapshotError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_slice(&bytes).map_err(|source| SnapshotError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
