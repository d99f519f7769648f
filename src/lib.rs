//! Find the oldest or newest regular file directly inside a directory.
//!
//! The search is a single pass over the directory's entries: subdirectories
//! and symlinks are skipped, and the remaining files are reduced to one name
//! by comparing modification times with a [`TimeComparator`].

pub mod cli;
pub mod error;

use chrono::{DateTime, Utc};
use std::fs;
use std::io;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, trace};

pub use error::SelectError;

pub type Result<T, E = SelectError> = std::result::Result<T, E>;

/// One immediate child of a listed directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    pub name: String,
    pub is_dir: bool,
    pub is_symlink: bool,
    pub modified_at: DateTime<Utc>,
}

impl DirectoryEntry {
    fn is_eligible(&self) -> bool {
        !self.is_dir && !self.is_symlink
    }
}

/// Decides whether a candidate's modification time beats the current best.
///
/// Both variants compare strictly, so a candidate tied with the current best
/// never replaces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeComparator {
    /// Candidate is older than the current best.
    Before,
    /// Candidate is newer than the current best.
    After,
}

impl TimeComparator {
    pub fn replaces(self, candidate: &DateTime<Utc>, current: &DateTime<Utc>) -> bool {
        match self {
            Self::Before => candidate < current,
            Self::After => candidate > current,
        }
    }
}

/// Lists the immediate entries of `directory` in filesystem order.
///
/// Entry metadata is read without following symlinks.
pub fn get_directory_entries(directory: &Path) -> Result<Vec<DirectoryEntry>> {
    let mut entries = Vec::new();

    for entry in fs::read_dir(directory).map_err(|e| SelectError::io(directory, e))? {
        let entry = entry.map_err(|e| SelectError::io(directory, e))?;
        let metadata = entry
            .metadata()
            .map_err(|e| SelectError::io(&entry.path(), e))?;
        let modified = metadata
            .modified()
            .map_err(|e| SelectError::io(&entry.path(), e))?;
        let modified_at = to_datetime(modified).ok_or_else(|| {
            SelectError::io(
                &entry.path(),
                io::Error::other("modification time out of range"),
            )
        })?;
        let file_type = metadata.file_type();

        entries.push(DirectoryEntry {
            name: entry.file_name().to_string_lossy().into_owned(),
            is_dir: file_type.is_dir(),
            is_symlink: file_type.is_symlink(),
            modified_at,
        });
    }

    debug!(directory = %directory.display(), count = entries.len(), "listed directory");
    Ok(entries)
}

/// Converts a filesystem time, returning `None` outside chrono's range.
fn to_datetime(time: SystemTime) -> Option<DateTime<Utc>> {
    let (secs, nanos) = match time.duration_since(UNIX_EPOCH) {
        Ok(after) => (i64::try_from(after.as_secs()).ok()?, after.subsec_nanos()),
        Err(err) => {
            let before = err.duration();
            let secs = i64::try_from(before.as_secs()).ok()?;
            match before.subsec_nanos() {
                0 => (-secs, 0),
                nanos => (-secs - 1, 1_000_000_000 - nanos),
            }
        }
    };
    DateTime::from_timestamp(secs, nanos)
}

/// Reduces `entries` to the name of the extremal regular file.
pub fn select_extremum<I>(entries: I, comparator: TimeComparator) -> Result<String>
where
    I: IntoIterator<Item = DirectoryEntry>,
{
    let mut best: Option<DirectoryEntry> = None;

    for entry in entries {
        if !entry.is_eligible() {
            trace!(name = %entry.name, "skipping directory or symlink");
            continue;
        }
        match &best {
            Some(current) if !comparator.replaces(&entry.modified_at, &current.modified_at) => {}
            _ => {
                trace!(name = %entry.name, modified_at = %entry.modified_at, "new best");
                best = Some(entry);
            }
        }
    }

    best.map(|entry| entry.name).ok_or(SelectError::NoFiles)
}

/// Lists `path` and selects one file from it with `comparator`.
pub fn find_file(path: &Path, comparator: TimeComparator) -> Result<String> {
    let entries = get_directory_entries(path)?;
    let name = select_extremum(entries, comparator)?;
    debug!(?comparator, %name, "selected file");
    Ok(name)
}

pub fn select_oldest(path: &Path) -> Result<String> {
    find_file(path, TimeComparator::Before)
}

pub fn select_newest(path: &Path) -> Result<String> {
    find_file(path, TimeComparator::After)
}
