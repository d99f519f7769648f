use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SelectError {
    /// The directory could not be listed, or is not a directory at all.
    #[error("cannot read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Listing succeeded but held nothing besides subdirectories and symlinks.
    #[error("no files found")]
    NoFiles,
}

impl SelectError {
    pub(crate) fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    /// The path the error occurred at, if any.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Io { path, .. } => Some(path),
            Self::NoFiles => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NoFiles)
    }
}
