use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while reading, editing or writing PDB records.
#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    Usage(String),

    #[error("file not found: `{}`, please check the file path", path.display())]
    FileNotFound { path: PathBuf },

    #[error("malformed record at line {line}: {length} columns, at least {required} required")]
    MalformedRecord {
        line: usize,
        length: usize,
        required: usize,
    },

    #[error("residue numbering starting at {start} overflows at line {line}")]
    NumberOverflow { start: i64, line: usize },

    #[error("I/O error on `{}`: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Wraps an I/O error raised while accessing `path`, singling out a
    /// missing file.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::NotFound => Error::FileNotFound { path },
            _ => Error::Io { path, source },
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
