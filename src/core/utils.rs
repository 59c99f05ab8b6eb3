use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// Where edited records are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    Stdout,
    File(PathBuf),
}

impl Output {
    fn path(&self) -> &Path {
        match self {
            Output::Stdout => Path::new("<stdout>"),
            Output::File(path) => path,
        }
    }

    /// Opens a buffered writer on the destination, creating or truncating the
    /// file if needed.
    pub fn create(&self) -> Result<OutputWriter> {
        let inner: Box<dyn Write> = match self {
            Output::Stdout => Box::new(io::stdout().lock()),
            Output::File(path) => Box::new(File::create(path).map_err(|source| Error::Io {
                path: path.clone(),
                source,
            })?),
        };

        Ok(OutputWriter {
            path: self.path().to_path_buf(),
            inner: BufWriter::new(inner),
        })
    }
}

impl fmt::Display for Output {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path().display())
    }
}

/// Buffered writer that tags write errors with the destination path.
pub struct OutputWriter {
    path: PathBuf,
    inner: BufWriter<Box<dyn Write>>,
}

impl OutputWriter {
    pub fn write_line(&mut self, line: &str) -> Result<()> {
        self.inner
            .write_all(line.as_bytes())
            .map_err(|e| self.error(e))
    }

    /// Flushes the buffer; dropping the writer without calling this would
    /// swallow the final write error.
    pub fn finish(mut self) -> Result<()> {
        self.inner.flush().map_err(|e| self.error(e))
    }

    fn error(&self, source: io::Error) -> Error {
        Error::Io {
            path: self.path.clone(),
            source,
        }
    }
}

/// Writes `lines` verbatim to `output`. Lines carry their own terminators.
pub fn write_lines(lines: &[String], output: &Output) -> Result<()> {
    let mut writer = output.create()?;
    for line in lines {
        writer.write_line(line)?;
    }
    writer.finish()
}
