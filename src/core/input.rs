use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use log::debug;

use crate::core::columns::ATOM_TAG;
use crate::{Error, Result};

/// Opens `path` for buffered reading.
///
/// A missing file is reported as [`Error::FileNotFound`], any other failure
/// as [`Error::Io`].
pub fn open_pdb(path: &Path) -> Result<BufReader<File>> {
    let file = File::open(path).map_err(|e| Error::io(path, e))?;
    Ok(BufReader::new(file))
}

/// Iterator over the lines of a reader that keeps line terminators, unlike
/// [`BufRead::lines`]. Read errors are tagged with the source path.
pub struct RawLines<R> {
    reader: R,
    path: PathBuf,
}

impl<R: BufRead> RawLines<R> {
    pub fn new(reader: R, path: impl Into<PathBuf>) -> Self {
        RawLines {
            reader,
            path: path.into(),
        }
    }
}

impl<R: BufRead> Iterator for RawLines<R> {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut line = String::new();
        match self.reader.read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => Some(Ok(line)),
            Err(e) => Some(Err(Error::io(&self.path, e))),
        }
    }
}

/// Opens `path` and iterates over its raw lines.
pub fn raw_lines(path: &Path) -> Result<RawLines<BufReader<File>>> {
    Ok(RawLines::new(open_pdb(path)?, path))
}

/// Keeps the lines of `content` starting with `ATOM`, in their original
/// order and with their line terminators.
///
/// HETATM, TER, END and header records are dropped on purpose: only ATOM
/// records take part in renumbering.
pub fn extract_atom_lines(content: &str) -> Vec<String> {
    content
        .split_inclusive('\n')
        .filter(|line| line.starts_with(ATOM_TAG))
        .map(String::from)
        .collect()
}

/// Reads the ATOM records of the PDB file at `path`.
///
/// # Errors
///
/// * [`Error::FileNotFound`] if `path` does not exist.
/// * [`Error::Io`] if the file cannot be read, including non UTF-8 content.
pub fn read_atom_lines(path: &Path) -> Result<Vec<String>> {
    let mut atoms = Vec::new();
    let mut total = 0;

    for line in raw_lines(path)? {
        let line = line?;
        total += 1;
        if line.starts_with(ATOM_TAG) {
            atoms.push(line);
        }
    }

    debug!(
        "Kept {} ATOM records out of {} lines in {}",
        atoms.len(),
        total,
        path.display()
    );

    Ok(atoms)
}

#[cfg(test)]
mod tests {

    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_extract_atom_lines_mixed_records() {
        let content = "\
HEADER    TEST
REMARK 1 Test remark
ATOM      1  N   ALA A   1      11.104   6.134  -6.504  1.00  0.00           N
HETATM    2  O   HOH A   2       1.000   1.000   1.000  1.00  0.00           O
ATOM      3  CA  GLY A   3      12.104   7.134  -5.504  1.00  0.00           C
TER
END
";
        let atoms = extract_atom_lines(content);

        assert_eq!(atoms.len(), 2);
        assert!(atoms[0].starts_with("ATOM      1"));
        assert!(atoms[1].starts_with("ATOM      3"));
        assert!(atoms.iter().all(|l| l.ends_with('\n')));
    }

    #[test]
    fn test_extract_atom_lines_keeps_unterminated_last_line() {
        let content = "ATOM      1  N   ALA A   1\nATOM      2  CA  ALA A   1";
        let atoms = extract_atom_lines(content);

        assert_eq!(atoms, vec!["ATOM      1  N   ALA A   1\n", "ATOM      2  CA  ALA A   1"]);
    }

    #[test]
    fn test_extract_atom_lines_empty_input() {
        assert!(extract_atom_lines("").is_empty());
    }

    #[test]
    fn test_read_atom_lines_from_file() {
        let atoms = read_atom_lines(Path::new("tests/data/mixed_records.pdb")).unwrap();
        let content = std::fs::read_to_string("tests/data/mixed_records.pdb").unwrap();

        assert_eq!(atoms, extract_atom_lines(&content));
        assert!(atoms.iter().all(|l| l.starts_with("ATOM")));
        assert_eq!(atoms.len(), 5);
    }

    #[test]
    fn test_read_atom_lines_preserves_crlf() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            "REMARK 1\r\nATOM      1  N   ALA A   1\r\nHETATM    2  O   HOH\r\n"
        )
        .unwrap();

        let atoms = read_atom_lines(file.path()).unwrap();
        assert_eq!(atoms, vec!["ATOM      1  N   ALA A   1\r\n"]);
    }

    #[test]
    fn test_raw_lines_keeps_terminators() {
        let reader = std::io::Cursor::new("REMARK 1\nATOM\r\nEND");
        let lines: Vec<String> = RawLines::new(reader, "inline.pdb")
            .collect::<Result<_>>()
            .unwrap();

        assert_eq!(lines, vec!["REMARK 1\n", "ATOM\r\n", "END"]);
    }

    #[test]
    fn test_raw_lines_invalid_utf8() {
        let reader = std::io::Cursor::new(vec![0x41, 0xff, 0xfe, 0x0a]);
        let mut lines = RawLines::new(reader, "binary.pdb");

        assert!(matches!(lines.next(), Some(Err(Error::Io { .. }))));
    }

    #[test]
    fn test_read_atom_lines_missing_file() {
        let result = read_atom_lines(Path::new("tests/data/does_not_exist.pdb"));
        assert!(matches!(result, Err(Error::FileNotFound { .. })));
    }
}
