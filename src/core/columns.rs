use std::ops::Range;

use crate::{Error, Result};

/// Atom name, inspected by the hydrogen filter.
pub const ATOM_NAME_COL: Range<usize> = 12..17;

/// Composite residue identity: residue name, chain id, sequence number and
/// insertion code. Two atoms belong to the same residue iff these bytes match.
pub const RESKEY_COL: Range<usize> = 17..27;

/// Right-justified residue sequence number, overwritten by the renumberer.
pub const RESNUM_COL: Range<usize> = 22..26;

/// Leading bytes of the records kept by the atom extractor.
pub const ATOM_TAG: &str = "ATOM";

/// Splits a raw line into its content and its line terminator (`\n`,
/// `\r\n` or nothing for a final unterminated line).
pub fn split_terminator(line: &str) -> (&str, &str) {
    let content = line.trim_end_matches(['\n', '\r']);
    (content, &line[content.len()..])
}

/// Returns the bytes of `line` covered by `col`.
///
/// The line terminator does not count towards the record length. A record
/// that is too short, or whose column does not fall on character boundaries,
/// is reported as [`Error::MalformedRecord`] with the given 1-based line
/// number.
pub fn column<'a>(line: &'a str, col: Range<usize>, line_number: usize) -> Result<&'a str> {
    let (content, _) = split_terminator(line);
    let required = col.end;
    content.get(col).ok_or(Error::MalformedRecord {
        line: line_number,
        length: content.len(),
        required,
    })
}
