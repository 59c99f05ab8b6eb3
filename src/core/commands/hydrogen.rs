use std::path::Path;
use std::sync::LazyLock;

use log::{info, warn};
use regex::Regex;

use crate::core::columns::{ATOM_NAME_COL, column};
use crate::{Error, Output, Result, raw_lines};

static HYDROGEN_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^H").expect("hydrogen pattern is a valid regex"));

/// Tells whether a record describes a hydrogen atom, i.e. whether its atom
/// name (columns 13-17, whitespace stripped) starts with `H`.
///
/// The test is case-sensitive and only looks at the first letter: ` CH3` is
/// not a hydrogen while ` HE1` is.
///
/// # Errors
///
/// [`Error::MalformedRecord`] if the line is shorter than 17 columns.
pub fn is_hydrogen(line: &str, line_number: usize) -> Result<bool> {
    let name = column(line, ATOM_NAME_COL, line_number)?;
    Ok(HYDROGEN_NAME.is_match(name.trim()))
}

/// Outcome of a hydrogen filtering pass.
#[derive(Debug, Default)]
pub struct FilterReport {
    pub kept: usize,
    pub removed: usize,
    /// Lines too short to carry an atom name; they are left out of the output.
    pub malformed: Vec<Error>,
}

impl FilterReport {
    pub fn is_clean(&self) -> bool {
        self.malformed.is_empty()
    }
}

/// Streams `lines` through the hydrogen test and passes every non-hydrogen
/// line to `emit`, unchanged.
///
/// Every record type is filtered the same way, not only ATOM records. Lines
/// are handled one at a time: a malformed line is recorded in the report and
/// skipped, the lines around it are not affected.
///
/// # Errors
///
/// Stops at the first error yielded by `lines` or returned by `emit`.
pub fn filter_hydrogens<I, F>(lines: I, mut emit: F) -> Result<FilterReport>
where
    I: IntoIterator<Item = Result<String>>,
    F: FnMut(&str) -> Result<()>,
{
    let mut report = FilterReport::default();

    for (idx, line) in lines.into_iter().enumerate() {
        let line = line?;
        match is_hydrogen(&line, idx + 1) {
            Ok(true) => report.removed += 1,
            Ok(false) => {
                emit(&line)?;
                report.kept += 1;
            }
            Err(e) => {
                warn!("Skipping {}", e);
                report.malformed.push(e);
            }
        }
    }

    Ok(report)
}

/// Removes the hydrogen atoms of the PDB file `infile` and writes the other
/// lines to `output`.
///
/// The input is opened before the output, so a missing input never creates
/// an output file.
pub fn remove_hydrogens(infile: &Path, output: &Output) -> Result<FilterReport> {
    let lines = raw_lines(infile)?;
    let mut writer = output.create()?;

    let report = filter_hydrogens(lines, |line| writer.write_line(line))?;
    writer.finish()?;

    info!(
        "Removed {} hydrogen records from {}, kept {}",
        report.removed,
        infile.display(),
        report.kept
    );

    Ok(report)
}
