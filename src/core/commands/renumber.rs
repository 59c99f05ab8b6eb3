use std::collections::HashSet;
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::core::columns::{RESKEY_COL, RESNUM_COL, column};
use crate::{Error, Output, Result, read_atom_lines, write_lines};

/// Accumulator threaded through the renumbering fold.
///
/// `seen` holds every residue key met so far, not only the last one, and
/// `counter` is the residue number handed out most recently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenumberState {
    pub seen: HashSet<String>,
    pub counter: i64,
}

impl RenumberState {
    /// Starts a fold whose first new residue will be numbered `start`
    /// (or 1 when no start is given).
    ///
    /// Returns `None` for `i64::MIN`, which leaves no room for the counter.
    pub fn new(start: Option<i64>) -> Option<Self> {
        let counter = match start {
            Some(s) => s.checked_sub(1)?,
            None => 0,
        };
        Some(RenumberState {
            seen: HashSet::new(),
            counter,
        })
    }

    /// Number of distinct residue keys encountered.
    pub fn residues(&self) -> usize {
        self.seen.len()
    }

    /// Consumes one record and returns the state together with the number to
    /// stamp on it.
    ///
    /// A key already in `seen` gets the *current* counter, whatever residue
    /// bumped it last. For a residue whose atoms are split by other residues
    /// this is not the number it was first given; the behavior is kept as is
    /// and callers relying on stable numbers must feed contiguous residues.
    ///
    /// Returns `None` when the next number does not fit in an `i64`.
    fn step(mut self, key: &str) -> Option<(Self, i64)> {
        if !self.seen.contains(key) {
            self.counter = self.counter.checked_add(1)?;
            self.seen.insert(key.to_string());
        }
        let number = self.counter;
        Some((self, number))
    }
}

/// Writes `number` into the residue sequence number field of `line`.
///
/// The number is right-justified on 4 columns. Numbers wider than that grow
/// the field and shift the columns that follow.
fn stamp(line: &str, number: i64) -> String {
    format!(
        "{}{:>4}{}",
        &line[..RESNUM_COL.start],
        number,
        &line[RESNUM_COL.end..]
    )
}

/// Renumbers residues in a list of ATOM records.
///
/// Each new residue key (columns 18-27) gets the next number, starting at
/// `start` (1 if `None`). Only columns 23-26 change; everything else in a
/// line, its terminator included, is copied verbatim.
///
/// # Arguments
///
/// * `lines` - ATOM records, typically from [`read_atom_lines`].
/// * `start` - The number given to the first residue.
///
/// # Returns
///
/// The renumbered lines, in input order, and the final fold state.
///
/// # Errors
///
/// * [`Error::MalformedRecord`] for the first line shorter than 27 columns.
/// * [`Error::NumberOverflow`] when a residue number does not fit in an `i64`.
///
/// Numbering depends on every previous line, so nothing is returned in
/// either case.
pub fn renumber_lines<S: AsRef<str>>(
    lines: &[S],
    start: Option<i64>,
) -> Result<(Vec<String>, RenumberState)> {
    let overflow = |line| Error::NumberOverflow {
        start: start.unwrap_or(1),
        line,
    };
    let initial = RenumberState::new(start).ok_or_else(|| overflow(1))?;

    lines.iter().enumerate().try_fold(
        (Vec::with_capacity(lines.len()), initial),
        |(mut renumbered, state), (idx, line)| {
            let line = line.as_ref();
            let key = column(line, RESKEY_COL, idx + 1)?;
            // the splice points must sit on char boundaries too
            column(line, RESNUM_COL, idx + 1)?;
            let (state, number) = state.step(key).ok_or_else(|| overflow(idx + 1))?;
            renumbered.push(stamp(line, number));
            Ok::<_, Error>((renumbered, state))
        },
    )
}

/// Where the renumbered records go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// Overwrite the input file.
    Inline,
    /// Write to a separate file.
    File(PathBuf),
    Stdout,
}

impl Target {
    /// Resolves the destination from the command-line style pair of an
    /// optional output path and the inline flag.
    ///
    /// # Errors
    ///
    /// [`Error::Usage`] if both an output path and `inline` are given.
    pub fn resolve(outfile: Option<&Path>, inline: bool) -> Result<Self> {
        match (outfile, inline) {
            (Some(_), true) => Err(Error::Usage(
                "The --inline option cannot be used with an output file.".to_string(),
            )),
            (Some(path), false) => Ok(Target::File(path.to_path_buf())),
            (None, true) => Ok(Target::Inline),
            (None, false) => Ok(Target::Stdout),
        }
    }

    fn output(&self, infile: &Path) -> Output {
        match self {
            Target::Inline => Output::File(infile.to_path_buf()),
            Target::File(path) => Output::File(path.clone()),
            Target::Stdout => Output::Stdout,
        }
    }
}

/// Renumbers the residues of the ATOM records in `infile` and writes them to
/// `target`.
///
/// Non-ATOM records are dropped. The input is fully read and renumbered
/// before the destination is opened, so a failure leaves no output behind
/// and an inline edit never truncates the input on error.
///
/// # Returns
///
/// The final fold state, e.g. to report how many residues were found.
pub fn renumber_pdb(infile: &Path, target: &Target, start: Option<i64>) -> Result<RenumberState> {
    let atoms = read_atom_lines(infile)?;
    info!(
        "Read {} ATOM records from {}",
        atoms.len(),
        infile.display()
    );

    let (renumbered, state) = renumber_lines(&atoms, start)?;
    debug!(
        "Assigned {} residue numbers, last one is {}",
        state.residues(),
        state.counter
    );

    let output = target.output(infile);
    write_lines(&renumbered, &output)?;
    info!("Wrote {} renumbered records to {}", renumbered.len(), output);

    Ok(state)
}
