use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use env_logger::Builder;
use log::{LevelFilter, debug};

use crate::{
    Error, FilterReport, Output, RenumberState, Result, Target, remove_hydrogens, renumber_pdb,
};

#[derive(Parser, Debug)]
#[command(name = "pdb-renumber", version, about = "Renumber PDB file residues.")]
pub struct RenumberCli {
    /// Input PDB file
    #[arg(value_name = "INFILE")]
    pub infile: PathBuf,

    /// Output PDB file, standard output if omitted (not valid if --inline is used)
    #[arg(value_name = "OUTFILE", conflicts_with = "inline")]
    pub outfile: Option<PathBuf>,

    /// Starting residue number
    #[arg(long, default_value_t = 1, allow_hyphen_values = true)]
    pub start: i64,

    /// Edit the input file inline
    #[arg(short, long)]
    pub inline: bool,

    /// Print debug information
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Parser, Debug)]
#[command(
    name = "pdb-remove-hydrogen",
    version,
    about = "Filter out lines representing hydrogen atoms from a PDB file.",
    long_about = "Filter out lines representing hydrogen atoms from a PDB file.\n\n\
        Every line needs at least 17 columns to carry an atom name. Shorter \
        lines, such as unpadded TER or END records, are left out of the output \
        and make the command exit with a failure status once all other lines \
        have been written. Pad them to 80 columns to keep them."
)]
pub struct RemoveHydrogenCli {
    /// Input PDB file name
    #[arg(value_name = "INPUT_FILENAME")]
    pub input_filename: PathBuf,

    /// Output PDB file name, standard output if omitted
    #[arg(short, long = "output_filename", value_name = "OUTPUT_FILENAME")]
    pub output_filename: Option<PathBuf>,

    /// Print debug information
    #[arg(short, long)]
    pub verbose: bool,
}

/// Sets up logging on stderr, leaving stdout to the records.
///
/// `RUST_LOG` takes precedence over `verbose` when set. Only the first call
/// installs a logger; later calls keep it.
pub fn init_logging(verbose: bool) {
    if std::env::var("RUST_LOG").is_ok() {
        let _ = env_logger::try_init();
    } else {
        let level = if verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        };

        let _ = Builder::new()
            .filter_module("pdb_edit", level)
            .format_target(false)
            .try_init();
    }
}

pub fn handle_renumber(cli: &RenumberCli) -> Result<RenumberState> {
    let target = Target::resolve(cli.outfile.as_deref(), cli.inline)?;
    debug!("Renumbering {} into {:?}", cli.infile.display(), target);
    renumber_pdb(&cli.infile, &target, Some(cli.start))
}

pub fn handle_remove_hydrogen(cli: &RemoveHydrogenCli) -> Result<FilterReport> {
    let output = match &cli.output_filename {
        Some(path) => Output::File(path.clone()),
        None => Output::Stdout,
    };
    remove_hydrogens(&cli.input_filename, &output)
}

fn exit_code(err: &Error) -> ExitCode {
    eprintln!("Error: {}", err);
    match err {
        Error::Usage(_) => ExitCode::from(2),
        _ => ExitCode::FAILURE,
    }
}

/// Entry point of the `pdb-renumber` binary.
pub fn run_renumber(cli: RenumberCli) -> ExitCode {
    init_logging(cli.verbose);

    match handle_renumber(&cli) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => exit_code(&e),
    }
}

/// Entry point of the `pdb-remove-hydrogen` binary.
///
/// Well-formed lines are always written; the exit code is still a failure if
/// any line was too short to be checked.
pub fn run_remove_hydrogen(cli: RemoveHydrogenCli) -> ExitCode {
    init_logging(cli.verbose);

    match handle_remove_hydrogen(&cli) {
        Ok(report) if report.is_clean() => ExitCode::SUCCESS,
        Ok(report) => {
            eprintln!(
                "Error: {} malformed records were skipped",
                report.malformed.len()
            );
            ExitCode::FAILURE
        }
        Err(e) => exit_code(&e),
    }
}
