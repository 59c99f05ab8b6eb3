use std::process::ExitCode;

use clap::Parser;
use pdb_edit::cli::{RenumberCli, run_renumber};

fn main() -> ExitCode {
    run_renumber(RenumberCli::parse())
}
