use std::process::ExitCode;

use clap::Parser;
use pdb_edit::cli::{RemoveHydrogenCli, run_remove_hydrogen};

fn main() -> ExitCode {
    run_remove_hydrogen(RemoveHydrogenCli::parse())
}
