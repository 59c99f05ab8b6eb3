//! Main library crate for pdb-edit
//!
//! Line-oriented editing of PDB files: residue renumbering of ATOM records
//! and removal of hydrogen atoms. Both work on the fixed columns of the
//! records and leave every other byte untouched.

// Internal module organization
mod core;

pub mod cli;

// Public API exports
pub use crate::core::columns::*;
pub use crate::core::commands::{
    hydrogen::{FilterReport, filter_hydrogens, is_hydrogen, remove_hydrogens},
    renumber::{RenumberState, Target, renumber_lines, renumber_pdb},
};
pub use crate::core::error::{Error, Result};
pub use crate::core::input::*;
pub use crate::core::utils::*;
