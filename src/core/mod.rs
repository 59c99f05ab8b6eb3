pub mod columns;
pub mod commands;
pub mod error;
pub mod input;
pub mod utils;
