//! Command handlers for CLI subcommands
//!
//! This module contains the implementation logic for each CLI subcommand.

mod check;
mod extract;
pub mod links;
mod utils;

pub use check::handle_check;
pub use extract::handle_extract;
pub use links::handle_links;
