//! CLI commands

pub mod list;
pub mod open;
pub mod set;
pub mod shell;
pub mod utils;
