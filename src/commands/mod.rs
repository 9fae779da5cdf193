//! Command-line subcommands

pub mod list;
pub mod projects;
pub mod repos;
