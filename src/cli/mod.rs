//! CLI subcommand implementations for the Faleproxy binary.

pub mod fetch_cmd;
pub mod output;
pub mod serve_cmd;
