//! CLI subcommand implementations.

pub mod comments;
pub mod latest;
