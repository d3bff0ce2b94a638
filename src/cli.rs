//! CLI argument definitions.

use std::path::PathBuf;

use clap::Parser;

/// Top-level parser for `retime`.
#[derive(Debug, Parser)]
#[command(
    name = "retime",
    version,
    about = "Rewrite a generated JSON codec module so a unix-seconds field becomes a DateTime"
)]
pub struct Cli {
    /// Serialized name of the field, as it appears in the JSON output.
    #[arg(long, default_value = "timestamp")]
    pub tag: String,

    /// Struct member that holds the instant in memory.
    #[arg(long, default_value = "Timestamp")]
    pub member: String,

    /// Generated codec module to rewrite in place.
    pub file: PathBuf,
}
