//! Failure modes of the rewrite pipeline.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Everything that can abort a run. No-match is not represented here: a
/// module without the targeted fragments is rewritten to itself (modulo
/// import normalization) and reported through [`crate::Summary`].
#[derive(Debug, Error)]
pub enum Error {
    /// The input is not syntactically valid ECMAScript.
    #[error("parse error at line {line}, column {col}: {msg}")]
    Parse { line: usize, col: usize, msg: String },

    /// The module file could not be read.
    #[error("failed to read {path}: {source}")]
    Read { path: PathBuf, source: io::Error },

    /// The module file could not be created or overwritten.
    #[error("failed to write {path}: {source}")]
    Write { path: PathBuf, source: io::Error },

    /// The mutated tree could not be rendered. This indicates a defect in
    /// fragment construction, not a problem with the input.
    #[error("failed to render rewritten module: {0}")]
    Print(io::Error),
}
