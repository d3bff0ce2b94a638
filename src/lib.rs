//! retime rewrites a machine-generated JSON codec module so that one
//! configured field is decoded and encoded as a real `DateTime` instead of a
//! raw unix-seconds integer.
//!
//! The pipeline is a strict, synchronous sequence over one file: parse the
//! module, normalize the import block, splice the replacement fragments into
//! every matching field-handling site, print, and only then overwrite the
//! file. A module without a matching site is not an error; it comes back
//! unchanged apart from import normalization and reformatting, which is what
//! makes reruns safe.

pub mod cli;
pub mod emit;
pub mod error;
pub mod imports;
pub mod parse;
pub mod rewrite;
pub mod snippet;

use std::fs;
use std::path::Path;

use swc_core::common::comments::SingleThreadedComments;
use swc_core::common::sync::Lrc;
use swc_core::common::{FileName, SourceMap};
use swc_core::ecma::visit::VisitMutWith;

pub use error::Error;

/// What a run did. Zero on both counts is the benign no-match case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub decode_rewrites: usize,
    pub encode_rewrites: usize,
}

/// Runs the whole pipeline over in-memory source and returns the rewritten
/// text. `name` is only used for diagnostics.
pub fn rewrite_source(
    name: FileName,
    src: String,
    tag: &str,
    member: &str,
) -> Result<(String, Summary), Error> {
    let fragments = snippet::build_fragments(member);

    let cm: Lrc<SourceMap> = Default::default();
    let comments = SingleThreadedComments::default();
    let mut module = parse::parse_module(&cm, name, src, &comments)?;

    imports::ensure_time_import(&mut module);
    imports::sort_imports(&mut module);

    let mut rewriter = rewrite::FieldRewriter::new(tag, fragments);
    module.visit_mut_with(&mut rewriter);
    let summary = Summary {
        decode_rewrites: rewriter.decode_rewrites,
        encode_rewrites: rewriter.encode_rewrites,
    };
    if summary.decode_rewrites == 0 && summary.encode_rewrites == 0 {
        tracing::debug!(tag, "no matching field fragment; module left as-is");
    } else {
        tracing::debug!(
            tag,
            decode = summary.decode_rewrites,
            encode = summary.encode_rewrites,
            "rewrote field fragments"
        );
    }

    let text = emit::print_module(&module, &cm, &comments)?;
    Ok((text, summary))
}

/// Rewrites the module at `path` in place. The file is written once, at the
/// very end, so a parse or print failure never leaves a truncated file.
pub fn rewrite_file(path: &Path, tag: &str, member: &str) -> Result<Summary, Error> {
    let src = fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let (text, summary) = rewrite_source(FileName::Real(path.to_path_buf()), src, tag, member)?;
    fs::write(path, text).map_err(|source| Error::Write {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(summary)
}
