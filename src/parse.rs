//! Syntax tree loading.

use swc_core::common::comments::{Comments, SingleThreadedComments};
use swc_core::common::sync::Lrc;
use swc_core::common::{FileName, SourceMap, Spanned};
use swc_core::ecma::ast::{EsVersion, Module};
use swc_core::ecma::parser::{error::Error as ParserError, parse_file_as_module, EsSyntax, Syntax};

use crate::error::Error;

/// Parses `src` into a module, retaining comments and positions for faithful
/// re-printing. Any syntax error is fatal, including errors the parser was
/// able to recover from.
pub fn parse_module(
    cm: &Lrc<SourceMap>,
    name: FileName,
    src: String,
    comments: &SingleThreadedComments,
) -> Result<Module, Error> {
    let fm = cm.new_source_file(Lrc::new(name), src);
    let mut recovered = Vec::new();
    let parsed = parse_file_as_module(
        &fm,
        Syntax::Es(EsSyntax::default()),
        EsVersion::Es2022,
        Some(comments as &dyn Comments),
        &mut recovered,
    );
    match parsed {
        Ok(module) if recovered.is_empty() => Ok(module),
        Ok(_) => Err(parse_error(cm, recovered.remove(0))),
        Err(err) => Err(parse_error(cm, err)),
    }
}

fn parse_error(cm: &Lrc<SourceMap>, err: ParserError) -> Error {
    let span = err.span();
    let (line, col) = if span.is_dummy() {
        (0, 0)
    } else {
        let loc = cm.lookup_char_pos(span.lo());
        (loc.line, loc.col_display + 1)
    };
    Error::Parse {
        line,
        col,
        msg: err.kind().msg().to_string(),
    }
}
