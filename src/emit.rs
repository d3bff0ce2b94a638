//! Rendering the mutated tree back to source text.

use swc_core::common::comments::{Comments, SingleThreadedComments};
use swc_core::common::sync::Lrc;
use swc_core::common::SourceMap;
use swc_core::ecma::ast::Module;
use swc_core::ecma::codegen::text_writer::JsWriter;
use swc_core::ecma::codegen::{Config, Emitter, Node};

use crate::error::Error;

/// Serializes `module` with the standard (non-minified) codegen settings.
/// Comments collected at parse time are re-attached by position. An emitter
/// failure means a fragment was spliced in at an impossible position; it is
/// surfaced as [`Error::Print`], never swallowed.
pub fn print_module(
    module: &Module,
    cm: &Lrc<SourceMap>,
    comments: &SingleThreadedComments,
) -> Result<String, Error> {
    let mut buf = Vec::new();
    {
        let wr = JsWriter::new(cm.clone(), "\n", &mut buf, None);
        let mut emitter = Emitter {
            cfg: Config::default(),
            cm: cm.clone(),
            comments: Some(comments as &dyn Comments),
            wr,
        };
        module.emit_with(&mut emitter).map_err(Error::Print)?;
    }
    String::from_utf8(buf)
        .map_err(|err| Error::Print(std::io::Error::new(std::io::ErrorKind::InvalidData, err)))
}
