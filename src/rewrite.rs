//! The pattern matcher and rewriter.
//!
//! Matching is purely structural: the generator that produced the module
//! emits one fixed shape per field, so exact child counts and literal values
//! are a reliable proxy for "this is the statement that handles field X".
//! Anything that does not match the shape is left byte-for-byte alone, which
//! is what makes reruns over already-rewritten modules safe.

use swc_core::common::DUMMY_SP;
use swc_core::ecma::ast::{
    BlockStmt, BreakStmt, Decl, Expr, FnDecl, Lit, Stmt, SwitchCase,
};
use swc_core::ecma::visit::{VisitMut, VisitMutWith};

use crate::snippet::Fragments;

/// Function-name substrings that mark the generated routines.
pub const DECODE_MARKER: &str = "decode";
pub const ENCODE_MARKER: &str = "encode";

/// Walks the module and splices the replacement fragments into every
/// matching field-handling site. Sites are recognized by the fingerprint
/// derived from the configured tag; everything else is untouched.
pub struct FieldRewriter {
    /// The cooked decode arm label, e.g. `timestamp`.
    tag: String,
    /// The cooked encode prefix literal, e.g. `,"timestamp":`.
    prefix: String,
    fragments: Fragments,
    pub decode_rewrites: usize,
    pub encode_rewrites: usize,
}

impl FieldRewriter {
    pub fn new(tag: &str, fragments: Fragments) -> Self {
        Self {
            tag: tag.to_string(),
            prefix: format!(",\"{tag}\":"),
            fragments,
            decode_rewrites: 0,
            encode_rewrites: 0,
        }
    }

    fn is_decode_routine(f: &FnDecl) -> bool {
        f.ident.sym.as_ref().contains(DECODE_MARKER)
    }

    fn is_encode_routine(f: &FnDecl) -> bool {
        f.ident.sym.as_ref().contains(ENCODE_MARKER)
    }

    /// `case "<tag>":` with exactly that one literal as its test.
    fn is_field_switch_arm(&self, case: &SwitchCase) -> bool {
        match case.test.as_deref() {
            Some(Expr::Lit(Lit::Str(s))) => &*s.value == self.tag.as_str(),
            _ => false,
        }
    }

    /// The generator's per-field encode shape: a freestanding block of
    /// exactly three statements whose first declares the field's JSON
    /// prefix string.
    fn is_encode_prefix_block(&self, block: &BlockStmt) -> bool {
        if block.stmts.len() != 3 {
            return false;
        }
        let Stmt::Decl(Decl::Var(var)) = &block.stmts[0] else {
            return false;
        };
        let Some(declarator) = var.decls.first() else {
            return false;
        };
        match declarator.init.as_deref() {
            Some(Expr::Lit(Lit::Str(s))) => &*s.value == self.prefix.as_str(),
            _ => false,
        }
    }

    /// Decode side: direct-child loops, then direct-child switches of the
    /// loop body, then the arm labeled with the tag. The arm keeps its
    /// terminator so the switch does not fall through.
    fn rewrite_decode_body(&mut self, body: &mut BlockStmt) {
        for stmt in &mut body.stmts {
            let loop_body = match stmt {
                Stmt::While(s) => &mut s.body,
                Stmt::DoWhile(s) => &mut s.body,
                Stmt::For(s) => &mut s.body,
                _ => continue,
            };
            let Stmt::Block(block) = &mut **loop_body else {
                continue;
            };
            for inner in &mut block.stmts {
                let Stmt::Switch(switch) = inner else {
                    continue;
                };
                for case in &mut switch.cases {
                    if self.is_field_switch_arm(case) {
                        case.cons = vec![self.fragments.decode.clone(), break_stmt()];
                        self.decode_rewrites += 1;
                    }
                }
            }
        }
    }

    /// Encode side: every matching three-statement block gets its value
    /// write (the third statement) replaced.
    fn rewrite_encode_body(&mut self, body: &mut BlockStmt) {
        for stmt in &mut body.stmts {
            let Stmt::Block(block) = stmt else {
                continue;
            };
            if self.is_encode_prefix_block(block) {
                block.stmts[2] = self.fragments.encode.clone();
                self.encode_rewrites += 1;
            }
        }
    }
}

fn break_stmt() -> Stmt {
    Stmt::Break(BreakStmt {
        span: DUMMY_SP,
        label: None,
    })
}

impl VisitMut for FieldRewriter {
    fn visit_mut_fn_decl(&mut self, n: &mut FnDecl) {
        let decode = Self::is_decode_routine(n);
        let encode = Self::is_encode_routine(n);
        if let Some(body) = n.function.body.as_mut() {
            if decode {
                self.rewrite_decode_body(body);
            }
            if encode {
                self.rewrite_encode_body(body);
            }
        }
        n.visit_mut_children_with(self);
    }
}
