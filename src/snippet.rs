//! Builds the two canonical replacement statements.

use swc_core::common::{SyntaxContext, DUMMY_SP};
use swc_core::ecma::ast::{
    AssignExpr, AssignOp, AssignTarget, CallExpr, Callee, Expr, ExprOrSpread, ExprStmt, Ident,
    IdentName, KeyValueProp, Lit, MemberExpr, MemberProp, ObjectLit, Prop, PropName, PropOrSpread,
    SimpleAssignTarget, Stmt, Str,
};

/// Module specifier of the injected time dependency.
pub const TIME_MODULE: &str = "luxon";
/// Identifier the fragments reference from that module.
pub const TIME_IDENT: &str = "DateTime";

/// The two rewrite payloads, built once per run and cloned into the tree at
/// each match site.
#[derive(Debug, Clone)]
pub struct Fragments {
    /// `out.<member> = DateTime.fromSeconds(inp.int64(), { zone: "utc" });`
    pub decode: Stmt,
    /// `out.int64(inp.<member>.toUnixInteger());`
    pub encode: Stmt,
}

/// Pure construction: nothing but the member name is consulted.
pub fn build_fragments(member: &str) -> Fragments {
    Fragments {
        decode: decode_fragment(member),
        encode: encode_fragment(member),
    }
}

fn decode_fragment(member: &str) -> Stmt {
    // inp.int64()
    let seconds = call(member_of(ident_expr("inp"), "int64"), vec![]);
    // { zone: "utc" }
    let zone = Expr::Object(ObjectLit {
        span: DUMMY_SP,
        props: vec![PropOrSpread::Prop(Box::new(Prop::KeyValue(KeyValueProp {
            key: PropName::Ident(IdentName::new("zone".into(), DUMMY_SP)),
            value: Box::new(str_lit("utc")),
        })))],
    });
    // DateTime.fromSeconds(inp.int64(), { zone: "utc" })
    let instant = call(
        member_of(ident_expr(TIME_IDENT), "fromSeconds"),
        vec![seconds, zone],
    );

    Stmt::Expr(ExprStmt {
        span: DUMMY_SP,
        expr: Box::new(Expr::Assign(AssignExpr {
            span: DUMMY_SP,
            op: AssignOp::Assign,
            left: AssignTarget::Simple(SimpleAssignTarget::Member(MemberExpr {
                span: DUMMY_SP,
                obj: Box::new(ident_expr("out")),
                prop: MemberProp::Ident(IdentName::new(member.into(), DUMMY_SP)),
            })),
            right: Box::new(instant),
        })),
    })
}

fn encode_fragment(member: &str) -> Stmt {
    // inp.<member>.toUnixInteger()
    let seconds = call(
        member_of(member_of(ident_expr("inp"), member), "toUnixInteger"),
        vec![],
    );
    // out.int64(...)
    Stmt::Expr(ExprStmt {
        span: DUMMY_SP,
        expr: Box::new(call(member_of(ident_expr("out"), "int64"), vec![seconds])),
    })
}

fn ident_expr(name: &str) -> Expr {
    Expr::Ident(Ident::new(name.into(), DUMMY_SP, SyntaxContext::empty()))
}

fn member_of(obj: Expr, prop: &str) -> Expr {
    Expr::Member(MemberExpr {
        span: DUMMY_SP,
        obj: Box::new(obj),
        prop: MemberProp::Ident(IdentName::new(prop.into(), DUMMY_SP)),
    })
}

fn call(callee: Expr, args: Vec<Expr>) -> Expr {
    Expr::Call(CallExpr {
        span: DUMMY_SP,
        callee: Callee::Expr(Box::new(callee)),
        args: args
            .into_iter()
            .map(|expr| ExprOrSpread {
                spread: None,
                expr: Box::new(expr),
            })
            .collect(),
        type_args: None,
        ctxt: SyntaxContext::empty(),
    })
}

fn str_lit(value: &str) -> Expr {
    Expr::Lit(Lit::Str(Str {
        span: DUMMY_SP,
        value: value.into(),
        raw: None,
    }))
}
