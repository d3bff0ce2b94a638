//! Import injection and canonical ordering.

use swc_core::common::{SyntaxContext, DUMMY_SP};
use swc_core::ecma::ast::{
    Ident, ImportDecl, ImportNamedSpecifier, ImportPhase, ImportSpecifier, Module, ModuleDecl,
    ModuleExportName, ModuleItem, Str,
};

use crate::snippet::{TIME_IDENT, TIME_MODULE};

/// Makes sure the identifier referenced by the decode fragment is imported
/// exactly once. Idempotent: an existing import (under any local alias)
/// short-circuits; a bare import of the time module gains the specifier
/// instead of a second declaration.
pub fn ensure_time_import(module: &mut Module) {
    if has_time_import(module) {
        return;
    }

    for item in &mut module.body {
        if let ModuleItem::ModuleDecl(ModuleDecl::Import(decl)) = item {
            if &*decl.src.value == TIME_MODULE && !decl.specifiers.is_empty() {
                decl.specifiers.push(time_specifier());
                return;
            }
        }
    }

    let decl = ModuleItem::ModuleDecl(ModuleDecl::Import(ImportDecl {
        span: DUMMY_SP,
        specifiers: vec![time_specifier()],
        src: Box::new(Str {
            span: DUMMY_SP,
            value: TIME_MODULE.into(),
            raw: None,
        }),
        type_only: false,
        with: None,
        phase: ImportPhase::Evaluation,
    }));
    module.body.insert(0, decl);
}

/// Reorders the leading import block into the formatter's canonical order:
/// bare package specifiers first, then relative paths, alphabetical by
/// module source within each group. Byte-identical duplicate declarations
/// collapse to one.
pub fn sort_imports(module: &mut Module) {
    let block_len = module
        .body
        .iter()
        .take_while(|item| matches!(item, ModuleItem::ModuleDecl(ModuleDecl::Import(_))))
        .count();
    if block_len < 2 {
        return;
    }

    let rest = module.body.split_off(block_len);
    let mut block: Vec<ImportDecl> = Vec::with_capacity(block_len);
    for item in module.body.drain(..) {
        if let ModuleItem::ModuleDecl(ModuleDecl::Import(decl)) = item {
            block.push(decl);
        }
    }

    block.sort_by(|a, b| {
        group_rank(&a.src.value)
            .cmp(&group_rank(&b.src.value))
            .then_with(|| a.src.value.cmp(&b.src.value))
    });
    block.dedup_by(|a, b| signature(a) == signature(b));

    module.body = block
        .into_iter()
        .map(|decl| ModuleItem::ModuleDecl(ModuleDecl::Import(decl)))
        .chain(rest)
        .collect();
}

fn has_time_import(module: &Module) -> bool {
    module.body.iter().any(|item| {
        let ModuleItem::ModuleDecl(ModuleDecl::Import(decl)) = item else {
            return false;
        };
        &*decl.src.value == TIME_MODULE
            && decl
                .specifiers
                .iter()
                .any(|spec| imported_name(spec).as_deref() == Some(TIME_IDENT))
    })
}

/// The name bound on the source module, regardless of local aliasing.
fn imported_name(spec: &ImportSpecifier) -> Option<String> {
    match spec {
        ImportSpecifier::Named(named) => match &named.imported {
            Some(ModuleExportName::Ident(ident)) => Some(ident.sym.to_string()),
            Some(ModuleExportName::Str(s)) => Some(s.value.to_string()),
            None => Some(named.local.sym.to_string()),
        },
        ImportSpecifier::Default(_) | ImportSpecifier::Namespace(_) => None,
    }
}

fn time_specifier() -> ImportSpecifier {
    ImportSpecifier::Named(ImportNamedSpecifier {
        span: DUMMY_SP,
        local: Ident::new(TIME_IDENT.into(), DUMMY_SP, SyntaxContext::empty()),
        imported: None,
        is_type_only: false,
    })
}

// Relative (and absolute) paths sort after package specifiers.
fn group_rank(src: &str) -> u8 {
    if src.starts_with('.') || src.starts_with('/') {
        1
    } else {
        0
    }
}

fn signature(decl: &ImportDecl) -> (String, Vec<String>) {
    let specs = decl
        .specifiers
        .iter()
        .map(|spec| match spec {
            ImportSpecifier::Named(named) => format!(
                "named:{}:{}",
                named.local.sym,
                imported_name(spec).unwrap_or_default()
            ),
            ImportSpecifier::Default(def) => format!("default:{}", def.local.sym),
            ImportSpecifier::Namespace(ns) => format!("namespace:{}", ns.local.sym),
        })
        .collect();
    (decl.src.value.to_string(), specs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use swc_core::common::comments::SingleThreadedComments;
    use swc_core::common::sync::Lrc;
    use swc_core::common::{FileName, SourceMap};

    fn parse(src: &str) -> Module {
        let cm: Lrc<SourceMap> = Default::default();
        let comments = SingleThreadedComments::default();
        crate::parse::parse_module(&cm, FileName::Anon, src.to_string(), &comments)
            .expect("fixture must parse")
    }

    fn luxon_imports(module: &Module) -> usize {
        module
            .body
            .iter()
            .filter(|item| {
                matches!(
                    item,
                    ModuleItem::ModuleDecl(ModuleDecl::Import(decl)) if &*decl.src.value == "luxon"
                )
            })
            .count()
    }

    #[test]
    fn injects_when_absent() {
        let mut module = parse("import { Reader } from \"./stream\";\n");
        ensure_time_import(&mut module);
        assert!(has_time_import(&module));
        assert_eq!(luxon_imports(&module), 1);
    }

    #[test]
    fn injection_is_idempotent() {
        let mut module = parse("import { DateTime } from \"luxon\";\n");
        ensure_time_import(&mut module);
        ensure_time_import(&mut module);
        assert_eq!(luxon_imports(&module), 1);
        let ModuleItem::ModuleDecl(ModuleDecl::Import(decl)) = &module.body[0] else {
            panic!("first item must stay an import");
        };
        assert_eq!(decl.specifiers.len(), 1);
    }

    #[test]
    fn aliased_import_counts_as_present() {
        let mut module = parse("import { DateTime as DT } from \"luxon\";\n");
        ensure_time_import(&mut module);
        assert_eq!(luxon_imports(&module), 1);
    }

    #[test]
    fn joins_an_existing_module_import() {
        let mut module = parse("import { Duration } from \"luxon\";\n");
        ensure_time_import(&mut module);
        assert_eq!(luxon_imports(&module), 1);
        let ModuleItem::ModuleDecl(ModuleDecl::Import(decl)) = &module.body[0] else {
            panic!("first item must stay an import");
        };
        assert_eq!(decl.specifiers.len(), 2);
    }

    #[test]
    fn sorts_packages_before_relative_paths() {
        let mut module = parse(
            "import { Reader } from \"./stream\";\nimport { DateTime } from \"luxon\";\nimport { assert } from \"chai\";\n",
        );
        sort_imports(&mut module);
        let sources: Vec<String> = module
            .body
            .iter()
            .filter_map(|item| match item {
                ModuleItem::ModuleDecl(ModuleDecl::Import(decl)) => {
                    Some(decl.src.value.to_string())
                }
                _ => None,
            })
            .collect();
        assert_eq!(sources, ["chai", "luxon", "./stream"]);
    }

    #[test]
    fn collapses_duplicate_declarations() {
        let mut module = parse(
            "import { DateTime } from \"luxon\";\nimport { DateTime } from \"luxon\";\n",
        );
        sort_imports(&mut module);
        assert_eq!(luxon_imports(&module), 1);
    }

    #[test]
    fn leaves_non_import_items_in_place() {
        let mut module = parse(
            "import { b } from \"b\";\nimport { a } from \"a\";\nexport function decodeUser(inp, out) {}\n",
        );
        sort_imports(&mut module);
        assert_eq!(module.body.len(), 3);
        assert!(matches!(
            module.body[2],
            ModuleItem::ModuleDecl(ModuleDecl::ExportDecl(_))
        ));
    }
}
