#![allow(dead_code)]

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

pub fn init_test_logger() {
    static INIT: OnceLock<()> = OnceLock::new();
    let _ = INIT.get_or_init(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Create `files` (relative path, content) under `root`.
pub fn write_tree(root: &Path, files: &[(&str, &str)]) {
    for (rel, content) in files {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }
}

/// The fixture tree used throughout the docs.
pub fn user_tree(root: &Path) {
    write_tree(
        root,
        &[
            ("user/all.sql", "SELECT * FROM user"),
            ("user/role/many_by_user.sql", "SELECT * FROM role"),
        ],
    );
}

/// Parse a generated file and pull its module name and every
/// `Namespace.Field` literal back out.
pub fn extract(source: &str) -> (String, BTreeMap<(String, String), String>) {
    let module = source
        .lines()
        .find_map(|line| line.strip_prefix(sqltote_core::MODULE_MARKER))
        .expect("generated source names its module")
        .to_string();
    let file = syn::parse_file(source).expect("generated source parses");
    (module, literals(&file.items))
}

/// Every `Namespace.Field` literal among `items`.
pub fn literals(items: &[syn::Item]) -> BTreeMap<(String, String), String> {
    let mut values = BTreeMap::new();
    for item in items {
        let syn::Item::Const(konst) = item else {
            continue;
        };
        let syn::Expr::Struct(init) = konst.expr.as_ref() else {
            panic!("const {} is not a struct literal", konst.ident);
        };
        for field in &init.fields {
            let syn::Member::Named(name) = &field.member else {
                panic!("unnamed field");
            };
            let syn::Expr::Lit(syn::ExprLit {
                lit: syn::Lit::Str(lit),
                ..
            }) = &field.expr
            else {
                panic!("field {name} is not a string literal");
            };
            values.insert((konst.ident.to_string(), name.to_string()), lit.value());
        }
    }
    values
}

/// Concatenate `files` inside `pub mod module { .. }`, as `include!` would.
pub fn combine(module: &str, files: &[&str]) -> syn::ItemMod {
    let body = files.concat();
    syn::parse_str(&format!("pub mod {module} {{\n{body}}}\n"))
        .expect("combined module parses")
}

pub fn key(namespace: &str, field: &str) -> (String, String) {
    (namespace.to_string(), field.to_string())
}
