//! Rendering of a [`SymbolTable`] into Rust source.
//!
//! Each namespace becomes a struct with one `&'static str` field per query and
//! a const of that struct with the same name. The file holds bare items and no
//! `mod` wrapper, so several generated files can share one module:
//!
//! ```text
//! pub mod queries {
//!     include!("sqltote.rs");
//!     include!("other.rs");
//! }
//! ```
//!
//! Queries are then reached as `queries::User.All`. A rendered file looks
//! like this:
//!
//! ```text
//! // Code generated by sqltote. DO NOT EDIT.
//! // Module: queries
//!
//! /// Queries of the `User` tote.
//! #[allow(non_snake_case, dead_code)]
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub struct User {
//!     pub All: &'static str,
//! }
//!
//! /// `User` is a generated SQL tote. Do not modify.
//! #[allow(non_upper_case_globals, dead_code)]
//! pub const User: User = User {
//!     All: r#"SELECT * FROM user"#,
//! };
//! ```

use std::fmt::Write;

use proc_macro2::Literal;

use crate::error::{Error, Result};
use crate::table::{Namespace, SymbolTable};

/// First line of every generated file.
pub const GENERATED_HEADER: &str = "// Code generated by sqltote. DO NOT EDIT.";

/// Start of the second header line, followed by the module name.
pub const MODULE_MARKER: &str = "// Module: ";

const INDENT: &str = "    ";

/// Raw strings cannot carry more hashes than this.
const MAX_RAW_HASHES: usize = 255;

/// Render `table` as the items of the module named `module_name`.
pub fn render(module_name: &str, table: &SymbolTable) -> Result<String> {
    Renderer::new(module_name).render(table)
}

/// Serializes a symbol table into the items of a Rust module.
#[derive(Debug, Clone)]
pub struct Renderer<'a> {
    module_name: &'a str,
}

impl<'a> Renderer<'a> {
    /// A renderer for the module `module_name`.
    pub fn new(module_name: &'a str) -> Self {
        Self { module_name }
    }

    /// Render the table.
    ///
    /// Namespaces and fields are emitted in lexicographic order, so the output
    /// only depends on the table's contents. The result is parsed back before
    /// it is returned.
    pub fn render(&self, table: &SymbolTable) -> Result<String> {
        check_ident(self.module_name, "module")?;
        check_table(table)?;

        let table = table.sorted();
        let mut out = String::new();
        self.emit(&table, &mut out)
            .map_err(|e| Error::render(format!("formatting failed: {e}")))?;

        syn::parse_file(&out)
            .map_err(|e| Error::render(format!("generated source does not parse: {e}")))?;

        tracing::debug!(
            "Rendered module {} ({} namespaces, {} bytes)",
            self.module_name,
            table.len(),
            out.len()
        );
        Ok(out)
    }

    fn emit(&self, table: &SymbolTable, out: &mut String) -> std::fmt::Result {
        writeln!(out, "{GENERATED_HEADER}")?;
        writeln!(out, "{MODULE_MARKER}{}", self.module_name)?;
        for namespace in table.namespaces() {
            writeln!(out)?;
            emit_namespace(namespace, out)?;
        }
        Ok(())
    }
}

fn emit_namespace(namespace: &Namespace, out: &mut String) -> std::fmt::Result {
    let name = namespace.name();

    writeln!(out, "/// Queries of the `{name}` tote.")?;
    writeln!(out, "#[allow(non_snake_case, dead_code)]")?;
    writeln!(out, "#[derive(Debug, Clone, Copy, PartialEq, Eq)]")?;
    writeln!(out, "pub struct {name} {{")?;
    for identifier in namespace.identifiers() {
        writeln!(out, "{INDENT}pub {identifier}: &'static str,")?;
    }
    writeln!(out, "}}")?;
    writeln!(out)?;

    writeln!(out, "/// `{name}` is a generated SQL tote. Do not modify.")?;
    writeln!(out, "#[allow(non_upper_case_globals, dead_code)]")?;
    writeln!(out, "pub const {name}: {name} = {name} {{")?;
    for entry in namespace.entries() {
        writeln!(
            out,
            "{INDENT}{}: {},",
            entry.identifier(),
            string_literal(entry.content())
        )?;
    }
    writeln!(out, "}};")
}

fn check_ident(name: &str, what: &str) -> Result<()> {
    syn::parse_str::<syn::Ident>(name)
        .map(|_| ())
        .map_err(|_| Error::render(format!("{what} name `{name}` is not a valid Rust identifier")))
}

fn check_table(table: &SymbolTable) -> Result<()> {
    for namespace in table.namespaces() {
        check_ident(namespace.name(), "namespace")?;
        for entry in namespace.entries() {
            check_ident(entry.identifier(), "query").map_err(|_| {
                Error::render(format!(
                    "query name `{}.{}` (from {}) is not a valid Rust identifier",
                    namespace.name(),
                    entry.identifier(),
                    entry.path().display()
                ))
            })?;
        }
    }
    Ok(())
}

/// Literal for `content` whose value is exactly `content`.
///
/// A raw string is used when possible. Rust source normalizes `\r\n` and
/// rejects bidi overrides in literals, so content with control characters
/// other than newline and tab, or with text direction codepoints, is escaped
/// instead.
pub fn string_literal(content: &str) -> String {
    let needs_escape = content
        .chars()
        .any(|c| (c.is_control() && c != '\n' && c != '\t') || is_text_direction(c));
    let hashes = raw_hashes(content);
    if needs_escape || hashes > MAX_RAW_HASHES {
        return Literal::string(content).to_string();
    }
    let hashes = "#".repeat(hashes);
    format!("r{hashes}\"{content}\"{hashes}")
}

fn is_text_direction(c: char) -> bool {
    matches!(c, '\u{202A}'..='\u{202E}' | '\u{2066}'..='\u{2069}')
}

/// One more `#` than the longest run following a quote in `content`.
fn raw_hashes(content: &str) -> usize {
    let bytes = content.as_bytes();
    let longest = bytes
        .iter()
        .enumerate()
        .filter(|(_, b)| **b == b'"')
        .map(|(i, _)| bytes[i + 1..].iter().take_while(|b| **b == b'#').count())
        .max()
        .unwrap_or(0);
    longest + 1
}
