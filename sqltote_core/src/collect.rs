//! Directory walk that builds the [`SymbolTable`].

use std::fs;
use std::io;
use std::path::{Component, Path};

use walkdir::WalkDir;

use crate::error::{Error, Result};
use crate::ident::Deriver;
use crate::table::{DuplicatePolicy, Entry, ROOT_NAMESPACE, SymbolTable};

/// Extension of query files, without the leading dot.
pub const DEFAULT_EXTENSION: &str = "sql";

/// Settings for one collection pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectOptions {
    /// Prepended to every namespace as if it were a parent directory.
    pub prefix: String,
    /// Only files with exactly this extension are collected.
    pub extension: String,
    /// Handling of identifiers that collide within a namespace.
    pub duplicates: DuplicatePolicy,
    /// Turns path segments into identifiers.
    pub deriver: Deriver,
}

impl Default for CollectOptions {
    fn default() -> Self {
        Self {
            prefix: String::new(),
            extension: DEFAULT_EXTENSION.to_string(),
            duplicates: DuplicatePolicy::default(),
            deriver: Deriver::default(),
        }
    }
}

impl CollectOptions {
    /// Default options with the given prefix.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            ..Default::default()
        }
    }
}

/// Collect every query file under `root` using default options.
pub fn collect<P: AsRef<Path>>(root: P, prefix: &str) -> Result<SymbolTable> {
    Collector::new(&CollectOptions::with_prefix(prefix)).collect(root)
}

/// Walks an input root and groups query files by directory.
#[derive(Debug, Clone)]
pub struct Collector<'a> {
    options: &'a CollectOptions,
}

impl<'a> Collector<'a> {
    /// A collector using `options`.
    pub fn new(options: &'a CollectOptions) -> Self {
        Self { options }
    }

    /// Walk `root` and build the table.
    ///
    /// The root is canonicalized first, so entry paths are absolute. The first
    /// I/O error aborts the walk; nothing collected so far is returned.
    pub fn collect<P: AsRef<Path>>(&self, root: P) -> Result<SymbolTable> {
        let root = root.as_ref();
        check_root(root)?;
        let root = &fs::canonicalize(root).map_err(|e| Error::read(root, e))?;

        let mut table = SymbolTable::new();
        let walker = WalkDir::new(root).sort_by_file_name();

        for entry in walker {
            let entry = entry.map_err(|e| {
                let path = e.path().unwrap_or(root).to_path_buf();
                Error::read(path, io::Error::from(e))
            })?;
            let path = entry.path();
            if !self.is_query_file(path) {
                continue;
            }
            self.collect_file(root, path, &mut table)?;
        }

        tracing::info!(
            "Collected {} queries in {} namespaces from {}",
            table.entry_count(),
            table.len(),
            root.display()
        );
        Ok(table)
    }

    fn is_query_file(&self, path: &Path) -> bool {
        path.is_file()
            && path.extension().and_then(|s| s.to_str()) == Some(self.options.extension.as_str())
    }

    fn collect_file(&self, root: &Path, path: &Path, table: &mut SymbolTable) -> Result<()> {
        let relative = path.strip_prefix(root).unwrap_or(path);
        let namespace = self.namespace_for(relative);
        let identifier = self.identifier_for(path)?;
        let content = fs::read_to_string(path).map_err(|e| Error::read(path, e))?;

        tracing::debug!(
            "{} -> {}.{} ({} bytes)",
            relative.display(),
            namespace,
            identifier,
            content.len()
        );

        let entry = Entry::new(namespace.as_str(), identifier, path, relative, content);
        if let Some(replaced) = table.insert(entry, self.options.duplicates)? {
            tracing::warn!(
                "{}.{} from {} overwritten by {}",
                namespace,
                replaced.identifier(),
                replaced.path().display(),
                path.display()
            );
        }
        Ok(())
    }

    /// Namespace for a file, given its path relative to the root.
    ///
    /// The prefix is joined in front of the directory path before casing, so
    /// `other` + `user/role` gives `OtherUserRole`.
    pub fn namespace_for(&self, relative_file: &Path) -> String {
        let dir = relative_file
            .parent()
            .map(normalize_dir)
            .unwrap_or_default();
        let raw = match (self.options.prefix.is_empty(), dir.is_empty()) {
            (true, _) => dir,
            (false, true) => self.options.prefix.clone(),
            (false, false) => format!("{}/{}", self.options.prefix, dir),
        };
        let name = self.options.deriver.derive(&raw, true);
        if name.is_empty() {
            ROOT_NAMESPACE.to_string()
        } else {
            name
        }
    }

    fn identifier_for(&self, path: &Path) -> Result<String> {
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy())
            .unwrap_or_default();
        let identifier = self.options.deriver.derive(&stem, true);
        if identifier.is_empty() {
            return Err(Error::EmptyIdentifier {
                path: path.to_path_buf(),
            });
        }
        Ok(identifier)
    }
}

fn check_root(root: &Path) -> Result<()> {
    match fs::metadata(root) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(Error::NotADirectory {
            path: root.to_path_buf(),
        }),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Err(Error::NotFound {
            path: root.to_path_buf(),
        }),
        Err(e) => Err(Error::read(root, e)),
    }
}

// Joins the normal components with '/' so the result does not depend on the
// platform separator.
fn normalize_dir(dir: &Path) -> String {
    dir.components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
