//! The symbol table handed from the collector to the renderer.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;

use crate::error::{Error, Result};

/// Name used for files that sit directly in the input root when no prefix is
/// set.
pub const ROOT_NAMESPACE: &str = "Root";

/// What to do when two files derive to the same identifier in one namespace.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum DuplicatePolicy {
    /// Abort the run with [`Error::DuplicateIdentifier`].
    #[default]
    Error,
    /// Keep the later file's content in the earlier file's slot.
    Overwrite,
}

/// One query file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    namespace: String,
    identifier: String,
    path: PathBuf,
    relative_path: PathBuf,
    content: String,
}

impl Entry {
    /// Create an entry. An empty `namespace` means [`ROOT_NAMESPACE`].
    pub fn new(
        namespace: impl Into<String>,
        identifier: impl Into<String>,
        path: impl Into<PathBuf>,
        relative_path: impl Into<PathBuf>,
        content: impl Into<String>,
    ) -> Self {
        let mut namespace = namespace.into();
        if namespace.is_empty() {
            namespace = ROOT_NAMESPACE.to_string();
        }
        Self {
            namespace,
            identifier: identifier.into(),
            path: path.into(),
            relative_path: relative_path.into(),
            content: content.into(),
        }
    }

    /// Name of the namespace the entry belongs to.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Identifier of the entry within its namespace.
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Absolute path of the file when collected from disk.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path of the file relative to the input root.
    pub fn relative_path(&self) -> &Path {
        &self.relative_path
    }

    /// Verbatim file content.
    pub fn content(&self) -> &str {
        &self.content
    }
}

/// Entries sharing one directory-derived name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Namespace {
    name: String,
    entries: IndexMap<String, Entry>,
}

impl Namespace {
    fn new(name: String) -> Self {
        Self {
            name,
            entries: IndexMap::new(),
        }
    }

    /// Name of the namespace. Never empty.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Look up an entry by identifier.
    pub fn get(&self, identifier: &str) -> Option<&Entry> {
        self.entries.get(identifier)
    }

    /// Entries in the order they were collected.
    pub fn entries(&self) -> impl Iterator<Item = &Entry> {
        self.entries.values()
    }

    /// Identifiers in the order they were collected.
    pub fn identifiers(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the namespace holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn insert(&mut self, entry: Entry, policy: DuplicatePolicy) -> Result<Option<Entry>> {
        match self.entries.get_mut(entry.identifier()) {
            None => {
                self.entries.insert(entry.identifier.clone(), entry);
                Ok(None)
            }
            Some(existing) => match policy {
                DuplicatePolicy::Error => Err(Error::DuplicateIdentifier {
                    namespace: self.name.clone(),
                    identifier: entry.identifier,
                    first: existing.path.clone(),
                    second: entry.path,
                }),
                DuplicatePolicy::Overwrite => Ok(Some(std::mem::replace(existing, entry))),
            },
        }
    }

    fn sort(&mut self) {
        self.entries.sort_unstable_keys();
    }
}

/// Mapping from namespace name to namespace, in collection order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolTable {
    namespaces: IndexMap<String, Namespace>,
}

impl SymbolTable {
    /// An empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry under its namespace, creating the namespace on first use.
    ///
    /// Returns the replaced entry when `policy` allows overwriting.
    pub(crate) fn insert(&mut self, entry: Entry, policy: DuplicatePolicy) -> Result<Option<Entry>> {
        let name = entry.namespace().to_string();
        self.namespaces
            .entry(name)
            .or_insert_with_key(|name| Namespace::new(name.clone()))
            .insert(entry, policy)
    }

    /// Look up a namespace by name.
    pub fn namespace(&self, name: &str) -> Option<&Namespace> {
        self.namespaces.get(name)
    }

    /// Look up an entry by namespace and identifier.
    pub fn get(&self, namespace: &str, identifier: &str) -> Option<&Entry> {
        self.namespace(namespace)?.get(identifier)
    }

    /// Namespaces in the order they were first seen.
    pub fn namespaces(&self) -> impl Iterator<Item = &Namespace> {
        self.namespaces.values()
    }

    /// Number of namespaces.
    pub fn len(&self) -> usize {
        self.namespaces.len()
    }

    /// Whether no query file was collected.
    pub fn is_empty(&self) -> bool {
        self.namespaces.is_empty()
    }

    /// Total number of entries across namespaces.
    pub fn entry_count(&self) -> usize {
        self.namespaces.values().map(Namespace::len).sum()
    }

    /// All `(namespace, identifier)` pairs, sorted.
    pub fn keys(&self) -> Vec<(String, String)> {
        let mut keys: Vec<_> = self
            .namespaces
            .values()
            .flat_map(|ns| {
                ns.identifiers()
                    .map(|id| (ns.name().to_string(), id.to_string()))
            })
            .collect();
        keys.sort();
        keys
    }

    /// A copy with namespaces and entries in lexicographic order, independent
    /// of walk order.
    pub fn sorted(&self) -> Self {
        let mut table = self.clone();
        table.namespaces.sort_unstable_keys();
        table.namespaces.values_mut().for_each(Namespace::sort);
        table
    }
}
