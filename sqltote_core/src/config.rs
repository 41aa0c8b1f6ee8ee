//! Run configuration.
//!
//! [`Options`] holds values as they come from the command line; [`Options::resolve`]
//! applies the fallbacks and validates them into a [`Config`].

use std::path::{Path, PathBuf};

use crate::collect::{CollectOptions, DEFAULT_EXTENSION};
use crate::error::{Error, Result};
use crate::ident::Deriver;
use crate::table::DuplicatePolicy;

/// Default input directory.
pub const DEFAULT_INPUT_DIR: &str = "sqltote";
/// Default output directory.
pub const DEFAULT_OUTPUT_DIR: &str = "./";
/// Default output file name.
pub const DEFAULT_OUTPUT_FILE: &str = "sqltote.rs";
/// Environment variable consulted for the module name when the output
/// directory is left at its default.
pub const MODULE_ENV_VAR: &str = "SQLTOTE_MODULE";

/// Unresolved settings, as given by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Root of the query tree.
    pub input_dir: PathBuf,
    /// Directory the generated file goes to.
    pub output_dir: PathBuf,
    /// Name of the generated file.
    pub output_file: String,
    /// Module the generated items belong to. Derived when unset.
    pub module_name: Option<String>,
    /// Prepended to every namespace path before casing.
    pub prefix: String,
    /// Extension of query files.
    pub extension: String,
    /// Replace duplicates instead of failing.
    pub overwrite_duplicates: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from(DEFAULT_INPUT_DIR),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            output_file: DEFAULT_OUTPUT_FILE.to_string(),
            module_name: None,
            prefix: String::new(),
            extension: DEFAULT_EXTENSION.to_string(),
            overwrite_duplicates: false,
        }
    }
}

impl Options {
    /// Resolve into a validated [`Config`].
    ///
    /// `env_module` is the value of [`MODULE_ENV_VAR`], if set. It is only
    /// used when no module name is given and the output directory is the
    /// default; otherwise the output directory's base name is used.
    pub fn resolve(self, env_module: Option<String>) -> Result<Config> {
        let module_name = match self.module_name.filter(|m| !m.is_empty()) {
            Some(name) => name,
            None if is_default_output(&self.output_dir) => env_module
                .filter(|m| !m.is_empty())
                .ok_or_else(|| {
                    Error::configuration(format!(
                        "module name receiving the generated source must be provided \
                         (pass --module or set {MODULE_ENV_VAR})"
                    ))
                })?,
            None => base_name(&self.output_dir).ok_or_else(|| {
                Error::configuration(format!(
                    "cannot derive a module name from {}",
                    self.output_dir.display()
                ))
            })?,
        };

        Config::builder()
            .input_dir(self.input_dir)
            .output_dir(self.output_dir)
            .output_file(self.output_file)
            .module_name(module_name)
            .prefix(self.prefix)
            .extension(self.extension)
            .duplicates(if self.overwrite_duplicates {
                DuplicatePolicy::Overwrite
            } else {
                DuplicatePolicy::Error
            })
            .build()
    }
}

fn is_default_output(dir: &Path) -> bool {
    dir.as_os_str().is_empty() || dir == Path::new(DEFAULT_OUTPUT_DIR) || dir == Path::new(".")
}

fn base_name(dir: &Path) -> Option<String> {
    dir.file_name().map(|s| s.to_string_lossy().into_owned())
}

/// Resolved settings for one generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    input_dir: PathBuf,
    output_dir: PathBuf,
    output_file: String,
    module_name: String,
    collect: CollectOptions,
}

impl Config {
    /// Start building a config.
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Root of the query tree.
    pub fn input_dir(&self) -> &Path {
        &self.input_dir
    }

    /// Directory the generated file goes to.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// File name of the generated file.
    pub fn output_file(&self) -> &str {
        &self.output_file
    }

    /// `output_dir/output_file`.
    pub fn output_path(&self) -> PathBuf {
        self.output_dir.join(&self.output_file)
    }

    /// Name of the generated module.
    pub fn module_name(&self) -> &str {
        &self.module_name
    }

    /// Options handed to the collector.
    pub fn collect_options(&self) -> &CollectOptions {
        &self.collect
    }
}

/// Builder for [`Config`]. Unset values take the crate defaults, except the
/// module name which is required.
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    input_dir: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    output_file: Option<String>,
    module_name: Option<String>,
    prefix: Option<String>,
    extension: Option<String>,
    duplicates: Option<DuplicatePolicy>,
    deriver: Option<Deriver>,
}

impl ConfigBuilder {
    /// Root of the query tree.
    pub fn input_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.input_dir = Some(dir.into());
        self
    }

    /// Directory of the generated file.
    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    /// Name of the generated file.
    pub fn output_file(mut self, file: impl Into<String>) -> Self {
        self.output_file = Some(file.into());
        self
    }

    /// Module name. Required.
    pub fn module_name(mut self, name: impl Into<String>) -> Self {
        self.module_name = Some(name.into());
        self
    }

    /// Namespace prefix.
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Extension of query files, with or without the leading dot.
    pub fn extension(mut self, ext: impl Into<String>) -> Self {
        self.extension = Some(ext.into());
        self
    }

    /// What to do with duplicate identifiers.
    pub fn duplicates(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicates = Some(policy);
        self
    }

    /// Identifier deriver, for a custom abbreviation set.
    pub fn deriver(mut self, deriver: Deriver) -> Self {
        self.deriver = Some(deriver);
        self
    }

    /// Validate and build the config.
    pub fn build(self) -> Result<Config> {
        let module_name = self
            .module_name
            .filter(|m| !m.is_empty())
            .ok_or_else(|| Error::configuration("module name must be provided"))?;
        if syn::parse_str::<syn::Ident>(&module_name).is_err() {
            return Err(Error::configuration(format!(
                "module name `{module_name}` is not a valid Rust identifier"
            )));
        }

        let output_file = self
            .output_file
            .unwrap_or_else(|| DEFAULT_OUTPUT_FILE.to_string());
        if output_file.is_empty() || Path::new(&output_file).file_name().is_none() {
            return Err(Error::configuration(format!(
                "invalid output file name `{output_file}`"
            )));
        }

        let extension = self
            .extension
            .map(|e| e.trim_start_matches('.').to_string())
            .unwrap_or_else(|| DEFAULT_EXTENSION.to_string());
        if extension.is_empty() {
            return Err(Error::configuration("file extension must not be empty"));
        }

        Ok(Config {
            input_dir: self
                .input_dir
                .unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT_DIR)),
            output_dir: self
                .output_dir
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR)),
            output_file,
            module_name,
            collect: CollectOptions {
                prefix: self.prefix.unwrap_or_default(),
                extension,
                duplicates: self.duplicates.unwrap_or_default(),
                deriver: self.deriver.unwrap_or_default(),
            },
        })
    }
}
