//! One generation run: collect, render, write.

use std::path::PathBuf;

use crate::collect::Collector;
use crate::config::Config;
use crate::error::Result;
use crate::render::render;
use crate::table::SymbolTable;
use crate::write::write_atomic;

/// Outcome of a successful [`generate`] call.
#[derive(Debug, Clone)]
pub struct Generated {
    /// Where the module was written.
    pub path: PathBuf,
    /// What was collected.
    pub table: SymbolTable,
}

/// Collect and render without touching the output directory.
pub fn generate_source(config: &Config) -> Result<(SymbolTable, String)> {
    let table = Collector::new(config.collect_options()).collect(config.input_dir())?;
    let source = render(config.module_name(), &table)?;
    Ok((table, source))
}

/// Run the whole pipeline for `config`.
///
/// Nothing is written unless collection and rendering both succeed.
pub fn generate(config: &Config) -> Result<Generated> {
    tracing::info!(
        "Generating module {} from {}",
        config.module_name(),
        config.input_dir().display()
    );
    let (table, source) = generate_source(config)?;
    let path = write_atomic(config.output_dir(), config.output_file(), &source)?;
    Ok(Generated { path, table })
}
