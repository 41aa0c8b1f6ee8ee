use std::path::PathBuf;

use clap::Parser;
use sqltote_core::{
    DEFAULT_EXTENSION, DEFAULT_INPUT_DIR, DEFAULT_OUTPUT_DIR, DEFAULT_OUTPUT_FILE, Options,
};

/// sqltote - Generate Rust constants from a directory of SQL files
#[derive(Parser, Debug)]
#[command(name = "sqltote")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Directory of the input SQL file(s)
    #[arg(long = "in", default_value = DEFAULT_INPUT_DIR)]
    pub input_dir: PathBuf,

    /// Directory of the output source file
    #[arg(long = "out", default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,

    /// Name of the output source file
    #[arg(long = "file", default_value = DEFAULT_OUTPUT_FILE)]
    pub output_file: String,

    /// Name of the generated module (defaults to the output directory name,
    /// or $SQLTOTE_MODULE when --out is not given)
    #[arg(long = "module", visible_alias = "pkg")]
    pub module_name: Option<String>,

    /// Prefix for namespace names
    #[arg(long, default_value = "")]
    pub prefix: String,

    /// Extension of query files
    #[arg(long = "ext", default_value = DEFAULT_EXTENSION)]
    pub extension: String,

    /// Let a later file replace an earlier one with the same name instead of
    /// failing
    #[arg(long, default_value_t = false)]
    pub overwrite_duplicates: bool,
}

impl Args {
    /// Convert command-line arguments into unresolved options
    pub fn to_options(&self) -> Options {
        Options {
            input_dir: self.input_dir.clone(),
            output_dir: self.output_dir.clone(),
            output_file: self.output_file.clone(),
            module_name: self.module_name.clone(),
            prefix: self.prefix.clone(),
            extension: self.extension.clone(),
            overwrite_duplicates: self.overwrite_duplicates,
        }
    }
}
