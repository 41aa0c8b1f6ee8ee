//! Output file handling.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Write `contents` to `dir/file_name` without ever exposing a partial file.
///
/// `dir` is created if missing. The contents go to a temporary file in `dir`
/// first and are then renamed over the target.
pub fn write_atomic(dir: &Path, file_name: &str, contents: &str) -> Result<PathBuf> {
    let target = dir.join(file_name);

    fs::create_dir_all(dir).map_err(|e| Error::write(dir, e))?;
    if target.is_dir() {
        return Err(Error::write(
            &target,
            io::Error::other("target is a directory"),
        ));
    }

    let mut tmp = tempfile::Builder::new()
        .prefix(".sqltote_")
        .suffix(".tmp")
        .rand_bytes(6)
        .tempfile_in(dir)
        .map_err(|e| Error::write(&target, e))?;

    tmp.write_all(contents.as_bytes())
        .and_then(|()| tmp.as_file().sync_all())
        .map_err(|e| Error::write(&target, e))?;

    tmp.persist(&target).map_err(|e| Error::write(&target, e.error))?;

    tracing::info!("Wrote {} ({} bytes)", target.display(), contents.len());
    Ok(target)
}
