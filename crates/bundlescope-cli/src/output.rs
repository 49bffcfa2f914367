//! Report destination: a file or stdout.

use std::io::Write;
use std::path::Path;

use tracing::info;

use bundlescope_core::{Error, Result};

/// Write `content` to `path`, or to stdout when no path is given.
///
/// Missing parent directories of `path` are created.
pub fn write_output(path: Option<&Path>, content: &str) -> Result<()> {
    let Some(path) = path else {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(content.as_bytes())?;
        if !content.ends_with('\n') {
            stdout.write_all(b"\n")?;
        }
        return Ok(());
    };

    let with_path = |e: std::io::Error| {
        Error::from(e)
            .with_operation("output::write")
            .with_context("path", path.display().to_string())
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(with_path)?;
    }
    std::fs::write(path, content).map_err(with_path)?;
    info!(path = %path.display(), bytes = content.len(), "output written");
    Ok(())
}
