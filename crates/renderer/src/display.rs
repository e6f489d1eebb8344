//! Opening a saved image in the platform viewer.

use std::path::Path;
use std::process::Command;

use tracing::debug;

use crate::error::{RenderError, RenderResult};

/// Viewer command and leading arguments for this platform.
fn viewer_command() -> (&'static str, &'static [&'static str]) {
    if cfg!(target_os = "macos") {
        ("open", &[])
    } else if cfg!(target_os = "windows") {
        ("cmd", &["/C", "start", ""])
    } else {
        ("xdg-open", &[])
    }
}

/// Hand `path` to the platform image viewer and wait for the launcher.
pub fn open_in_viewer(path: &Path) -> RenderResult<()> {
    if !path.exists() {
        return Err(RenderError::Display(format!(
            "{} does not exist",
            path.display()
        )));
    }

    let (program, args) = viewer_command();
    debug!(program, path = %path.display(), "Opening image viewer");
    let status = Command::new(program)
        .args(args)
        .arg(path)
        .status()
        .map_err(|e| RenderError::Display(format!("cannot run {}: {}", program, e)))?;

    if status.success() {
        Ok(())
    } else {
        Err(RenderError::Display(format!(
            "{} exited with {}",
            program, status
        )))
    }
}
