//! Open files with the system default application

use std::path::Path;
use std::process::Command;

use crate::error::Result;

/// Open a file with the system default application
///
/// The viewer is spawned and not waited on.
pub fn open_file(path: &Path) -> Result<()> {
    #[cfg(target_os = "macos")]
    {
        Command::new("open").arg(path).spawn()?;
    }
    #[cfg(target_os = "windows")]
    {
        Command::new("cmd")
            .args(["/C", "start", ""])
            .arg(path)
            .spawn()?;
    }
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        Command::new("xdg-open").arg(path).spawn()?;
    }
    Ok(())
}
