//! PDF file discovery

use std::path::{Path, PathBuf};

use glob::{glob, Pattern};
use log::{debug, error, info};

/// Find all PDF files directly inside `dir`
///
/// Matches `*.pdf` without recursing into subdirectories. Results are sorted
/// for consistent ordering. Problems are logged and yield whatever was found,
/// never an error: callers treat an empty list as "nothing to do".
pub fn pdf_files_in_dir(dir: &Path) -> Vec<PathBuf> {
    let mut pdf_files = Vec::new();

    if !dir.is_dir() {
        error!("Error: {} is not a directory.", dir.display());
        return pdf_files;
    }

    let pattern = format!("{}/*.pdf", Pattern::escape(&dir.to_string_lossy()));
    let entries = match glob(&pattern) {
        Ok(entries) => entries,
        Err(e) => {
            error!("Error reading directory {}: {}", dir.display(), e);
            return pdf_files;
        }
    };

    for entry in entries {
        match entry {
            Ok(path) if path.is_file() => pdf_files.push(path),
            Ok(path) => debug!("Skipping {}: not a file", path.display()),
            Err(e) => error!("Error reading directory {}: {}", dir.display(), e),
        }
    }

    pdf_files.sort();

    if pdf_files.is_empty() {
        info!("No PDF files found in {}", dir.display());
    } else {
        debug!("Found {} PDF files in {}", pdf_files.len(), dir.display());
    }

    pdf_files
}

/// Whether `path` names a PDF by extension (case-insensitive)
pub fn has_pdf_extension(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false)
}
