//! Error types for the PDF page tools

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the PDF page tools library
#[derive(Error, Debug)]
pub enum Error {
    /// PDF processing error
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// File not found
    #[error("Input path {} does not exist.", .0.display())]
    FileNotFound(PathBuf),

    /// Path is neither a PDF file nor a directory
    #[error("{} is not a PDF file or directory.", .0.display())]
    NotPdf(PathBuf),

    /// Invalid PDF (no pages)
    #[error("{} has no pages.", .0.display())]
    EmptyPdf(PathBuf),

    /// Directory input paired with a PDF file output
    #[error("When input is a directory, output must also be a directory, not a PDF file: {}", .0.display())]
    OutputNotDirectory(PathBuf),

    /// Font error
    #[error("Font error: {0}")]
    Font(String),

    /// General error
    #[error("{0}")]
    General(String),
}
