//! PDF Page Tools Library
//!
//! Small, single-pass utilities built on lopdf:
//! - Stamp page numbers onto every page of a PDF (or a directory of PDFs)
//! - Collect the first page of many PDFs into one document
//! - Generate deterministic multi-page test PDFs
//!
//! # Example
//!
//! ```no_run
//! use pdf_pagetools::layout::Position;
//! use pdf_pagetools::pdf::{add_page_numbers, StampOptions};
//! use std::path::Path;
//!
//! let options = StampOptions {
//!     position: Position::BottomRight,
//!     ..Default::default()
//! };
//!
//! add_page_numbers(Path::new("input.pdf"), Path::new("numbered.pdf"), &options)
//!     .expect("Failed to add page numbers");
//! ```

pub mod discover;
pub mod error;
pub mod fonts;
pub mod layout;
pub mod logging;
pub mod open;
pub mod pdf;

// Re-export commonly used items
pub use error::{Error, Result};
