//! Page-number stamping using lopdf
//!
//! Every page gets an opaque white cover over a margin region and its 1-based
//! page number drawn on top, in one of the standard PDF fonts.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, error};
use lopdf::{Document, ObjectId};

use crate::discover::{has_pdf_extension, pdf_files_in_dir};
use crate::error::{Error, Result};
use crate::fonts::StandardFont;
use crate::layout::{compute_placement, Position, StampPlacement};
use crate::pdf::page::{add_font_to_page_resources, append_content_to_page, isolate_page_content, page_box};

/// Resource name the label font is registered under on each page
const FONT_RESOURCE: &str = "PageNumberFont";

/// Options for stamping page numbers
#[derive(Debug, Clone)]
pub struct StampOptions {
    /// Where the number goes on each page
    pub position: Position,
    /// Font for the number
    pub font: StandardFont,
    /// Font size in points
    pub font_size: f32,
}

impl Default for StampOptions {
    fn default() -> Self {
        Self {
            position: Position::Bottom,
            font: StandardFont::Helvetica,
            font_size: 12.0,
        }
    }
}

/// Outcome of stamping a file or a directory of files
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchReport {
    /// Files written successfully, in processing order
    pub outputs: Vec<PathBuf>,
    /// Files that were attempted and failed
    pub failed: usize,
}

impl BatchReport {
    /// Number of files stamped successfully
    pub fn succeeded(&self) -> usize {
        self.outputs.len()
    }
}

/// Stamp page numbers onto every page of a loaded document
///
/// Returns the number of pages stamped.
pub fn stamp_document(doc: &mut Document, options: &StampOptions) -> Result<usize> {
    let font_id = options.font.add_to_document(doc);

    let pages: Vec<(u32, ObjectId)> = doc.get_pages().into_iter().collect();

    for (index, (_, page_id)) in pages.iter().enumerate() {
        let page_number = index + 1;
        let page_box = page_box(doc, *page_id);
        debug!(
            "Page {} dimensions: {} x {}",
            page_number, page_box.width, page_box.height
        );

        let label = page_number.to_string();
        let text_width = options.font.text_width(&label, options.font_size);
        let placement = compute_placement(&page_box, options.position, text_width, options.font_size);

        isolate_page_content(doc, *page_id)?;
        add_font_to_page_resources(doc, *page_id, FONT_RESOURCE, font_id)?;

        let content = stamp_content(&placement, &label, options.font_size);
        append_content_to_page(doc, *page_id, content.into_bytes())?;
    }

    Ok(pages.len())
}

/// Content stream operators for one page's cover and label
fn stamp_content(placement: &StampPlacement, label: &str, font_size: f32) -> String {
    let cover = &placement.cover;
    let mut content = String::new();

    content.push_str("q\n");

    // Opaque white cover, filled and stroked
    content.push_str("1 1 1 rg\n");
    content.push_str("1 1 1 RG\n");
    content.push_str(&format!(
        "{} {} {} {} re\n",
        cover.x0,
        cover.y0,
        cover.width(),
        cover.height()
    ));
    content.push_str("B\n");

    // Black label
    content.push_str("0 g\n");
    content.push_str("BT\n");
    content.push_str(&format!("/{} {} Tf\n", FONT_RESOURCE, font_size));
    content.push_str(&format!("{} {} Td\n", placement.anchor.x, placement.anchor.y));
    content.push_str(&format!("({}) Tj\n", escape_pdf_string(label)));
    content.push_str("ET\n");

    content.push_str("Q\n");
    content
}

/// Escape special characters in PDF strings
fn escape_pdf_string(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('(', "\\(")
        .replace(')', "\\)")
        .replace('\r', "\\r")
        .replace('\n', "\\n")
}

/// Add page numbers to a PDF file
///
/// Creates the output's parent directory if needed. Returns the number of
/// pages stamped.
///
/// # Example
///
/// ```no_run
/// use pdf_pagetools::pdf::{add_page_numbers, StampOptions};
/// use std::path::Path;
///
/// add_page_numbers(Path::new("input.pdf"), Path::new("output.pdf"), &StampOptions::default())
///     .expect("Failed to add page numbers");
/// ```
pub fn add_page_numbers(input: &Path, output: &Path, options: &StampOptions) -> Result<usize> {
    let mut doc = Document::load(input)?;
    let page_count = doc.get_pages().len();
    if page_count == 0 {
        return Err(Error::EmptyPdf(input.to_path_buf()));
    }
    debug!("Processing {} pages in {}...", page_count, input.display());

    let pages = stamp_document(&mut doc, options)?;

    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    doc.compress();
    doc.save(output)?;
    debug!("Saved to {}", output.display());

    Ok(pages)
}

/// Stamp one file, logging and counting a failure instead of propagating it
fn stamp_one(input: &Path, output: &Path, options: &StampOptions, report: &mut BatchReport) {
    match add_page_numbers(input, output, options) {
        Ok(_) => report.outputs.push(output.to_path_buf()),
        Err(e) => {
            error!("Error processing {}: {}", input.display(), e);
            report.failed += 1;
        }
    }
}

/// Stamp a single PDF file or every PDF in a directory
///
/// - Directory input writes `output/<file name>` for each PDF found; the
///   output must then be a directory (it is created if missing).
/// - File input writes to `output`, or to `output/<file name>` when
///   `output` is an existing directory.
///
/// Problems are logged; the report says how many files succeeded.
pub fn stamp_path(input: &Path, output: &Path, options: &StampOptions) -> BatchReport {
    let mut report = BatchReport::default();

    if !input.exists() {
        error!("Error: {}", Error::FileNotFound(input.to_path_buf()));
        return report;
    }

    if input.is_dir() {
        if !output.is_dir() && has_pdf_extension(output) {
            error!("Error: {}", Error::OutputNotDirectory(output.to_path_buf()));
            return report;
        }

        if !output.exists() {
            if let Err(e) = fs::create_dir_all(output) {
                error!("Error creating directory {}: {}", output.display(), e);
                return report;
            }
        }

        for pdf_file in pdf_files_in_dir(input) {
            let Some(file_name) = pdf_file.file_name() else {
                continue;
            };
            let target = output.join(file_name);
            stamp_one(&pdf_file, &target, options, &mut report);
        }

        return report;
    }

    if !has_pdf_extension(input) {
        error!("Error: {}", Error::NotPdf(input.to_path_buf()));
        return report;
    }

    let target = match input.file_name() {
        Some(file_name) if output.is_dir() => output.join(file_name),
        _ => output.to_path_buf(),
    };
    stamp_one(input, &target, options, &mut report);

    report
}
