//! PDF manipulation module

pub mod extract;
pub mod fixtures;
pub mod page;
pub mod stamp;

// Re-export commonly used items
pub use extract::{collect_pdf_inputs, extract_first_page, extract_first_pages, ExtractReport, FirstPageBook};
pub use fixtures::{create_test_pdf, create_test_pdfs, DEFAULT_FIXTURE_DIR, FIXTURE_SET};
pub use stamp::{add_page_numbers, stamp_document, stamp_path, BatchReport, StampOptions};
