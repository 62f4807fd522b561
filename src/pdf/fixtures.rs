//! Deterministic test PDFs
//!
//! Builds small US Letter documents with one line naming the page and one
//! line of caller-supplied text, which is enough to tell pages apart after
//! stamping or extraction.

use std::fs;
use std::path::{Path, PathBuf};

use log::info;
use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, Stream, StringFormat};

use crate::error::Result;
use crate::fonts::StandardFont;
use crate::layout::PageBox;

/// Directory the fixture set is written to by default
pub const DEFAULT_FIXTURE_DIR: &str = "test_pdfs";

/// File name, page count and second text line of each fixture
pub const FIXTURE_SET: [(&str, u32, &str); 3] = [
    ("document1.pdf", 3, "First page should be extracted from document1"),
    ("document2.pdf", 2, "First page should be extracted from document2"),
    ("document3.pdf", 4, "First page should be extracted from document3"),
];

const FONT_SIZE: i64 = 12;

/// Operators drawing one line of text at (x, y)
fn text_line(x: i64, y: i64, text: &str) -> Vec<Operation> {
    vec![
        Operation::new("BT", vec![]),
        Operation::new(
            "Tf",
            vec![Object::Name(b"F1".to_vec()), Object::Integer(FONT_SIZE)],
        ),
        Operation::new("Td", vec![Object::Integer(x), Object::Integer(y)]),
        Operation::new(
            "Tj",
            vec![Object::String(text.as_bytes().to_vec(), StringFormat::Literal)],
        ),
        Operation::new("ET", vec![]),
    ]
}

/// Create a PDF at `path` with `num_pages` pages
///
/// Each page reads "This is page N of <path>" with `page_content` below it.
pub fn create_test_pdf(path: &Path, num_pages: u32, page_content: &str) -> Result<()> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = StandardFont::Helvetica.add_to_document(&mut doc);

    let mut fonts = Dictionary::new();
    fonts.set("F1", Object::Reference(font_id));
    let mut resources = Dictionary::new();
    resources.set("Font", Object::Dictionary(fonts));
    let resources_id = doc.add_object(Object::Dictionary(resources));

    let letter = PageBox::letter();
    let media_box = vec![
        Object::Integer(0),
        Object::Integer(0),
        Object::Integer(letter.width as i64),
        Object::Integer(letter.height as i64),
    ];

    let mut kids = Vec::new();
    for page_num in 1..=num_pages {
        let mut operations = text_line(
            100,
            750,
            &format!("This is page {} of {}", page_num, path.display()),
        );
        operations.extend(text_line(100, 700, page_content));

        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(Dictionary::new(), content.encode()?));

        let mut page = Dictionary::new();
        page.set("Type", Object::Name(b"Page".to_vec()));
        page.set("Parent", Object::Reference(pages_id));
        page.set("Contents", Object::Reference(content_id));
        let page_id = doc.add_object(Object::Dictionary(page));
        kids.push(Object::Reference(page_id));
    }

    // MediaBox and Resources live on the Pages node and are inherited
    let mut pages = Dictionary::new();
    pages.set("Type", Object::Name(b"Pages".to_vec()));
    pages.set("Count", Object::Integer(i64::from(num_pages)));
    pages.set("Kids", Object::Array(kids));
    pages.set("MediaBox", Object::Array(media_box));
    pages.set("Resources", Object::Reference(resources_id));
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let mut catalog = Dictionary::new();
    catalog.set("Type", Object::Name(b"Catalog".to_vec()));
    catalog.set("Pages", Object::Reference(pages_id));
    let catalog_id = doc.add_object(Object::Dictionary(catalog));
    doc.trailer.set("Root", Object::Reference(catalog_id));

    doc.compress();
    doc.save(path)?;

    Ok(())
}

/// Write the standard fixture set into `dir`, creating it if needed
///
/// Returns the paths written, in [`FIXTURE_SET`] order.
pub fn create_test_pdfs(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.exists() {
        fs::create_dir_all(dir)?;
    }

    let mut created = Vec::with_capacity(FIXTURE_SET.len());
    for (name, num_pages, page_content) in FIXTURE_SET {
        let path = dir.join(name);
        create_test_pdf(&path, num_pages, page_content)?;
        info!("Created test PDF: {}", path.display());
        created.push(path);
    }

    Ok(created)
}
