//! First-page extraction using lopdf
//!
//! Pages are moved out of their source documents into one output document
//! and stitched under a fresh page tree, in the order they were added.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, error};
use lopdf::{Dictionary, Document, Object, ObjectId};

use crate::discover::{has_pdf_extension, pdf_files_in_dir};
use crate::error::{Error, Result};
use crate::pdf::page::{first_page_id, flatten_inherited_attributes, remove_links_to_pages};

/// Expand a list of files and directories into the PDFs to process
///
/// Directories contribute the PDFs directly inside them; files are kept if
/// they have a `.pdf` extension. Missing paths and other files are logged and
/// skipped. Order follows `inputs`, and duplicates are kept.
pub fn collect_pdf_inputs(inputs: &[PathBuf]) -> Vec<PathBuf> {
    let mut pdf_files = Vec::new();

    for input in inputs {
        if !input.exists() {
            error!("Error: Path {} does not exist.", input.display());
        } else if input.is_dir() {
            pdf_files.extend(pdf_files_in_dir(input));
        } else if has_pdf_extension(input) {
            pdf_files.push(input.clone());
        } else {
            error!("Error: {}", Error::NotPdf(input.clone()));
        }
    }

    pdf_files
}

/// Load a document and strip it down to its first page
///
/// Attributes the page inherits from its tree are copied onto it so it
/// survives being re-parented.
pub fn extract_first_page(path: &Path) -> Result<Document> {
    let mut doc = Document::load(path)?;
    let page_id = first_page_id(&doc, path)?;

    flatten_inherited_attributes(&mut doc, page_id)?;

    let (rest, dropped): (Vec<u32>, BTreeSet<ObjectId>) = doc
        .get_pages()
        .into_iter()
        .filter(|&(_, id)| id != page_id)
        .unzip();

    if !rest.is_empty() {
        // Links into dropped pages would keep them reachable through pruning
        let removed = remove_links_to_pages(&mut doc, page_id, &dropped)?;
        if removed > 0 {
            debug!("Dropped {} links to other pages of {}", removed, path.display());
        }
        doc.delete_pages(&rest);
    }
    doc.prune_objects();

    Ok(doc)
}

/// Accumulates first pages and writes them out as one PDF
///
/// # Example
///
/// ```no_run
/// use pdf_pagetools::pdf::FirstPageBook;
/// use std::path::Path;
///
/// let mut book = FirstPageBook::new();
/// book.append_first_page_of(Path::new("a.pdf")).expect("Failed to read a.pdf");
/// book.append_first_page_of(Path::new("b.pdf")).expect("Failed to read b.pdf");
/// book.save(Path::new("first-pages.pdf")).expect("Failed to save");
/// ```
#[derive(Debug, Default)]
pub struct FirstPageBook {
    objects: BTreeMap<ObjectId, Object>,
    page_ids: Vec<ObjectId>,
    max_id: u32,
}

impl FirstPageBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of pages collected so far
    pub fn page_count(&self) -> usize {
        self.page_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.page_ids.is_empty()
    }

    /// Take the first page of the PDF at `path` and append it
    ///
    /// On error nothing is appended.
    pub fn append_first_page_of(&mut self, path: &Path) -> Result<()> {
        let mut doc = extract_first_page(path)?;

        // Renumber objects in this document to avoid conflicts
        doc.renumber_objects_with(self.max_id + 1);
        let page_id = first_page_id(&doc, path)?;

        self.max_id = doc.max_id;
        self.objects.extend(doc.objects);
        self.page_ids.push(page_id);

        debug!("Extracted first page from {}", path.display());
        Ok(())
    }

    /// Assemble the collected pages into a document
    ///
    /// The pages get a new Pages node and Catalog; objects left over from the
    /// source catalogs are pruned.
    pub fn into_document(self) -> Result<Document> {
        if self.page_ids.is_empty() {
            return Err(Error::General("No pages were processed successfully.".to_string()));
        }

        let mut doc = Document::with_version("1.5");
        doc.objects.extend(self.objects);

        // Keep new IDs above everything we just added
        doc.max_id = self.max_id;

        let pages_id = doc.new_object_id();

        let kids: Vec<Object> = self
            .page_ids
            .iter()
            .map(|&id| Object::Reference(id))
            .collect();

        let mut pages = Dictionary::new();
        pages.set("Type", Object::Name(b"Pages".to_vec()));
        pages.set("Count", Object::Integer(self.page_ids.len() as i64));
        pages.set("Kids", Object::Array(kids));
        doc.objects.insert(pages_id, Object::Dictionary(pages));

        let mut catalog = Dictionary::new();
        catalog.set("Type", Object::Name(b"Catalog".to_vec()));
        catalog.set("Pages", Object::Reference(pages_id));
        let catalog_id = doc.add_object(Object::Dictionary(catalog));
        doc.trailer.set("Root", Object::Reference(catalog_id));

        for &page_id in &self.page_ids {
            let page = doc.get_dictionary_mut(page_id)?;
            page.set("Parent", Object::Reference(pages_id));
        }

        doc.prune_objects();
        Ok(doc)
    }

    /// Write the collected pages to `output`
    ///
    /// Creates the output's parent directory if needed.
    pub fn save(self, output: &Path) -> Result<()> {
        let mut doc = self.into_document()?;
        if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        doc.compress();
        doc.save(output)?;
        Ok(())
    }
}

/// Outcome of an extraction run
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractReport {
    /// PDFs that resolved from the inputs
    pub attempted: usize,
    /// PDFs whose first page made it into the output
    pub extracted: usize,
}

/// Collect the first page of every input PDF into `output`
///
/// Files that cannot be read or have no pages are logged and skipped. The
/// output is only written when at least one page was extracted.
pub fn extract_first_pages(pdf_files: &[PathBuf], output: &Path) -> Result<ExtractReport> {
    let mut book = FirstPageBook::new();

    for pdf_file in pdf_files {
        if let Err(e) = book.append_first_page_of(pdf_file) {
            match e {
                Error::EmptyPdf(_) => error!("Error: {}", e),
                _ => error!("Error processing {}: {}", pdf_file.display(), e),
            }
        }
    }

    let report = ExtractReport {
        attempted: pdf_files.len(),
        extracted: book.page_count(),
    };

    if !book.is_empty() {
        book.save(output)?;
    }

    Ok(report)
}
