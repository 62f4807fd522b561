//! Page dictionary helpers shared by stamping and extraction
//!
//! Pages may inherit Resources, MediaBox, CropBox and Rotate from any
//! ancestor in the page tree, and may hold those values directly or as
//! references. These helpers hide both indirections.

use std::collections::BTreeSet;

use lopdf::{Dictionary, Document, Object, ObjectId, Stream};

use crate::error::{Error, Result};
use crate::layout::PageBox;

/// Page attributes that may be inherited from the page tree
pub const INHERITABLE_KEYS: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// Guard against cyclic /Parent chains in damaged files
const MAX_TREE_DEPTH: usize = 64;

/// Follow a single reference, leaving direct objects alone
fn resolve<'a>(doc: &'a Document, object: &'a Object) -> &'a Object {
    match object {
        Object::Reference(id) => doc.get_object(*id).unwrap_or(object),
        _ => object,
    }
}

/// Look up `key` on the page, then on each ancestor page-tree node
pub fn inherited_attribute(doc: &Document, page_id: ObjectId, key: &[u8]) -> Option<Object> {
    let mut node = doc.get_dictionary(page_id).ok()?;

    for _ in 0..MAX_TREE_DEPTH {
        if let Ok(value) = node.get(key) {
            return Some(resolve(doc, value).clone());
        }
        let parent_id = node.get(b"Parent").and_then(Object::as_reference).ok()?;
        node = doc.get_dictionary(parent_id).ok()?;
    }

    None
}

/// Read a `[llx lly urx ury]` box array
fn parse_box(doc: &Document, object: &Object) -> Option<PageBox> {
    let values = object.as_array().ok()?;
    if values.len() != 4 {
        return None;
    }

    let nums: Vec<f32> = values
        .iter()
        .filter_map(|v| resolve(doc, v).as_float().ok())
        .collect();

    if nums.len() != 4 {
        return None;
    }

    let page_box = PageBox::from_corners(nums[0], nums[1], nums[2], nums[3]);
    (page_box.width > 0.0 && page_box.height > 0.0).then_some(page_box)
}

/// The visible area of a page: CropBox, then MediaBox, then US Letter
pub fn page_box(doc: &Document, page_id: ObjectId) -> PageBox {
    [b"CropBox".as_slice(), b"MediaBox".as_slice()]
        .into_iter()
        .find_map(|key| {
            inherited_attribute(doc, page_id, key).and_then(|obj| parse_box(doc, &obj))
        })
        .unwrap_or_else(PageBox::letter)
}

/// Copy inherited attributes onto the page itself
///
/// Needed before a page is moved under a different parent.
pub fn flatten_inherited_attributes(doc: &mut Document, page_id: ObjectId) -> Result<()> {
    let mut inherited = Vec::new();
    {
        let page = doc.get_dictionary(page_id)?;
        for key in INHERITABLE_KEYS {
            if !page.has(key) {
                if let Some(value) = inherited_attribute(doc, page_id, key) {
                    inherited.push((key.to_vec(), value));
                }
            }
        }
    }

    let page = doc.get_dictionary_mut(page_id)?;
    for (key, value) in inherited {
        page.set(key, value);
    }

    Ok(())
}

/// Register a font under `resource_name` in the page's own Resources
///
/// Inherited or referenced Resources are copied onto the page first, so the
/// change never leaks into sibling pages that share them.
pub fn add_font_to_page_resources(
    doc: &mut Document,
    page_id: ObjectId,
    resource_name: &str,
    font_id: ObjectId,
) -> Result<()> {
    let mut resources = match inherited_attribute(doc, page_id, b"Resources") {
        Some(Object::Dictionary(dict)) => dict,
        _ => Dictionary::new(),
    };

    let mut fonts = match resources.get(b"Font") {
        Ok(fonts) => match resolve(doc, fonts) {
            Object::Dictionary(dict) => dict.clone(),
            _ => Dictionary::new(),
        },
        Err(_) => Dictionary::new(),
    };

    fonts.set(resource_name, Object::Reference(font_id));
    resources.set("Font", Object::Dictionary(fonts));

    let page = doc.get_dictionary_mut(page_id)?;
    page.set("Resources", Object::Dictionary(resources));

    Ok(())
}

/// Content stream references of a page, in drawing order
fn content_refs(page: &Dictionary) -> Vec<Object> {
    match page.get(b"Contents") {
        Ok(Object::Array(items)) => items.clone(),
        Ok(single) => vec![single.clone()],
        Err(_) => Vec::new(),
    }
}

/// Add a content stream before the page's existing content
pub fn prepend_content_to_page(doc: &mut Document, page_id: ObjectId, content: Vec<u8>) -> Result<()> {
    let stream_id = doc.add_object(Stream::new(Dictionary::new(), content));
    let page = doc.get_dictionary_mut(page_id)?;

    let mut contents = content_refs(page);
    contents.insert(0, Object::Reference(stream_id));
    page.set("Contents", Object::Array(contents));

    Ok(())
}

/// Add a content stream after the page's existing content, so it draws on top
pub fn append_content_to_page(doc: &mut Document, page_id: ObjectId, content: Vec<u8>) -> Result<()> {
    let stream_id = doc.add_object(Stream::new(Dictionary::new(), content));
    let page = doc.get_dictionary_mut(page_id)?;

    let mut contents = content_refs(page);
    contents.push(Object::Reference(stream_id));
    page.set("Contents", Object::Array(contents));

    Ok(())
}

/// Wrap the existing content of a page in `q … Q`
///
/// Transformations or colours left active by the original content are reset
/// before anything appended afterwards is drawn. Pages with no content are
/// left untouched.
pub fn isolate_page_content(doc: &mut Document, page_id: ObjectId) -> Result<()> {
    if content_refs(doc.get_dictionary(page_id)?).is_empty() {
        return Ok(());
    }

    prepend_content_to_page(doc, page_id, b"q\n".to_vec())?;
    append_content_to_page(doc, page_id, b"Q\n".to_vec())
}

/// Whether an annotation is a link whose destination is one of `pages`
fn links_to_any(doc: &Document, entry: &Object, pages: &BTreeSet<ObjectId>) -> bool {
    let Ok(annot) = resolve(doc, entry).as_dict() else {
        return false;
    };

    // Explicit /Dest, or the /D of a GoTo action
    let dest = match annot.get(b"Dest") {
        Ok(dest) => Some(dest),
        Err(_) => annot
            .get(b"A")
            .ok()
            .and_then(|action| resolve(doc, action).as_dict().ok())
            .and_then(|action| action.get(b"D").ok()),
    };

    dest.and_then(|dest| resolve(doc, dest).as_array().ok())
        .and_then(|items| items.first())
        .and_then(|target| target.as_reference().ok())
        .is_some_and(|target| pages.contains(&target))
}

/// Remove link annotations on the page that point into `pages`
///
/// Returns the number of annotations removed.
pub fn remove_links_to_pages(
    doc: &mut Document,
    page_id: ObjectId,
    pages: &BTreeSet<ObjectId>,
) -> Result<usize> {
    let annots = match doc.get_dictionary(page_id)?.get(b"Annots") {
        Ok(annots) => match resolve(doc, annots).as_array() {
            Ok(items) => items.clone(),
            Err(_) => return Ok(0),
        },
        Err(_) => return Ok(0),
    };

    let kept: Vec<Object> = annots
        .iter()
        .filter(|entry| !links_to_any(doc, entry, pages))
        .cloned()
        .collect();
    let removed = annots.len() - kept.len();

    if removed > 0 {
        let page = doc.get_dictionary_mut(page_id)?;
        if kept.is_empty() {
            page.remove(b"Annots");
        } else {
            page.set("Annots", Object::Array(kept));
        }
    }

    Ok(removed)
}

/// ID of the first page, or an error naming `source` if there are none
pub fn first_page_id(doc: &Document, source: &std::path::Path) -> Result<ObjectId> {
    doc.get_pages()
        .into_values()
        .next()
        .ok_or_else(|| Error::EmptyPdf(source.to_path_buf()))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A page tree whose root carries the MediaBox and Resources
    fn doc_with_inherited_attributes() -> (Document, ObjectId, ObjectId) {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let mut fonts = Dictionary::new();
        fonts.set("F1", Object::Integer(1));
        let mut resources = Dictionary::new();
        resources.set("Font", Object::Dictionary(fonts));
        let resources_id = doc.add_object(Object::Dictionary(resources));

        let mut page = Dictionary::new();
        page.set("Type", Object::Name(b"Page".to_vec()));
        page.set("Parent", Object::Reference(pages_id));
        let page_id = doc.add_object(Object::Dictionary(page));

        let mut pages = Dictionary::new();
        pages.set("Type", Object::Name(b"Pages".to_vec()));
        pages.set("Count", Object::Integer(1));
        pages.set("Kids", Object::Array(vec![Object::Reference(page_id)]));
        pages.set("Resources", Object::Reference(resources_id));
        pages.set(
            "MediaBox",
            Object::Array(vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Real(595.0),
                Object::Real(842.0),
            ]),
        );
        doc.objects.insert(pages_id, Object::Dictionary(pages));

        let mut catalog = Dictionary::new();
        catalog.set("Type", Object::Name(b"Catalog".to_vec()));
        catalog.set("Pages", Object::Reference(pages_id));
        let catalog_id = doc.add_object(Object::Dictionary(catalog));
        doc.trailer.set("Root", Object::Reference(catalog_id));

        (doc, pages_id, page_id)
    }

    #[test]
    fn test_page_box_inherited_from_parent() {
        let (doc, _, page_id) = doc_with_inherited_attributes();
        assert_eq!(page_box(&doc, page_id), PageBox::a4());
    }

    #[test]
    fn test_crop_box_wins_over_media_box() {
        let (mut doc, _, page_id) = doc_with_inherited_attributes();
        doc.get_dictionary_mut(page_id).unwrap().set(
            "CropBox",
            Object::Array(vec![
                Object::Integer(10),
                Object::Integer(20),
                Object::Integer(110),
                Object::Integer(220),
            ]),
        );

        let page_box = page_box(&doc, page_id);
        assert_eq!(page_box, PageBox::from_corners(10.0, 20.0, 110.0, 220.0));
    }

    #[test]
    fn test_missing_box_defaults_to_letter() {
        let (mut doc, pages_id, page_id) = doc_with_inherited_attributes();
        doc.get_dictionary_mut(pages_id).unwrap().remove(b"MediaBox");
        assert_eq!(page_box(&doc, page_id), PageBox::letter());
    }

    #[test]
    fn test_flatten_copies_inherited_values() {
        let (mut doc, _, page_id) = doc_with_inherited_attributes();
        flatten_inherited_attributes(&mut doc, page_id).unwrap();

        let page = doc.get_dictionary(page_id).unwrap();
        assert!(page.has(b"MediaBox"));
        // Referenced Resources are resolved to a direct dictionary
        assert!(matches!(page.get(b"Resources").unwrap(), Object::Dictionary(_)));
        assert!(!page.has(b"CropBox"));
    }

    #[test]
    fn test_add_font_keeps_existing_fonts() {
        let (mut doc, _, page_id) = doc_with_inherited_attributes();
        add_font_to_page_resources(&mut doc, page_id, "PageNum", (99, 0)).unwrap();

        let page = doc.get_dictionary(page_id).unwrap();
        let resources = page.get(b"Resources").unwrap().as_dict().unwrap();
        let fonts = resources.get(b"Font").unwrap().as_dict().unwrap();
        assert!(fonts.has(b"F1"));
        assert_eq!(fonts.get(b"PageNum").unwrap().as_reference().unwrap(), (99, 0));
    }

    #[test]
    fn test_isolate_wraps_existing_content() {
        let (mut doc, _, page_id) = doc_with_inherited_attributes();
        let original = doc.add_object(Stream::new(Dictionary::new(), b"2 0 0 2 0 0 cm".to_vec()));
        doc.get_dictionary_mut(page_id)
            .unwrap()
            .set("Contents", Object::Reference(original));

        isolate_page_content(&mut doc, page_id).unwrap();

        let contents = doc.get_page_content(page_id).unwrap();
        let text = String::from_utf8_lossy(&contents);
        assert!(text.trim_start().starts_with('q'));
        assert!(text.trim_end().ends_with('Q'));
        assert!(text.contains("cm"));
    }

    #[test]
    fn test_remove_links_to_dropped_pages() {
        let (mut doc, _, page_id) = doc_with_inherited_attributes();

        let mut direct = Dictionary::new();
        direct.set("Subtype", Object::Name(b"Link".to_vec()));
        direct.set(
            "Dest",
            Object::Array(vec![Object::Reference((50, 0)), Object::Name(b"Fit".to_vec())]),
        );

        let mut go_to = Dictionary::new();
        go_to.set("S", Object::Name(b"GoTo".to_vec()));
        go_to.set("D", Object::Array(vec![Object::Reference((60, 0)), Object::Name(b"XYZ".to_vec())]));
        let mut action_link = Dictionary::new();
        action_link.set("Subtype", Object::Name(b"Link".to_vec()));
        action_link.set("A", Object::Dictionary(go_to));
        let action_link_id = doc.add_object(Object::Dictionary(action_link));

        let mut web_link = Dictionary::new();
        web_link.set("Subtype", Object::Name(b"Link".to_vec()));
        let web_link_id = doc.add_object(Object::Dictionary(web_link));

        doc.get_dictionary_mut(page_id).unwrap().set(
            "Annots",
            Object::Array(vec![
                Object::Dictionary(direct),
                Object::Reference(action_link_id),
                Object::Reference(web_link_id),
            ]),
        );

        let dropped: BTreeSet<ObjectId> = [(50, 0), (60, 0)].into_iter().collect();
        let removed = remove_links_to_pages(&mut doc, page_id, &dropped).unwrap();
        assert_eq!(removed, 2);

        let annots = doc.get_dictionary(page_id).unwrap().get(b"Annots").unwrap().as_array().unwrap();
        assert_eq!(annots.len(), 1);
        assert_eq!(annots[0].as_reference().unwrap(), web_link_id);
    }

    #[test]
    fn test_remove_links_without_annotations() {
        let (mut doc, _, page_id) = doc_with_inherited_attributes();
        let dropped: BTreeSet<ObjectId> = [(50, 0)].into_iter().collect();
        assert_eq!(remove_links_to_pages(&mut doc, page_id, &dropped).unwrap(), 0);
    }

    #[test]
    fn test_isolate_skips_empty_page() {
        let (mut doc, _, page_id) = doc_with_inherited_attributes();
        isolate_page_content(&mut doc, page_id).unwrap();
        assert!(!doc.get_dictionary(page_id).unwrap().has(b"Contents"));
    }
}
