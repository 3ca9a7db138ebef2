//! lopdf-based document backend.
//!
//! Implements [`CropBackend`] using the [lopdf](https://crates.io/crates/lopdf)
//! crate. Page multiplication flattens the page tree: inheritable page
//! attributes are copied onto every page first, then all pages become direct
//! kids of the root `/Pages` node.

use std::collections::{HashMap, HashSet};
use std::io::Write;

use lopdf::{Dictionary, Object, ObjectId, StringFormat};
use pagecrop_core::{BBox, Bookmark, CropError, DocumentMetadata, Rotation};
#[cfg(feature = "tracing")]
use tracing::{debug, warn};

use crate::backend::CropBackend;
use crate::error::BackendError;

/// Page attributes a page may inherit from its ancestors in the page tree.
const INHERITABLE_KEYS: [&[u8]; 4] = [b"MediaBox", b"CropBox", b"Resources", b"Rotate"];

/// Guard against cyclic `/Parent` chains and outline trees.
const MAX_TREE_DEPTH: usize = 64;

/// Safety limit on outline entries.
const MAX_OUTLINE_ITEMS: usize = 100_000;

/// A parsed PDF document backed by lopdf.
pub struct LopdfDocument {
    /// The underlying lopdf document.
    inner: lopdf::Document,
    /// Ordered page ObjectIds (indexed by 0-based page number).
    page_ids: Vec<ObjectId>,
}

impl LopdfDocument {
    /// Access the underlying lopdf document.
    pub fn inner(&self) -> &lopdf::Document {
        &self.inner
    }

    /// ObjectId of a page by 0-based index.
    pub fn page_id(&self, index: usize) -> Result<ObjectId, BackendError> {
        self.page_ids
            .get(index)
            .copied()
            .ok_or(BackendError::PageIndex {
                index,
                page_count: self.page_ids.len(),
            })
    }
}

impl std::fmt::Debug for LopdfDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LopdfDocument")
            .field("page_count", &self.page_ids.len())
            .finish_non_exhaustive()
    }
}

/// The lopdf-based backend.
///
/// # Example
///
/// ```ignore
/// use pagecrop_parse::{CropBackend, LopdfBackend};
///
/// let doc = LopdfBackend::open(pdf_bytes)?;
/// let count = LopdfBackend::page_count(&doc);
/// let boxes = LopdfBackend::page_boxes(&doc, 0)?;
/// ```
pub struct LopdfBackend;

/// Extract a [`BBox`] from a lopdf array of 4 numbers `[x0, y0, x1, y1]`.
fn extract_bbox_from_array(array: &[Object]) -> Result<BBox, BackendError> {
    if array.len() != 4 {
        return Err(BackendError::Parse(format!(
            "expected 4-element array for box, got {}",
            array.len()
        )));
    }
    let x0 = object_to_f64(&array[0])?;
    let y0 = object_to_f64(&array[1])?;
    let x1 = object_to_f64(&array[2])?;
    let y1 = object_to_f64(&array[3])?;
    Ok(BBox::from_corners(x0, y0, x1, y1))
}

/// Convert a lopdf numeric object (Integer or Real) to f64.
fn object_to_f64(obj: &Object) -> Result<f64, BackendError> {
    match obj {
        Object::Integer(i) => Ok(*i as f64),
        Object::Real(f) => Ok(f64::from(*f)),
        _ => Err(BackendError::Parse(format!("expected number, got {obj:?}"))),
    }
}

fn bbox_to_array(bbox: &BBox) -> Vec<Object> {
    bbox.to_array()
        .iter()
        .map(|&v| Object::Real(v as f32))
        .collect()
}

/// Follow an indirect reference, returning direct objects unchanged.
fn resolve<'a>(doc: &'a lopdf::Document, obj: &'a Object) -> Option<&'a Object> {
    match obj {
        Object::Reference(id) => doc.get_object(*id).ok(),
        other => Some(other),
    }
}

/// Look up a key in the page dictionary, walking up the page tree
/// (via /Parent) if the key is not found on the page itself.
///
/// Returns `None` if the key is not found anywhere in the tree.
fn resolve_inherited<'a>(
    doc: &'a lopdf::Document,
    page_id: ObjectId,
    key: &[u8],
) -> Result<Option<&'a Object>, BackendError> {
    let mut current_id = page_id;
    for _ in 0..MAX_TREE_DEPTH {
        let dict = doc
            .get_dictionary(current_id)
            .map_err(|e| BackendError::Parse(format!("failed to get page dictionary: {e}")))?;

        if let Ok(value) = dict.get(key) {
            return Ok(resolve(doc, value));
        }

        match dict.get(b"Parent") {
            Ok(parent_obj) => {
                current_id = parent_obj
                    .as_reference()
                    .map_err(|e| BackendError::Parse(format!("invalid /Parent reference: {e}")))?;
            }
            Err(_) => return Ok(None),
        }
    }
    Err(BackendError::Parse(
        "page tree /Parent chain is too deep or cyclic".into(),
    ))
}

fn inherited_box(
    doc: &LopdfDocument,
    index: usize,
    key: &[u8],
) -> Result<Option<BBox>, BackendError> {
    let page_id = doc.page_id(index)?;
    match resolve_inherited(&doc.inner, page_id, key)? {
        Some(obj) => {
            let array = obj.as_array().map_err(|e| {
                BackendError::Parse(format!(
                    "{} is not an array: {e}",
                    String::from_utf8_lossy(key)
                ))
            })?;
            Ok(Some(extract_bbox_from_array(array)?))
        }
        None => Ok(None),
    }
}

fn catalog(doc: &lopdf::Document) -> Result<&Dictionary, BackendError> {
    let root = doc
        .trailer
        .get(b"Root")
        .map_err(|_| BackendError::Parse("trailer has no /Root".into()))?;
    resolve(doc, root)
        .and_then(|obj| obj.as_dict().ok())
        .ok_or_else(|| BackendError::Parse("catalog is not a dictionary".into()))
}

fn pages_root_id(doc: &lopdf::Document) -> Result<ObjectId, BackendError> {
    catalog(doc)?
        .get(b"Pages")
        .and_then(Object::as_reference)
        .map_err(|e| BackendError::Parse(format!("catalog has no /Pages reference: {e}")))
}

/// Decode a PDF text string (UTF-16BE with BOM, else UTF-8, else Latin-1).
fn decode_text_string(bytes: &[u8]) -> String {
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let units: Vec<u16> = bytes[2..]
            .chunks_exact(2)
            .map(|c| u16::from_be_bytes([c[0], c[1]]))
            .collect();
        return String::from_utf16_lossy(&units);
    }
    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}

/// Encode a text string, using UTF-16BE only when ASCII is not enough.
fn encode_text_string(text: &str) -> Object {
    if text.is_ascii() {
        return Object::string_literal(text);
    }
    let mut bytes = vec![0xFE, 0xFF];
    for unit in text.encode_utf16() {
        bytes.extend_from_slice(&unit.to_be_bytes());
    }
    Object::String(bytes, StringFormat::Hexadecimal)
}

/// Extract a string value from a dictionary, handling both String and Name types.
fn extract_string_from_dict(
    doc: &lopdf::Document,
    dict: &Dictionary,
    key: &[u8],
) -> Option<String> {
    match resolve(doc, dict.get(key).ok()?)? {
        Object::String(bytes, _) => Some(decode_text_string(bytes)),
        Object::Name(name) => Some(String::from_utf8_lossy(name).into_owned()),
        _ => None,
    }
}

fn info_dict(doc: &lopdf::Document) -> Option<&Dictionary> {
    resolve(doc, doc.trailer.get(b"Info").ok()?)?.as_dict().ok()
}

/// Extract document-level metadata from the PDF /Info dictionary.
fn extract_document_metadata(doc: &lopdf::Document) -> DocumentMetadata {
    let Some(info) = info_dict(doc) else {
        return DocumentMetadata::default();
    };
    DocumentMetadata {
        title: extract_string_from_dict(doc, info, b"Title"),
        author: extract_string_from_dict(doc, info, b"Author"),
        subject: extract_string_from_dict(doc, info, b"Subject"),
        keywords: extract_string_from_dict(doc, info, b"Keywords"),
        creator: extract_string_from_dict(doc, info, b"Creator"),
        producer: extract_string_from_dict(doc, info, b"Producer"),
        creation_date: extract_string_from_dict(doc, info, b"CreationDate"),
        mod_date: extract_string_from_dict(doc, info, b"ModDate"),
    }
}

/// ObjectId of the /Info dictionary, creating an indirect one if needed.
fn info_dict_id(doc: &mut lopdf::Document) -> ObjectId {
    match doc.trailer.get(b"Info") {
        Ok(Object::Reference(id)) if doc.get_dictionary(*id).is_ok() => *id,
        Ok(Object::Dictionary(dict)) => {
            let dict = dict.clone();
            let id = doc.add_object(dict);
            doc.trailer.set("Info", Object::Reference(id));
            id
        }
        _ => {
            let id = doc.add_object(Dictionary::new());
            doc.trailer.set("Info", Object::Reference(id));
            id
        }
    }
}

// --- Outline ---

/// Outline entries as `(node id, level)` in depth-first order.
fn outline_nodes(doc: &lopdf::Document) -> Vec<(ObjectId, usize)> {
    let first = catalog(doc)
        .ok()
        .and_then(|catalog| catalog.get(b"Outlines").ok())
        .and_then(|obj| resolve(doc, obj))
        .and_then(|obj| obj.as_dict().ok())
        .and_then(|outlines| outlines.get(b"First").ok())
        .and_then(|obj| obj.as_reference().ok());

    let mut nodes = Vec::new();
    if let Some(first) = first {
        let mut visited = HashSet::new();
        walk_outline_tree(doc, first, 0, &mut visited, &mut nodes);
    }
    nodes
}

/// Recursively walk the outline tree via /First and /Next links.
fn walk_outline_tree(
    doc: &lopdf::Document,
    item_id: ObjectId,
    level: usize,
    visited: &mut HashSet<ObjectId>,
    nodes: &mut Vec<(ObjectId, usize)>,
) {
    if level >= MAX_TREE_DEPTH {
        return;
    }

    let mut current_id = Some(item_id);
    while let Some(node_id) = current_id {
        if !visited.insert(node_id) || nodes.len() >= MAX_OUTLINE_ITEMS {
            break;
        }
        let Ok(node_dict) = doc.get_dictionary(node_id) else {
            break;
        };
        nodes.push((node_id, level));

        if let Ok(Object::Reference(child_id)) = node_dict.get(b"First") {
            walk_outline_tree(doc, *child_id, level + 1, visited, nodes);
        }

        current_id = match node_dict.get(b"Next") {
            Ok(Object::Reference(next_id)) => Some(*next_id),
            _ => None,
        };
    }
}

/// Resolve an outline entry's destination to `(page index, dest_top)`.
///
/// Checks /Dest first, then /A (GoTo action).
fn resolve_bookmark_dest(
    doc: &lopdf::Document,
    node_dict: &Dictionary,
    page_index: &HashMap<ObjectId, usize>,
) -> (Option<usize>, Option<f64>) {
    if let Ok(dest_obj) = node_dict.get(b"Dest") {
        if let Some(result) = resolve_dest(doc, dest_obj, page_index, 0) {
            return result;
        }
    }

    let action = node_dict
        .get(b"A")
        .ok()
        .and_then(|obj| resolve(doc, obj))
        .and_then(|obj| obj.as_dict().ok());
    if let Some(action) = action {
        if is_goto(action) {
            if let Ok(dest_obj) = action.get(b"D") {
                if let Some(result) = resolve_dest(doc, dest_obj, page_index, 0) {
                    return result;
                }
            }
        }
    }

    (None, None)
}

fn is_goto(action: &Dictionary) -> bool {
    matches!(action.get(b"S"), Ok(Object::Name(name)) if name == b"GoTo")
}

/// Resolve an explicit or named destination.
fn resolve_dest(
    doc: &lopdf::Document,
    dest_obj: &Object,
    page_index: &HashMap<ObjectId, usize>,
    depth: usize,
) -> Option<(Option<usize>, Option<f64>)> {
    if depth > 2 {
        return None;
    }
    match resolve(doc, dest_obj)? {
        Object::Array(arr) => match arr.first() {
            Some(Object::Reference(page_ref)) => Some((
                page_index.get(page_ref).copied(),
                extract_dest_top(arr),
            )),
            _ => None,
        },
        Object::Dictionary(dict) => resolve_dest(doc, dict.get(b"D").ok()?, page_index, depth + 1),
        Object::String(bytes, _) => {
            let target = lookup_named_dest(doc, bytes)?;
            resolve_dest(doc, target, page_index, depth + 1)
        }
        Object::Name(name) => {
            let target = lookup_named_dest(doc, name)?;
            resolve_dest(doc, target, page_index, depth + 1)
        }
        _ => None,
    }
}

/// Extract the top coordinate from an /XYZ, /FitH or /FitBH destination.
fn extract_dest_top(arr: &[Object]) -> Option<f64> {
    let Some(Object::Name(dest_type)) = arr.get(1) else {
        return None;
    };
    let value = match dest_type.as_slice() {
        b"XYZ" => arr.get(3)?,
        b"FitH" | b"FitBH" => arr.get(2)?,
        _ => return None,
    };
    object_to_f64(value).ok()
}

/// Find a named destination in the catalog's /Dests dictionary or the
/// /Names → /Dests name tree.
fn lookup_named_dest<'a>(doc: &'a lopdf::Document, name: &[u8]) -> Option<&'a Object> {
    let catalog = catalog(doc).ok()?;

    let tree = catalog
        .get(b"Names")
        .ok()
        .and_then(|obj| resolve(doc, obj))
        .and_then(|obj| obj.as_dict().ok())
        .and_then(|names| names.get(b"Dests").ok())
        .and_then(|obj| resolve(doc, obj))
        .and_then(|obj| obj.as_dict().ok());
    if let Some(found) = tree.and_then(|tree| lookup_name_tree(doc, tree, name, 0)) {
        return Some(found);
    }

    catalog
        .get(b"Dests")
        .ok()
        .and_then(|obj| resolve(doc, obj))
        .and_then(|obj| obj.as_dict().ok())
        .and_then(|dests| dests.get(name).ok())
}

fn lookup_name_tree<'a>(
    doc: &'a lopdf::Document,
    node: &'a Dictionary,
    name: &[u8],
    depth: usize,
) -> Option<&'a Object> {
    if depth >= MAX_TREE_DEPTH {
        return None;
    }
    if let Some(names) = node
        .get(b"Names")
        .ok()
        .and_then(|obj| resolve(doc, obj))
        .and_then(|obj| obj.as_array().ok())
    {
        for pair in names.chunks_exact(2) {
            if let Some(Object::String(key, _)) = resolve(doc, &pair[0]) {
                if key.as_slice() == name {
                    return Some(&pair[1]);
                }
            }
        }
    }
    let kids = node
        .get(b"Kids")
        .ok()
        .and_then(|obj| resolve(doc, obj))
        .and_then(|obj| obj.as_array().ok())?;
    kids.iter()
        .filter_map(|kid| resolve(doc, kid).and_then(|obj| obj.as_dict().ok()))
        .find_map(|kid| lookup_name_tree(doc, kid, name, depth + 1))
}

/// Replace the page reference of an explicit destination array.
fn retarget_dest_array(dest: &mut [Object], page_id: ObjectId) -> bool {
    match dest.first_mut() {
        Some(first) if matches!(first, Object::Reference(_)) => {
            *first = Object::Reference(page_id);
            true
        }
        _ => false,
    }
}

fn retarget_goto(action: &mut Dictionary, page_id: ObjectId) -> bool {
    if !is_goto(action) {
        return false;
    }
    match action.get_mut(b"D") {
        Ok(Object::Array(dest)) => retarget_dest_array(dest, page_id),
        _ => false,
    }
}

/// Point an outline entry with an explicit destination at `page_id`.
///
/// Named destinations are left alone; they keep resolving to the original
/// page object, which stays the first copy of its page.
fn retarget_outline_node(
    doc: &mut lopdf::Document,
    node_id: ObjectId,
    page_id: ObjectId,
) -> Result<bool, BackendError> {
    let action_id = {
        let node = doc.get_dictionary_mut(node_id)?;
        if let Ok(Object::Array(dest)) = node.get_mut(b"Dest") {
            return Ok(retarget_dest_array(dest, page_id));
        }
        match node.get_mut(b"A") {
            Ok(Object::Dictionary(action)) => return Ok(retarget_goto(action, page_id)),
            Ok(Object::Reference(id)) => *id,
            _ => return Ok(false),
        }
    };
    match doc.get_dictionary_mut(action_id) {
        Ok(action) => Ok(retarget_goto(action, page_id)),
        Err(_) => Ok(false),
    }
}

// --- Page multiplication ---

/// Copy of a page dictionary with inherited attributes made explicit.
fn materialized_page_dict(
    doc: &lopdf::Document,
    page_id: ObjectId,
) -> Result<Dictionary, BackendError> {
    let mut dict = doc
        .get_dictionary(page_id)
        .map_err(|e| BackendError::Parse(format!("failed to get page dictionary: {e}")))?
        .clone();
    for key in INHERITABLE_KEYS {
        if dict.has(key) {
            continue;
        }
        if let Some(value) = resolve_inherited(doc, page_id, key)? {
            dict.set(key.to_vec(), value.clone());
        }
    }
    if !dict.has(b"MediaBox") {
        return Err(BackendError::Parse(
            "MediaBox not found on page or ancestors".into(),
        ));
    }
    Ok(dict)
}

/// Duplicate content stream objects so a page copy owns its content.
fn copy_contents(doc: &mut lopdf::Document, contents: &Object) -> Result<Object, BackendError> {
    match contents {
        Object::Reference(id) => {
            let object = doc.get_object(*id)?.clone();
            let copied = match object {
                Object::Array(items) => Object::Array(
                    items
                        .iter()
                        .map(|item| copy_content_item(doc, item))
                        .collect::<Result<_, _>>()?,
                ),
                other => other,
            };
            Ok(Object::Reference(doc.add_object(copied)))
        }
        Object::Array(items) => Ok(Object::Array(
            items
                .iter()
                .map(|item| copy_content_item(doc, item))
                .collect::<Result<_, _>>()?,
        )),
        other => Ok(other.clone()),
    }
}

fn copy_content_item(doc: &mut lopdf::Document, item: &Object) -> Result<Object, BackendError> {
    match item {
        Object::Reference(id) => {
            let stream = doc.get_object(*id)?.clone();
            Ok(Object::Reference(doc.add_object(stream)))
        }
        other => Ok(other.clone()),
    }
}

/// Copy annotation dictionaries for a duplicated page.
///
/// Each copy points back at its own page; /Popup links are dropped because
/// the popup belongs to the original page. Form widgets stay on the original
/// page only: /AcroForm /Fields lists a field once, so a copy would be an
/// orphan field sharing the original's name.
fn copy_annotations(
    doc: &mut lopdf::Document,
    annots: &Object,
    page_id: ObjectId,
) -> Result<Object, BackendError> {
    let items = match resolve(doc, annots) {
        Some(Object::Array(items)) => items.clone(),
        _ => return Ok(Object::Array(Vec::new())),
    };
    let mut copied = Vec::with_capacity(items.len());
    for item in &items {
        let Some(Object::Dictionary(annot)) = resolve(doc, item) else {
            continue;
        };
        if is_form_widget(annot) {
            continue;
        }
        let mut annot = annot.clone();
        annot.set("P", Object::Reference(page_id));
        annot.remove(b"Popup");
        copied.push(Object::Reference(doc.add_object(annot)));
    }
    Ok(Object::Array(copied))
}

fn is_form_widget(annot: &Dictionary) -> bool {
    matches!(annot.get(b"Subtype"), Ok(Object::Name(name)) if name == b"Widget")
        || annot.has(b"T")
        || annot.has(b"FT")
        || annot.has(b"Parent")
}

fn duplicate_page(
    doc: &mut lopdf::Document,
    page_dict: &Dictionary,
) -> Result<ObjectId, BackendError> {
    let duplicate_id = doc.new_object_id();
    let mut duplicate = page_dict.clone();
    if let Ok(contents) = page_dict.get(b"Contents") {
        duplicate.set("Contents", copy_contents(doc, contents)?);
    }
    if let Ok(annots) = page_dict.get(b"Annots") {
        duplicate.set("Annots", copy_annotations(doc, annots, duplicate_id)?);
    }
    doc.objects
        .insert(duplicate_id, Object::Dictionary(duplicate));
    Ok(duplicate_id)
}

impl CropBackend for LopdfBackend {
    type Document = LopdfDocument;
    type Error = BackendError;

    fn open(bytes: &[u8]) -> Result<Self::Document, Self::Error> {
        let inner = lopdf::Document::load_mem(bytes)
            .map_err(|e| BackendError::Parse(format!("failed to parse PDF: {e}")))?;

        if inner.is_encrypted() {
            return Err(BackendError::Core(CropError::PasswordRequired));
        }

        // get_pages returns BTreeMap<u32, ObjectId> with 1-based keys
        let page_ids: Vec<ObjectId> = inner.get_pages().values().copied().collect();
        debug!(pages = page_ids.len(), "opened PDF");

        Ok(LopdfDocument { inner, page_ids })
    }

    fn page_count(doc: &Self::Document) -> usize {
        doc.page_ids.len()
    }

    fn page_media_box(doc: &Self::Document, index: usize) -> Result<BBox, Self::Error> {
        inherited_box(doc, index, b"MediaBox")?
            .ok_or_else(|| BackendError::Parse("MediaBox not found on page or ancestors".into()))
    }

    fn page_crop_box(doc: &Self::Document, index: usize) -> Result<Option<BBox>, Self::Error> {
        inherited_box(doc, index, b"CropBox")
    }

    fn page_rotation(doc: &Self::Document, index: usize) -> Result<Rotation, Self::Error> {
        let page_id = doc.page_id(index)?;
        match resolve_inherited(&doc.inner, page_id, b"Rotate")? {
            Some(obj) => Ok(Rotation::from_degrees(object_to_f64(obj)? as i64)),
            None => Ok(Rotation::Deg0),
        }
    }

    fn document_metadata(doc: &Self::Document) -> Result<DocumentMetadata, Self::Error> {
        Ok(extract_document_metadata(&doc.inner))
    }

    fn bookmarks(doc: &Self::Document) -> Result<Vec<Bookmark>, Self::Error> {
        let page_index: HashMap<ObjectId, usize> = doc
            .page_ids
            .iter()
            .enumerate()
            .map(|(index, id)| (*id, index))
            .collect();

        let bookmarks = outline_nodes(&doc.inner)
            .into_iter()
            .filter_map(|(node_id, level)| {
                let node = doc.inner.get_dictionary(node_id).ok()?;
                let title = extract_string_from_dict(&doc.inner, node, b"Title").unwrap_or_default();
                let (page_number, dest_top) = resolve_bookmark_dest(&doc.inner, node, &page_index);
                Some(Bookmark {
                    title,
                    level,
                    page_number,
                    dest_top,
                })
            })
            .collect();
        Ok(bookmarks)
    }

    fn multiply_pages(
        doc: &Self::Document,
        copies: &[usize],
    ) -> Result<Self::Document, Self::Error> {
        let mut inner = doc.inner.clone();
        let pages_root = pages_root_id(&inner)?;

        let mut page_ids = Vec::with_capacity(doc.page_ids.len());
        for (index, &page_id) in doc.page_ids.iter().enumerate() {
            let count = copies.get(index).copied().unwrap_or(1).max(1);
            let mut page_dict = materialized_page_dict(&inner, page_id)?;
            page_dict.set("Parent", Object::Reference(pages_root));
            inner
                .objects
                .insert(page_id, Object::Dictionary(page_dict.clone()));
            page_ids.push(page_id);

            for _ in 1..count {
                page_ids.push(duplicate_page(&mut inner, &page_dict)?);
            }
        }

        let kids: Vec<Object> = page_ids.iter().map(|id| Object::Reference(*id)).collect();
        let root = inner.get_dictionary_mut(pages_root)?;
        root.set("Kids", kids);
        root.set("Count", page_ids.len() as i64);
        root.remove(b"Parent");
        let pruned = inner.prune_objects();

        debug!(
            source_pages = doc.page_ids.len(),
            output_pages = page_ids.len(),
            pruned = pruned.len(),
            "multiplied pages"
        );
        Ok(LopdfDocument { inner, page_ids })
    }

    fn set_page_boxes(
        doc: &mut Self::Document,
        index: usize,
        bbox: BBox,
    ) -> Result<(), Self::Error> {
        let page_id = doc.page_id(index)?;
        let page = doc.inner.get_dictionary_mut(page_id)?;
        page.set("MediaBox", bbox_to_array(&bbox));
        page.set("CropBox", bbox_to_array(&bbox));
        Ok(())
    }

    fn set_bookmarks(doc: &mut Self::Document, bookmarks: &[Bookmark]) -> Result<(), Self::Error> {
        let nodes = outline_nodes(&doc.inner);
        if nodes.len() != bookmarks.len() {
            return Err(BackendError::Parse(format!(
                "outline has {} entries but {} bookmarks were given",
                nodes.len(),
                bookmarks.len()
            )));
        }

        let mut skipped = 0;
        for ((node_id, _), bookmark) in nodes.into_iter().zip(bookmarks) {
            let Some(index) = bookmark.page_number else {
                continue;
            };
            let page_id = doc.page_id(index)?;
            if !retarget_outline_node(&mut doc.inner, node_id, page_id)? {
                skipped += 1;
            }
        }
        if skipped > 0 {
            warn!(
                skipped,
                "outline entries without explicit destination left unchanged"
            );
        }
        Ok(())
    }

    fn set_document_metadata(
        doc: &mut Self::Document,
        metadata: &DocumentMetadata,
    ) -> Result<(), Self::Error> {
        let current = extract_document_metadata(&doc.inner);
        let changed: Vec<(&str, &str)> = metadata
            .entries()
            .filter(|&(key, value)| !current.entries().any(|e| e == (key, value)))
            .collect();
        if changed.is_empty() {
            return Ok(());
        }

        let info_id = info_dict_id(&mut doc.inner);
        let info = doc.inner.get_dictionary_mut(info_id)?;
        for (key, value) in changed {
            info.set(key, encode_text_string(value));
        }
        Ok(())
    }

    fn save(doc: &mut Self::Document, mut writer: &mut dyn Write) -> Result<(), Self::Error> {
        doc.inner
            .save_to(&mut writer)
            .map_err(|e| BackendError::Io(std::io::Error::other(e.to_string())))?;
        Ok(())
    }
}
