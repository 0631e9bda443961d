//! Page compositing: merging rendered overlays onto original pages.
//!
//! The original page's content stream objects are never rewritten. An
//! overlay becomes one additional stream object appended to the page's
//! `Contents` array, bracketed so the original content's graphics state
//! cannot leak into it, and the overlay's `/Ov*`-namespaced resources are
//! merged into a page-local `Resources` dictionary, so compositing one page
//! never mutates shared objects or any other page. A page with an empty
//! overlay is not touched at all.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream};

use crate::error::{Error, Result};
use crate::overlay::RenderedOverlay;

/// Allowed difference, in points, between overlay and page dimensions.
pub const DIMENSION_TOLERANCE: f32 = 1.0;

/// Composite a rendered overlay onto the page with the given object id.
///
/// Fails with [`Error::PageMismatch`] when overlay and page dimensions differ
/// beyond [`DIMENSION_TOLERANCE`]. An empty overlay passes the page through
/// untouched.
pub fn composite(doc: &mut Document, page_id: ObjectId, overlay: &RenderedOverlay) -> Result<()> {
    let (page_width, page_height) = page_dimensions(doc, page_id)?;
    if (page_width - overlay.width).abs() > DIMENSION_TOLERANCE
        || (page_height - overlay.height).abs() > DIMENSION_TOLERANCE
    {
        return Err(Error::PageMismatch {
            page: overlay.page_index,
            overlay_width: overlay.width,
            overlay_height: overlay.height,
            page_width,
            page_height,
        });
    }

    if overlay.is_empty() {
        return Ok(());
    }

    merge_resources(doc, page_id, &overlay.resources)?;
    let stream_id = doc.add_object(Stream::new(dictionary! {}, overlay.content.clone()));
    append_content(doc, page_id, stream_id)?;
    log::debug!(
        "page {}: composited {} byte overlay stream",
        overlay.page_index,
        overlay.content.len()
    );
    Ok(())
}

/// Composite an overlay onto a page addressed by zero-based index.
pub fn composite_at_index(
    doc: &mut Document,
    page_index: usize,
    overlay: &RenderedOverlay,
) -> Result<()> {
    let pages = doc.get_pages();
    let page_number = u32::try_from(page_index + 1)
        .map_err(|_| Error::PageOutOfRange(page_index, pages.len()))?;
    let page_id = *pages
        .get(&page_number)
        .ok_or(Error::PageOutOfRange(page_index, pages.len()))?;
    composite(doc, page_id, overlay)
}

/// Width and height of a page in points, honoring inherited `MediaBox`.
pub fn page_dimensions(doc: &Document, page_id: ObjectId) -> Result<(f32, f32)> {
    let media_box = inherited_attribute(doc, page_id, b"MediaBox")?
        .ok_or_else(|| Error::Pdf("page has no MediaBox".to_string()))?;
    let values = match &media_box {
        Object::Array(arr) if arr.len() == 4 => arr
            .iter()
            .map(get_number)
            .collect::<Option<Vec<f32>>>()
            .ok_or_else(|| Error::Pdf("non-numeric MediaBox entry".to_string()))?,
        _ => return Err(Error::Pdf("malformed MediaBox".to_string())),
    };
    Ok((values[2] - values[0], values[3] - values[1]))
}

/// Look up a page attribute, walking the `Parent` chain for inherited values.
/// References are resolved to their target object.
fn inherited_attribute(doc: &Document, page_id: ObjectId, key: &[u8]) -> Result<Option<Object>> {
    let mut current = page_id;
    // Parent chains are short; the bound only guards against cycles.
    for _ in 0..64 {
        let dict = doc.get_dictionary(current)?;
        if let Ok(value) = dict.get(key) {
            let resolved = match value {
                Object::Reference(rid) => doc.get_object(*rid)?.clone(),
                other => other.clone(),
            };
            return Ok(Some(resolved));
        }
        match dict.get(b"Parent").and_then(Object::as_reference) {
            Ok(parent) => current = parent,
            Err(_) => return Ok(None),
        }
    }
    Ok(None)
}

/// Merge the overlay's resource categories into a page-local `Resources`
/// dictionary.
///
/// The current resources (direct, referenced, or inherited) are cloned and
/// the merged result is written inline on the page, so shared resource
/// dictionaries on ancestor nodes stay untouched. Overlay entries are
/// promoted to indirect objects and inserted by reference under their `/Ov*`
/// names.
fn merge_resources(doc: &mut Document, page_id: ObjectId, overlay_resources: &Dictionary) -> Result<()> {
    if overlay_resources.len() == 0 {
        return Ok(());
    }

    let mut resources = match inherited_attribute(doc, page_id, b"Resources")? {
        Some(Object::Dictionary(dict)) => dict,
        Some(other) => {
            return Err(Error::Pdf(format!(
                "unexpected Resources object: {other:?}"
            )))
        }
        None => Dictionary::new(),
    };

    for (category, value) in overlay_resources.iter() {
        let overlay_entries = value
            .as_dict()
            .map_err(|_| Error::Pdf("overlay resource category is not a dictionary".to_string()))?;

        let mut merged = match resources.get(category) {
            Ok(Object::Dictionary(dict)) => dict.clone(),
            Ok(Object::Reference(rid)) => doc.get_object(*rid)?.as_dict()?.clone(),
            _ => Dictionary::new(),
        };
        for (name, entry) in overlay_entries.iter() {
            let entry_id = doc.add_object(entry.clone());
            merged.set(name.clone(), Object::Reference(entry_id));
        }
        resources.set(category.clone(), Object::Dictionary(merged));
    }

    let page = doc.get_object_mut(page_id)?.as_dict_mut()?;
    page.set("Resources", Object::Dictionary(resources));
    Ok(())
}

/// Append a content stream reference after the page's existing content,
/// isolating the original content's graphics state.
///
/// Streams in a `Contents` array concatenate into one state machine, so a
/// page whose content ends with a persistent transform, color, or clip would
/// distort the overlay. The original streams are bracketed between new `q`
/// and `Q` streams; the pre-existing stream objects themselves are left
/// as-is. Handles `Contents` as a direct array, a direct stream, a reference
/// to a stream, a reference to an array, or absent.
fn append_content(doc: &mut Document, page_id: ObjectId, stream_id: ObjectId) -> Result<()> {
    let contents = doc.get_dictionary(page_id)?.get(b"Contents").ok().cloned();

    let Some(existing) = contents else {
        let page = doc.get_object_mut(page_id)?.as_dict_mut()?;
        page.set("Contents", Object::Array(vec![Object::Reference(stream_id)]));
        return Ok(());
    };

    let save_id = operator_stream(doc, "q")?;
    let restore_id = operator_stream(doc, "Q")?;

    match existing {
        Object::Reference(rid) => {
            if matches!(doc.get_object(rid), Ok(Object::Array(_))) {
                if let Object::Array(arr) = doc.get_object_mut(rid)? {
                    arr.insert(0, Object::Reference(save_id));
                    arr.push(Object::Reference(restore_id));
                    arr.push(Object::Reference(stream_id));
                }
            } else {
                let page = doc.get_object_mut(page_id)?.as_dict_mut()?;
                page.set(
                    "Contents",
                    Object::Array(vec![
                        Object::Reference(save_id),
                        Object::Reference(rid),
                        Object::Reference(restore_id),
                        Object::Reference(stream_id),
                    ]),
                );
            }
        }
        Object::Array(mut arr) => {
            arr.insert(0, Object::Reference(save_id));
            arr.push(Object::Reference(restore_id));
            arr.push(Object::Reference(stream_id));
            let page = doc.get_object_mut(page_id)?.as_dict_mut()?;
            page.set("Contents", Object::Array(arr));
        }
        Object::Stream(stream) => {
            // A stream embedded directly in the page dictionary is promoted
            // to an indirect object so it can sit in the array unchanged.
            let original_id = doc.add_object(Object::Stream(stream));
            let page = doc.get_object_mut(page_id)?.as_dict_mut()?;
            page.set(
                "Contents",
                Object::Array(vec![
                    Object::Reference(save_id),
                    Object::Reference(original_id),
                    Object::Reference(restore_id),
                    Object::Reference(stream_id),
                ]),
            );
        }
        other => {
            return Err(Error::Pdf(format!("unexpected Contents object: {other:?}")));
        }
    }
    Ok(())
}

/// A one-operator content stream (`q` or `Q`) as a new indirect object.
fn operator_stream(doc: &mut Document, operator: &str) -> Result<ObjectId> {
    let content = Content {
        operations: vec![Operation::new(operator, vec![])],
    }
    .encode()?;
    Ok(doc.add_object(Stream::new(dictionary! {}, content)))
}

fn get_number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}
