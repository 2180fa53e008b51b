use std::fmt;
use std::ops::ControlFlow;

use lopdf::{Dictionary, Document, Object};
use tracing::{debug, trace, warn};
use url::Url;

use crate::error::LookupError;
use crate::mapper::map_rect;
use crate::options::{AnnotsBound, MissingActionPolicy, ScanOptions};
use crate::types::{AnnotationRect, AnnotationRef, DocumentLink, PageGeometry};
use crate::utils::{FromObj, Name, PdfString, get};

/// Why a single `/Annots` entry produced no link.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum SkipReason {
    Unresolved(LookupError),
    NotALink,
    BadRect(LookupError),
    MissingAction(LookupError),
    MissingUri(LookupError),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Unresolved(e) => write!(f, "entry does not resolve to a dictionary: {}", e),
            SkipReason::NotALink => write!(f, "not a /Link annotation"),
            SkipReason::BadRect(e) => write!(f, "bad /Rect: {}", e),
            SkipReason::MissingAction(e) => write!(f, "no /A action: {}", e),
            SkipReason::MissingUri(e) => write!(f, "no /URI in action: {}", e),
        }
    }
}

/// Outcome of scanning one `/Annots` entry.
#[derive(Debug)]
pub(crate) enum ScanStep {
    Link(DocumentLink),
    Skip(SkipReason),
    Stop(SkipReason),
}

fn entry_ref(entry: &Object, index: usize) -> AnnotationRef {
    match entry {
        &Object::Reference(id) => AnnotationRef::Indirect(id),
        _ => AnnotationRef::Direct { index },
    }
}

/// Find the URI target of a link annotation's `/A` action.
///
/// Returns the reason on failure so the caller can apply the missing-action
/// policy. A string that is present but not a valid absolute URL is `Ok(None)`.
/// The decoded text goes to `Url::parse` as is; surrounding whitespace is
/// handled by its WHATWG rules.
fn resolve_uri(doc: &Document, annotation: &Dictionary) -> Result<Option<Url>, SkipReason> {
    let action: &Dictionary = get(doc, annotation, b"A").map_err(SkipReason::MissingAction)?;
    let uri: PdfString = get(doc, action, b"URI").map_err(SkipReason::MissingUri)?;
    let text = uri.to_text();
    match Url::parse(&text) {
        Ok(url) => Ok(Some(url)),
        Err(e) => {
            debug!("URI {:?} does not parse: {}", text, e);
            Ok(None)
        }
    }
}

/// Scan a single annotation entry.
pub(crate) fn scan_entry(
    doc: &Document,
    annots: &[Object],
    index: usize,
    geometry: &PageGeometry,
    options: &ScanOptions,
) -> ScanStep {
    let entry = match annots.get(index) {
        Some(entry) => entry,
        None => return ScanStep::Skip(SkipReason::Unresolved(LookupError::IndexOutOfRange(index))),
    };
    let annotation = match <&Dictionary>::from_obj(doc, entry) {
        Ok(dict) => dict,
        Err(e) => return ScanStep::Skip(SkipReason::Unresolved(e)),
    };

    match get::<Name>(doc, annotation, b"Subtype") {
        Ok(Name(b"Link")) => {}
        _ => return ScanStep::Skip(SkipReason::NotALink),
    }

    let rect: AnnotationRect = match get::<[f64; 4]>(doc, annotation, b"Rect") {
        Ok(a) => a.into(),
        Err(e) => return ScanStep::Skip(SkipReason::BadRect(e)),
    };
    let mut link = DocumentLink::new(map_rect(rect, geometry, options), entry_ref(entry, index));
    trace!("Annots[{}] {} -> {}", index, rect, link);

    match resolve_uri(doc, annotation) {
        Ok(url) => {
            link.url = url;
            ScanStep::Link(link)
        }
        Err(reason) => match options.missing_action {
            MissingActionPolicy::AbortScan => ScanStep::Stop(reason),
            MissingActionPolicy::SkipAnnotation => ScanStep::Skip(reason),
        },
    }
}

/// Extract the link annotations of a page, in `/Annots` order.
///
/// A page without `/Annots` has no links. Entries that are not well-formed
/// link annotations are skipped. A link without a URI action either stops the
/// scan or is skipped, depending on `options.missing_action`.
pub fn scan_page_links(
    doc: &Document,
    page_dict: &Dictionary,
    geometry: &PageGeometry,
    options: &ScanOptions,
) -> Vec<DocumentLink> {
    let annots: &[Object] = match get(doc, page_dict, b"Annots") {
        Ok(annots) => annots,
        Err(LookupError::KeyNotFound(_)) => return Vec::new(),
        Err(e) => {
            debug!("ignoring /Annots: {}", e);
            return Vec::new();
        }
    };

    let upper = match options.annots_bound {
        AnnotsBound::Inclusive => annots.len() + 1,
        AnnotsBound::Exclusive => annots.len(),
    };

    let mut links = Vec::new();
    let flow = (0..upper).try_for_each(|index| {
        match scan_entry(doc, annots, index, geometry, options) {
            ScanStep::Link(link) => links.push(link),
            ScanStep::Skip(reason) => debug!("skipping Annots[{}]: {}", index, reason),
            ScanStep::Stop(reason) => {
                warn!(
                    "stopping annotation scan at Annots[{}] of {}: {}",
                    index,
                    annots.len(),
                    reason
                );
                return ControlFlow::Break(index);
            }
        }
        ControlFlow::Continue(())
    });

    if let ControlFlow::Break(index) = flow {
        debug!("{} links kept before Annots[{}]", links.len(), index);
    }
    links
}
