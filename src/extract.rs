use std::io::Read;
use std::path::Path;

use lopdf::{Dictionary, Document};
use tracing::debug;

use crate::error::LinkError;
use crate::geometry::load_page_geometry;
use crate::options::{AnnotsBound, HalfTurnPolicy, MissingActionPolicy, ScanOptions};
use crate::scanner::scan_page_links;
use crate::types::PageLinks;

fn page_links_from_doc(
    doc: &Document,
    page: u32,
    options: &ScanOptions,
) -> Result<PageLinks, LinkError> {
    let pages = doc.get_pages();
    let page_count = pages.len() as u32;
    if page_count == 0 {
        return Err(LinkError::PageNotFound(page));
    }
    let page_number = page.clamp(1, page_count);
    if page_number != page {
        debug!("page {} clamped to {} of {}", page, page_number, page_count);
    }

    let object_id = *pages
        .get(&page_number)
        .ok_or(LinkError::PageNotFound(page_number))?;
    let page_dict: &Dictionary = doc
        .get_dictionary(object_id)
        .map_err(|_| LinkError::PageNotFound(page_number))?;

    let geometry = load_page_geometry(doc, page_dict, page_number, options.view_scale)?;
    let links = scan_page_links(doc, page_dict, &geometry, options);
    debug!("page {}: {} links", page_number, links.len());

    Ok(PageLinks {
        page_number,
        geometry,
        links,
    })
}

/// Builder for configuring link extraction.
///
/// # Examples
///
/// ```no_run
/// use pdf_links::{MissingActionPolicy, PageLinksExtractor};
///
/// let links = PageLinksExtractor::builder()
///     .password("secret")
///     .missing_action(MissingActionPolicy::SkipAnnotation)
///     .build()
///     .from_path("encrypted.pdf", 3)?;
/// # Ok::<(), pdf_links::LinkError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct PageLinksExtractorBuilder {
    password: Option<String>,
    options: ScanOptions,
}

impl PageLinksExtractorBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the password for encrypted PDFs.
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// What to do with a link that has no URI action.
    pub fn missing_action(mut self, policy: MissingActionPolicy) -> Self {
        self.options.missing_action = policy;
        self
    }

    pub fn annots_bound(mut self, bound: AnnotsBound) -> Self {
        self.options.annots_bound = bound;
        self
    }

    pub fn half_turn(mut self, policy: HalfTurnPolicy) -> Self {
        self.options.half_turn = policy;
        self
    }

    /// Fraction of an annotation's height covered by its overlay.
    pub fn height_scale(mut self, scale: f64) -> Self {
        self.options.height_scale = scale;
        self
    }

    /// Size of the page view relative to PDF points.
    pub fn view_scale(mut self, scale: f64) -> Self {
        self.options.view_scale = scale;
        self
    }

    /// Build the extractor configuration.
    pub fn build(self) -> PageLinksExtractor {
        PageLinksExtractor {
            password: self.password,
            options: self.options,
        }
    }
}

/// Link extractor with configuration options.
///
/// # Examples
///
/// ```no_run
/// use pdf_links::PageLinksExtractor;
///
/// let page = PageLinksExtractor::default().from_path("file.pdf", 1)?;
/// println!("{}x{}", page.geometry.page_width, page.geometry.page_height);
/// for link in page.links() {
///     println!("{:?} -> {:?}", link.rect, link.url);
/// }
/// # Ok::<(), pdf_links::LinkError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct PageLinksExtractor {
    password: Option<String>,
    options: ScanOptions,
}

impl PageLinksExtractor {
    /// Create a builder for configuring extraction options.
    pub fn builder() -> PageLinksExtractorBuilder {
        PageLinksExtractorBuilder::new()
    }

    pub fn options(&self) -> &ScanOptions {
        &self.options
    }

    /// Extract the links of a page of the PDF file at the given path.
    ///
    /// `page` is 1-based and clamped to the document's page range.
    pub fn from_path<P: AsRef<Path>>(self, path: P, page: u32) -> Result<PageLinks, LinkError> {
        let mut doc = Document::load(path)?;
        self.extract_from_document(&mut doc, page)
    }

    /// Extract the links of a page of a PDF in memory.
    pub fn from_bytes(self, bytes: &[u8], page: u32) -> Result<PageLinks, LinkError> {
        let mut doc = Document::load_mem(bytes)?;
        self.extract_from_document(&mut doc, page)
    }

    /// Extract the links of a page of a PDF reader.
    pub fn from_reader<R: Read>(self, mut reader: R, page: u32) -> Result<PageLinks, LinkError> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        self.from_bytes(&bytes, page)
    }

    /// Extract the links of a page of an already loaded, decrypted document.
    pub fn from_document(&self, doc: &Document, page: u32) -> Result<PageLinks, LinkError> {
        page_links_from_doc(doc, page, &self.options)
    }

    fn extract_from_document(self, doc: &mut Document, page: u32) -> Result<PageLinks, LinkError> {
        // The loader already decrypts files whose user password is empty but
        // leaves /Encrypt in the trailer. Decrypting again would garble them.
        if doc.is_encrypted() {
            if doc.encryption_state.is_some() {
                debug!("document was decrypted on load");
            } else {
                let password = self.password.as_deref().unwrap_or("");
                doc.decrypt(password)?;
            }
        }

        page_links_from_doc(doc, page, &self.options)
    }
}

/// Extract the links of a page using default settings.
///
/// This is a convenience function equivalent to `PageLinksExtractor::default().from_path(path, page)`.
pub fn from_path<P: AsRef<Path>>(path: P, page: u32) -> Result<PageLinks, LinkError> {
    PageLinksExtractor::default().from_path(path, page)
}

/// Extract the links of a page of a PDF in memory using default settings.
///
/// # Examples
///
/// ```no_run
/// let bytes = std::fs::read("file.pdf")?;
/// let page = pdf_links::from_bytes(&bytes, 1)?;
/// print!("{}", page);
/// # Ok::<(), pdf_links::LinkError>(())
/// ```
pub fn from_bytes(bytes: &[u8], page: u32) -> Result<PageLinks, LinkError> {
    PageLinksExtractor::default().from_bytes(bytes, page)
}

/// Extract the links of a page of a PDF reader using default settings.
pub fn from_reader<R: Read>(reader: R, page: u32) -> Result<PageLinks, LinkError> {
    PageLinksExtractor::default().from_reader(reader, page)
}
