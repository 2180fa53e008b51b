//! PDF page link extraction library
//!
//! This library finds the hyperlink annotations of a PDF page and places
//! their rectangles in the coordinate space of a page view, accounting for
//! page rotation and the crop box.

mod error;
mod extract;
mod geometry;
mod mapper;
mod options;
mod overlay;
mod scanner;
mod types;
mod utils;

// Re-export error types
pub use error::{LinkError, LookupError};

// Re-export extraction API
pub use extract::{PageLinksExtractor, PageLinksExtractorBuilder, from_bytes, from_path, from_reader};

// Re-export the pipeline stages
pub use mapper::map_rect;
pub use options::{
    AnnotsBound, DEFAULT_HEIGHT_SCALE, DEFAULT_VIEW_SCALE, HalfTurnPolicy, MissingActionPolicy,
    ScanOptions,
};
pub use overlay::{HIGHLIGHT_COLOR, LinkOverlay, UrlOpener};
pub use scanner::scan_page_links;

// Re-export public types
pub use types::{
    AnnotationRect, AnnotationRef, DocumentLink, PageGeometry, PageLinks, PdfBox, PdfSpace,
    Rotation, ViewPoint, ViewRect, ViewSize, ViewSpace,
};

pub use lopdf;
pub use url::Url;
