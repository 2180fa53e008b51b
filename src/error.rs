use std::fmt::Formatter;

/// Failure of a typed lookup into the PDF object graph.
#[derive(Debug, Clone, PartialEq)]
pub enum LookupError {
    KeyNotFound(String),
    WrongKind {
        expected: &'static str,
        found: &'static str,
    },
    Unresolved(lopdf::ObjectId),
    IndexOutOfRange(usize),
}

impl std::fmt::Display for LookupError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        match self {
            LookupError::KeyNotFound(key) => write!(f, "key not found: /{}", key),
            LookupError::WrongKind { expected, found } => {
                write!(f, "wrong kind: expected {}, found {}", expected, found)
            }
            LookupError::Unresolved((num, generation)) => {
                write!(f, "unresolved reference {} {} R", num, generation)
            }
            LookupError::IndexOutOfRange(i) => write!(f, "array index {} out of range", i),
        }
    }
}

impl std::error::Error for LookupError {}

#[derive(Debug)]
pub enum LinkError {
    IoError(std::io::Error),
    PdfError(lopdf::Error),
    PageNotFound(u32),
    MissingMediaBox(u32),
    Lookup(LookupError),
    NoSuchLink(usize),
    NoUrl(usize),
    OpenFailed(String),
}

impl std::fmt::Display for LinkError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        match self {
            LinkError::IoError(e) => write!(f, "IO error: {}", e),
            LinkError::PdfError(e) => write!(f, "PDF error: {}", e),
            LinkError::PageNotFound(page) => write!(f, "Page {} not found", page),
            LinkError::MissingMediaBox(page) => write!(f, "Page {} has no MediaBox", page),
            LinkError::Lookup(e) => write!(f, "Lookup error: {}", e),
            LinkError::NoSuchLink(tag) => write!(f, "No link with tag {}", tag),
            LinkError::NoUrl(tag) => write!(f, "Link {} has no URL", tag),
            LinkError::OpenFailed(msg) => write!(f, "Failed to open URL: {}", msg),
        }
    }
}

impl std::error::Error for LinkError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LinkError::IoError(e) => Some(e),
            LinkError::PdfError(e) => Some(e),
            LinkError::Lookup(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for LinkError {
    fn from(e: std::io::Error) -> Self {
        LinkError::IoError(e)
    }
}

impl From<lopdf::Error> for LinkError {
    fn from(e: lopdf::Error) -> Self {
        LinkError::PdfError(e)
    }
}

impl From<LookupError> for LinkError {
    fn from(e: LookupError) -> Self {
        LinkError::Lookup(e)
    }
}
