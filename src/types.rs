use std::fmt;

use euclid::{Point2D, Rect, Size2D};
use lopdf::ObjectId;
use url::Url;

/// PDF user space, origin at the lower-left corner, Y growing upward.
pub struct PdfSpace;

/// Coordinate space of the page view, Y growing downward.
pub struct ViewSpace;

pub type ViewRect = Rect<f64, ViewSpace>;
pub type ViewPoint = Point2D<f64, ViewSpace>;
pub type ViewSize = Size2D<u32, ViewSpace>;
pub type PdfBox = Rect<f64, PdfSpace>;

/// Page rotation, restricted to the four cardinal angles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    /// Normalize a `/Rotate` value. Negative angles wrap; anything that is
    /// not a multiple of 90 is rejected.
    pub fn from_degrees(degrees: i64) -> Option<Rotation> {
        match degrees.rem_euclid(360) {
            0 => Some(Rotation::Deg0),
            90 => Some(Rotation::Deg90),
            180 => Some(Rotation::Deg180),
            270 => Some(Rotation::Deg270),
            _ => None,
        }
    }

    pub fn degrees(self) -> u32 {
        match self {
            Rotation::Deg0 => 0,
            Rotation::Deg90 => 90,
            Rotation::Deg180 => 180,
            Rotation::Deg270 => 270,
        }
    }

    /// True for 90 and 270, where the page's axes are swapped in the view.
    pub fn is_quarter_turn(self) -> bool {
        matches!(self, Rotation::Deg90 | Rotation::Deg270)
    }
}

impl fmt::Display for Rotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\u{b0}", self.degrees())
    }
}

/// Raw `/Rect` of an annotation, in PDF space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnnotationRect {
    pub llx: f64,
    pub lly: f64,
    pub urx: f64,
    pub ury: f64,
}

impl AnnotationRect {
    pub fn new(llx: f64, lly: f64, urx: f64, ury: f64) -> AnnotationRect {
        AnnotationRect { llx, lly, urx, ury }
    }

    /// Swap corner components so the lower-left corner really is the
    /// lower-left one. Some authoring tools write the corners in any order.
    pub fn normalized(self) -> AnnotationRect {
        AnnotationRect {
            llx: self.llx.min(self.urx),
            lly: self.lly.min(self.ury),
            urx: self.llx.max(self.urx),
            ury: self.lly.max(self.ury),
        }
    }
}

impl From<[f64; 4]> for AnnotationRect {
    fn from(a: [f64; 4]) -> Self {
        AnnotationRect::new(a[0], a[1], a[2], a[3])
    }
}

impl fmt::Display for AnnotationRect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{:.1} {:.1} {:.1} {:.1}]",
            self.llx, self.lly, self.urx, self.ury
        )
    }
}

/// Geometry of a page view, computed once when the page is loaded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub rotation: Rotation,
    /// Scaled and even-rounded view width.
    pub page_width: f64,
    /// Scaled and even-rounded view height.
    pub page_height: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl PageGeometry {
    /// Pixel size of the surface the page is drawn into. Always even.
    pub fn view_size(&self) -> ViewSize {
        Size2D::new(even_px(self.page_width), even_px(self.page_height))
    }
}

// The float-to-int cast saturates at u32::MAX, which is odd.
fn even_px(v: f64) -> u32 {
    (v as u32).min(u32::MAX - 1) & !1
}

/// Handle back into the PDF object graph for the annotation a link came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnnotationRef {
    /// The `/Annots` entry was an indirect reference.
    Indirect(ObjectId),
    /// The `/Annots` entry was an inline dictionary at this array index.
    Direct { index: usize },
}

impl fmt::Display for AnnotationRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnnotationRef::Indirect((num, generation)) => write!(f, "{} {} R", num, generation),
            AnnotationRef::Direct { index } => write!(f, "Annots[{}]", index),
        }
    }
}

/// A link annotation placed in view space.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentLink {
    pub rect: ViewRect,
    pub annotation: AnnotationRef,
    pub url: Option<Url>,
}

impl DocumentLink {
    pub fn new(rect: ViewRect, annotation: AnnotationRef) -> DocumentLink {
        DocumentLink {
            rect,
            annotation,
            url: None,
        }
    }

    /// The rect with non-negative extents.
    ///
    /// Mirrored axes can leave `size` negative; this flips those axes back so
    /// containment checks work.
    pub fn hit_rect(&self) -> ViewRect {
        let r = &self.rect;
        let (x0, x1) = ordered(r.origin.x, r.origin.x + r.size.width);
        let (y0, y1) = ordered(r.origin.y, r.origin.y + r.size.height);
        Rect::new(Point2D::new(x0, y0), Size2D::new(x1 - x0, y1 - y0))
    }
}

fn ordered(a: f64, b: f64) -> (f64, f64) {
    if a <= b { (a, b) } else { (b, a) }
}

impl fmt::Display for DocumentLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "(x: {:.1}, y: {:.1}, w: {:.1}, h: {:.1}) ",
            self.rect.origin.x, self.rect.origin.y, self.rect.size.width, self.rect.size.height
        )?;
        match &self.url {
            Some(url) => write!(f, "{}", url),
            None => write!(f, "<no url>"),
        }
    }
}

/// The links of one page, ready for a view to lay out.
#[derive(Debug, Clone, PartialEq)]
pub struct PageLinks {
    /// 1-based, after clamping to the document's page range.
    pub page_number: u32,
    pub geometry: PageGeometry,
    pub links: Vec<DocumentLink>,
}

impl PageLinks {
    pub fn links(&self) -> &[DocumentLink] {
        &self.links
    }

    pub fn into_links(self) -> Vec<DocumentLink> {
        self.links
    }
}

impl fmt::Display for PageLinks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for link in &self.links {
            writeln!(f, "{}", link)?;
        }
        Ok(())
    }
}
