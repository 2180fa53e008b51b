use tracing::debug;
use url::Url;

use crate::error::LinkError;
use crate::types::{PageLinks, ViewPoint, ViewRect};

/// RGBA fill of a link highlight.
pub const HIGHLIGHT_COLOR: [f32; 4] = [0.0, 122.0 / 255.0, 1.0, 0.5];

/// A tappable highlight placed over a link.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkOverlay {
    pub rect: ViewRect,
    /// Index of the link in [`PageLinks::links`]; pass it back to [`PageLinks::activate`].
    pub tag: usize,
    pub color: [f32; 4],
}

/// Opens a link target on behalf of the page view.
pub trait UrlOpener {
    fn open(&mut self, url: &Url) -> Result<(), LinkError>;
}

impl<F> UrlOpener for F
where
    F: FnMut(&Url) -> Result<(), LinkError>,
{
    fn open(&mut self, url: &Url) -> Result<(), LinkError> {
        self(url)
    }
}

impl PageLinks {
    pub fn overlays(&self) -> Vec<LinkOverlay> {
        self.links
            .iter()
            .enumerate()
            .map(|(tag, link)| LinkOverlay {
                rect: link.rect,
                tag,
                color: HIGHLIGHT_COLOR,
            })
            .collect()
    }

    /// Tag of the first link under `point`, edges included.
    pub fn hit_test(&self, point: ViewPoint) -> Option<usize> {
        self.links.iter().position(|link| {
            let r = link.hit_rect();
            point.x >= r.origin.x
                && point.x <= r.origin.x + r.size.width
                && point.y >= r.origin.y
                && point.y <= r.origin.y + r.size.height
        })
    }

    /// Open the URL of the link with the given tag.
    pub fn activate<O: UrlOpener + ?Sized>(&self, tag: usize, opener: &mut O) -> Result<(), LinkError> {
        let link = self.links.get(tag).ok_or(LinkError::NoSuchLink(tag))?;
        let url = link.url.as_ref().ok_or(LinkError::NoUrl(tag))?;
        debug!("page {}: opening link {} -> {}", self.page_number, tag, url);
        opener.open(url)
    }
}

#[cfg(test)]
mod tests {
    use euclid::{Point2D, Rect, Size2D};

    use super::*;
    use crate::types::{AnnotationRef, DocumentLink, PageGeometry, Rotation};

    fn page() -> PageLinks {
        let link = |x: f64, y: f64, w: f64, h: f64, url: Option<&str>| DocumentLink {
            rect: Rect::new(Point2D::new(x, y), Size2D::new(w, h)),
            annotation: AnnotationRef::Direct { index: 0 },
            url: url.map(|u| Url::parse(u).unwrap()),
        };
        PageLinks {
            page_number: 1,
            geometry: PageGeometry {
                rotation: Rotation::Deg0,
                page_width: 306.0,
                page_height: 396.0,
                offset_x: 0.0,
                offset_y: 0.0,
            },
            links: vec![
                link(10.0, 10.0, 50.0, 20.0, Some("https://example.com/a")),
                link(100.0, 200.0, 40.0, -14.0, Some("https://example.com/b")),
                link(0.0, 300.0, 20.0, 20.0, None),
            ],
        }
    }

    #[test]
    fn overlays_follow_link_order() {
        let overlays = page().overlays();
        assert_eq!(overlays.len(), 3);
        assert_eq!(overlays[1].tag, 1);
        assert_eq!(overlays[1].color, HIGHLIGHT_COLOR);
        assert_eq!(overlays[0].rect.origin, Point2D::new(10.0, 10.0));
    }

    #[test]
    fn hit_test_handles_negative_heights() {
        let page = page();
        assert_eq!(page.hit_test(Point2D::new(20.0, 15.0)), Some(0));
        assert_eq!(page.hit_test(Point2D::new(120.0, 190.0)), Some(1));
        assert_eq!(page.hit_test(Point2D::new(120.0, 210.0)), None);
        assert_eq!(page.hit_test(Point2D::new(500.0, 500.0)), None);
    }

    #[test]
    fn activate_opens_url() {
        let page = page();
        let mut opened = Vec::new();
        let mut opener = |url: &Url| -> Result<(), LinkError> {
            opened.push(url.to_string());
            Ok(())
        };
        page.activate(1, &mut opener).unwrap();
        assert_eq!(opened, vec!["https://example.com/b"]);
    }

    #[test]
    fn activate_reports_missing_links_and_urls() {
        let page = page();
        let mut opener = |_: &Url| -> Result<(), LinkError> { Ok(()) };
        assert!(matches!(
            page.activate(2, &mut opener),
            Err(LinkError::NoUrl(2))
        ));
        assert!(matches!(
            page.activate(9, &mut opener),
            Err(LinkError::NoSuchLink(9))
        ));
    }
}
