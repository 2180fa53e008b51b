use euclid::{Point2D, Rect, Size2D};
use lopdf::{Dictionary, Document};
use tracing::{debug, warn};

use crate::error::LinkError;
use crate::types::{PageGeometry, PdfBox, Rotation};
use crate::utils::get_inherited;

/// Build a box from a `[x0 y0 x1 y1]` array, whatever order the corners are in.
pub(crate) fn pdf_box(a: [f64; 4]) -> PdfBox {
    let (x0, x1) = (a[0].min(a[2]), a[0].max(a[2]));
    let (y0, y1) = (a[1].min(a[3]), a[1].max(a[3]));
    Rect::new(Point2D::new(x0, y0), Size2D::new(x1 - x0, y1 - y0))
}

/// Truncate to an integer and step down to the nearest even value.
pub(crate) fn even_floor(v: f64) -> f64 {
    let mut n = v.max(0.0) as u64;
    if n % 2 != 0 {
        n -= 1;
    }
    n as f64
}

impl PageGeometry {
    /// Compute the view geometry from the page boxes.
    ///
    /// The visible region is the crop box clipped to the media box. For
    /// quarter turns the width comes from the region's height and the offsets
    /// are swapped to match.
    pub fn from_boxes(
        crop_box: PdfBox,
        media_box: PdfBox,
        rotation: Rotation,
        view_scale: f64,
    ) -> PageGeometry {
        let effective = crop_box.intersection(&media_box).unwrap_or_else(|| {
            warn!(
                "CropBox {:?} does not overlap MediaBox {:?}, using MediaBox",
                crop_box, media_box
            );
            media_box
        });

        let (width, height, offset_x, offset_y) = if rotation.is_quarter_turn() {
            (
                effective.size.height * view_scale,
                effective.size.width * view_scale,
                effective.origin.y,
                effective.origin.x,
            )
        } else {
            (
                effective.size.width * view_scale,
                effective.size.height * view_scale,
                effective.origin.x,
                effective.origin.y,
            )
        };

        PageGeometry {
            rotation,
            page_width: even_floor(width),
            page_height: even_floor(height),
            offset_x,
            offset_y,
        }
    }
}

/// Read the page boxes and rotation from a page dictionary.
pub(crate) fn load_page_geometry(
    doc: &Document,
    page_dict: &Dictionary,
    page_number: u32,
    view_scale: f64,
) -> Result<PageGeometry, LinkError> {
    let media_box = match get_inherited::<[f64; 4]>(doc, page_dict, b"MediaBox") {
        Ok(Some(a)) => pdf_box(a),
        Ok(None) => return Err(LinkError::MissingMediaBox(page_number)),
        Err(e) => {
            warn!("page {}: unusable MediaBox: {}", page_number, e);
            return Err(LinkError::MissingMediaBox(page_number));
        }
    };
    let crop_box = match get_inherited::<[f64; 4]>(doc, page_dict, b"CropBox") {
        Ok(Some(a)) => pdf_box(a),
        Ok(None) => media_box,
        Err(e) => {
            warn!("page {}: ignoring malformed CropBox: {}", page_number, e);
            media_box
        }
    };

    let degrees = get_inherited::<f64>(doc, page_dict, b"Rotate")
        .ok()
        .flatten()
        .unwrap_or(0.0) as i64;
    let rotation = Rotation::from_degrees(degrees).unwrap_or_else(|| {
        warn!(
            "page {}: Rotate {} is not a multiple of 90, treating as 0",
            page_number, degrees
        );
        Rotation::Deg0
    });

    let geometry = PageGeometry::from_boxes(crop_box, media_box, rotation, view_scale);
    debug!(
        "page {}: MediaBox {:?} CropBox {:?} -> {:?}",
        page_number, media_box, crop_box, geometry
    );
    Ok(geometry)
}

#[cfg(test)]
mod tests {
    use lopdf::{Object, dictionary};

    use super::*;

    fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> PdfBox {
        pdf_box([x0, y0, x1, y1])
    }

    #[test]
    fn even_floor_rounds_down_to_even() {
        assert_eq!(even_floor(300.0), 300.0);
        assert_eq!(even_floor(301.0), 300.0);
        assert_eq!(even_floor(301.9), 300.0);
        assert_eq!(even_floor(0.5), 0.0);
        assert_eq!(even_floor(1.0), 0.0);
    }

    #[test]
    fn upright_page_is_halved() {
        let page = rect(0.0, 0.0, 612.0, 792.0);
        let g = PageGeometry::from_boxes(page, page, Rotation::Deg0, 0.5);
        assert_eq!(g.page_width, 306.0);
        assert_eq!(g.page_height, 396.0);
        assert_eq!((g.offset_x, g.offset_y), (0.0, 0.0));
    }

    #[test]
    fn quarter_turn_swaps_axes_and_offsets() {
        let media = rect(0.0, 0.0, 700.0, 900.0);
        let crop = rect(20.0, 40.0, 620.0, 840.0);
        let g = PageGeometry::from_boxes(crop, media, Rotation::Deg90, 0.5);
        assert_eq!(g.page_width, 400.0);
        assert_eq!(g.page_height, 300.0);
        assert_eq!((g.offset_x, g.offset_y), (40.0, 20.0));
    }

    #[test]
    fn crop_box_is_clipped_to_media_box() {
        let media = rect(0.0, 0.0, 500.0, 500.0);
        let crop = rect(100.0, 50.0, 800.0, 800.0);
        let g = PageGeometry::from_boxes(crop, media, Rotation::Deg180, 0.5);
        assert_eq!(g.page_width, 200.0);
        assert_eq!(g.page_height, 224.0);
        assert_eq!((g.offset_x, g.offset_y), (100.0, 50.0));
    }

    #[test]
    fn dimensions_are_always_even() {
        for w in 1..60 {
            for h in [1.0, 33.3, 47.0, 1001.0] {
                let b = rect(0.0, 0.0, w as f64 * 3.7, h);
                for r in [Rotation::Deg0, Rotation::Deg90] {
                    let g = PageGeometry::from_boxes(b, b, r, 0.5);
                    let size = g.view_size();
                    assert_eq!(size.width % 2, 0);
                    assert_eq!(size.height % 2, 0);
                }
            }
        }
    }

    #[test]
    fn disjoint_crop_box_falls_back_to_media_box() {
        let media = rect(0.0, 0.0, 400.0, 400.0);
        let crop = rect(500.0, 500.0, 600.0, 600.0);
        let g = PageGeometry::from_boxes(crop, media, Rotation::Deg0, 0.5);
        assert_eq!((g.page_width, g.page_height), (200.0, 200.0));
    }

    #[test]
    fn loads_inherited_boxes_and_rotation() {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.add_object(dictionary! {
            "Type" => "Pages",
            "MediaBox" => vec![0.into(), 0.into(), 600.into(), 800.into()],
            "Rotate" => 270,
        });
        let page = dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "CropBox" => vec![Object::Real(10.0), 20.into(), 590.into(), 780.into()],
        };

        let g = load_page_geometry(&doc, &page, 1, 0.5).unwrap();
        assert_eq!(g.rotation, Rotation::Deg270);
        assert_eq!(g.page_width, 380.0);
        assert_eq!(g.page_height, 290.0);
        assert_eq!((g.offset_x, g.offset_y), (20.0, 10.0));
    }

    #[test]
    fn missing_media_box_is_fatal() {
        let doc = Document::with_version("1.5");
        let page = dictionary! { "Type" => "Page" };
        assert!(matches!(
            load_page_geometry(&doc, &page, 3, 0.5),
            Err(LinkError::MissingMediaBox(3))
        ));
    }

    #[test]
    fn malformed_media_box_counts_as_missing() {
        let doc = Document::with_version("1.5");
        let short = dictionary! {
            "MediaBox" => vec![0.into(), 0.into(), 600.into()],
        };
        assert!(matches!(
            load_page_geometry(&doc, &short, 2, 0.5),
            Err(LinkError::MissingMediaBox(2))
        ));

        let named = dictionary! { "MediaBox" => "Letter" };
        assert!(matches!(
            load_page_geometry(&doc, &named, 2, 0.5),
            Err(LinkError::MissingMediaBox(2))
        ));
    }

    #[test]
    fn huge_media_box_keeps_an_even_view_size() {
        let doc = Document::with_version("1.5");
        let page = dictionary! {
            "MediaBox" => vec![0.into(), 0.into(), Object::Real(2e10), Object::Real(2e10)],
        };
        let g = load_page_geometry(&doc, &page, 1, 0.5).unwrap();
        let size = g.view_size();
        assert_eq!(size.width % 2, 0);
        assert_eq!(size.height % 2, 0);
        assert_eq!(size.width, u32::MAX - 1);
    }

    #[test]
    fn odd_rotation_falls_back_to_upright() {
        let doc = Document::with_version("1.5");
        let page = dictionary! {
            "MediaBox" => vec![0.into(), 0.into(), 100.into(), 100.into()],
            "Rotate" => 45,
        };
        let g = load_page_geometry(&doc, &page, 1, 0.5).unwrap();
        assert_eq!(g.rotation, Rotation::Deg0);
    }
}
