use std::mem::swap;

use euclid::{Point2D, Rect, Size2D};

use crate::options::{HalfTurnPolicy, ScanOptions};
use crate::types::{AnnotationRect, PageGeometry, Rotation, ViewRect};

/// Map an annotation rect from PDF space into the page view.
///
/// The corners are normalized, moved into the visible region's frame, then
/// reoriented for the page rotation: quarter turns swap the axes (270 also
/// mirrors X), upright pages mirror Y since view space grows downward. The
/// overlay height is scaled by `options.height_scale`.
pub fn map_rect(rect: AnnotationRect, geometry: &PageGeometry, options: &ScanOptions) -> ViewRect {
    let AnnotationRect {
        mut llx,
        mut lly,
        mut urx,
        mut ury,
    } = rect.normalized();

    llx -= geometry.offset_x;
    urx -= geometry.offset_x;
    lly -= geometry.offset_y;
    ury -= geometry.offset_y;

    let mirror_y = |y: f64| geometry.page_height - y;

    match geometry.rotation {
        Rotation::Deg90 => {
            swap(&mut llx, &mut lly);
            swap(&mut urx, &mut ury);
        }
        Rotation::Deg270 => {
            swap(&mut llx, &mut lly);
            swap(&mut urx, &mut ury);
            llx = geometry.page_width - llx;
            urx = geometry.page_width - urx;
        }
        Rotation::Deg0 => {
            lly = mirror_y(lly);
            ury = mirror_y(ury);
        }
        Rotation::Deg180 => match options.half_turn {
            HalfTurnPolicy::Legacy => {}
            HalfTurnPolicy::MirrorY => {
                lly = mirror_y(lly);
                ury = mirror_y(ury);
            }
        },
    }

    Rect::new(
        Point2D::new(llx, lly),
        Size2D::new(urx - llx, (ury - lly) * options.height_scale),
    )
}
