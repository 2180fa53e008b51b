use std::os::raw::c_char;

#[repr(C)]
pub struct FfiRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl From<&pdf_links::ViewRect> for FfiRect {
    fn from(rect: &pdf_links::ViewRect) -> Self {
        FfiRect {
            x: rect.origin.x,
            y: rect.origin.y,
            width: rect.size.width,
            height: rect.size.height,
        }
    }
}

#[repr(C)]
pub struct FfiPageSize {
    pub width: u32,
    pub height: u32,
    /// 0, 90, 180 or 270.
    pub rotation: u32,
}

impl From<&pdf_links::PageGeometry> for FfiPageSize {
    fn from(geometry: &pdf_links::PageGeometry) -> Self {
        let size = geometry.view_size();
        FfiPageSize {
            width: size.width,
            height: size.height,
            rotation: geometry.rotation.degrees(),
        }
    }
}

#[repr(C)]
pub struct FfiLink {
    pub rect: FfiRect,
    /// NUL-terminated URL, or null when the link has none. Free with `pdf_links_string_free`.
    pub url: *mut c_char,
}

impl FfiLink {
    pub fn from_link(link: &pdf_links::DocumentLink) -> Self {
        let url = link
            .url
            .as_ref()
            .and_then(|u| std::ffi::CString::new(u.as_str()).ok())
            .map(|s| s.into_raw())
            .unwrap_or(std::ptr::null_mut());

        FfiLink {
            rect: FfiRect::from(&link.rect),
            url,
        }
    }
}
