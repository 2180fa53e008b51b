mod types;

use std::cell::RefCell;
use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::ptr;

pub use types::{FfiLink, FfiPageSize, FfiRect};

thread_local! {
    static LAST_ERROR: RefCell<Option<CString>> = RefCell::new(None);
}

fn set_last_error(err: String) {
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = CString::new(err).ok();
    });
}

pub struct PdfLinksHandle {
    page: pdf_links::PageLinks,
}

fn into_handle(
    result: Result<pdf_links::PageLinks, pdf_links::LinkError>,
) -> *mut PdfLinksHandle {
    match result {
        Ok(page) => Box::into_raw(Box::new(PdfLinksHandle { page })),
        Err(e) => {
            set_last_error(format!("Failed to extract links: {}", e));
            ptr::null_mut()
        }
    }
}

unsafe fn c_str_arg<'a>(s: *const c_char, what: &str) -> Option<&'a str> {
    match unsafe { CStr::from_ptr(s) }.to_str() {
        Ok(s) => Some(s),
        Err(e) => {
            set_last_error(format!("Invalid UTF-8 in {}: {}", what, e));
            None
        }
    }
}

fn extractor(password: Option<&str>) -> pdf_links::PageLinksExtractor {
    if let Some(pwd) = password {
        pdf_links::PageLinksExtractor::builder().password(pwd).build()
    } else {
        pdf_links::PageLinksExtractor::default()
    }
}

#[no_mangle]
pub extern "C" fn pdf_links_from_path(path: *const c_char, page: u32) -> *mut PdfLinksHandle {
    pdf_links_from_path_with_password(path, ptr::null(), page)
}

#[no_mangle]
pub extern "C" fn pdf_links_from_bytes(data: *const u8, len: usize, page: u32) -> *mut PdfLinksHandle {
    pdf_links_from_bytes_with_password(data, len, ptr::null(), page)
}

#[no_mangle]
pub extern "C" fn pdf_links_from_path_with_password(
    path: *const c_char,
    password: *const c_char,
    page: u32,
) -> *mut PdfLinksHandle {
    if path.is_null() {
        set_last_error("Path pointer is null".to_string());
        return ptr::null_mut();
    }

    let path_str = match unsafe { c_str_arg(path, "path") } {
        Some(s) => s,
        None => return ptr::null_mut(),
    };

    let password_str = if password.is_null() {
        None
    } else {
        match unsafe { c_str_arg(password, "password") } {
            Some(s) => Some(s),
            None => return ptr::null_mut(),
        }
    };

    into_handle(extractor(password_str).from_path(path_str, page))
}

#[no_mangle]
pub extern "C" fn pdf_links_from_bytes_with_password(
    data: *const u8,
    len: usize,
    password: *const c_char,
    page: u32,
) -> *mut PdfLinksHandle {
    if data.is_null() {
        set_last_error("Data pointer is null".to_string());
        return ptr::null_mut();
    }

    let bytes = unsafe { std::slice::from_raw_parts(data, len) };

    let password_str = if password.is_null() {
        None
    } else {
        match unsafe { c_str_arg(password, "password") } {
            Some(s) => Some(s),
            None => return ptr::null_mut(),
        }
    };

    into_handle(extractor(password_str).from_bytes(bytes, page))
}

/// Number of links on the page.
#[no_mangle]
pub extern "C" fn pdf_links_count(handle: *const PdfLinksHandle) -> usize {
    if handle.is_null() {
        set_last_error("Handle is null".to_string());
        return 0;
    }

    let handle = unsafe { &*handle };
    handle.page.links.len()
}

/// Size of the page view and the page rotation. Returns 0 on success.
#[no_mangle]
pub extern "C" fn pdf_links_page_size(handle: *const PdfLinksHandle, out: *mut FfiPageSize) -> i32 {
    if handle.is_null() {
        set_last_error("Handle is null".to_string());
        return -1;
    }

    if out.is_null() {
        set_last_error("Output pointer is null".to_string());
        return -1;
    }

    let handle = unsafe { &*handle };
    unsafe {
        *out = FfiPageSize::from(&handle.page.geometry);
    }

    0
}

/// Copy out the link at `index`. Returns 0 on success.
#[no_mangle]
pub extern "C" fn pdf_links_get(handle: *const PdfLinksHandle, index: usize, out: *mut FfiLink) -> i32 {
    if handle.is_null() {
        set_last_error("Handle is null".to_string());
        return -1;
    }

    if out.is_null() {
        set_last_error("Output pointer is null".to_string());
        return -1;
    }

    let handle = unsafe { &*handle };

    let link = match handle.page.links.get(index) {
        Some(link) => link,
        None => {
            set_last_error(format!("Link index {} out of bounds", index));
            return -1;
        }
    };

    unsafe {
        *out = FfiLink::from_link(link);
    }

    0
}

/// Index of the link under the view point `(x, y)`, or -1.
#[no_mangle]
pub extern "C" fn pdf_links_hit_test(handle: *const PdfLinksHandle, x: f64, y: f64) -> i64 {
    if handle.is_null() {
        set_last_error("Handle is null".to_string());
        return -1;
    }

    let handle = unsafe { &*handle };
    match handle.page.hit_test(pdf_links::ViewPoint::new(x, y)) {
        Some(index) => index as i64,
        None => -1,
    }
}

#[no_mangle]
pub extern "C" fn pdf_links_string_free(s: *mut c_char) {
    if !s.is_null() {
        unsafe {
            drop(CString::from_raw(s));
        }
    }
}

#[no_mangle]
pub extern "C" fn pdf_links_free(handle: *mut PdfLinksHandle) {
    if !handle.is_null() {
        unsafe {
            drop(Box::from_raw(handle));
        }
    }
}

#[no_mangle]
pub extern "C" fn pdf_links_last_error() -> *const c_char {
    LAST_ERROR.with(|e| match e.borrow().as_ref() {
        Some(err) => err.as_ptr(),
        None => ptr::null(),
    })
}
