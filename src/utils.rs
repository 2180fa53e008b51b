use encoding_rs::UTF_16BE;
use lopdf::{Dictionary, Document, Object};

use crate::error::LookupError;

// Bound on Reference -> Reference chains and /Parent walks.
const MAX_DEPTH: usize = 32;

#[allow(non_upper_case_globals)]
pub(crate) const PDFDocEncoding: &[u16] = &[
    0x0000, 0x0001, 0x0002, 0x0003, 0x0004, 0x0005, 0x0006, 0x0007, 0x0008, 0x0009, 0x000a, 0x000b,
    0x000c, 0x000d, 0x000e, 0x000f, 0x0010, 0x0011, 0x0012, 0x0013, 0x0014, 0x0015, 0x0016, 0x0017,
    0x02d8, 0x02c7, 0x02c6, 0x02d9, 0x02dd, 0x02db, 0x02da, 0x02dc, 0x0020, 0x0021, 0x0022, 0x0023,
    0x0024, 0x0025, 0x0026, 0x0027, 0x0028, 0x0029, 0x002a, 0x002b, 0x002c, 0x002d, 0x002e, 0x002f,
    0x0030, 0x0031, 0x0032, 0x0033, 0x0034, 0x0035, 0x0036, 0x0037, 0x0038, 0x0039, 0x003a, 0x003b,
    0x003c, 0x003d, 0x003e, 0x003f, 0x0040, 0x0041, 0x0042, 0x0043, 0x0044, 0x0045, 0x0046, 0x0047,
    0x0048, 0x0049, 0x004a, 0x004b, 0x004c, 0x004d, 0x004e, 0x004f, 0x0050, 0x0051, 0x0052, 0x0053,
    0x0054, 0x0055, 0x0056, 0x0057, 0x0058, 0x0059, 0x005a, 0x005b, 0x005c, 0x005d, 0x005e, 0x005f,
    0x0060, 0x0061, 0x0062, 0x0063, 0x0064, 0x0065, 0x0066, 0x0067, 0x0068, 0x0069, 0x006a, 0x006b,
    0x006c, 0x006d, 0x006e, 0x006f, 0x0070, 0x0071, 0x0072, 0x0073, 0x0074, 0x0075, 0x0076, 0x0077,
    0x0078, 0x0079, 0x007a, 0x007b, 0x007c, 0x007d, 0x007e, 0xfffd, 0x2022, 0x2020, 0x2021, 0x2026,
    0x2014, 0x2013, 0x0192, 0x2044, 0x2039, 0x203a, 0x2212, 0x2030, 0x201e, 0x201c, 0x201d, 0x2018,
    0x2019, 0x201a, 0x2122, 0xfb01, 0xfb02, 0x0141, 0x0152, 0x0160, 0x0178, 0x017d, 0x0131, 0x0142,
    0x0153, 0x0161, 0x017e, 0xfffd, 0x20ac, 0x00a1, 0x00a2, 0x00a3, 0x00a4, 0x00a5, 0x00a6, 0x00a7,
    0x00a8, 0x00a9, 0x00aa, 0x00ab, 0x00ac, 0xfffd, 0x00ae, 0x00af, 0x00b0, 0x00b1, 0x00b2, 0x00b3,
    0x00b4, 0x00b5, 0x00b6, 0x00b7, 0x00b8, 0x00b9, 0x00ba, 0x00bb, 0x00bc, 0x00bd, 0x00be, 0x00bf,
    0x00c0, 0x00c1, 0x00c2, 0x00c3, 0x00c4, 0x00c5, 0x00c6, 0x00c7, 0x00c8, 0x00c9, 0x00ca, 0x00cb,
    0x00cc, 0x00cd, 0x00ce, 0x00cf, 0x00d0, 0x00d1, 0x00d2, 0x00d3, 0x00d4, 0x00d5, 0x00d6, 0x00d7,
    0x00d8, 0x00d9, 0x00da, 0x00db, 0x00dc, 0x00dd, 0x00de, 0x00df, 0x00e0, 0x00e1, 0x00e2, 0x00e3,
    0x00e4, 0x00e5, 0x00e6, 0x00e7, 0x00e8, 0x00e9, 0x00ea, 0x00eb, 0x00ec, 0x00ed, 0x00ee, 0x00ef,
    0x00f0, 0x00f1, 0x00f2, 0x00f3, 0x00f4, 0x00f5, 0x00f6, 0x00f7, 0x00f8, 0x00f9, 0x00fa, 0x00fb,
    0x00fc, 0x00fd, 0x00fe, 0x00ff,
];

/// Decode a PDF text string (7.9.2.2): UTF-16BE or UTF-8 when prefixed with
/// a byte order mark, PDFDocEncoding otherwise.
pub(crate) fn decode_text_string(s: &[u8]) -> String {
    if s.len() >= 2 && s[0] == 0xfe && s[1] == 0xff {
        let (text, _) = UTF_16BE.decode_without_bom_handling(&s[2..]);
        text.into_owned()
    } else if s.len() >= 3 && s[..3] == [0xef, 0xbb, 0xbf] {
        String::from_utf8_lossy(&s[3..]).into_owned()
    } else {
        char::decode_utf16(s.iter().map(|&b| PDFDocEncoding[b as usize]))
            .map(|c| c.unwrap_or(char::REPLACEMENT_CHARACTER))
            .collect()
    }
}

pub(crate) fn kind_of(o: &Object) -> &'static str {
    match o {
        Object::Null => "null",
        Object::Boolean(_) => "boolean",
        Object::Integer(_) => "integer",
        Object::Real(_) => "real",
        Object::Name(_) => "name",
        Object::String(..) => "string",
        Object::Array(_) => "array",
        Object::Dictionary(_) => "dictionary",
        Object::Stream(_) => "stream",
        Object::Reference(_) => "reference",
    }
}

fn wrong_kind(expected: &'static str, found: &Object) -> LookupError {
    LookupError::WrongKind {
        expected,
        found: kind_of(found),
    }
}

pub(crate) fn resolve<'a>(doc: &'a Document, o: &'a Object) -> Result<&'a Object, LookupError> {
    let mut current = o;
    for _ in 0..MAX_DEPTH {
        match current {
            &Object::Reference(id) => {
                current = doc
                    .get_object(id)
                    .map_err(|_| LookupError::Unresolved(id))?;
            }
            _ => return Ok(current),
        }
    }
    match current {
        &Object::Reference(id) => Err(LookupError::Unresolved(id)),
        _ => Ok(current),
    }
}

/// A PDF name object, e.g. `/Link`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Name<'a>(pub(crate) &'a [u8]);

/// The raw bytes of a PDF string object.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct PdfString<'a>(pub(crate) &'a [u8]);

impl PdfString<'_> {
    pub(crate) fn to_text(self) -> String {
        decode_text_string(self.0)
    }
}

pub(crate) trait FromObj<'a>
where
    Self: std::marker::Sized,
{
    fn from_obj(doc: &'a Document, obj: &'a Object) -> Result<Self, LookupError>;
}

impl<'a> FromObj<'a> for f64 {
    fn from_obj(doc: &'a Document, obj: &'a Object) -> Result<Self, LookupError> {
        match resolve(doc, obj)? {
            &Object::Integer(i) => Ok(i as f64),
            &Object::Real(f) => Ok(f as f64),
            other => Err(wrong_kind("number", other)),
        }
    }
}

impl<'a> FromObj<'a> for i64 {
    fn from_obj(doc: &'a Document, obj: &'a Object) -> Result<Self, LookupError> {
        match resolve(doc, obj)? {
            &Object::Integer(i) => Ok(i),
            other => Err(wrong_kind("integer", other)),
        }
    }
}

impl<'a> FromObj<'a> for Name<'a> {
    fn from_obj(doc: &'a Document, obj: &'a Object) -> Result<Self, LookupError> {
        match resolve(doc, obj)? {
            Object::Name(name) => Ok(Name(name)),
            other => Err(wrong_kind("name", other)),
        }
    }
}

impl<'a> FromObj<'a> for PdfString<'a> {
    fn from_obj(doc: &'a Document, obj: &'a Object) -> Result<Self, LookupError> {
        match resolve(doc, obj)? {
            Object::String(bytes, _) => Ok(PdfString(bytes)),
            other => Err(wrong_kind("string", other)),
        }
    }
}

impl<'a> FromObj<'a> for &'a Dictionary {
    fn from_obj(doc: &'a Document, obj: &'a Object) -> Result<Self, LookupError> {
        match resolve(doc, obj)? {
            Object::Dictionary(dict) => Ok(dict),
            other => Err(wrong_kind("dictionary", other)),
        }
    }
}

impl<'a> FromObj<'a> for &'a [Object] {
    fn from_obj(doc: &'a Document, obj: &'a Object) -> Result<Self, LookupError> {
        match resolve(doc, obj)? {
            Object::Array(array) => Ok(array.as_slice()),
            other => Err(wrong_kind("array", other)),
        }
    }
}

impl<'a> FromObj<'a> for [f64; 4] {
    fn from_obj(doc: &'a Document, obj: &'a Object) -> Result<Self, LookupError> {
        let array: &[Object] = FromObj::from_obj(doc, obj)?;
        if array.len() != 4 {
            return Err(LookupError::WrongKind {
                expected: "array of 4 numbers",
                found: "array of another length",
            });
        }
        Ok([
            get_index(doc, array, 0)?,
            get_index(doc, array, 1)?,
            get_index(doc, array, 2)?,
            get_index(doc, array, 3)?,
        ])
    }
}

pub(crate) fn get<'a, T: FromObj<'a>>(
    doc: &'a Document,
    dict: &'a Dictionary,
    key: &[u8],
) -> Result<T, LookupError> {
    let obj = dict
        .get(key)
        .map_err(|_| LookupError::KeyNotFound(String::from_utf8_lossy(key).into_owned()))?;
    T::from_obj(doc, obj)
}

pub(crate) fn get_index<'a, T: FromObj<'a>>(
    doc: &'a Document,
    array: &'a [Object],
    index: usize,
) -> Result<T, LookupError> {
    let obj = array
        .get(index)
        .ok_or(LookupError::IndexOutOfRange(index))?;
    T::from_obj(doc, obj)
}

/// Look up an inheritable page attribute, walking `/Parent` links.
///
/// A key that is present but of the wrong kind is an error; a key that is
/// absent all the way up the tree is `Ok(None)`.
pub(crate) fn get_inherited<'a, T: FromObj<'a>>(
    doc: &'a Document,
    dict: &'a Dictionary,
    key: &[u8],
) -> Result<Option<T>, LookupError> {
    let mut current = dict;
    for _ in 0..MAX_DEPTH {
        match get(doc, current, key) {
            Ok(value) => return Ok(Some(value)),
            Err(LookupError::KeyNotFound(_)) => {}
            Err(e) => return Err(e),
        }
        current = match get::<&Dictionary>(doc, current, b"Parent") {
            Ok(parent) => parent,
            Err(_) => return Ok(None),
        };
    }
    Ok(None)
}
