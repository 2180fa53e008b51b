//! End-to-end extraction from serialized PDF bytes.

use lopdf::{
    Dictionary, Document, EncryptionState, EncryptionVersion, Object, ObjectId, Permissions,
    StringFormat, dictionary,
};
use pdf_links::{
    LinkError, MissingActionPolicy, PageLinksExtractor, Rotation, ViewPoint, from_bytes,
    from_reader,
};

fn uri_action(target: &str) -> Dictionary {
    dictionary! {
        "S" => "URI",
        "URI" => Object::String(target.as_bytes().to_vec(), StringFormat::Literal),
    }
}

fn finish(doc: &mut Document, pages_id: ObjectId, kids: Vec<Object>) {
    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.trailer.set(
        "ID",
        Object::Array(vec![
            Object::string_literal(b"pdf-links-test"),
            Object::string_literal(b"pdf-links-test"),
        ]),
    );
}

fn to_bytes(doc: &mut Document) -> Vec<u8> {
    let mut buf = Vec::new();
    doc.save_to(&mut buf).expect("failed to save test PDF");
    buf
}

fn save(mut doc: Document, pages_id: ObjectId, kids: Vec<Object>) -> Vec<u8> {
    finish(&mut doc, pages_id, kids);
    to_bytes(&mut doc)
}

fn encrypted(mut doc: Document, user_password: &str) -> Vec<u8> {
    let state = EncryptionState::try_from(EncryptionVersion::V2 {
        document: &doc,
        owner_password: "owner",
        user_password,
        key_length: 40,
        permissions: Permissions::all(),
    })
    .expect("failed to set up encryption");
    doc.encrypt(&state).expect("failed to encrypt test PDF");
    to_bytes(&mut doc)
}

fn rotated_page_pdf() -> Vec<u8> {
    to_bytes(&mut rotated_page_document())
}

/// One rotated page with a crop box, a text note, two links and a link
/// without an action between them.
fn rotated_page_document() -> Document {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let note = doc.add_object(dictionary! {
        "Type" => "Annot",
        "Subtype" => "Text",
        "Rect" => vec![0.into(), 0.into(), 20.into(), 20.into()],
    });
    let first = doc.add_object(dictionary! {
        "Type" => "Annot",
        "Subtype" => "Link",
        "Rect" => vec![50.into(), 700.into(), 150.into(), 750.into()],
        "A" => uri_action("https://example.com/first"),
    });
    let broken = doc.add_object(dictionary! {
        "Type" => "Annot",
        "Subtype" => "Link",
        "Rect" => vec![0.into(), 0.into(), 10.into(), 10.into()],
    });
    let last = doc.add_object(dictionary! {
        "Type" => "Annot",
        "Subtype" => "Link",
        "Rect" => vec![300.into(), 400.into(), 200.into(), 300.into()],
        "A" => uri_action("https://example.com/last"),
    });

    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "MediaBox" => vec![0.into(), 0.into(), 600.into(), 800.into()],
        "CropBox" => vec![0.into(), 0.into(), 600.into(), 800.into()],
        "Rotate" => 90,
        "Annots" => vec![note.into(), first.into(), broken.into(), last.into()],
    });

    finish(&mut doc, pages_id, vec![page_id.into()]);
    doc
}

#[test]
fn rotated_page_compatibility_policy() {
    let page = from_bytes(&rotated_page_pdf(), 1).unwrap();

    assert_eq!(page.geometry.rotation, Rotation::Deg90);
    assert_eq!(page.geometry.page_width, 400.0);
    assert_eq!(page.geometry.page_height, 300.0);

    // The scan stops at the link without an action.
    assert_eq!(page.links.len(), 1);
    let link = &page.links[0];
    assert_eq!(link.url.as_ref().unwrap().as_str(), "https://example.com/first");
    assert_eq!(link.rect.origin.x, 700.0);
    assert_eq!(link.rect.origin.y, 50.0);
    assert_eq!(link.rect.size.width, 50.0);
    assert!((link.rect.size.height - 70.0).abs() < 1e-9);
}

#[test]
fn rotated_page_skip_policy() {
    let page = PageLinksExtractor::builder()
        .missing_action(MissingActionPolicy::SkipAnnotation)
        .build()
        .from_reader(std::io::Cursor::new(rotated_page_pdf()), 1)
        .unwrap();

    let urls: Vec<_> = page
        .links
        .iter()
        .map(|l| l.url.as_ref().unwrap().as_str().to_owned())
        .collect();
    assert_eq!(urls, vec!["https://example.com/first", "https://example.com/last"]);

    // Inverted corners are normalized before the axes are swapped.
    let last = &page.links[1];
    assert_eq!(last.rect.origin.x, 300.0);
    assert_eq!(last.rect.origin.y, 200.0);
    assert_eq!(last.rect.size.width, 100.0);
}

#[test]
fn tapping_an_overlay_opens_its_url() {
    let page = from_reader(std::io::Cursor::new(rotated_page_pdf()), 1).unwrap();
    let overlays = page.overlays();
    assert_eq!(overlays.len(), 1);

    let tag = page.hit_test(ViewPoint::new(720.0, 60.0)).unwrap();
    assert_eq!(tag, overlays[0].tag);

    let mut opened = None;
    page.activate(tag, &mut |url: &pdf_links::Url| -> Result<(), LinkError> {
        opened = Some(url.to_string());
        Ok(())
    })
    .unwrap();
    assert_eq!(opened.as_deref(), Some("https://example.com/first"));
}

#[test]
fn page_without_annotations() {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
    });
    let bytes = save(doc, pages_id, vec![page_id.into()]);

    let page = from_bytes(&bytes, 1).unwrap();
    assert!(page.links.is_empty());
    let size = page.geometry.view_size();
    assert_eq!((size.width, size.height), (296, 420));
}

#[test]
fn empty_user_password_opens_without_password() {
    let bytes = encrypted(rotated_page_document(), "");

    let page = PageLinksExtractor::builder()
        .missing_action(MissingActionPolicy::SkipAnnotation)
        .build()
        .from_bytes(&bytes, 1)
        .unwrap();
    let urls: Vec<_> = page
        .links
        .iter()
        .map(|l| l.url.as_ref().unwrap().as_str().to_owned())
        .collect();
    assert_eq!(urls, vec!["https://example.com/first", "https://example.com/last"]);
}

#[test]
fn user_password_is_required() {
    let bytes = encrypted(rotated_page_document(), "secret");
    assert!(matches!(from_bytes(&bytes, 1), Err(LinkError::PdfError(_))));
}

#[test]
fn garbage_is_rejected() {
    assert!(from_bytes(b"not a pdf", 1).is_err());
}
