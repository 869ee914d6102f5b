//! Shared helpers for pdflab integration tests.
//!
//! Fixtures are generated in-process with `lopdf`, so the suite needs no
//! files on disk.

use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, ObjectId, Stream, dictionary};
use pdflab::io::DocumentSource;
use pdflab::merge::BookmarkManager;
use pdflab::render::text::decode_win_ansi;
use std::collections::HashMap;

/// Serialized PDF with `pages` pages; page `n` shows "`label` n".
pub fn pdf_bytes(label: &str, pages: u32) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let resources_id = doc.add_object(dictionary! { "Font" => dictionary! { "F1" => font_id } });

    let mut kids = Vec::new();
    for n in 1..=pages {
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 18.into()]),
                Operation::new("Td", vec![100.into(), 700.into()]),
                Operation::new("Tj", vec![Object::string_literal(format!("{label} {n}"))]),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        });
        kids.push(page_id.into());
    }

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => pages as i64,
        }),
    );
    let catalog_id = doc.add_object(dictionary! { "Type" => "Catalog", "Pages" => pages_id });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).unwrap();
    bytes
}

/// In-memory sources named `doc1.pdf`, `doc2.pdf`, ... with the given page counts.
pub fn sources(page_counts: &[u32]) -> Vec<DocumentSource> {
    page_counts
        .iter()
        .enumerate()
        .map(|(i, &pages)| {
            let name = format!("doc{}.pdf", i + 1);
            let bytes = pdf_bytes(&name, pages);
            DocumentSource::from_bytes(name, bytes)
        })
        .collect()
}

/// Parse merged output.
pub fn load(bytes: &[u8]) -> Document {
    Document::load_mem(bytes).expect("merged output should parse")
}

/// Strings shown on the 1-based page `number`, in drawing order.
pub fn page_text(doc: &Document, number: u32) -> Vec<String> {
    let page_id = doc.get_pages()[&number];
    let content = doc.get_page_content(page_id).unwrap();

    Content::decode(&content)
        .unwrap()
        .operations
        .into_iter()
        .filter(|op| op.operator == "Tj")
        .filter_map(|op| match op.operands.first() {
            Some(Object::String(bytes, _)) => Some(decode_win_ansi(bytes)),
            _ => None,
        })
        .collect()
}

/// Outline entries as `(title, 1-based target page)`.
pub fn outline(doc: &Document) -> Vec<(String, u32)> {
    let numbers: HashMap<ObjectId, u32> = doc
        .get_pages()
        .into_iter()
        .map(|(number, id)| (id, number))
        .collect();

    BookmarkManager::new()
        .outline_entries(doc)
        .into_iter()
        .map(|(title, id)| (title, numbers[&id]))
        .collect()
}

/// Create a temporary output path for test results.
pub fn temp_output_path() -> tempfile::TempPath {
    tempfile::NamedTempFile::new()
        .expect("Failed to create temp file")
        .into_temp_path()
}
