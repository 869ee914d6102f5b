//! End-to-end layout of assembled documents.

use pdflab::config::MergeOptions;
use pdflab::merge::MergeAssembler;
use pdflab::output::NoProgress;

use crate::common::{load, outline, page_text, sources};

fn options(index: bool, separators: bool, numbering: bool) -> MergeOptions {
    MergeOptions {
        include_index: index,
        include_separators: separators,
        number_chapters: numbering,
        compress: false,
    }
}

#[test]
fn test_plain_concatenation() {
    let result = MergeAssembler::new()
        .assemble(&sources(&[5, 3, 10]), &options(false, false, false), &mut NoProgress)
        .unwrap();
    let doc = load(&result.bytes);

    assert_eq!(doc.get_pages().len(), 18);
    assert_eq!(result.plan.start_pages(), vec![1, 6, 9]);
    assert_eq!(
        outline(&doc),
        vec![
            ("doc1.pdf".to_string(), 1),
            ("doc2.pdf".to_string(), 6),
            ("doc3.pdf".to_string(), 9),
        ]
    );
    assert_eq!(page_text(&doc, 6), vec!["doc2.pdf 1"]);
    assert_eq!(page_text(&doc, 18), vec!["doc3.pdf 10"]);
}

#[test]
fn test_separators_precede_documents() {
    let result = MergeAssembler::new()
        .assemble(&sources(&[5, 3, 10]), &options(false, true, false), &mut NoProgress)
        .unwrap();
    let doc = load(&result.bytes);

    assert_eq!(doc.get_pages().len(), 21);
    assert_eq!(result.plan.start_pages(), vec![1, 7, 11]);

    // Bookmarks land on the separator pages.
    let targets: Vec<u32> = outline(&doc).into_iter().map(|(_, page)| page).collect();
    assert_eq!(targets, vec![1, 7, 11]);

    assert_eq!(page_text(&doc, 1), vec!["DOC1.PDF"]);
    assert_eq!(page_text(&doc, 2), vec!["doc1.pdf 1"]);
    assert_eq!(page_text(&doc, 7), vec!["DOC2.PDF"]);
    assert_eq!(page_text(&doc, 8), vec!["doc2.pdf 1"]);
    assert_eq!(page_text(&doc, 11), vec!["DOC3.PDF"]);
}

#[test]
fn test_index_lists_start_pages() {
    let result = MergeAssembler::new()
        .assemble(&sources(&[5, 3, 10]), &options(true, false, false), &mut NoProgress)
        .unwrap();
    let doc = load(&result.bytes);

    assert_eq!(result.plan.index_page_count, 1);
    assert_eq!(doc.get_pages().len(), 19);
    assert_eq!(
        page_text(&doc, 1),
        vec![
            "TABLE OF CONTENTS (Page 1/1)",
            "doc1.pdf",
            "2",
            "doc2.pdf",
            "7",
            "doc3.pdf",
            "10",
        ]
    );

    let targets: Vec<u32> = outline(&doc).into_iter().map(|(_, page)| page).collect();
    assert_eq!(targets, vec![2, 7, 10]);
    assert_eq!(page_text(&doc, 2), vec!["doc1.pdf 1"]);
}

#[test]
fn test_index_spills_onto_second_page() {
    let counts = vec![1; 35];
    let result = MergeAssembler::new()
        .assemble(&sources(&counts), &options(true, false, false), &mut NoProgress)
        .unwrap();
    let doc = load(&result.bytes);

    assert_eq!(result.plan.index_page_count, 2);
    assert_eq!(result.plan.entries[0].start_page, 3);
    assert_eq!(doc.get_pages().len(), 37);

    let first = page_text(&doc, 1);
    assert_eq!(first[0], "TABLE OF CONTENTS (Page 1/2)");
    assert_eq!(first.len(), 1 + 2 * 30);

    let second = page_text(&doc, 2);
    assert_eq!(second[0], "TABLE OF CONTENTS (Page 2/2)");
    assert_eq!(&second[1..3], &["doc31.pdf", "33"]);
    assert_eq!(second.len(), 1 + 2 * 5);

    assert_eq!(page_text(&doc, 3), vec!["doc1.pdf 1"]);
}

#[test]
fn test_every_option_together() {
    let result = MergeAssembler::new()
        .assemble(&sources(&[2, 1]), &options(true, true, true), &mut NoProgress)
        .unwrap();
    let doc = load(&result.bytes);

    // Index, then separator + 2 pages, then separator + 1 page.
    assert_eq!(doc.get_pages().len(), 6);
    assert_eq!(
        page_text(&doc, 1),
        vec!["TABLE OF CONTENTS (Page 1/1)", "01. doc1.pdf", "2", "02. doc2.pdf", "5"]
    );
    assert_eq!(page_text(&doc, 2), vec!["01. DOC1.PDF"]);
    assert_eq!(page_text(&doc, 5), vec!["02. DOC2.PDF"]);
    assert_eq!(
        outline(&doc),
        vec![("01. doc1.pdf".to_string(), 2), ("02. doc2.pdf".to_string(), 5)]
    );
}

#[test]
fn test_long_names_truncated_only_in_index() {
    let long_name = format!("{}.pdf", "annual-report-".repeat(6));
    let all = vec![pdflab::io::DocumentSource::from_bytes(
        long_name.clone(),
        crate::common::pdf_bytes("x", 1),
    )];

    let result = MergeAssembler::new()
        .assemble(&all, &options(true, false, false), &mut NoProgress)
        .unwrap();
    let doc = load(&result.bytes);

    let row = &page_text(&doc, 1)[1];
    assert_eq!(row.chars().count(), 62);
    assert!(row.ends_with(".."));
    assert_eq!(outline(&doc)[0].0, long_name);
}

#[test]
fn test_planned_total_matches_output() {
    for (index, separators) in [(false, false), (true, false), (false, true), (true, true)] {
        let result = MergeAssembler::new()
            .assemble(
                &sources(&[3, 1, 4, 1, 5]),
                &options(index, separators, false),
                &mut NoProgress,
            )
            .unwrap();

        assert_eq!(
            load(&result.bytes).get_pages().len() as u32,
            result.plan.total_pages(),
            "index={index} separators={separators}"
        );
    }
}
