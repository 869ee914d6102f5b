//! Fault tolerance, compression, progress and repeatability.

use pdflab::config::MergeOptions;
use pdflab::error::PdfLabError;
use pdflab::io::DocumentSource;
use pdflab::merge::MergeAssembler;
use pdflab::output::{NoProgress, ProgressRecorder};
use rstest::rstest;

use crate::common::{load, outline, page_text, pdf_bytes, sources};

#[test]
fn test_separator_that_cannot_render_is_skipped() {
    let long_name = format!("{}.pdf", "word ".repeat(400));
    let all = vec![
        DocumentSource::from_bytes("intro.pdf", pdf_bytes("intro", 1)),
        DocumentSource::from_bytes(long_name.clone(), pdf_bytes("long", 2)),
        DocumentSource::from_bytes("outro.pdf", pdf_bytes("outro", 1)),
    ];
    let options = MergeOptions {
        include_separators: true,
        ..MergeOptions::default()
    };

    let result = MergeAssembler::new()
        .assemble(&all, &options, &mut NoProgress)
        .unwrap();
    let doc = load(&result.bytes);

    assert_eq!(result.statistics.separators_skipped, 1);
    assert_eq!(result.statistics.separators_added, 2);
    assert_eq!(doc.get_pages().len(), 6);

    assert_eq!(page_text(&doc, 1), vec!["INTRO.PDF"]);
    assert_eq!(page_text(&doc, 2), vec!["intro 1"]);
    // The long document follows directly, without a title page.
    assert_eq!(page_text(&doc, 3), vec!["long 1"]);
    assert_eq!(page_text(&doc, 5), vec!["OUTRO.PDF"]);

    let titles: Vec<String> = outline(&doc).into_iter().map(|(title, _)| title).collect();
    assert_eq!(titles, vec!["intro.pdf".to_string(), long_name, "outro.pdf".to_string()]);
}

#[test]
fn test_compression_keeps_structure() {
    let plain = MergeAssembler::new()
        .assemble(&sources(&[2, 2, 2]), &MergeOptions::default(), &mut NoProgress)
        .unwrap();
    let compressed = MergeAssembler::new()
        .assemble(
            &sources(&[2, 2, 2]),
            &MergeOptions {
                compress: true,
                ..MergeOptions::default()
            },
            &mut NoProgress,
        )
        .unwrap();

    assert!(compressed.statistics.compressed);
    assert!(!plain.statistics.compressed);

    let plain_doc = load(&plain.bytes);
    let compressed_doc = load(&compressed.bytes);
    assert_eq!(plain_doc.get_pages().len(), compressed_doc.get_pages().len());
    assert_eq!(outline(&plain_doc), outline(&compressed_doc));
    assert_eq!(page_text(&compressed_doc, 3), vec!["doc2.pdf 1"]);
}

#[test]
fn test_identical_inputs_are_folded() {
    let bytes = pdf_bytes("same", 3);
    let all = vec![
        DocumentSource::from_bytes("a.pdf", bytes.clone()),
        DocumentSource::from_bytes("b.pdf", bytes),
    ];

    let plain = MergeAssembler::new()
        .assemble(&all, &MergeOptions::default(), &mut NoProgress)
        .unwrap();
    let compressed = MergeAssembler::new()
        .assemble(
            &all,
            &MergeOptions {
                compress: true,
                ..MergeOptions::default()
            },
            &mut NoProgress,
        )
        .unwrap();

    assert!(compressed.bytes.len() < plain.bytes.len());
    assert_eq!(load(&compressed.bytes).get_pages().len(), 6);
}

#[rstest]
fn test_assembly_is_repeatable(
    #[values(false, true)] index: bool,
    #[values(false, true)] separators: bool,
    #[values(false, true)] compress: bool,
) {
    let options = MergeOptions {
        include_index: index,
        include_separators: separators,
        number_chapters: true,
        compress,
    };
    let inputs = sources(&[3, 1, 2]);
    let assembler = MergeAssembler::new();

    let first = load(&assembler.assemble(&inputs, &options, &mut NoProgress).unwrap().bytes);
    let second = load(&assembler.assemble(&inputs, &options, &mut NoProgress).unwrap().bytes);

    assert_eq!(first.get_pages().len(), second.get_pages().len());
    assert_eq!(outline(&first), outline(&second));
}

#[test]
fn test_progress_is_monotonic() {
    let mut recorder = ProgressRecorder::new();
    MergeAssembler::new()
        .assemble(&sources(&[1, 2, 3, 4]), &MergeOptions::all(), &mut recorder)
        .unwrap();

    let fractions = recorder.fractions();
    assert!(fractions.iter().all(|f| (0.0..=1.0).contains(f)));
    assert!(fractions.windows(2).all(|w| w[0] <= w[1]), "{fractions:?}");

    let messages = recorder.messages();
    assert_eq!(messages.first(), Some(&"Generating index..."));
    assert_eq!(messages.last(), Some(&"Done"));
    assert_eq!(
        messages.iter().filter(|m| m.starts_with("Processing: ")).count(),
        4
    );
    assert!(messages.contains(&"Processing: 03. doc3.pdf"));
}

#[test]
fn test_closure_progress_sink() {
    let mut last = (0.0, String::new());
    let mut sink = |fraction: f64, message: &str| last = (fraction, message.to_string());

    MergeAssembler::new()
        .assemble(&sources(&[1]), &MergeOptions::default(), &mut sink)
        .unwrap();

    assert_eq!(last, (1.0, "Done".to_string()));
}

#[test]
fn test_corrupt_source_aborts_before_appending() {
    let mut all = sources(&[2, 2]);
    all.insert(1, DocumentSource::from_bytes("corrupt.pdf", b"%PDF-1.4\n%%EOF".to_vec()));

    let mut recorder = ProgressRecorder::new();
    let result = MergeAssembler::new().assemble(&all, &MergeOptions::all(), &mut recorder);

    match result {
        Err(PdfLabError::UnreadableDocument { name, .. }) => assert_eq!(name, "corrupt.pdf"),
        other => panic!("expected UnreadableDocument, got {other:?}"),
    }
    assert!(recorder.events.is_empty());
}

#[test]
fn test_empty_source_is_unreadable() {
    let all = vec![DocumentSource::from_bytes("empty.pdf", Vec::new())];
    let result = MergeAssembler::new().assemble(&all, &MergeOptions::default(), &mut NoProgress);
    assert!(matches!(result, Err(PdfLabError::UnreadableDocument { .. })));
}

#[test]
fn test_no_sources_yield_empty_document() {
    let result = MergeAssembler::new()
        .assemble(&[], &MergeOptions::all(), &mut NoProgress)
        .unwrap();

    assert!(result.plan.is_empty());
    assert_eq!(load(&result.bytes).get_pages().len(), 0);
}
