//! Reading inputs from disk and writing the merged file.

use pdflab::config::{Config, MergeOptions, OUTPUT_FILE_NAME};
use pdflab::error::PdfLabError;
use pdflab::io::{DocumentSource, PdfWriter, read_sources, save_pdf};
use pdflab::merge::merge_files;
use pdflab::output::NoProgress;
use pdflab::utils::collect_paths_for_patterns;
use std::io::Cursor;
use tempfile::TempDir;

use crate::common::{load, outline, pdf_bytes, temp_output_path};

fn write_inputs(dir: &TempDir, pages: &[u32]) -> Vec<std::path::PathBuf> {
    pages
        .iter()
        .enumerate()
        .map(|(i, &n)| {
            let path = dir.path().join(format!("part{}.pdf", i + 1));
            std::fs::write(&path, pdf_bytes("part", n)).unwrap();
            path
        })
        .collect()
}

#[tokio::test]
async fn test_merge_files_and_save() {
    let dir = TempDir::new().unwrap();
    let inputs = write_inputs(&dir, &[2, 3]);
    let output = dir.path().join(OUTPUT_FILE_NAME);

    let config = Config {
        inputs,
        output: output.clone(),
        options: MergeOptions::all(),
        ..Config::default()
    };

    let result = merge_files(&config, NoProgress).await.unwrap();
    let stats = PdfWriter::new()
        .save_with_stats(&result.bytes, &output)
        .await
        .unwrap();

    assert_eq!(stats.file_size, result.bytes.len() as u64);

    let doc = load(&std::fs::read(&output).unwrap());
    assert_eq!(doc.get_pages().len(), 8);
    assert_eq!(
        outline(&doc),
        vec![("01. part1.pdf".to_string(), 2), ("02. part2.pdf".to_string(), 5)]
    );
}

#[tokio::test]
async fn test_glob_inputs_merge_in_sorted_order() {
    let dir = TempDir::new().unwrap();
    write_inputs(&dir, &[1, 1, 1]);

    let pattern = format!("{}/part*.pdf", dir.path().display());
    let paths = collect_paths_for_patterns([pattern]).unwrap();
    let sources = read_sources(&paths).await.unwrap();

    let names: Vec<&str> = sources.iter().map(DocumentSource::name).collect();
    assert_eq!(names, vec!["part1.pdf", "part2.pdf", "part3.pdf"]);
}

#[tokio::test]
async fn test_missing_input() {
    let dir = TempDir::new().unwrap();
    let paths = vec![dir.path().join("absent.pdf")];

    let result = read_sources(&paths).await;
    assert!(matches!(result, Err(PdfLabError::FileNotFound { .. })));
}

#[tokio::test]
async fn test_save_overwrites_atomically() {
    let output = temp_output_path();
    std::fs::write(&output, b"old contents").unwrap();

    let bytes = pdf_bytes("new", 1);
    save_pdf(&bytes, &output).await.unwrap();

    assert_eq!(std::fs::read(&output).unwrap(), bytes);
    assert!(!output.with_extension("tmp").exists());
}

#[test]
fn test_rewound_reader_source() {
    let mut cursor = Cursor::new(pdf_bytes("upload", 2));
    cursor.set_position(10);

    let source = DocumentSource::from_reader("upload.pdf", cursor).unwrap();
    let plan = pdflab::merge::MergeAssembler::new()
        .plan(&[source], &MergeOptions::default())
        .unwrap();

    assert_eq!(plan.entries[0].document.page_count, 2);
}
