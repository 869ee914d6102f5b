#![no_main]

use libfuzzer_sys::fuzz_target;
use pdflab::config::MergeOptions;
use pdflab::io::DocumentSource;
use pdflab::merge::MergeAssembler;
use pdflab::output::NoProgress;

fuzz_target!(|data: &[u8]| {
    let sources = vec![DocumentSource::from_bytes("fuzz.pdf", data.to_vec())];

    // Arbitrary bytes may be rejected, but must never panic.
    if let Ok(result) = MergeAssembler::new().assemble(&sources, &MergeOptions::all(), &mut NoProgress) {
        assert_eq!(result.statistics.files_merged, 1);
    }
});
