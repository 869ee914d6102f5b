#[path = "integration/common/mod.rs"]
mod common;

#[path = "integration/assembly.rs"]
mod assembly;

#[path = "integration/options.rs"]
mod options;

#[path = "integration/file_io.rs"]
mod file_io;
