// file: src/report/mod.rs
// description: audit presentation module exports
// reference: internal module structure

pub mod console;
pub mod json;
pub mod table;

pub use console::ConsoleReporter;
pub use json::{ExportedReport, JsonExporter};
pub use table::Table;
