pub mod csv_out;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::Value;
use std::io::{self, Write};

/// Dispatch output to the formatter selected with `--output`.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

fn print_json(value: &Value) {
    let mut out = io::stdout().lock();
    if let Err(e) = serde_json::to_writer_pretty(&mut out, value) {
        eprintln!("JSON serialization error: {}", e);
        return;
    }
    let _ = writeln!(out);
}
