//! Output formatting module.
//!
//! Renders a [`ScanSummary`] as plain text, JSON or CSV.

mod csv_format;
mod json_format;
mod plain;

pub use csv_format::write_csv;
pub use json_format::write_json;
pub use plain::{print_error, write_plain, write_scan_header, NO_OPEN_PORTS};

use crate::scanner::ScanSummary;
use std::fmt;
use std::io::{self, Write};
use std::str::FromStr;

/// Output format for results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable plain text
    #[default]
    Plain,
    /// JSON structured output
    Json,
    /// CSV format for data analysis
    Csv,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plain => write!(f, "plain"),
            Self::Json => write!(f, "json"),
            Self::Csv => write!(f, "csv"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "plain" | "text" => Ok(Self::Plain),
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            _ => Err(format!("unknown output format: {}", s)),
        }
    }
}

/// Render `summary` in `format` to `out`.
pub fn render<W: Write>(out: &mut W, summary: &ScanSummary, format: OutputFormat) -> io::Result<()> {
    match format {
        OutputFormat::Plain => write_plain(out, summary),
        OutputFormat::Json => write_json(out, summary),
        OutputFormat::Csv => write_csv(out, summary),
    }
}
