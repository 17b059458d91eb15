//! JSON output formatting.

use crate::scanner::ScanSummary;
use std::io::{self, Write};

/// Write the summary as pretty-printed JSON.
pub fn write_json<W: Write>(out: &mut W, summary: &ScanSummary) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, summary)?;
    writeln!(out)
}
