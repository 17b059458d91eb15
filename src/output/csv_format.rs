//! CSV output formatting.

use crate::scanner::ScanSummary;
use std::io::{self, Write};

/// Write one `port,service` row per open port.
pub fn write_csv<W: Write>(out: &mut W, summary: &ScanSummary) -> io::Result<()> {
    let mut wtr = csv::Writer::from_writer(out);

    wtr.write_record(["port", "service"])?;
    for entry in &summary.entries {
        wtr.write_record([entry.port.to_string().as_str(), entry.service.as_str()])?;
    }

    wtr.flush()?;
    Ok(())
}
