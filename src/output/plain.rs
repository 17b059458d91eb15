//! Plain text output formatting.
//!
//! Produces human-readable output with colors on terminals.

use crate::scanner::ScanSummary;
use crate::types::ScanTarget;
use console::style;
use std::io::{self, Write};

const RULE_HEAVY: &str = "════════════════════════════════════════";
const RULE_LIGHT: &str = "────────────────────────────────────────";

/// Line printed when a scan finds nothing.
pub const NO_OPEN_PORTS: &str = "No open ports found in the scanned range.";

/// Write the scan summary: one line per open port, then the elapsed time.
pub fn write_plain<W: Write>(out: &mut W, summary: &ScanSummary) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", style(RULE_HEAVY).cyan())?;
    writeln!(out, "{}", style("Scan Complete!").green().bold())?;
    writeln!(
        out,
        "{} {} ({}), {} open of {} ports scanned",
        style("Target:").bold(),
        summary.host,
        summary.ip_address,
        summary.open_count(),
        summary.ports_scanned
    )?;
    writeln!(out, "{}", style(RULE_LIGHT).dim())?;

    if summary.is_empty() {
        writeln!(out, "{}", NO_OPEN_PORTS)?;
    } else {
        writeln!(out, "{}", style("Open Ports & Detected Services:").bold())?;
        for entry in &summary.entries {
            writeln!(out, "{}", port_line(entry.port.as_u16(), &entry.service))?;
        }
    }

    writeln!(out, "{}", style(RULE_LIGHT).dim())?;
    writeln!(
        out,
        "Total time taken: {:.2} seconds",
        summary.elapsed.as_secs_f64()
    )?;
    writeln!(out, "{}", style(RULE_HEAVY).cyan())?;

    Ok(())
}

fn port_line(port: u16, service: &str) -> String {
    format!("  Port {:<5}: {}", port, service)
}

/// Write the banner shown before scanning begins.
pub fn write_scan_header<W: Write>(out: &mut W, target: &ScanTarget) -> io::Result<()> {
    writeln!(out, "{}", style(RULE_HEAVY).cyan())?;
    writeln!(
        out,
        "{} {} v{}",
        style("Starting").cyan(),
        style("portsweep").cyan().bold(),
        env!("CARGO_PKG_VERSION")
    )?;
    writeln!(
        out,
        "{} Target: {}",
        style("•").dim(),
        style(target.host()).white().bold()
    )?;
    writeln!(
        out,
        "{} Scanning Ports: {}",
        style("•").dim(),
        target.range()
    )?;
    writeln!(out, "{}", style(RULE_HEAVY).cyan())?;
    Ok(())
}

/// Print an error message.
pub fn print_error(msg: &str) {
    eprintln!("{} {}", style("Error:").red().bold(), msg);
}
