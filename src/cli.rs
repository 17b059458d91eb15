//! Command-line interface definitions for portsweep.
//!
//! Uses `clap` derive macros for declarative argument parsing. The end port
//! is taken as text and validated here so that a bad value is reported as a
//! [`ConfigError`] rather than a parser error.

use crate::config::AppSettings;
use crate::error::{ConfigError, ConfigResult};
use crate::output::OutputFormat;
use crate::scanner::ScanOptions;
use crate::types::{Port, ScanTarget};
use clap::{CommandFactory, Parser};
use std::path::PathBuf;
use std::time::Duration;

/// A concurrent TCP connect port scanner.
///
/// Probes ports 1 through END_PORT on HOST and reports every open port with
/// a guess at the service behind it.
#[derive(Parser, Debug)]
#[command(name = "portsweep")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "A concurrent TCP connect port scanner", long_about = None)]
#[command(after_help = "Example: portsweep 127.0.0.1 500")]
pub struct Args {
    /// Target IP address or hostname to scan
    #[arg(value_name = "HOST")]
    pub host: String,

    /// Last port to scan (1-65535); scanning always starts at port 1
    #[arg(value_name = "END_PORT", allow_hyphen_values = true)]
    pub end_port: String,

    /// Connect and banner read timeout in milliseconds
    #[arg(short = 't', long)]
    pub timeout: Option<u64>,

    /// Maximum number of ports probed at the same time
    #[arg(short = 'c', long)]
    pub concurrency: Option<usize>,

    /// Output format for results
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Verbose output (debug logging and a progress bar)
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress the header and live discoveries
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to a settings file
    #[arg(long, value_name = "PATH", env = "PORTSWEEP_CONFIG")]
    pub config: Option<PathBuf>,
}

impl Args {
    /// Load settings from `--config` or the default location.
    pub fn settings(&self) -> ConfigResult<AppSettings> {
        match &self.config {
            Some(path) => AppSettings::load_from(path),
            None => AppSettings::load(),
        }
    }

    /// Build the scan target, with flags taking precedence over settings.
    pub fn scan_target(&self, settings: &AppSettings) -> ConfigResult<ScanTarget> {
        let end: Port = self.end_port.parse()?;
        let timeout_ms = self.timeout.unwrap_or(settings.default_timeout_ms);

        ScanTarget::new(&self.host, end)?.with_timeout(Duration::from_millis(timeout_ms))
    }

    /// Build the scan options, with flags taking precedence over settings.
    pub fn scan_options(&self, settings: &AppSettings) -> ConfigResult<ScanOptions> {
        let concurrency = self.concurrency.unwrap_or(settings.default_concurrency);
        let options = ScanOptions::new().with_concurrency(concurrency);
        options.validate()?;
        Ok(options)
    }

    /// Output format, with the flag taking precedence over settings.
    pub fn output_format(&self, settings: &AppSettings) -> ConfigResult<OutputFormat> {
        match self.output {
            Some(format) => Ok(format),
            None => settings
                .default_output_format
                .parse()
                .map_err(ConfigError::InvalidFormat),
        }
    }

    pub fn verbose(&self, settings: &AppSettings) -> bool {
        self.verbose || settings.verbose
    }
}

/// One-line usage text.
pub fn usage() -> String {
    Args::command().render_usage().to_string()
}
