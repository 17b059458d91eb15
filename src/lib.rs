//! # portsweep - A Concurrent TCP Connect Port Scanner
//!
//! portsweep probes ports `1..=N` on a single host with full TCP handshakes,
//! labels every open port, and reports the results sorted by port number.
//!
//! ## Features
//!
//! - **Parallel probing**: one tokio task per port, bounded by a configurable
//!   concurrency width
//! - **Service detection**: a well-known port table, with a banner grab for
//!   everything else
//! - **Multiple output formats**: plain text, JSON and CSV
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use portsweep::scanner::{run_scan, ScanOptions};
//! use portsweep::types::{Port, ScanTarget};
//!
//! #[tokio::main]
//! async fn main() {
//!     let target = ScanTarget::new("127.0.0.1", Port::new(1024).unwrap()).unwrap();
//!     let summary = run_scan(&target, ScanOptions::new()).await.unwrap();
//!
//!     for entry in &summary.entries {
//!         println!("Port {} : {}", entry.port, entry.service);
//!     }
//! }
//! ```
//!
//! ## Architecture
//!
//! - [`types`] - validated ports, ranges and the scan target
//! - [`scanner`] - prober trait, TCP prober, aggregator, dispatcher and the
//!   scan coordinator
//! - [`services`] / [`banner`] - service classification
//! - [`config`] - settings file handling
//! - [`output`] - summary rendering
//! - [`error`] - error types

pub mod banner;
pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod scanner;
pub mod services;
pub mod types;

// Re-export commonly used types
pub use error::{ConfigError, ProbeError};
pub use scanner::{run_scan, scan_with, PortOutcome, PortStatus, Prober, ScanOptions, ScanSummary};
pub use types::{Port, PortRange, ScanTarget};
