//! Scanner module - coordinates a single scan of one host.
//!
//! [`run_scan`] validates the target, resolves it and fans probes out over
//! the port range through the dispatcher. Open ports land in a per-scan
//! [`Aggregator`]; once every probe has finished they are sorted into a
//! [`ScanSummary`].

pub mod aggregator;
pub mod dispatcher;
pub mod tcp;
pub mod traits;

use crate::error::{ConfigError, ConfigResult};
use crate::types::ScanTarget;
use indicatif::ProgressBar;
use serde::{Serialize, Serializer};
use std::net::IpAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

pub use aggregator::{Aggregator, OpenPort};
pub use dispatcher::dispatch;
pub use tcp::TcpProber;
pub use traits::{PortOutcome, PortStatus, Prober};

/// How a scan is executed (as opposed to what it targets).
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Maximum number of probes in flight.
    pub concurrency: usize,
    /// Progress display, ticked once per probed port.
    pub progress: Option<ProgressBar>,
    /// Print each open port to stdout as soon as it is found.
    pub announce: bool,
}

impl ScanOptions {
    pub const DEFAULT_CONCURRENCY: usize = 500;

    pub fn new() -> Self {
        Self {
            concurrency: Self::DEFAULT_CONCURRENCY,
            progress: None,
            announce: false,
        }
    }

    /// Set the concurrency width.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    /// Attach a progress bar.
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Announce discoveries live instead of only in the summary.
    pub fn with_live_discoveries(mut self, announce: bool) -> Self {
        self.announce = announce;
        self
    }

    /// Reject a zero width. Widths above the range length are capped by
    /// the dispatcher.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.concurrency == 0 {
            return Err(ConfigError::ZeroConcurrency);
        }
        Ok(())
    }
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// Final report of one scan.
///
/// `entries` is strictly ascending by port.
#[derive(Debug, Clone, Serialize)]
pub struct ScanSummary {
    pub host: String,
    pub ip_address: IpAddr,
    pub ports_scanned: u64,
    #[serde(rename = "elapsed_ms", serialize_with = "as_millis")]
    pub elapsed: Duration,
    pub entries: Vec<OpenPort>,
}

impl ScanSummary {
    pub fn open_count(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn as_millis<S: Serializer>(elapsed: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(elapsed.as_millis() as u64)
}

/// Scan `target` over TCP.
///
/// Only configuration problems (including an unresolvable host) are
/// errors; closed or silent ports are part of a normal summary.
pub async fn run_scan(target: &ScanTarget, options: ScanOptions) -> ConfigResult<ScanSummary> {
    target.validate()?;
    options.validate()?;

    let ip = target.resolve().await?;
    let prober = TcpProber::new(ip, target.connect_timeout());
    scan_with(target, ip, prober, options).await
}

/// Scan `target` using a caller-supplied prober.
///
/// `ip` is only reported in the summary; `prober` decides what is actually
/// contacted.
pub async fn scan_with<P>(
    target: &ScanTarget,
    ip: IpAddr,
    prober: P,
    options: ScanOptions,
) -> ConfigResult<ScanSummary>
where
    P: Prober + 'static,
{
    target.validate()?;
    options.validate()?;

    let range = target.range();
    tracing::info!(
        host = target.host(),
        %ip,
        ports = range.len(),
        concurrency = options.concurrency,
        "starting scan"
    );

    let start_time = Instant::now();
    let aggregator = Arc::new(Aggregator::new());

    let ports_scanned = dispatch(
        Arc::new(prober),
        range,
        options.concurrency,
        Arc::clone(&aggregator),
        options.progress.as_ref(),
        options.announce,
    )
    .await;

    if let Some(pb) = options.progress {
        pb.finish_and_clear();
    }

    let mut entries = aggregator.snapshot().await;
    entries.sort_by_key(|e| e.port);
    entries.dedup_by_key(|e| e.port);

    let elapsed = start_time.elapsed();
    tracing::info!(
        open = entries.len(),
        ports_scanned,
        elapsed_ms = elapsed.as_millis() as u64,
        "scan complete"
    );

    Ok(ScanSummary {
        host: target.host().to_string(),
        ip_address: ip,
        ports_scanned,
        elapsed,
        entries,
    })
}
