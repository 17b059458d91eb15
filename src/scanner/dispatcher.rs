//! Fan-out of probe tasks across a port range.
//!
//! Each port gets its own task on the tokio runtime; a semaphore caps how
//! many are in flight, which also caps the number of open sockets.

use crate::scanner::aggregator::Aggregator;
use crate::scanner::traits::{PortStatus, Prober};
use crate::types::PortRange;
use indicatif::ProgressBar;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// Probe every port in `range` exactly once and record open ones.
///
/// Returns once all probe tasks have finished, yielding the number of
/// ports probed. At most `concurrency` probes run at the same time; the
/// width is capped at the range length and at [`Semaphore::MAX_PERMITS`].
///
/// With `announce` set, each discovery is printed as it happens, above
/// the progress bar when there is one.
pub async fn dispatch<P>(
    prober: Arc<P>,
    range: PortRange,
    concurrency: usize,
    aggregator: Arc<Aggregator>,
    progress: Option<&ProgressBar>,
    announce: bool,
) -> u64
where
    P: Prober + 'static,
{
    let semaphore = Arc::new(Semaphore::new(permit_width(concurrency, range)));
    let mut set = JoinSet::new();

    for port in range.iter() {
        // Only fails once the semaphore is closed, and it never is.
        let Ok(permit) = Arc::clone(&semaphore).acquire_owned().await else {
            break;
        };
        let prober = Arc::clone(&prober);
        let aggregator = Arc::clone(&aggregator);
        let progress = progress.cloned();

        set.spawn(async move {
            let _permit = permit;

            let outcome = prober.probe(port).await;
            if let (PortStatus::Open, Some(service)) = (outcome.status, outcome.service) {
                tracing::debug!(%port, %service, "open port");
                if announce {
                    let line = format!("Port {} is OPEN ({})", port, service);
                    match progress {
                        Some(ref pb) => pb.println(line),
                        None => println!("{}", line),
                    }
                }
                aggregator.record_open(port, service).await;
            }

            if let Some(ref pb) = progress {
                pb.inc(1);
            }
        });
    }

    let mut probed = 0u64;
    while let Some(res) = set.join_next().await {
        match res {
            Ok(()) => probed += 1,
            Err(e) => tracing::warn!(error = %e, "probe task did not complete"),
        }
    }
    probed
}

fn permit_width(concurrency: usize, range: PortRange) -> usize {
    concurrency
        .min(range.len())
        .clamp(1, Semaphore::MAX_PERMITS)
}
