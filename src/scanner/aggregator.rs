//! Shared collection of open ports found during one scan.

use crate::types::Port;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

/// An open port and the label its service was given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenPort {
    pub port: Port,
    pub service: String,
}

/// Append-only sink written by every probe task.
///
/// A single mutex guards the collection. Insertion order follows probe
/// completion and carries no meaning.
#[derive(Debug, Default)]
pub struct Aggregator {
    entries: Mutex<Vec<OpenPort>>,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one open port.
    pub async fn record_open(&self, port: Port, service: impl Into<String>) {
        let entry = OpenPort {
            port,
            service: service.into(),
        };
        self.entries.lock().await.push(entry);
    }

    /// Copy of everything recorded so far, in insertion order.
    pub async fn snapshot(&self) -> Vec<OpenPort> {
        self.entries.lock().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }
}
