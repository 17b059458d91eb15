//! Prober trait abstraction.
//!
//! The dispatcher only knows about [`Prober`], so tests can swap the real
//! TCP prober for one that answers from a fixed table.

use crate::types::Port;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Status of a probed port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PortStatus {
    /// The connect handshake completed.
    Open,
    /// Refused, timed out, unreachable or otherwise failed.
    NotOpen,
}

impl fmt::Display for PortStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open => write!(f, "open"),
            Self::NotOpen => write!(f, "not open"),
        }
    }
}

/// Result of probing exactly one port.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortOutcome {
    /// The port that was probed.
    pub port: Port,
    /// Status determined by the probe.
    pub status: PortStatus,
    /// Service label, present only for open ports.
    pub service: Option<String>,
}

impl PortOutcome {
    /// An open port with its service label.
    pub fn open(port: Port, service: impl Into<String>) -> Self {
        Self {
            port,
            status: PortStatus::Open,
            service: Some(service.into()),
        }
    }

    /// A port that could not be connected to.
    pub fn not_open(port: Port) -> Self {
        Self {
            port,
            status: PortStatus::NotOpen,
            service: None,
        }
    }

    /// Check if the port is open.
    pub fn is_open(&self) -> bool {
        self.status == PortStatus::Open
    }
}

/// Probes a single port of one fixed host.
///
/// Implementations never fail: every network problem is reported as
/// [`PortStatus::NotOpen`].
#[async_trait]
pub trait Prober: Send + Sync {
    /// Probe one port.
    async fn probe(&self, port: Port) -> PortOutcome;
}
