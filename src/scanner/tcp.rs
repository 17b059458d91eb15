//! TCP connect prober.
//!
//! Completes a full handshake with the target port. Open connections are
//! handed to the service classifier and then dropped.

use crate::error::ProbeError;
use crate::scanner::traits::{PortOutcome, Prober};
use crate::services::classify;
use crate::types::Port;
use async_trait::async_trait;
use std::io::ErrorKind;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::time::timeout;

/// Probes ports on one address with plain `connect()` calls.
///
/// No elevated privileges are needed. The same `timeout` bounds both the
/// connect and the banner read.
#[derive(Debug, Clone)]
pub struct TcpProber {
    target: IpAddr,
    timeout: Duration,
}

impl TcpProber {
    /// Create a new TCP prober.
    pub fn new(target: IpAddr, timeout: Duration) -> Self {
        Self { target, timeout }
    }

    /// Attempt to connect to the target address.
    async fn attempt_connect(&self, addr: SocketAddr) -> Result<TcpStream, ProbeError> {
        match timeout(self.timeout, TcpStream::connect(addr)).await {
            Ok(Ok(stream)) => Ok(stream),
            Ok(Err(e)) if e.kind() == ErrorKind::ConnectionRefused => {
                Err(ProbeError::ConnectionRefused)
            }
            Ok(Err(e)) if e.to_string().to_lowercase().contains("unreachable") => {
                Err(ProbeError::Unreachable(e.to_string()))
            }
            Ok(Err(e)) => Err(ProbeError::ConnectionFailed(e)),
            Err(_) => Err(ProbeError::Timeout),
        }
    }
}

#[async_trait]
impl Prober for TcpProber {
    async fn probe(&self, port: Port) -> PortOutcome {
        let addr = SocketAddr::new(self.target, port.as_u16());

        match self.attempt_connect(addr).await {
            Ok(mut stream) => {
                let service = classify(port, &mut stream, self.timeout).await;
                PortOutcome::open(port, service)
            }
            Err(e) => {
                tracing::trace!(%addr, reason = %e, "port not open");
                PortOutcome::not_open(port)
            }
        }
    }
}
