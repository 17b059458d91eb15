//! Scan target configuration and host resolution.

use crate::error::{ConfigError, ConfigResult};
use crate::types::{Port, PortRange};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::IpAddr;
use std::time::Duration;
use trust_dns_resolver::config::{ResolverConfig, ResolverOpts};
use trust_dns_resolver::TokioAsyncResolver;

/// Immutable description of what a single scan probes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanTarget {
    host: String,
    range: PortRange,
    connect_timeout: Duration,
}

impl ScanTarget {
    /// Default per-port connect (and banner read) timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(500);

    /// Target scanning ports `1..=end` on `host` with the default timeout.
    pub fn new(host: impl Into<String>, end: Port) -> ConfigResult<Self> {
        Self::with_range(host, PortRange::up_to(end))
    }

    /// Target scanning an arbitrary range.
    pub fn with_range(host: impl Into<String>, range: PortRange) -> ConfigResult<Self> {
        let target = Self {
            host: host.into().trim().to_string(),
            range,
            connect_timeout: Self::DEFAULT_TIMEOUT,
        };
        target.validate()?;
        Ok(target)
    }

    /// Replace the connect timeout.
    pub fn with_timeout(self, connect_timeout: Duration) -> ConfigResult<Self> {
        let target = Self {
            connect_timeout,
            ..self
        };
        target.validate()?;
        Ok(target)
    }

    /// Check every invariant of the target.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.host.is_empty() {
            return Err(ConfigError::EmptyHost);
        }
        if self.connect_timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout);
        }
        let start = self.range.start().as_u16();
        if start < Port::MIN {
            return Err(ConfigError::PortOutOfRange(u64::from(start)));
        }
        PortRange::new(self.range.start(), self.range.end())?;
        Ok(())
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn range(&self) -> PortRange {
        self.range
    }

    pub fn connect_timeout(&self) -> Duration {
        self.connect_timeout
    }

    /// Resolve the host to a single address to probe.
    ///
    /// IP literals are used as-is; hostnames go through DNS and the first
    /// returned address wins.
    pub async fn resolve(&self) -> ConfigResult<IpAddr> {
        if let Ok(ip) = self.host.parse::<IpAddr>() {
            return Ok(ip);
        }

        let resolver =
            TokioAsyncResolver::tokio(ResolverConfig::default(), ResolverOpts::default());

        let response = resolver
            .lookup_ip(self.host.as_str())
            .await
            .map_err(|e| ConfigError::UnresolvableHost {
                host: self.host.clone(),
                reason: e.to_string(),
            })?;

        response
            .iter()
            .next()
            .ok_or_else(|| ConfigError::UnresolvableHost {
                host: self.host.clone(),
                reason: "no addresses returned".to_string(),
            })
    }
}

impl fmt::Display for ScanTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.host, self.range)
    }
}
