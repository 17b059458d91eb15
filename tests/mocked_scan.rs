//! Whole-scan behaviour against a prober that never touches the network.
//!
//! Open ports are answered by running the real classifier over scripted
//! mock connections, so labels come out exactly as they would from a live
//! socket.

use async_trait::async_trait;
use portsweep::scanner::{scan_with, PortOutcome, Prober, ScanOptions, ScanSummary};
use portsweep::services::classify;
use portsweep::types::{Port, PortRange, ScanTarget};
use std::collections::HashMap;
use std::io;
use std::net::{IpAddr, Ipv4Addr};
use std::time::Duration;
use tokio_test::io::Builder;

const TARGET_IP: IpAddr = IpAddr::V4(Ipv4Addr::new(10, 0, 0, 5));

/// How a mocked open port behaves once connected.
#[derive(Clone)]
enum Service {
    Banner(&'static [u8]),
    Silent,
    Reset,
    Closes,
}

struct StaticProber {
    open: HashMap<u16, Service>,
    timeout: Duration,
}

impl StaticProber {
    fn new(open: &[(u16, Service)]) -> Self {
        Self {
            open: open.iter().cloned().collect(),
            timeout: Duration::from_millis(50),
        }
    }
}

#[async_trait]
impl Prober for StaticProber {
    async fn probe(&self, port: Port) -> PortOutcome {
        let Some(service) = self.open.get(&port.as_u16()) else {
            return PortOutcome::not_open(port);
        };

        let mut conn = match service {
            // Known ports never read, so their mocks carry no scripted I/O.
            _ if portsweep::services::known_service(port).is_some() => Builder::new().build(),
            Service::Banner(data) => Builder::new().read(data).build(),
            Service::Silent => Builder::new().wait(Duration::from_secs(5)).build(),
            Service::Reset => Builder::new()
                .read_error(io::Error::new(io::ErrorKind::ConnectionReset, "reset"))
                .build(),
            Service::Closes => Builder::new().build(),
        };

        let label = classify(port, &mut conn, self.timeout).await;
        PortOutcome::open(port, label)
    }
}

fn target(end: u16) -> ScanTarget {
    ScanTarget::new("mock-host", Port::new(end).unwrap()).unwrap()
}

fn ports(summary: &ScanSummary) -> Vec<u16> {
    summary.entries.iter().map(|e| e.port.as_u16()).collect()
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn well_known_ports_are_labelled_from_the_table() {
    let prober = StaticProber::new(&[
        (443, Service::Silent),
        (22, Service::Banner(b"SSH-2.0-OpenSSH_9.6\r\n")),
        (80, Service::Closes),
    ]);

    let summary = scan_with(&target(500), TARGET_IP, prober, ScanOptions::new())
        .await
        .unwrap();

    assert_eq!(ports(&summary), vec![22, 80, 443]);
    assert!(summary.entries[0].service.starts_with("SSH"));
    assert!(summary.entries[1].service.starts_with("HTTP"));
    assert!(summary.entries[2].service.starts_with("HTTPS"));
    assert_eq!(summary.entries[0].service, "SSH (Secure Shell)");
    assert_eq!(summary.ports_scanned, 500);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn unknown_ports_fall_back_to_banner_labels() {
    let prober = StaticProber::new(&[
        (2000, Service::Banner(b"220 test ftpd ready\r\n")),
        (3000, Service::Closes),
        (4000, Service::Reset),
        (5000, Service::Silent),
    ]);

    let summary = scan_with(&target(6000), TARGET_IP, prober, ScanOptions::new())
        .await
        .unwrap();

    let labels: Vec<&str> = summary.entries.iter().map(|e| e.service.as_str()).collect();
    assert_eq!(
        labels,
        vec![
            "Banner: 220 test ftpd ready...",
            "Open (No Banner Detected)",
            "Open (Silent Service)",
            "Open (Silent Service)",
        ]
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn repeated_scans_give_identical_results() {
    let open = [
        (22, Service::Banner(b"ignored")),
        (1234, Service::Banner(b"hello there\nsecond")),
        (4321, Service::Closes),
        (999, Service::Reset),
    ];

    let first = scan_with(
        &target(5000),
        TARGET_IP,
        StaticProber::new(&open),
        ScanOptions::new().with_concurrency(64),
    )
    .await
    .unwrap();
    let second = scan_with(
        &target(5000),
        TARGET_IP,
        StaticProber::new(&open),
        ScanOptions::new().with_concurrency(500),
    )
    .await
    .unwrap();

    assert_eq!(first.entries, second.entries);
    assert_eq!(first.ports_scanned, second.ports_scanned);
    assert_eq!(
        serde_json::to_string(&first.entries).unwrap(),
        serde_json::to_string(&second.entries).unwrap()
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn entries_stay_within_a_custom_range() {
    let range = PortRange::new(Port::new(20).unwrap(), Port::new(100).unwrap()).unwrap();
    let target = ScanTarget::with_range("mock-host", range).unwrap();
    let prober = StaticProber::new(&[
        (19, Service::Closes),
        (21, Service::Closes),
        (80, Service::Closes),
        (101, Service::Closes),
    ]);

    let summary = scan_with(&target, TARGET_IP, prober, ScanOptions::new())
        .await
        .unwrap();

    assert_eq!(ports(&summary), vec![21, 80]);
    assert_eq!(summary.ports_scanned, 81);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn full_range_with_narrow_width() {
    let prober = StaticProber::new(&[
        (65535, Service::Closes),
        (1, Service::Closes),
        (3389, Service::Closes),
    ]);

    let summary = scan_with(
        &target(Port::MAX),
        TARGET_IP,
        prober,
        ScanOptions::new().with_concurrency(256),
    )
    .await
    .unwrap();

    assert_eq!(ports(&summary), vec![1, 3389, 65535]);
    assert_eq!(summary.entries[1].service, "RDP (Remote Desktop)");
    assert_eq!(summary.ports_scanned, 65535);
}
