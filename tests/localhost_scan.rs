//! End-to-end scans of listeners bound on the loopback interface.

use portsweep::scanner::{run_scan, ScanOptions};
use portsweep::types::{Port, PortRange, ScanTarget};
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpListener;

/// Bind a loopback listener that greets every client with `banner`.
async fn banner_server(banner: &'static [u8]) -> Port {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = Port::new(listener.local_addr().unwrap().port()).unwrap();

    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                break;
            };
            tokio::spawn(async move {
                let _ = socket.write_all(banner).await;
                tokio::time::sleep(Duration::from_secs(1)).await;
            });
        }
    });

    port
}

fn window_around(port: Port) -> PortRange {
    let start = port.as_u16().saturating_sub(10).max(1);
    let end = port.as_u16().saturating_add(10);
    PortRange::new(Port::new(start).unwrap(), Port::new(end).unwrap()).unwrap()
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn scan_finds_banner_service() {
    let port = banner_server(b"220 portsweep-test ESMTP ready\r\n").await;
    let range = window_around(port);
    let target = ScanTarget::with_range("127.0.0.1", range)
        .unwrap()
        .with_timeout(Duration::from_millis(300))
        .unwrap();

    let summary = run_scan(&target, ScanOptions::new()).await.unwrap();

    let entry = summary
        .entries
        .iter()
        .find(|e| e.port == port)
        .expect("listener port reported open");
    assert_eq!(entry.service, "Banner: 220 portsweep-test ESMTP ready...");

    assert!(summary.entries.iter().all(|e| range.contains(e.port)));
    assert!(summary
        .entries
        .windows(2)
        .all(|w| w[0].port < w[1].port));
    assert_eq!(summary.ports_scanned, range.len() as u64);
    assert_eq!(summary.ip_address.to_string(), "127.0.0.1");
}

#[tokio::test]
async fn closed_port_yields_empty_summary() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = Port::new(listener.local_addr().unwrap().port()).unwrap();
    drop(listener);

    let target = ScanTarget::with_range("127.0.0.1", PortRange::new(port, port).unwrap())
        .unwrap()
        .with_timeout(Duration::from_millis(200))
        .unwrap();

    let summary = run_scan(&target, ScanOptions::new()).await.unwrap();

    assert!(summary.is_empty());
    assert_eq!(summary.ports_scanned, 1);
}
