//! Discoveries are announced as they happen unless `--quiet` is given.

use std::io::Write;
use std::net::TcpListener;
use std::process::{Command, Output};
use std::thread;

/// Serve one banner on a fresh loopback port and scan up to it.
fn scan_banner_port(extra: &[&str]) -> (u16, Output) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind loopback");
    let port = listener.local_addr().expect("local addr").port();

    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let mut stream = stream;
            let _ = stream.write_all(b"LIVE-TEST 1.0\r\n");
        }
    });

    let port_arg = port.to_string();
    let mut args = vec!["127.0.0.1", port_arg.as_str(), "-t", "300"];
    args.extend_from_slice(extra);

    let output = Command::new(env!("CARGO_BIN_EXE_portsweep"))
        .args(&args)
        .env_remove("PORTSWEEP_CONFIG")
        .env_remove("RUST_LOG")
        .output()
        .expect("binary runs");
    (port, output)
}

#[test]
fn plain_mode_announces_discoveries() {
    let (port, output) = scan_banner_port(&[]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert!(
        stdout.contains(&format!("Port {} is OPEN (Banner: LIVE-TEST 1.0...)", port)),
        "stdout: {}",
        stdout
    );
    assert!(stdout.contains("Total time taken:"));
}

#[test]
fn quiet_mode_keeps_only_the_summary() {
    let (port, output) = scan_banner_port(&["-q"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert!(!stdout.contains("is OPEN"), "stdout: {}", stdout);
    assert!(stdout.contains(&format!("Port {:<5}: Banner: LIVE-TEST 1.0...", port)));
}
