//! Service detection for open ports.
//!
//! Well-known ports are labelled straight from a static table. Anything else
//! gets one bounded banner read and a label derived from the result.

use crate::banner;
use crate::types::Port;
use std::collections::HashMap;
use std::sync::LazyLock;
use std::time::Duration;
use tokio::io::AsyncRead;

/// Static map of well-known ports to service labels.
static PORT_SERVICES: LazyLock<HashMap<u16, &'static str>> = LazyLock::new(|| {
    let mut m = HashMap::new();

    m.insert(21, "FTP (File Transfer Protocol)");
    m.insert(22, "SSH (Secure Shell)");
    m.insert(23, "Telnet");
    m.insert(25, "SMTP (Simple Mail Transfer Protocol)");
    m.insert(53, "DNS (Domain Name System)");
    m.insert(80, "HTTP (Web Server)");
    m.insert(110, "POP3 (Post Office Protocol)");
    m.insert(135, "MS RPC");
    m.insert(139, "NetBIOS");
    m.insert(443, "HTTPS (Encrypted Web Server)");
    m.insert(445, "SMB (File Sharing)");
    m.insert(3389, "RDP (Remote Desktop)");

    m
});

/// Look up the label for a well-known port.
///
/// Returns `None` if the port is not in the table.
pub fn known_service(port: Port) -> Option<&'static str> {
    PORT_SERVICES.get(&port.as_u16()).copied()
}

/// Label the service behind an open connection.
///
/// Table hits return immediately without reading from `conn`. Other ports
/// get a single read bounded by `read_timeout`; read failures yield a
/// fallback label, never an error.
pub async fn classify<S>(port: Port, conn: &mut S, read_timeout: Duration) -> String
where
    S: AsyncRead + Unpin,
{
    if let Some(label) = known_service(port) {
        return label.to_string();
    }

    let read = banner::grab(conn, read_timeout).await;
    banner::label_for(&read)
}
