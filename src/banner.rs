//! Banner grabbing for open ports that are not in the well-known table.
//!
//! Split in two: [`grab`] does the single bounded read, [`label_for`] turns
//! whatever came back into a service label without touching any socket.

use std::time::Duration;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::time::timeout;

/// Maximum bytes to read for a banner.
pub const MAX_BANNER_SIZE: usize = 1024;

/// Number of banner characters kept in the label.
pub const PREVIEW_LEN: usize = 30;

pub const NO_BANNER_LABEL: &str = "Open (No Banner Detected)";
pub const SILENT_SERVICE_LABEL: &str = "Open (Silent Service)";

/// Characters that end a banner line, including the ASCII separators and
/// Unicode line breaks.
const LINE_BREAKS: [char; 10] = [
    '\n', '\r', '\u{0b}', '\u{0c}', '\u{1c}', '\u{1d}', '\u{1e}', '\u{85}', '\u{2028}', '\u{2029}',
];

/// What a single banner read produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BannerRead {
    /// The service sent bytes.
    Data(Vec<u8>),
    /// The read completed without data (peer closed).
    Empty,
    /// The read timed out or the connection errored.
    Failed,
}

/// Read once from `conn`, giving up after `read_timeout`.
pub async fn grab<S>(conn: &mut S, read_timeout: Duration) -> BannerRead
where
    S: AsyncRead + Unpin,
{
    let mut buffer = vec![0u8; MAX_BANNER_SIZE];

    match timeout(read_timeout, conn.read(&mut buffer)).await {
        Ok(Ok(0)) => BannerRead::Empty,
        Ok(Ok(n)) => {
            buffer.truncate(n);
            BannerRead::Data(buffer)
        }
        Ok(Err(e)) => {
            tracing::trace!(error = %e, "banner read failed");
            BannerRead::Failed
        }
        Err(_) => {
            tracing::trace!(?read_timeout, "banner read timed out");
            BannerRead::Failed
        }
    }
}

/// Derive the service label from a banner read.
pub fn label_for(read: &BannerRead) -> String {
    match read {
        BannerRead::Data(data) => match preview(data) {
            Some(preview) => format!("Banner: {}...", preview),
            None => NO_BANNER_LABEL.to_string(),
        },
        BannerRead::Empty => NO_BANNER_LABEL.to_string(),
        BannerRead::Failed => SILENT_SERVICE_LABEL.to_string(),
    }
}

/// First line of the banner, cut to [`PREVIEW_LEN`] characters.
///
/// Invalid UTF-8 sequences are dropped. Returns `None` when nothing but
/// whitespace was received. Control characters are kept as received.
fn preview(data: &[u8]) -> Option<String> {
    let text: String = data.utf8_chunks().map(|chunk| chunk.valid()).collect();
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    let first_line = text.split(LINE_BREAKS).next().unwrap_or(text);
    Some(first_line.chars().take(PREVIEW_LEN).collect())
}
