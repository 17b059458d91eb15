//! Core type definitions using newtype patterns for type safety.
//!
//! Invalid ports and inverted ranges are rejected when these types are
//! built, so the scanner itself never re-checks them.

mod port;
mod target;

pub use port::{Port, PortRange};
pub use target::ScanTarget;
