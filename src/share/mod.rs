//! Compact, URL-safe snapshots of a forest.
//!
//! A token is the bincode encoding of the forest (no identifiers), compressed
//! with zstd and written as unpadded URL-safe base64.

mod sink;
mod token;

pub use sink::{ChannelSink, PersistenceSink};
pub use token::{ShareError, ShareToken};
