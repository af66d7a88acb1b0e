//! On-disk network document
//!
//! A network file is one JSON object keyed by channel identifier:
//!
//! ```json
//! {
//!   "1001": { "participants": ["alice", "bob"], "end": "2020-02-03T10:15:00" },
//!   "1002": { "participants": ["bob", "carol", "dave"], "end": "2020-02-04T08:00:00.250" }
//! }
//! ```
//!
//! Unknown fields on a channel are ignored.

use crate::LoaderError;
use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Timestamp layout written by [`format_timestamp`]
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// One channel entry of a network document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelRecord<E> {
    /// Participants of the channel
    pub participants: Vec<String>,

    /// Time at which the channel's communication completed
    pub end: E,
}

/// A whole network document, keyed by channel identifier
pub type NetworkDocument<E> = BTreeMap<String, ChannelRecord<E>>;

/// Compression applied to a network file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
    /// Plain JSON
    None,
    /// gzip-compressed JSON
    Gzip,
    /// bzip2-compressed JSON
    Bzip2,
}

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];
const BZIP2_MAGIC: [u8; 3] = *b"BZh";

impl Compression {
    /// Compression implied by the file name
    ///
    /// # Errors
    /// `UnsupportedCompression` for `.xz`, `.zst` and `.zip` files.
    pub fn from_path(path: &Path) -> Result<Self, LoaderError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("gz") => Ok(Compression::Gzip),
            Some("bz2") => Ok(Compression::Bzip2),
            Some(ext @ ("xz" | "zst" | "zip")) => {
                Err(LoaderError::UnsupportedCompression(ext.to_string()))
            }
            _ => Ok(Compression::None),
        }
    }

    /// Compression detected from the first bytes of a file
    pub fn sniff(bytes: &[u8]) -> Self {
        if bytes.starts_with(&GZIP_MAGIC) {
            Compression::Gzip
        } else if bytes.starts_with(&BZIP2_MAGIC) {
            Compression::Bzip2
        } else {
            Compression::None
        }
    }
}

/// Parse a channel timestamp
///
/// Accepts ISO 8601 without offset (`T` or space separator, optional
/// fractional seconds) and RFC 3339 with offset, which is converted to UTC.
pub fn parse_timestamp(channel: &str, value: &str) -> Result<NaiveDateTime, LoaderError> {
    let value = value.trim();
    NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f"))
        .or_else(|_| DateTime::parse_from_rfc3339(value).map(|dt| dt.naive_utc()))
        .map_err(|_| LoaderError::Timestamp {
            channel: channel.to_string(),
            value: value.to_string(),
        })
}

/// Render a timestamp the way network files store it
pub fn format_timestamp(timestamp: &NaiveDateTime) -> String {
    timestamp.format(TIMESTAMP_FORMAT).to_string()
}
