//! Reading and writing network files

use crate::format::{
    format_timestamp, parse_timestamp, ChannelRecord, Compression, NetworkDocument,
};
use crate::{LoaderError, Network, NumericNetwork};
use bzip2::read::BzDecoder;
use bzip2::write::BzEncoder;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use reachnet_model::{CommunicationNetwork, Timing};
use serde::Serialize;
use std::fs;
use std::io::{Read, Write};
use std::path::Path;

/// Load a network with timestamp timings from a `.json`, `.json.gz` or
/// `.json.bz2` file
///
/// The network is named after the file stem (`emails.json.bz2` becomes
/// `emails`).
///
/// # Errors
/// `Io` if the file cannot be read, `UnsupportedCompression` for xz, zstd and
/// zip archives, `Json` or `Timestamp` for malformed content.
pub fn load_network<P: AsRef<Path>>(path: P) -> Result<Network, LoaderError> {
    let path = path.as_ref();
    let text = read_text(path)?;
    let network = parse_network(&text, Some(network_name(path)))?;
    log_loaded(path, &network);
    Ok(network)
}

/// Load a network whose `end` fields are plain integers
///
/// # Errors
/// Same as [`load_network`], without `Timestamp`.
pub fn load_network_numeric<P: AsRef<Path>>(path: P) -> Result<NumericNetwork, LoaderError> {
    let path = path.as_ref();
    let text = read_text(path)?;
    let network = parse_network_numeric(&text, Some(network_name(path)))?;
    log_loaded(path, &network);
    Ok(network)
}

/// Parse a network document with timestamp timings
pub fn parse_network(text: &str, name: Option<String>) -> Result<Network, LoaderError> {
    let document: NetworkDocument<String> = serde_json::from_str(text)?;

    let mut timings = Vec::with_capacity(document.len());
    for (channel, record) in &document {
        timings.push((channel.clone(), parse_timestamp(channel, &record.end)?));
    }
    let members = document
        .into_iter()
        .map(|(channel, record)| (channel, record.participants));

    Ok(named(CommunicationNetwork::new(members, timings)?, name))
}

/// Parse a network document with integer timings
pub fn parse_network_numeric(
    text: &str,
    name: Option<String>,
) -> Result<NumericNetwork, LoaderError> {
    let document: NetworkDocument<i64> = serde_json::from_str(text)?;

    let timings: Vec<(String, i64)> = document
        .iter()
        .map(|(channel, record)| (channel.clone(), record.end))
        .collect();
    let members = document
        .into_iter()
        .map(|(channel, record)| (channel, record.participants));

    Ok(named(CommunicationNetwork::new(members, timings)?, name))
}

/// Write a timestamp network, compressed when the path ends in `.gz` or `.bz2`
///
/// # Errors
/// `Io` on write failure, `UnsupportedCompression` for other archive
/// extensions.
pub fn save_network<P: AsRef<Path>>(network: &Network, path: P) -> Result<(), LoaderError> {
    let document: NetworkDocument<String> = document_of(network, format_timestamp);
    write_document(&document, path.as_ref())
}

/// Write an integer-timed network
pub fn save_network_numeric<P: AsRef<Path>>(
    network: &NumericNetwork,
    path: P,
) -> Result<(), LoaderError> {
    let document: NetworkDocument<i64> = document_of(network, |timing| *timing);
    write_document(&document, path.as_ref())
}

fn document_of<T, E, F>(
    network: &CommunicationNetwork<String, String, T>,
    render: F,
) -> NetworkDocument<E>
where
    T: Timing,
    F: Fn(&T) -> E,
{
    network
        .timings()
        .iter()
        .map(|(channel, timing)| {
            let participants = network
                .vertices_of(channel)
                .map(|members| members.iter().cloned().collect())
                .unwrap_or_default();
            (
                channel.clone(),
                ChannelRecord {
                    participants,
                    end: render(timing),
                },
            )
        })
        .collect()
}

fn write_document<D: Serialize>(document: &D, path: &Path) -> Result<(), LoaderError> {
    let bytes = serde_json::to_vec_pretty(document)?;
    match Compression::from_path(path)? {
        Compression::None => fs::write(path, bytes)?,
        Compression::Gzip => {
            let mut encoder = GzEncoder::new(Vec::new(), flate2::Compression::default());
            encoder.write_all(&bytes)?;
            fs::write(path, encoder.finish()?)?;
        }
        Compression::Bzip2 => {
            let mut encoder = BzEncoder::new(Vec::new(), bzip2::Compression::default());
            encoder.write_all(&bytes)?;
            fs::write(path, encoder.finish()?)?;
        }
    }
    tracing::info!("Saved network to {}", path.display());
    Ok(())
}

fn read_text(path: &Path) -> Result<String, LoaderError> {
    let bytes = fs::read(path)?;

    // Content wins over a misleading extension
    let compression = match Compression::sniff(&bytes) {
        Compression::None => match Compression::from_path(path)? {
            Compression::None => Compression::None,
            claimed => {
                tracing::warn!(
                    "{} has a {:?} extension but no matching header, reading as plain JSON",
                    path.display(),
                    claimed
                );
                Compression::None
            }
        },
        detected => detected,
    };

    match compression {
        Compression::None => String::from_utf8(bytes).map_err(|e| {
            LoaderError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
        }),
        Compression::Gzip => decode(GzDecoder::new(&bytes[..])),
        Compression::Bzip2 => decode(BzDecoder::new(&bytes[..])),
    }
}

fn decode<R: Read>(mut reader: R) -> Result<String, LoaderError> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    Ok(text)
}

fn network_name(path: &Path) -> String {
    let file = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or_default();
    let stem = file
        .strip_suffix(".gz")
        .or_else(|| file.strip_suffix(".bz2"))
        .unwrap_or(file);
    stem.strip_suffix(".json").unwrap_or(stem).to_string()
}

fn named<T: Timing>(
    network: CommunicationNetwork<String, String, T>,
    name: Option<String>,
) -> CommunicationNetwork<String, String, T> {
    match name {
        Some(name) => network.with_name(name),
        None => network,
    }
}

fn log_loaded<T: Timing>(path: &Path, network: &CommunicationNetwork<String, String, T>) {
    tracing::info!(
        "Loaded network {} from {}: {} participants, {} channels",
        network.name().unwrap_or("<unnamed>"),
        path.display(),
        network.vertex_count(),
        network.hyperedge_count()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const SAMPLE: &str = r#"{
        "c1": {"participants": ["alice", "bob"], "end": "2020-02-03T10:00:00"},
        "c2": {"participants": ["bob", "carol", "bob"], "end": "2020-02-03 12:30:00"}
    }"#;

    #[test]
    fn test_parse_network() {
        let network = parse_network(SAMPLE, Some("sample".to_string())).unwrap();
        assert_eq!(network.name(), Some("sample"));
        assert_eq!(network.vertex_count(), 3);
        assert_eq!(network.hyperedge_count(), 2);
        assert_eq!(network.vertices_of(&"c2".to_string()).unwrap().len(), 2);
    }

    #[test]
    fn test_parse_network_bad_timestamp() {
        let err = parse_network(
            r#"{"c1": {"participants": ["a"], "end": "noon"}}"#,
            None,
        )
        .unwrap_err();
        assert!(matches!(err, LoaderError::Timestamp { ref channel, .. } if channel == "c1"));
    }

    #[test]
    fn test_parse_network_missing_field() {
        let err = parse_network(r#"{"c1": {"participants": ["a"]}}"#, None).unwrap_err();
        assert!(matches!(err, LoaderError::Json(_)));
    }

    #[test]
    fn test_parse_numeric() {
        let network = parse_network_numeric(
            r#"{"h1": {"participants": ["v1", "v2"], "end": -4}}"#,
            None,
        )
        .unwrap();
        assert_eq!(network.timing(&"h1".to_string()).unwrap(), -4);
        assert_eq!(network.name(), None);
    }

    #[test]
    fn test_empty_document() {
        let network = parse_network("{}", None).unwrap();
        assert!(network.is_empty());
    }

    #[test]
    fn test_network_name_strips_extensions() {
        assert_eq!(network_name(&PathBuf::from("/data/emails.json.gz")), "emails");
        assert_eq!(network_name(&PathBuf::from("microsoft.json.bz2")), "microsoft");
        assert_eq!(network_name(&PathBuf::from("chats.json")), "chats");
        assert_eq!(network_name(&PathBuf::from("raw")), "raw");
    }
}
