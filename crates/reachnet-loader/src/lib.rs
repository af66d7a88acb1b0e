//! Reachnet Loader
//!
//! Reads communication networks from JSON files, optionally gzip or bzip2
//! compressed, and writes them back in the same format.
//!
//! # Examples
//!
//! ```no_run
//! use reachnet_loader::load_network;
//!
//! let network = load_network("data/microsoft.json.bz2").unwrap();
//! println!("{} participants", network.vertex_count());
//! ```

#![warn(missing_docs)]

pub mod error;
pub mod format;
mod load;

use chrono::NaiveDateTime;
use reachnet_model::CommunicationNetwork;

pub use error::LoaderError;
pub use format::{format_timestamp, parse_timestamp, ChannelRecord, Compression};
pub use load::{
    load_network, load_network_numeric, parse_network, parse_network_numeric, save_network,
    save_network_numeric,
};

/// A network keyed by string identifiers with timestamp timings
pub type Network = CommunicationNetwork<String, String, NaiveDateTime>;

/// A network keyed by string identifiers with integer timings
pub type NumericNetwork = CommunicationNetwork<String, String, i64>;
