//! Reachnet Model Layer
//!
//! This crate contains the temporal hypergraph model that every other layer
//! depends upon. It defines the communication network itself, the timing and
//! distance vocabulary, and the trait seam the path engines read through.
//!
//! ## Key Concepts
//!
//! - **Vertex**: a participant of the communication network
//! - **Hyperedge**: one communication event (a channel) connecting any number of vertices
//! - **Timing**: the activation time of a hyperedge; information only travels forward in time
//! - **Distance type**: the optimisation criterion of a path query (shortest, fastest, foremost)
//!
//! ## Architecture
//!
//! - The model is built once and read-only afterwards
//! - Engines never see the concrete network, only [`traits::TemporalHypergraph`]
//! - File formats and naming conveniences live in `reachnet-loader`

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod distance;
pub mod error;
pub mod network;
pub mod timing;
pub mod traits;

// Re-exports for convenience
pub use distance::{Distance, DistanceType};
pub use error::{EntityKind, ModelError};
pub use network::CommunicationNetwork;
pub use timing::Timing;
pub use traits::TemporalHypergraph;
