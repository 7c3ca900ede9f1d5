//! # Backend
//!
//! Everything that talks to the recommendation service lives here. The core
//! never sees reqwest; it only receives the `Action`s the TUI builds from
//! these results.

pub mod http;
pub mod service;
pub mod types;

pub use http::HttpBackend;
pub use service::{BackendError, MovieBackend};
pub use types::Recommendation;
