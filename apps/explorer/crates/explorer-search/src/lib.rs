//! News search for News Explorer.
//!
//! [`SearchService`] is the seam the orchestrator depends on;
//! [`NewsApiClient`] implements it against NewsAPI.

mod client;
mod error;
mod service;

pub use client::{NewsApiClient, NewsApiSettings};
pub use error::{SearchError, SearchOutcome};
pub use service::{SearchResponse, SearchService};
