//! Read access to the prediction API, plus an offline demo feed.

pub mod client;
pub mod provider;
pub mod sample;

pub use client::{parse_results, parse_summary, ApiClient, DEFAULT_API_URL};
pub use provider::{ApiError, ResultsSource};
pub use sample::{sample_history, SampleSource};
