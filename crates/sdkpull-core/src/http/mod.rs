//! HTTP access for SDK downloads.

mod client;

pub use client::{HttpClient, HttpClientConfig, HttpError};
