//! Network downloads.

pub mod http;

pub use http::HttpFetcher;
