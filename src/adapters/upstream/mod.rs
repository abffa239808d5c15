//! Upstream recommendation API adapter.

pub mod client;

pub use client::{SearchParams, UpstreamClient};
