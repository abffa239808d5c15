//! Adapters implementing the domain ports and the outer HTTP surfaces.
//!
//! - `memory_store` / `file_store`: `StateStore` backends
//! - `random`: `RandomSource` over `rand`
//! - `upstream`: reqwest client for the recommendation API (`VenueFetcher`)
//! - `gateway`: axum server relaying to the upstream

pub mod file_store;
pub mod gateway;
pub mod memory_store;
pub mod random;
pub mod upstream;

pub use file_store::JsonFileStateStore;
pub use gateway::{GatewayServer, GatewayState};
pub use memory_store::MemoryStateStore;
pub use random::RngSource;
pub use upstream::{SearchParams, UpstreamClient};
