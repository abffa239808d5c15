//! HTTP gateway in front of the upstream recommendation API.

pub mod http;

pub use http::{shutdown_signal, ErrorResponse, GatewayServer, GatewayState, ItineraryRequest};
