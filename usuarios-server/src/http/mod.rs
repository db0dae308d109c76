//! HTTP surface: router, handlers, and outcome-to-status mapping

pub mod error;
pub mod routes;
pub mod server;

pub use error::ApiError;
pub use server::{build_router, run_server, AppState, ServerConfig};
