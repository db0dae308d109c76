//! usuarios-server: REST CRUD service over a single PostgreSQL table
//!
//! Two halves, one depending on the other:
//! - `db`: connection pool, bootstrap DDL, and the repository over the
//!   `usuarios` table.
//! - `http`: axum router, request/response shaping, and the mapping from
//!   outcomes to HTTP status codes.

pub mod db;
pub mod http;
pub mod models;

pub use db::{create_pool, PoolConfig};
pub use http::{run_server, AppState, ServerConfig};
