//! Data access layer: pool, bootstrap DDL, and the usuarios repository

pub mod migrations;
pub mod pool;
pub mod repos;

pub use pool::{create_pool, PoolConfig};
pub use repos::{DbError, NewUser, User, UserPatch, UserRepo};
