//! Repository layer over the usuarios table

mod users;

pub use users::{DbError, NewUser, User, UserPatch, UserRepo};
