pub mod actions;
pub mod api;
pub mod auth;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod remote;
pub mod scoreboard;
pub mod store;
pub mod trip;
pub mod user;

#[cfg(test)]
pub(crate) mod mock;

pub use error::{ActionError, ApiError, StorageError, StoreError};
pub use remote::Remote;
pub use store::{Mutation, Store};
