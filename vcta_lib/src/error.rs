use thiserror::Error;

use crate::trip::TripId;

/// Failures talking to the VCTA api.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Server responded {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Could not decode response: {0}")]
    Decode(String),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum StorageError {
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("Failed to write to storage: {0}")]
    Write(String),
}

/// The outcome of a failed action. Stored in [`crate::Remote::Failed`] so views can show it.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ActionError {
    #[error("Must be logged in first")]
    NotLoggedIn,

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// A local mutation that was rejected. The store is left unchanged.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    #[error("Dashboard is not loaded")]
    DashboardNotLoaded,

    #[error("No trip with id {0}")]
    UnknownTrip(TripId),
}
