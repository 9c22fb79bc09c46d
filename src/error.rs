//! Error taxonomy for the sync core
//!
//! Nothing in this core raises an error out of an event dispatch or a
//! persistence call; failures are caught at the narrowest boundary and
//! surfaced via logging. `CoreError` is the currency those boundaries use.

use thiserror::Error;

/// Failures produced inside the sync core.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    /// An engine or media-transport call failed while applying a command.
    #[error("engine call failed: {0}")]
    Engine(String),

    /// The backing key-value storage rejected a write.
    #[error("storage write failed: {0}")]
    Storage(String),

    /// A persisted or boundary value failed to (de)serialize.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// A bus subscriber failed while handling an event.
    #[error("event handler failed: {0}")]
    Handler(String),
}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        CoreError::Serialization(err.to_string())
    }
}
