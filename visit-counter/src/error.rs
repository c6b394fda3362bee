use {
    thiserror::Error,
    crate::store::SqliteCounterStoreOpenError,
};

/// Failure of a single increment against the counter store.
#[derive(Error, Debug, Clone, Eq, PartialEq)]
pub enum StoreError {
    /// Store responded, but the response does not contain the expected attribute.
    #[error("missing attribute in store response: {attribute}")]
    AttributeMissing {
        attribute: String,
    },

    /// Attribute is present, but does not hold a non-negative integer.
    #[error("unexpected value for attribute {attribute}: {reason}")]
    MalformedAttribute {
        attribute: String,
        reason: String,
    },

    /// Store call itself failed: missing table, permissions, network, throttling and so on.
    #[error("store request failed: {reason}")]
    RequestFailed {
        reason: String,
    },
}

/// Failure of the binary before or outside of a single invocation.
#[derive(Error, Debug)]
pub enum CommandError {
    #[error("failed to open sqlite database: {0}")]
    SqliteOpen(#[from] SqliteCounterStoreOpenError),

    #[error("failed to create counter table: {0}")]
    TableCreate(StoreError),

    #[error("failed to encode response envelope: {0:?}")]
    EnvelopeEncode(serde_json::Error),

    #[error("function runtime failed: {reason}")]
    Runtime { reason: String },
}
