use thiserror::Error;

#[derive(Error, Debug)]
pub enum CheckoutError {
    /// Rejected locally, before any collaborator was called.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    /// The storage or payment collaborator could not complete the request.
    #[error("Collaborator failure: {0}")]
    CollaboratorFailure(String),
    /// A completed charge attempt that did not succeed.
    #[error("Payment declined ({code}): {message}")]
    PaymentDeclined { code: String, message: String },
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
    #[cfg(feature = "storage-rocksdb")]
    #[error("Storage error: {0}")]
    Storage(#[from] rocksdb::Error),
}

impl CheckoutError {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn collaborator(message: impl Into<String>) -> Self {
        Self::CollaboratorFailure(message.into())
    }
}

pub type Result<T> = std::result::Result<T, CheckoutError>;
