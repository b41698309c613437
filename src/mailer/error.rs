use thiserror::Error;

#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("failed to read attachment {path}: {source}")]
    Attachment {
        path: String,
        source: std::io::Error,
    },
    #[error("invalid address {value}: {source}")]
    Address {
        value: String,
        source: lettre::address::AddressError,
    },
    #[error("invalid content type {0}")]
    ContentType(String),
    #[error("failed to build message: {0}")]
    Build(#[from] lettre::error::Error),
    #[error("smtp delivery via {server} failed: {source}")]
    Smtp {
        server: String,
        source: lettre::transport::smtp::Error,
    },
}
