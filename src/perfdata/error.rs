use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("failed to copy perfdata {from} to {to}: {source}")]
    Copy {
        from: String,
        to: String,
        source: std::io::Error,
    },
    #[error("failed to open perfdata {path}: {source}")]
    Open {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to read perfdata {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
}
