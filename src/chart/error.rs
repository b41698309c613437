use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("no host has data to plot")]
    EmptyTable,
    #[error("font unavailable: {0}")]
    FontUnavailable(String),
    #[error("render backend failure: {0}")]
    Backend(String),
    #[error("png encoding failure: {0}")]
    PngEncoding(String),
    #[error("failed to write chart {path}: {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },
}

impl RenderError {
    pub(super) fn from_backend(context: &str, message: String) -> Self {
        if message.contains("FontError") {
            Self::FontUnavailable(format!("{}: {}", context, message))
        } else {
            Self::Backend(format!("{}: {}", context, message))
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyTable => "CHART_EMPTY_TABLE",
            Self::FontUnavailable(_) => "CHART_FONT_UNAVAILABLE",
            Self::Backend(_) => "CHART_BACKEND_ERROR",
            Self::PngEncoding(_) => "CHART_PNG_ENCODING_ERROR",
            Self::Write { .. } => "CHART_WRITE_ERROR",
        }
    }
}
