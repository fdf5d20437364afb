/// Failure reasons for each pipeline stage.
///
/// Stages return these instead of swallowing errors so callers can tell an
/// empty page apart from a failed fetch. The pipeline itself still degrades
/// to an empty result.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Failed to fetch page: {0}")]
    FetchError(String),

    #[error("Error parsing content: {0}")]
    ParseError(String),

    #[error("Model invocation error: {0}")]
    InvocationError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl AppError {
    /// Short name of the stage the error came from, used as a log field.
    pub fn stage(&self) -> &'static str {
        match self {
            AppError::FetchError(_) => "fetch",
            AppError::ParseError(_) => "extract",
            AppError::InvocationError(_) => "invoke",
            AppError::ConfigError(_) => "config",
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::FetchError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
