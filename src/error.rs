use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("lock poisoned: {0}")]
    LockPoisoned(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("validation error: {0}")]
    Validation(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

impl axum::response::IntoResponse for HandlerError {
    fn into_response(self) -> axum::response::Response {
        match self {
            HandlerError::Validation(details) => {
                tracing::warn!(details = %details, "rejected request body");
                crate::bad_request(&details)
            }
            HandlerError::Store(e) => {
                tracing::error!(error = %crate::unpack_error(&e), "store operation failed");
                crate::server_error()
            }
        }
    }
}

impl From<axum::extract::rejection::JsonRejection> for HandlerError {
    fn from(rejection: axum::extract::rejection::JsonRejection) -> Self {
        HandlerError::Validation(rejection.body_text())
    }
}
