use shared::error::ErrorCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("order API unreachable: {0}")]
    Network(#[source] reqwest::Error),
    #[error("{resource} not found")]
    NotFound { resource: String },
    #[error("order API rejected the request: {message}")]
    Validation { message: String },
    #[error("order API responded with {status}: {message}")]
    Server { status: u16, message: String },
}

impl GatewayError {
    pub fn code(&self) -> ErrorCode {
        match self {
            GatewayError::Network(_) => ErrorCode::Network,
            GatewayError::NotFound { .. } => ErrorCode::NotFound,
            GatewayError::Validation { .. } => ErrorCode::Validation,
            GatewayError::Server { .. } => ErrorCode::Server,
        }
    }
}

pub type GatewayResult<T> = std::result::Result<T, GatewayError>;
