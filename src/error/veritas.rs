use thiserror::Error as ThisError;

use super::{DispatchError, ErrorKind};

#[derive(Debug, ThisError)]
pub enum VeritasError {
    #[error("Configuration error: {0}")]
    Config(#[from] Box<figment::Error>),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("API key is missing or not a valid header value")]
    InvalidApiKey,

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),

    #[error("Input text is empty")]
    EmptyInput,

    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<figment::Error> for VeritasError {
    fn from(err: figment::Error) -> Self {
        VeritasError::Config(Box::new(err))
    }
}

impl VeritasError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            VeritasError::Dispatch(err) => err.kind(),
            _ => ErrorKind::Other,
        }
    }

    /// Process exit status: 2 for setup problems (config, key, HTTP client), 1 otherwise.
    pub fn exit_code(&self) -> u8 {
        match self {
            VeritasError::Config(_)
            | VeritasError::InvalidConfig(_)
            | VeritasError::InvalidApiKey
            | VeritasError::HttpClient(_) => 2,
            VeritasError::EmptyInput | VeritasError::Dispatch(_) | VeritasError::IoError(_) => 1,
        }
    }
}
