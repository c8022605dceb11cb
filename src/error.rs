#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("app id and secret key must both be set")]
    InvalidCredentials,
    #[error("nothing to translate")]
    EmptyQuery,
    #[error("unsupported language code: {0}")]
    UnsupportedLanguage(String),
    #[error("{0} can only be used as a source language")]
    InvalidTargetLanguage(String),
    #[error("request failed: {0}")]
    TransportFailure(String),
    #[error("translation failed: {0}")]
    ProviderError(String),
    #[error("persistence error: {0}")]
    PersistenceFailure(String),
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::PersistenceFailure(e.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::PersistenceFailure(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
