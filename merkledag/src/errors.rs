use thiserror::Error;

/// Errors returned when constructing, mutating or decoding a [crate::Node].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("invalid argument: {0}")]
    InvalidArgument(#[from] ValidateLinkError),

    #[error("malformed encoding: {0}")]
    MalformedEncoding(String),
}

/// Errors that occur while turning caller input into a [crate::Link].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidateLinkError {
    #[error("link {0:?} has no hash")]
    MissingHash(String),
}

impl From<prost::DecodeError> for Error {
    fn from(value: prost::DecodeError) -> Self {
        Error::MalformedEncoding(value.to_string())
    }
}
