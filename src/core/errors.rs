/*-------------------------------------------------------------------------------------------------
  Errors and Results
-------------------------------------------------------------------------------------------------*/

use reqwest::StatusCode;
use thiserror::Error;

/// Error type used throughout the crate.
///
/// Every pipeline step returns one of these variants unchanged to the caller; use
/// [Error::kind()] to tell the transport, parse, and serialization failures apart.
#[derive(Debug, Error)]
pub enum Error {
    /// The request could not be sent, timed out, or the body could not be read.
    #[error("request to `{url}` failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status code.
    #[error("request to `{url}` returned HTTP status {status}")]
    Status { url: String, status: StatusCode },

    /// The metadata document is not a JSON object.
    #[error("invalid metadata document: {0}")]
    InvalidJson(#[source] serde_json::Error),

    /// The metadata document does not contain the service key.
    #[error("service key `{0}` not found in metadata document")]
    MissingServiceKey(String),

    /// The service key is present but does not hold an array of strings.
    #[error("service key `{key}` is not an array of strings: {source}")]
    InvalidServiceValue {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// A policy document could not be encoded or decoded.
    #[error("policy serialization failed: {0}")]
    Serialization(#[source] serde_json::Error),

    /// The decoded policy object is missing a field required for key ordering.
    #[error("policy field `{0}` not found")]
    MissingPolicyField(String),

    /// The runtime API handed out an invocation without a usable request id.
    #[error("invocation from `{0}` has no request id")]
    MissingRequestId(String),

    /// A function invocation event is not a valid request.
    #[error("invalid invocation event: {0}")]
    InvalidEvent(#[source] serde_json::Error),

    /// A required environment variable is not set.
    #[error("environment variable `{0}` is not set")]
    MissingEnvVar(&'static str),

    /// Writing the policy to its sink failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Error family, one per pipeline failure class.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    Transport,
    Parse,
    Serialization,
    Config,
    Io,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Request { .. } | Error::Status { .. } => ErrorKind::Transport,
            Error::InvalidJson(_)
            | Error::MissingServiceKey(_)
            | Error::InvalidServiceValue { .. }
            | Error::InvalidEvent(_)
            | Error::MissingRequestId(_) => ErrorKind::Parse,
            Error::Serialization(_) | Error::MissingPolicyField(_) => ErrorKind::Serialization,
            Error::MissingEnvVar(_) => ErrorKind::Config,
            Error::Io(_) => ErrorKind::Io,
        }
    }
}

/// Result type alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/*--------------------------------------------------------------------------------------
  Log Error Function
--------------------------------------------------------------------------------------*/

#[cfg(test)]
pub(crate) fn log_error(error: &Error) {
    log::error!("{}", error);
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        let missing = Error::MissingServiceKey("actions".to_string());
        assert_eq!(missing.kind(), ErrorKind::Parse);
        assert_eq!(
            missing.to_string(),
            "service key `actions` not found in metadata document"
        );

        let status = Error::Status {
            url: "https://api.github.com/meta".to_string(),
            status: StatusCode::FORBIDDEN,
        };
        assert_eq!(status.kind(), ErrorKind::Transport);

        let field = Error::MissingPolicyField("Id".to_string());
        assert_eq!(field.kind(), ErrorKind::Serialization);

        let env = Error::MissingEnvVar("AWS_LAMBDA_RUNTIME_API");
        assert_eq!(env.kind(), ErrorKind::Config);

        let io = Error::from(std::io::Error::other("disk full"));
        assert_eq!(io.kind(), ErrorKind::Io);
    }
}
