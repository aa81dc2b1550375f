//! Signing errors.

use crate::error::SesError;
use thiserror::Error;

/// Errors raised while signing a request.
#[derive(Debug, Error)]
pub enum SigningError {
    /// A header the signature depends on is absent.
    #[error("Missing required header: {header}")]
    MissingHeader {
        /// Header name.
        header: String,
    },

    /// The request URL cannot be signed.
    #[error("Invalid URL: {message}")]
    InvalidUrl {
        /// Details.
        message: String,
    },

    /// Key material is missing or unusable, or a header value is invalid.
    #[error("Signing failed: {message}")]
    SigningFailed {
        /// Details.
        message: String,
    },
}

impl From<SigningError> for SesError {
    fn from(err: SigningError) -> Self {
        SesError::Signing {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_converts_to_ses_error() {
        let err: SesError = SigningError::MissingHeader {
            header: "host".to_string(),
        }
        .into();
        match err {
            SesError::Signing { message } => assert_eq!(message, "Missing required header: host"),
            other => panic!("unexpected: {:?}", other),
        }
    }
}
