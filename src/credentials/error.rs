//! Credential errors.

use crate::error::SesError;
use thiserror::Error;

/// Errors raised while resolving credentials.
#[derive(Debug, Error)]
pub enum CredentialError {
    /// The provider has no credentials to offer.
    #[error("Missing credentials: {message}")]
    Missing {
        /// Details.
        message: String,
    },

    /// Credentials were found but are malformed.
    #[error("Invalid credentials: {message}")]
    Invalid {
        /// Details.
        message: String,
    },

    /// Credentials are past their expiration time.
    #[error("Expired credentials")]
    Expired,

    /// A provider failed while loading credentials.
    #[error("Failed to load credentials from {provider}: {message}")]
    LoadFailed {
        /// Which provider failed.
        provider: String,
        /// Details.
        message: String,
    },

    /// The instance metadata service failed.
    #[error("IMDS error: {message}")]
    ImdsError {
        /// Details.
        message: String,
    },

    /// A shared profile file could not be used.
    #[error("Profile error: {message}")]
    ProfileError {
        /// Details.
        message: String,
    },
}

impl From<CredentialError> for SesError {
    fn from(err: CredentialError) -> Self {
        SesError::Credential {
            message: err.to_string(),
        }
    }
}
