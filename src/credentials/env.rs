//! Credentials from environment variables.

use super::{AwsCredentials, CredentialProvider};
use crate::credentials::error::CredentialError;
use async_trait::async_trait;
use std::env;

/// Access key variable.
pub const AWS_ACCESS_KEY_ID: &str = "AWS_ACCESS_KEY_ID";
/// Secret key variable.
pub const AWS_SECRET_ACCESS_KEY: &str = "AWS_SECRET_ACCESS_KEY";
/// Session token variable.
pub const AWS_SESSION_TOKEN: &str = "AWS_SESSION_TOKEN";

/// Reads `AWS_ACCESS_KEY_ID`, `AWS_SECRET_ACCESS_KEY` and the optional
/// `AWS_SESSION_TOKEN`.
#[derive(Debug, Clone, Default)]
pub struct EnvironmentCredentialProvider;

impl EnvironmentCredentialProvider {
    /// Create the provider.
    ///
    /// Variables are read on every call to
    /// [`credentials`](CredentialProvider::credentials), not at construction.
    pub fn new() -> Self {
        Self
    }
}

/// Build credentials from a variable lookup.
fn credentials_from<F>(lookup: F) -> Result<AwsCredentials, CredentialError>
where
    F: Fn(&str) -> Option<String>,
{
    let required = |name: &str| -> Result<String, CredentialError> {
        match lookup(name) {
            None => Err(CredentialError::Missing {
                message: format!("{} environment variable not set", name),
            }),
            Some(value) if value.is_empty() => Err(CredentialError::Invalid {
                message: format!("{} is empty", name),
            }),
            Some(value) => Ok(value),
        }
    };

    let access_key_id = required(AWS_ACCESS_KEY_ID)?;
    let secret_access_key = required(AWS_SECRET_ACCESS_KEY)?;

    let credentials = AwsCredentials::new(access_key_id, secret_access_key);
    Ok(match lookup(AWS_SESSION_TOKEN).filter(|s| !s.is_empty()) {
        Some(token) => credentials.with_session_token(token),
        None => credentials,
    })
}

#[async_trait]
impl CredentialProvider for EnvironmentCredentialProvider {
    async fn credentials(&self) -> Result<AwsCredentials, CredentialError> {
        credentials_from(|name| env::var(name).ok())
    }
}
