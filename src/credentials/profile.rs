//! Credentials from the shared AWS profile files.
//!
//! Reads `~/.aws/credentials` and `~/.aws/config` (or the files named by
//! `AWS_SHARED_CREDENTIALS_FILE` / `AWS_CONFIG_FILE`). Values from the config
//! file supplement the credentials file. `source_profile` indirections are
//! followed; cycles are reported as errors.

use super::{AwsCredentials, CredentialProvider};
use crate::credentials::error::CredentialError;
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::{env, fs};

/// Profile used when `AWS_PROFILE` is unset.
pub const DEFAULT_PROFILE: &str = "default";
/// Selects the active profile.
pub const AWS_PROFILE: &str = "AWS_PROFILE";
/// Overrides the credentials file location.
pub const AWS_SHARED_CREDENTIALS_FILE: &str = "AWS_SHARED_CREDENTIALS_FILE";
/// Overrides the config file location.
pub const AWS_CONFIG_FILE: &str = "AWS_CONFIG_FILE";

type Profiles = HashMap<String, HashMap<String, String>>;

/// Loads a named profile from the shared files.
#[derive(Debug, Clone)]
pub struct ProfileCredentialProvider {
    profile_name: String,
    credentials_path: Option<PathBuf>,
    config_path: Option<PathBuf>,
}

impl ProfileCredentialProvider {
    /// Use `AWS_PROFILE`, or `default`.
    pub fn new() -> Self {
        Self::with_profile(env::var(AWS_PROFILE).unwrap_or_else(|_| DEFAULT_PROFILE.to_string()))
    }

    /// Use a specific profile.
    ///
    /// # Arguments
    ///
    /// * `profile_name` - Section name in the shared files, e.g. `production`
    ///
    /// # Example
    ///
    /// ```no_run
    /// use integrations_aws_ses_classic::credentials::{CredentialProvider, ProfileCredentialProvider};
    ///
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let provider = ProfileCredentialProvider::with_profile("production")
    ///     .with_credentials_path("/etc/aws/credentials");
    /// let credentials = provider.credentials().await?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn with_profile(profile_name: impl Into<String>) -> Self {
        Self {
            profile_name: profile_name.into(),
            credentials_path: None,
            config_path: None,
        }
    }

    /// Read credentials from an explicit file.
    ///
    /// # Arguments
    ///
    /// * `path` - Replaces `~/.aws/credentials` and `AWS_SHARED_CREDENTIALS_FILE`
    pub fn with_credentials_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.credentials_path = Some(path.into());
        self
    }

    /// Read config from an explicit file.
    pub fn with_config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = Some(path.into());
        self
    }

    /// The `region` setting of the selected profile, if any.
    pub fn region(&self) -> Option<String> {
        self.load_profiles()
            .get(&self.profile_name)
            .and_then(|p| p.get("region").cloned())
    }

    fn resolve_path(explicit: &Option<PathBuf>, var: &str, file: &str) -> Option<PathBuf> {
        explicit
            .clone()
            .or_else(|| env::var(var).ok().map(PathBuf::from))
            .or_else(|| dirs::home_dir().map(|home| home.join(".aws").join(file)))
    }

    /// Parse INI-style profile content.
    fn parse_profile_file(content: &str) -> Profiles {
        let mut profiles = Profiles::new();
        let mut current: Option<String> = None;

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
                continue;
            }

            if let Some(header) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
                let header = header.trim();
                let name = header.strip_prefix("profile ").unwrap_or(header).trim();
                profiles.entry(name.to_string()).or_default();
                current = Some(name.to_string());
                continue;
            }

            if let (Some(profile), Some((key, value))) = (&current, line.split_once('=')) {
                profiles
                    .entry(profile.clone())
                    .or_default()
                    .insert(key.trim().to_string(), value.trim().to_string());
            }
        }

        profiles
    }

    /// Merge both files; the config file fills in keys the credentials file
    /// does not define.
    fn load_profiles(&self) -> Profiles {
        let mut merged = Profiles::new();

        let sources = [
            Self::resolve_path(&self.credentials_path, AWS_SHARED_CREDENTIALS_FILE, "credentials"),
            Self::resolve_path(&self.config_path, AWS_CONFIG_FILE, "config"),
        ];

        for path in sources.iter().flatten() {
            if let Ok(content) = fs::read_to_string(path) {
                for (name, values) in Self::parse_profile_file(&content) {
                    let entry = merged.entry(name).or_default();
                    for (key, value) in values {
                        entry.entry(key).or_insert(value);
                    }
                }
            }
        }

        merged
    }

    fn resolve(&self, profiles: &Profiles) -> Result<AwsCredentials, CredentialError> {
        let mut visited = HashSet::new();
        let mut name = self.profile_name.clone();

        loop {
            if !visited.insert(name.clone()) {
                return Err(CredentialError::ProfileError {
                    message: format!("source_profile cycle detected at '{}'", name),
                });
            }

            let profile = profiles.get(&name).ok_or_else(|| CredentialError::ProfileError {
                message: format!("Profile '{}' not found", name),
            })?;

            if let (Some(key), Some(secret)) = (
                profile.get("aws_access_key_id"),
                profile.get("aws_secret_access_key"),
            ) {
                let credentials = AwsCredentials::new(key.as_str(), secret.as_str());
                return Ok(match profile.get("aws_session_token") {
                    Some(token) => credentials.with_session_token(token.as_str()),
                    None => credentials,
                });
            }

            match profile.get("source_profile") {
                Some(source) => name = source.clone(),
                None => {
                    return Err(CredentialError::ProfileError {
                        message: format!("Profile '{}' has no static credentials", name),
                    })
                }
            }
        }
    }
}

impl Default for ProfileCredentialProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CredentialProvider for ProfileCredentialProvider {
    async fn credentials(&self) -> Result<AwsCredentials, CredentialError> {
        let profiles = self.load_profiles();
        self.resolve(&profiles)
    }
}
