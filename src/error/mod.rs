//! Error types for the SES client.
//!
//! Errors are grouped by where they originate: local configuration and
//! credential problems, request signing, the HTTP transport, and error
//! responses returned by the SES Query API. Service error codes are mapped
//! onto dedicated variants where callers are likely to branch on them
//! (missing rule sets, rejected messages, throttling) and onto
//! [`SesError::AwsApi`] otherwise.
//!
//! # Examples
//!
//! ```rust
//! use integrations_aws_ses_classic::error::SesError;
//!
//! fn describe(error: &SesError) {
//!     if error.is_retryable() {
//!         if let Some(delay) = error.retry_after() {
//!             println!("retry in {:?}", delay);
//!         }
//!     }
//!     if let Some(code) = error.error_code() {
//!         println!("SES error code: {}", code);
//!     }
//! }
//! ```

mod mapping;
mod result;

pub use mapping::{is_retryable_status, map_aws_error, parse_error_response, AwsErrorResponse};
pub use result::{SesResult, SesResultExt};

use std::time::Duration;
use thiserror::Error;

/// Top-level error type for SES operations.
#[derive(Debug, Error)]
pub enum SesError {
    /// The client is misconfigured.
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error.
        message: String,
        /// Optional underlying error source.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Credentials could not be resolved or are unusable.
    #[error("Credential error: {message}")]
    Credential {
        /// Description of the credential error.
        message: String,
    },

    /// SigV4 signing failed.
    #[error("Signing error: {message}")]
    Signing {
        /// Description of the signing error.
        message: String,
    },

    /// Network or HTTP level failure.
    #[error("Transport error: {message}")]
    Transport {
        /// Description of the transport error.
        message: String,
        /// Optional underlying error source.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
        /// Whether this error is retryable.
        retryable: bool,
    },

    /// The request timed out.
    #[error("Timeout: {message}")]
    Timeout {
        /// Description of the timeout.
        message: String,
        /// Whether this timeout is retryable.
        retryable: bool,
    },

    /// The request was throttled (`Throttling`).
    ///
    /// `retry_after` carries a hint for when to retry, when one is known.
    #[error("Rate limited: {message}")]
    RateLimited {
        /// Description of the rate limiting.
        message: String,
        /// Optional duration to wait before retrying.
        retry_after: Option<Duration>,
        /// AWS request ID, when the error came from SES.
        request_id: Option<String>,
    },

    /// A sending quota or a resource limit was exceeded.
    #[error("Quota exceeded: {message}")]
    QuotaExceeded {
        /// Description of the quota violation.
        message: String,
        /// Type of quota that was exceeded.
        quota_type: QuotaType,
        /// AWS request ID, when the error came from SES.
        request_id: Option<String>,
    },

    /// SES refused to send the message (`MessageRejected`).
    #[error("Message rejected: {message}")]
    MessageRejected {
        /// Reason given by SES.
        message: String,
        /// AWS request ID, when the error came from SES.
        request_id: Option<String>,
    },

    /// The custom MAIL FROM domain is not verified
    /// (`MailFromDomainNotVerifiedException`).
    #[error("Identity not verified: {identity}")]
    IdentityNotVerified {
        /// The unverified identity, or the raw message when none was named.
        identity: String,
        /// AWS request ID, when the error came from SES.
        request_id: Option<String>,
    },

    /// A resource with the same name already exists (`AlreadyExists`).
    #[error("Resource already exists: {name}")]
    AlreadyExists {
        /// Name of the conflicting resource.
        name: String,
        /// AWS request ID, when the error came from SES.
        request_id: Option<String>,
    },

    /// The resource cannot be deleted, e.g. the active rule set (`CannotDelete`).
    #[error("Cannot delete: {name}")]
    CannotDelete {
        /// Name of the resource.
        name: String,
        /// AWS request ID, when the error came from SES.
        request_id: Option<String>,
    },

    /// The named receipt rule does not exist (`RuleDoesNotExist`).
    #[error("Receipt rule does not exist: {name}")]
    RuleDoesNotExist {
        /// Name of the rule.
        name: String,
        /// AWS request ID, when the error came from SES.
        request_id: Option<String>,
    },

    /// The named receipt rule set does not exist (`RuleSetDoesNotExist`).
    #[error("Receipt rule set does not exist: {name}")]
    RuleSetDoesNotExist {
        /// Name of the rule set.
        name: String,
        /// AWS request ID, when the error came from SES.
        request_id: Option<String>,
    },

    /// The named template does not exist (`TemplateDoesNotExist`).
    #[error("Template not found: {name}")]
    TemplateNotFound {
        /// Name of the template.
        name: String,
        /// AWS request ID, when the error came from SES.
        request_id: Option<String>,
    },

    /// The named configuration set does not exist
    /// (`ConfigurationSetDoesNotExist`).
    #[error("Configuration set not found: {name}")]
    ConfigurationSetNotFound {
        /// Name of the configuration set.
        name: String,
        /// AWS request ID, when the error came from SES.
        request_id: Option<String>,
    },

    /// A referenced AWS resource is unusable by SES: an S3 bucket, SNS topic,
    /// Lambda function, sending policy or template SES cannot use.
    #[error("Invalid {kind}: {message}")]
    InvalidResource {
        /// Which kind of resource was rejected.
        kind: ResourceKind,
        /// Description from SES.
        message: String,
        /// AWS request ID, when the error came from SES.
        request_id: Option<String>,
    },

    /// Request validation failed, client side or server side.
    #[error("Validation error: {message}")]
    Validation {
        /// Description of the validation error.
        message: String,
        /// Optional field name that failed validation.
        field: Option<String>,
        /// AWS request ID, when the error came from SES.
        request_id: Option<String>,
    },

    /// Request encoding or response decoding failed.
    #[error("Serialization error: {message}")]
    Serialization {
        /// Description of the serialization error.
        message: String,
    },

    /// An SES error code with no dedicated variant.
    #[error("AWS API error: {code} - {message}")]
    AwsApi {
        /// AWS error code (e.g. "InvalidParameterValue").
        code: String,
        /// Human-readable error message.
        message: String,
        /// AWS request ID for debugging.
        request_id: Option<String>,
        /// Whether this error is retryable.
        retryable: bool,
    },

    /// The operation was cancelled before it completed.
    #[error("Operation cancelled: {message}")]
    Cancelled {
        /// What cancelled the operation.
        message: String,
    },

    /// The asynchronous client was shut down before the work was submitted.
    #[error("Executor has been shut down")]
    ExecutorShutdown,

    /// Anything else.
    #[error("Unknown error: {message}")]
    Unknown {
        /// Description of the unknown error.
        message: String,
    },
}

impl SesError {
    /// Returns true if the error is retryable.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use integrations_aws_ses_classic::error::SesError;
    ///
    /// let error = SesError::RateLimited {
    ///     message: "Maximum sending rate exceeded.".to_string(),
    ///     retry_after: None,
    ///     request_id: None,
    /// };
    ///
    /// assert!(error.is_retryable());
    /// ```
    pub fn is_retryable(&self) -> bool {
        match self {
            SesError::Transport { retryable, .. } => *retryable,
            SesError::Timeout { retryable, .. } => *retryable,
            SesError::RateLimited { .. } => true,
            SesError::AwsApi { retryable, .. } => *retryable,
            _ => false,
        }
    }

    /// Returns the SES error code this error was mapped from, if any.
    ///
    /// ```rust
    /// use integrations_aws_ses_classic::error::SesError;
    ///
    /// let error = SesError::RuleSetDoesNotExist {
    ///     name: "inbound".to_string(),
    ///     request_id: None,
    /// };
    /// assert_eq!(error.error_code(), Some("RuleSetDoesNotExist"));
    /// ```
    pub fn error_code(&self) -> Option<&str> {
        match self {
            SesError::AwsApi { code, .. } => Some(code.as_str()),
            SesError::RateLimited { .. } => Some("Throttling"),
            SesError::MessageRejected { .. } => Some("MessageRejected"),
            SesError::IdentityNotVerified { .. } => Some("MailFromDomainNotVerifiedException"),
            SesError::AlreadyExists { .. } => Some("AlreadyExists"),
            SesError::CannotDelete { .. } => Some("CannotDelete"),
            SesError::RuleDoesNotExist { .. } => Some("RuleDoesNotExist"),
            SesError::RuleSetDoesNotExist { .. } => Some("RuleSetDoesNotExist"),
            SesError::TemplateNotFound { .. } => Some("TemplateDoesNotExist"),
            SesError::ConfigurationSetNotFound { .. } => Some("ConfigurationSetDoesNotExist"),
            SesError::InvalidResource { kind, .. } => Some(kind.error_code()),
            _ => None,
        }
    }

    /// Returns the AWS request ID if available.
    pub fn request_id(&self) -> Option<&str> {
        match self {
            SesError::AwsApi { request_id, .. }
            | SesError::RateLimited { request_id, .. }
            | SesError::QuotaExceeded { request_id, .. }
            | SesError::MessageRejected { request_id, .. }
            | SesError::IdentityNotVerified { request_id, .. }
            | SesError::AlreadyExists { request_id, .. }
            | SesError::CannotDelete { request_id, .. }
            | SesError::RuleDoesNotExist { request_id, .. }
            | SesError::RuleSetDoesNotExist { request_id, .. }
            | SesError::TemplateNotFound { request_id, .. }
            | SesError::ConfigurationSetNotFound { request_id, .. }
            | SesError::InvalidResource { request_id, .. }
            | SesError::Validation { request_id, .. } => request_id.as_deref(),
            _ => None,
        }
    }

    /// Returns the suggested retry delay if available.
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            SesError::RateLimited { retry_after, .. } => *retry_after,
            _ => None,
        }
    }

    /// Shorthand for a [`SesError::Validation`] on a named field.
    pub fn validation(field: &str, message: impl Into<String>) -> Self {
        SesError::Validation {
            message: message.into(),
            field: Some(field.to_string()),
            request_id: None,
        }
    }

    /// Shorthand for a [`SesError::Serialization`].
    pub fn serialization(message: impl Into<String>) -> Self {
        SesError::Serialization {
            message: message.into(),
        }
    }
}

/// Type of quota that was exceeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuotaType {
    /// The 24-hour sending quota.
    Daily,
    /// The per-second sending rate.
    PerSecond,
    /// Too many recipients on one message.
    Recipients,
    /// The message exceeds the maximum size.
    MessageSize,
    /// An account resource limit, e.g. number of receipt rule sets
    /// (`LimitExceeded`).
    Resource,
}

/// AWS resource kinds named by SES "invalid resource" errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    /// `InvalidLambdaFunction`
    LambdaFunction,
    /// `InvalidS3Configuration`
    S3Configuration,
    /// `InvalidSnsTopic`
    SnsTopic,
    /// `InvalidPolicy`
    Policy,
    /// `InvalidTemplate`
    Template,
}

impl ResourceKind {
    /// The SES error code for this kind.
    pub fn error_code(&self) -> &'static str {
        match self {
            ResourceKind::LambdaFunction => "InvalidLambdaFunction",
            ResourceKind::S3Configuration => "InvalidS3Configuration",
            ResourceKind::SnsTopic => "InvalidSnsTopic",
            ResourceKind::Policy => "InvalidPolicy",
            ResourceKind::Template => "InvalidTemplate",
        }
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ResourceKind::LambdaFunction => "Lambda function",
            ResourceKind::S3Configuration => "S3 configuration",
            ResourceKind::SnsTopic => "SNS topic",
            ResourceKind::Policy => "policy",
            ResourceKind::Template => "template",
        };
        f.write_str(s)
    }
}

impl From<std::io::Error> for SesError {
    fn from(err: std::io::Error) -> Self {
        SesError::Transport {
            message: err.to_string(),
            source: Some(Box::new(err)),
            retryable: true,
        }
    }
}

impl From<serde_json::Error> for SesError {
    fn from(err: serde_json::Error) -> Self {
        SesError::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<quick_xml::Error> for SesError {
    fn from(err: quick_xml::Error) -> Self {
        SesError::Serialization {
            message: format!("malformed XML: {}", err),
        }
    }
}

impl From<reqwest::Error> for SesError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            return SesError::Timeout {
                message: err.to_string(),
                retryable: true,
            };
        }

        let retryable = err.is_connect()
            || err.is_request()
            || err.status().map_or(false, |s| s.is_server_error());
        SesError::Transport {
            message: err.to_string(),
            source: Some(Box::new(err)),
            retryable,
        }
    }
}

impl From<tokio::task::JoinError> for SesError {
    fn from(err: tokio::task::JoinError) -> Self {
        if err.is_cancelled() {
            SesError::Cancelled {
                message: "task was aborted".to_string(),
            }
        } else {
            SesError::Unknown {
                message: format!("operation task panicked: {}", err),
            }
        }
    }
}
