//! Result alias and extension methods for SES operations.

use super::SesError;
use std::time::Duration;

/// Result type alias for SES operations.
pub type SesResult<T> = Result<T, SesError>;

/// Extension methods for [`SesResult`].
pub trait SesResultExt<T> {
    /// Replace a "does not exist" error with a default value.
    ///
    /// Covers missing templates, configuration sets, receipt rules and
    /// receipt rule sets. Other errors are propagated.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use integrations_aws_ses_classic::error::{SesError, SesResult, SesResultExt};
    ///
    /// let lookup: SesResult<Option<String>> = Err(SesError::RuleSetDoesNotExist {
    ///     name: "inbound".to_string(),
    ///     request_id: None,
    /// });
    /// assert_eq!(lookup.map_not_found(None).unwrap(), None);
    /// ```
    fn map_not_found(self, default: T) -> SesResult<T>;

    /// Returns `true` if the result is a retryable error.
    fn is_retryable(&self) -> bool;

    /// The retry delay suggested by the error, if any.
    fn retry_delay(&self) -> Option<Duration>;

    /// Prefix configuration errors with additional context.
    fn with_config_context(self, context: &str) -> SesResult<T>;
}

impl<T> SesResultExt<T> for SesResult<T> {
    fn map_not_found(self, default: T) -> SesResult<T> {
        match self {
            Err(SesError::TemplateNotFound { .. })
            | Err(SesError::ConfigurationSetNotFound { .. })
            | Err(SesError::RuleDoesNotExist { .. })
            | Err(SesError::RuleSetDoesNotExist { .. }) => Ok(default),
            other => other,
        }
    }

    fn is_retryable(&self) -> bool {
        matches!(self, Err(error) if error.is_retryable())
    }

    fn retry_delay(&self) -> Option<Duration> {
        self.as_ref().err().and_then(SesError::retry_after)
    }

    fn with_config_context(self, context: &str) -> SesResult<T> {
        self.map_err(|error| match error {
            SesError::Configuration { message, source } => SesError::Configuration {
                message: format!("{}: {}", context, message),
                source,
            },
            other => other,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_not_found_for_missing_resources() {
        let missing: SesResult<u32> = Err(SesError::TemplateNotFound {
            name: "welcome".to_string(),
            request_id: None,
        });
        assert_eq!(missing.map_not_found(7).unwrap(), 7);

        let missing: SesResult<u32> = Err(SesError::RuleDoesNotExist {
            name: "archive".to_string(),
            request_id: None,
        });
        assert_eq!(missing.map_not_found(7).unwrap(), 7);
    }

    #[test]
    fn test_map_not_found_keeps_success_and_other_errors() {
        let ok: SesResult<u32> = Ok(1);
        assert_eq!(ok.map_not_found(7).unwrap(), 1);

        let rejected: SesResult<u32> = Err(SesError::MessageRejected {
            message: "nope".to_string(),
            request_id: None,
        });
        assert!(rejected.map_not_found(7).is_err());
    }

    #[test]
    fn test_retry_helpers() {
        let throttled: SesResult<()> = Err(SesError::RateLimited {
            message: "slow".to_string(),
            retry_after: Some(Duration::from_millis(250)),
            request_id: None,
        });
        assert!(throttled.is_retryable());
        assert_eq!(throttled.retry_delay(), Some(Duration::from_millis(250)));

        let ok: SesResult<()> = Ok(());
        assert!(!ok.is_retryable());
        assert_eq!(ok.retry_delay(), None);
    }

    #[test]
    fn test_with_config_context() {
        let result: SesResult<()> = Err(SesError::Configuration {
            message: "missing region".to_string(),
            source: None,
        });
        match result.with_config_context("building client") {
            Err(SesError::Configuration { message, .. }) => {
                assert_eq!(message, "building client: missing region")
            }
            other => panic!("unexpected: {:?}", other),
        }
    }
}
