//! Mapping of SES Query API error responses onto [`SesError`].
//!
//! SES answers failed requests with an XML document of the form:
//!
//! ```xml
//! <ErrorResponse xmlns="http://ses.amazonaws.com/doc/2010-12-01/">
//!   <Error>
//!     <Type>Sender</Type>
//!     <Code>RuleSetDoesNotExist</Code>
//!     <Message>Rule set does not exist: inbound</Message>
//!     <Name>inbound</Name>
//!   </Error>
//!   <RequestId>5f1c3b0e-2d5a-11e7-93ae-92361f002671</RequestId>
//! </ErrorResponse>
//! ```
//!
//! Some codes carry an extra element naming the offending resource (`Name`,
//! `TemplateName`, `ConfigurationSetName`, `Bucket`, `Topic`, `FunctionArn`);
//! it is captured in [`AwsErrorResponse::resource`].

use super::{QuotaType, ResourceKind, SesError};
use crate::protocol::XmlNode;
use std::time::Duration;

/// Elements SES uses to name the resource an error refers to.
const RESOURCE_ELEMENTS: &[&str] = &[
    "Name",
    "TemplateName",
    "ConfigurationSetName",
    "Bucket",
    "Topic",
    "FunctionArn",
];

/// A parsed SES error response.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AwsErrorResponse {
    /// `Sender` or `Receiver`.
    pub error_type: Option<String>,
    /// The SES error code, e.g. `MessageRejected`.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Name of the resource the error refers to, when SES includes one.
    pub resource: Option<String>,
    /// AWS request ID for debugging and support.
    pub request_id: Option<String>,
}

impl AwsErrorResponse {
    /// Whether SES attributes the failure to its own side.
    pub fn is_receiver_fault(&self) -> bool {
        self.error_type.as_deref() == Some("Receiver")
    }
}

/// Parse an SES XML error body.
///
/// # Errors
///
/// Returns [`SesError::Serialization`] if the body is not XML or does not
/// contain an `Error` element.
///
/// # Examples
///
/// ```rust
/// use integrations_aws_ses_classic::error::parse_error_response;
///
/// let body = "<ErrorResponse><Error><Type>Sender</Type><Code>MessageRejected</Code>\
///             <Message>Email address is not verified.</Message></Error>\
///             <RequestId>abc</RequestId></ErrorResponse>";
/// let error = parse_error_response(body).unwrap();
/// assert_eq!(error.code, "MessageRejected");
/// assert_eq!(error.request_id.as_deref(), Some("abc"));
/// ```
pub fn parse_error_response(body: &str) -> Result<AwsErrorResponse, SesError> {
    let root = XmlNode::parse(body)?;

    // Some gateways answer with a bare <Error> root.
    let error = if root.name == "Error" {
        &root
    } else {
        root.child("Error")
            .ok_or_else(|| SesError::serialization("error response has no Error element"))?
    };

    let resource = RESOURCE_ELEMENTS
        .iter()
        .find_map(|name| error.text_of(name));

    Ok(AwsErrorResponse {
        error_type: error.text_of("Type"),
        code: error.text_of("Code").unwrap_or_default(),
        message: error.text_of("Message").unwrap_or_default(),
        resource,
        request_id: root.text_of("RequestId").or_else(|| error.text_of("RequestId")),
    })
}

/// Map an SES error response to a specific [`SesError`] variant.
///
/// Codes without a dedicated variant become [`SesError::AwsApi`] and are
/// retryable when the HTTP status is (see [`is_retryable_status`]) or SES
/// reports a `Receiver` fault.
pub fn map_aws_error(error: &AwsErrorResponse, status_code: u16) -> SesError {
    let name = || {
        error
            .resource
            .clone()
            .unwrap_or_else(|| trailing_name(&error.message))
    };

    let request_id = error.request_id.clone();

    match error.code.as_str() {
        "Throttling" | "ThrottlingException" => throttling_error(error, status_code),

        "MessageRejected" => SesError::MessageRejected {
            message: error.message.clone(),
            request_id,
        },

        "MailFromDomainNotVerifiedException" | "MailFromDomainNotVerified" => {
            SesError::IdentityNotVerified {
                identity: error.resource.clone().unwrap_or_else(|| error.message.clone()),
                request_id,
            }
        }

        "AlreadyExists" | "ConfigurationSetAlreadyExists" => {
            SesError::AlreadyExists {
                name: name(),
                request_id,
            }
        }
        "CannotDelete" => SesError::CannotDelete {
            name: name(),
            request_id,
        },
        "RuleDoesNotExist" => SesError::RuleDoesNotExist {
            name: name(),
            request_id,
        },
        "RuleSetDoesNotExist" => SesError::RuleSetDoesNotExist {
            name: name(),
            request_id,
        },
        "TemplateDoesNotExist" => SesError::TemplateNotFound {
            name: name(),
            request_id,
        },
        "ConfigurationSetDoesNotExist" => SesError::ConfigurationSetNotFound {
            name: name(),
            request_id,
        },

        "LimitExceeded" => SesError::QuotaExceeded {
            message: error.message.clone(),
            quota_type: QuotaType::Resource,
            request_id,
        },

        "InvalidLambdaFunction" => invalid(ResourceKind::LambdaFunction, error),
        "InvalidS3Configuration" => invalid(ResourceKind::S3Configuration, error),
        "InvalidSnsTopic" => invalid(ResourceKind::SnsTopic, error),
        "InvalidPolicy" => invalid(ResourceKind::Policy, error),
        "InvalidTemplate" => invalid(ResourceKind::Template, error),

        "InvalidParameterValue" | "InvalidParameterCombination" | "MissingParameter"
        | "ValidationError" | "InvalidRenderingParameter" | "MissingRenderingAttribute" => {
            SesError::Validation {
                message: error.message.clone(),
                field: None,
                request_id,
            }
        }

        "InternalFailure" | "ServiceUnavailable" => SesError::AwsApi {
            code: error.code.clone(),
            message: error.message.clone(),
            request_id,
            retryable: true,
        },

        _ => SesError::AwsApi {
            code: error.code.clone(),
            message: error.message.clone(),
            request_id,
            retryable: is_retryable_status(status_code) || error.is_receiver_fault(),
        },
    }
}

/// SES reports both the sending rate and the daily quota as `Throttling`;
/// only the rate limit is worth retrying.
fn throttling_error(error: &AwsErrorResponse, status_code: u16) -> SesError {
    let lower = error.message.to_lowercase();
    if lower.contains("daily message quota") || lower.contains("24 hour") {
        SesError::QuotaExceeded {
            message: error.message.clone(),
            quota_type: QuotaType::Daily,
            request_id: error.request_id.clone(),
        }
    } else {
        SesError::RateLimited {
            message: error.message.clone(),
            retry_after: retry_delay_for_status(status_code),
            request_id: error.request_id.clone(),
        }
    }
}

fn invalid(kind: ResourceKind, error: &AwsErrorResponse) -> SesError {
    SesError::InvalidResource {
        kind,
        message: error.message.clone(),
        request_id: error.request_id.clone(),
    }
}

/// Messages such as "Rule set does not exist: inbound" end in the name.
fn trailing_name(message: &str) -> String {
    match message.rsplit_once(": ") {
        Some((_, name)) => name.trim().trim_end_matches('.').to_string(),
        None => String::new(),
    }
}

/// Determine if an HTTP status code indicates a retryable error.
pub fn is_retryable_status(status_code: u16) -> bool {
    matches!(status_code, 500..=599 | 408 | 429)
}

fn retry_delay_for_status(status_code: u16) -> Option<Duration> {
    match status_code {
        429 => Some(Duration::from_secs(1)),
        503 => Some(Duration::from_secs(2)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn response(code: &str, message: &str) -> AwsErrorResponse {
        AwsErrorResponse {
            error_type: Some("Sender".to_string()),
            code: code.to_string(),
            message: message.to_string(),
            resource: None,
            request_id: Some("req-1".to_string()),
        }
    }

    #[test]
    fn test_parse_error_response() {
        let body = r#"<ErrorResponse xmlns="http://ses.amazonaws.com/doc/2010-12-01/">
              <Error>
                <Type>Sender</Type>
                <Code>RuleSetDoesNotExist</Code>
                <Message>Rule set does not exist: inbound</Message>
                <Name>inbound</Name>
              </Error>
              <RequestId>7c0f5bd3-9d0c-11e7-8a44-9b7c3b2e4a11</RequestId>
            </ErrorResponse>"#;

        let parsed = parse_error_response(body).unwrap();
        assert_eq!(parsed.error_type.as_deref(), Some("Sender"));
        assert_eq!(parsed.code, "RuleSetDoesNotExist");
        assert_eq!(parsed.resource.as_deref(), Some("inbound"));
        assert_eq!(
            parsed.request_id.as_deref(),
            Some("7c0f5bd3-9d0c-11e7-8a44-9b7c3b2e4a11")
        );
    }

    #[test]
    fn test_parse_error_response_rejects_non_error_document() {
        let result = parse_error_response("<SendEmailResponse/>");
        assert!(matches!(result, Err(SesError::Serialization { .. })));
    }

    #[test]
    fn test_parse_error_response_rejects_garbage() {
        assert!(parse_error_response("not xml at all <<").is_err());
    }

    #[rstest]
    #[case("MessageRejected", "MessageRejected")]
    #[case("AlreadyExists", "AlreadyExists")]
    #[case("CannotDelete", "CannotDelete")]
    #[case("RuleDoesNotExist", "RuleDoesNotExist")]
    #[case("RuleSetDoesNotExist", "RuleSetDoesNotExist")]
    #[case("TemplateDoesNotExist", "TemplateDoesNotExist")]
    #[case("ConfigurationSetDoesNotExist", "ConfigurationSetDoesNotExist")]
    #[case("InvalidLambdaFunction", "InvalidLambdaFunction")]
    #[case("InvalidS3Configuration", "InvalidS3Configuration")]
    #[case("InvalidSnsTopic", "InvalidSnsTopic")]
    #[case("InvalidPolicy", "InvalidPolicy")]
    #[case("MailFromDomainNotVerifiedException", "MailFromDomainNotVerifiedException")]
    fn test_mapped_codes_round_trip_error_code(#[case] code: &str, #[case] expected: &str) {
        let error = map_aws_error(&response(code, "something failed"), 400);
        assert_eq!(error.error_code(), Some(expected));
        assert_eq!(error.request_id(), Some("req-1"));
        assert!(!error.is_retryable());
    }

    #[test]
    fn test_resource_name_from_element_or_message() {
        let mut with_element = response("RuleDoesNotExist", "Rule does not exist: ignored");
        with_element.resource = Some("archive".to_string());
        match map_aws_error(&with_element, 400) {
            SesError::RuleDoesNotExist { name, .. } => assert_eq!(name, "archive"),
            other => panic!("unexpected: {:?}", other),
        }

        let from_message = response("TemplateDoesNotExist", "Template MyTemplate does not exist: welcome");
        match map_aws_error(&from_message, 400) {
            SesError::TemplateNotFound { name, .. } => assert_eq!(name, "welcome"),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_throttling_distinguishes_rate_from_daily_quota() {
        let rate = map_aws_error(&response("Throttling", "Maximum sending rate exceeded."), 400);
        assert!(matches!(rate, SesError::RateLimited { .. }));
        assert!(rate.is_retryable());

        let daily = map_aws_error(&response("Throttling", "Daily message quota exceeded."), 400);
        assert!(matches!(
            daily,
            SesError::QuotaExceeded {
                quota_type: QuotaType::Daily,
                ..
            }
        ));
        assert!(!daily.is_retryable());
    }

    #[test]
    fn test_limit_exceeded_is_resource_quota() {
        let error = map_aws_error(&response("LimitExceeded", "Too many rule sets"), 400);
        assert!(matches!(
            error,
            SesError::QuotaExceeded {
                quota_type: QuotaType::Resource,
                ..
            }
        ));
    }

    #[test]
    fn test_unmapped_code_falls_back_to_status() {
        let error = map_aws_error(&response("SomethingNew", "eh"), 503);
        assert!(error.is_retryable());
        assert_eq!(error.request_id(), Some("req-1"));

        let error = map_aws_error(&response("SomethingNew", "eh"), 400);
        assert!(!error.is_retryable());

        let mut receiver = response("SomethingNew", "eh");
        receiver.error_type = Some("Receiver".to_string());
        assert!(map_aws_error(&receiver, 400).is_retryable());
    }

    #[rstest]
    #[case(500, true)]
    #[case(503, true)]
    #[case(408, true)]
    #[case(429, true)]
    #[case(400, false)]
    #[case(403, false)]
    fn test_is_retryable_status(#[case] status: u16, #[case] expected: bool) {
        assert_eq!(is_retryable_status(status), expected);
    }
}
