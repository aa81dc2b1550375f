//! Outgoing SES requests.

use http::header::{HeaderName, HeaderValue};
use http::HeaderMap;
use uuid::Uuid;

use crate::error::{SesError, SesResult};

/// Content type of every Query API request body.
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded; charset=utf-8";

/// Header carrying the per-call invocation ID.
pub const INVOCATION_ID_HEADER: &str = "amz-sdk-invocation-id";

/// A Query API call: `POST /` with a form-encoded body.
///
/// # Examples
///
/// ```rust
/// use integrations_aws_ses_classic::http::SesRequest;
///
/// let request = SesRequest::new("GetSendQuota", "Action=GetSendQuota&Version=2010-12-01");
/// assert_eq!(request.action(), "GetSendQuota");
/// assert_eq!(request.path(), "/");
/// ```
#[derive(Debug, Clone)]
pub struct SesRequest {
    action: String,
    body: Vec<u8>,
    headers: HeaderMap,
    invocation_id: Uuid,
}

impl SesRequest {
    /// A request for `action` with an already encoded body.
    pub fn new(action: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        let invocation_id = Uuid::new_v4();
        let mut headers = HeaderMap::new();
        headers.insert(
            http::header::CONTENT_TYPE,
            HeaderValue::from_static(FORM_CONTENT_TYPE),
        );
        if let Ok(value) = HeaderValue::from_str(&invocation_id.to_string()) {
            headers.insert(HeaderName::from_static(INVOCATION_ID_HEADER), value);
        }

        Self {
            action: action.into(),
            body: body.into(),
            headers,
            invocation_id,
        }
    }

    /// Add a header.
    pub fn header(mut self, key: impl AsRef<str>, value: impl AsRef<str>) -> SesResult<Self> {
        let name = HeaderName::from_bytes(key.as_ref().as_bytes())
            .map_err(|e| SesError::validation("header", format!("invalid header name: {}", e)))?;
        let value = HeaderValue::from_str(value.as_ref())
            .map_err(|e| SesError::validation("header", format!("invalid header value: {}", e)))?;
        self.headers.insert(name, value);
        Ok(self)
    }

    /// The SES action name.
    pub fn action(&self) -> &str {
        &self.action
    }

    /// Always `POST`.
    pub fn method(&self) -> &'static str {
        "POST"
    }

    /// Always `/`.
    pub fn path(&self) -> &'static str {
        "/"
    }

    /// Request headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Form-encoded body.
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Per-call ID sent as `amz-sdk-invocation-id`.
    pub fn invocation_id(&self) -> Uuid {
        self.invocation_id
    }

    /// `{endpoint}/` without a doubled slash.
    pub fn build_url(&self, endpoint: &str) -> String {
        format!("{}{}", endpoint.trim_end_matches('/'), self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let request = SesRequest::new("ListIdentities", "Action=ListIdentities");
        assert_eq!(request.method(), "POST");
        assert_eq!(request.body(), b"Action=ListIdentities");
        assert_eq!(request.headers()["content-type"], FORM_CONTENT_TYPE);
        assert_eq!(
            request.headers()[INVOCATION_ID_HEADER].to_str().unwrap(),
            request.invocation_id().to_string()
        );
    }

    #[test]
    fn test_invocation_ids_differ() {
        let a = SesRequest::new("X", "");
        let b = SesRequest::new("X", "");
        assert_ne!(a.invocation_id(), b.invocation_id());
    }

    #[test]
    fn test_build_url() {
        let request = SesRequest::new("X", "");
        assert_eq!(
            request.build_url("https://email.us-east-1.amazonaws.com/"),
            "https://email.us-east-1.amazonaws.com/"
        );
        assert_eq!(request.build_url("http://127.0.0.1:8080"), "http://127.0.0.1:8080/");
    }

    #[test]
    fn test_invalid_header() {
        let result = SesRequest::new("X", "").header("bad header", "v");
        assert!(matches!(result, Err(SesError::Validation { .. })));
    }
}
