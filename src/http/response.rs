//! HTTP responses from SES.

use http::StatusCode;
use std::collections::HashMap;

use crate::error::{map_aws_error, parse_error_response, SesError, SesResult};

/// A buffered SES response.
#[derive(Debug, Clone)]
pub struct SesResponse {
    status: StatusCode,
    headers: HashMap<String, String>,
    body: Vec<u8>,
}

impl SesResponse {
    /// Build a response. Header names are lowercased.
    ///
    /// ```rust
    /// use integrations_aws_ses_classic::http::SesResponse;
    /// use http::StatusCode;
    /// use std::collections::HashMap;
    ///
    /// let response = SesResponse::new(StatusCode::OK, HashMap::new(), b"<A/>".to_vec());
    /// assert!(response.is_success());
    /// ```
    pub fn new(status: StatusCode, headers: HashMap<String, String>, body: Vec<u8>) -> Self {
        let headers = headers
            .into_iter()
            .map(|(k, v)| (k.to_lowercase(), v))
            .collect();
        Self {
            status,
            headers,
            body,
        }
    }

    /// Read a reqwest response to the end.
    pub async fn from_reqwest(response: reqwest::Response) -> SesResult<Self> {
        let status = response.status();

        let mut headers = HashMap::new();
        for (name, value) in response.headers() {
            if let Ok(value) = value.to_str() {
                headers.insert(name.as_str().to_lowercase(), value.to_string());
            }
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| SesError::Transport {
                message: format!("Failed to read response body: {}", e),
                source: Some(Box::new(e)),
                retryable: true,
            })?
            .to_vec();

        Ok(Self::new(status, headers, body))
    }

    /// HTTP status.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Header value by case-insensitive name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_lowercase()).map(String::as_str)
    }

    /// Raw body.
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Body as UTF-8.
    pub fn body_string(&self) -> SesResult<&str> {
        std::str::from_utf8(&self.body).map_err(|e| SesError::Serialization {
            message: format!("response body is not UTF-8: {}", e),
        })
    }

    /// `x-amzn-RequestId` header, if SES sent one.
    pub fn request_id(&self) -> Option<&str> {
        self.header("x-amzn-requestid")
            .or_else(|| self.header("x-amz-request-id"))
    }

    /// Whether the status is 2xx.
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Convert a failed response into an [`SesError`].
    ///
    /// XML error bodies are mapped by code; anything else falls back to a
    /// status based [`SesError::AwsApi`].
    pub fn into_error(self) -> SesError {
        let status = self.status.as_u16();

        if let Ok(mut parsed) = self.body_string().and_then(parse_error_response) {
            if parsed.request_id.is_none() {
                parsed.request_id = self.request_id().map(str::to_string);
            }
            return map_aws_error(&parsed, status);
        }

        let message = match self.body_string() {
            Ok(body) if !body.trim().is_empty() => body.trim().to_string(),
            _ => self
                .status
                .canonical_reason()
                .unwrap_or("Unknown error")
                .to_string(),
        };

        SesError::AwsApi {
            code: status.to_string(),
            message,
            request_id: self.request_id().map(str::to_string),
            retryable: crate::error::is_retryable_status(status),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16, body: &str) -> SesResponse {
        SesResponse::new(
            StatusCode::from_u16(status).unwrap(),
            HashMap::from([("X-Amzn-RequestId".to_string(), "hdr-id".to_string())]),
            body.as_bytes().to_vec(),
        )
    }

    #[test]
    fn test_request_id_header() {
        assert_eq!(response(200, "").request_id(), Some("hdr-id"));
    }

    #[test]
    fn test_xml_error_is_mapped() {
        let body = "<ErrorResponse><Error><Type>Sender</Type><Code>MessageRejected</Code>\
                    <Message>Email address is not verified.</Message></Error>\
                    <RequestId>body-id</RequestId></ErrorResponse>";
        match response(400, body).into_error() {
            SesError::MessageRejected { message, request_id } => {
                assert_eq!(message, "Email address is not verified.");
                assert_eq!(request_id.as_deref(), Some("body-id"));
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_non_xml_error_falls_back_to_status() {
        let err = response(503, "").into_error();
        match &err {
            SesError::AwsApi { code, message, request_id, retryable } => {
                assert_eq!(code, "503");
                assert_eq!(message, "Service Unavailable");
                assert_eq!(request_id.as_deref(), Some("hdr-id"));
                assert!(*retryable);
            }
            other => panic!("unexpected: {:?}", other),
        }

        let err = response(403, "Forbidden by proxy").into_error();
        assert!(!err.is_retryable());
    }
}
