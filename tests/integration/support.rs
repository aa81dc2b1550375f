//! Shared helpers for the WireMock tests.

use std::time::Duration;

use integrations_aws_ses_classic::{RetryConfig, SesClient, SesConfig};
use wiremock::matchers::{body_string_contains, header_exists, method, path};
use wiremock::{Mock, MockBuilder, MockServer, ResponseTemplate};

/// Config pointing at `server` with fast retries.
pub fn config(server: &MockServer) -> SesConfig {
    SesConfig::builder()
        .region("us-east-1")
        .endpoint(server.uri())
        .credentials("AKIDEXAMPLE", "wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY")
        .retry_config(RetryConfig {
            initial_backoff: Duration::from_millis(1),
            max_backoff: Duration::from_millis(5),
            jitter: false,
            ..RetryConfig::default()
        })
        .max_retries(2)
        .executor_threads(4)
        .build()
        .expect("valid config")
}

/// Direct client pointing at `server`.
pub fn client(server: &MockServer) -> SesClient {
    SesClient::new(config(server)).expect("client")
}

/// A signed Query API call for `action`.
pub fn ses_call(action: &str) -> MockBuilder {
    Mock::given(method("POST"))
        .and(path("/"))
        .and(header_exists("authorization"))
        .and(header_exists("x-amz-date"))
        .and(body_string_contains(format!("Action={}", action)))
        .and(body_string_contains("Version=2010-12-01"))
}

/// A 200 answer wrapping `result` in the standard envelope.
pub fn success(action: &str, result: &str) -> ResponseTemplate {
    let body = format!(
        "<{a}Response xmlns=\"http://ses.amazonaws.com/doc/2010-12-01/\">\n\
         <{a}Result>{r}</{a}Result>\n\
         <ResponseMetadata><RequestId>req-{a}</RequestId></ResponseMetadata>\n\
         </{a}Response>",
        a = action,
        r = result
    );
    ResponseTemplate::new(200).set_body_raw(body, "text/xml")
}

/// An `ErrorResponse` answer.
pub fn failure(status: u16, fault: &str, code: &str, message: &str) -> ResponseTemplate {
    let body = format!(
        "<ErrorResponse xmlns=\"http://ses.amazonaws.com/doc/2010-12-01/\">\
         <Error><Type>{}</Type><Code>{}</Code><Message>{}</Message></Error>\
         <RequestId>err-1</RequestId></ErrorResponse>",
        fault, code, message
    );
    ResponseTemplate::new(status).set_body_raw(body, "text/xml")
}
