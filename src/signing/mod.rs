//! AWS Signature Version 4.
//!
//! Every SES Query API request is a form-encoded `POST /` signed with SigV4
//! for the `ses` service. The signer adds `x-amz-date`, the optional
//! `x-amz-security-token` and the `authorization` header to the request.
//!
//! - `canonical`: canonical URI, query string and header helpers
//! - `v4`: string-to-sign, key derivation and [`sign_request`]
//! - `cache`: per-day signing key cache
//!
//! ```
//! use integrations_aws_ses_classic::signing::{sign_request, SigningParams};
//! use http::HeaderMap;
//! use chrono::Utc;
//!
//! let params = SigningParams::new("us-east-1", "ses")
//!     .with_access_key("AKIDEXAMPLE")
//!     .with_secret_key("wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY");
//!
//! let mut headers = HeaderMap::new();
//! headers.insert("host", "email.us-east-1.amazonaws.com".parse().unwrap());
//! headers.insert(
//!     "content-type",
//!     "application/x-www-form-urlencoded; charset=utf-8".parse().unwrap(),
//! );
//!
//! sign_request(
//!     "POST",
//!     "/",
//!     &[],
//!     &mut headers,
//!     Some(b"Action=GetSendQuota&Version=2010-12-01"),
//!     &params,
//!     &Utc::now(),
//!     None,
//! )
//! .unwrap();
//!
//! assert!(headers.contains_key("authorization"));
//! ```

mod cache;
mod canonical;
mod error;
mod v4;

pub use cache::SigningKeyCache;
pub use canonical::{canonical_headers, canonical_query_string, normalize_uri_path, should_sign_header, uri_encode};
pub use error::SigningError;
pub use v4::{
    build_credential_scope, derive_signing_key, format_date_stamp, format_datetime, sha256_hex,
    sign_request, SigningParams, AWS_ALGORITHM,
};
