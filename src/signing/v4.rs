//! SigV4 signing.
//!
//! Reference: <https://docs.aws.amazon.com/general/latest/gr/signature-version-4.html>

use super::cache::SigningKeyCache;
use super::canonical::{canonical_headers, canonical_query_string, normalize_uri_path, uri_encode};
use super::error::SigningError;
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use http::header::{HeaderName, HeaderValue};
use http::HeaderMap;
use sha2::{Digest, Sha256};
use std::sync::Arc;

type HmacSha256 = Hmac<Sha256>;

/// Algorithm identifier.
pub const AWS_ALGORITHM: &str = "AWS4-HMAC-SHA256";

/// Keys and scope for signing.
#[derive(Clone)]
pub struct SigningParams {
    /// Region of the credential scope.
    pub region: String,
    /// Service of the credential scope.
    pub service: String,
    /// Access key ID.
    pub access_key_id: String,
    /// Secret access key.
    pub secret_access_key: String,
    /// Session token for temporary credentials.
    pub session_token: Option<String>,
}

impl SigningParams {
    /// Parameters with empty keys.
    pub fn new(region: impl Into<String>, service: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            service: service.into(),
            access_key_id: String::new(),
            secret_access_key: String::new(),
            session_token: None,
        }
    }

    /// Set the access key ID.
    pub fn with_access_key(mut self, access_key_id: impl Into<String>) -> Self {
        self.access_key_id = access_key_id.into();
        self
    }

    /// Set the secret key.
    pub fn with_secret_key(mut self, secret_access_key: impl Into<String>) -> Self {
        self.secret_access_key = secret_access_key.into();
        self
    }

    /// Set the session token.
    pub fn with_session_token(mut self, session_token: impl Into<String>) -> Self {
        self.session_token = Some(session_token.into());
        self
    }
}

impl std::fmt::Debug for SigningParams {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningParams")
            .field("region", &self.region)
            .field("service", &self.service)
            .field("access_key_id", &self.access_key_id)
            .finish_non_exhaustive()
    }
}

/// Lowercase hex SHA-256.
pub fn sha256_hex(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}

fn hmac_sha256(key: &[u8], data: &[u8]) -> Result<Vec<u8>, SigningError> {
    let mut mac = HmacSha256::new_from_slice(key).map_err(|e| SigningError::SigningFailed {
        message: format!("invalid HMAC key: {}", e),
    })?;
    mac.update(data);
    Ok(mac.finalize().into_bytes().to_vec())
}

/// Derive the signing key for a day, region and service.
pub fn derive_signing_key(
    secret_key: &str,
    date_stamp: &str,
    region: &str,
    service: &str,
) -> Result<Vec<u8>, SigningError> {
    let k_date = hmac_sha256(format!("AWS4{}", secret_key).as_bytes(), date_stamp.as_bytes())?;
    let k_region = hmac_sha256(&k_date, region.as_bytes())?;
    let k_service = hmac_sha256(&k_region, service.as_bytes())?;
    hmac_sha256(&k_service, b"aws4_request")
}

/// `YYYYMMDDTHHMMSSZ`
pub fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.format("%Y%m%dT%H%M%SZ").to_string()
}

/// `YYYYMMDD`
pub fn format_date_stamp(dt: &DateTime<Utc>) -> String {
    dt.format("%Y%m%d").to_string()
}

/// `date/region/service/aws4_request`
pub fn build_credential_scope(date_stamp: &str, region: &str, service: &str) -> String {
    format!("{}/{}/{}/aws4_request", date_stamp, region, service)
}

fn insert_header(headers: &mut HeaderMap, name: &'static str, value: &str) -> Result<(), SigningError> {
    let value = HeaderValue::from_str(value).map_err(|_| SigningError::SigningFailed {
        message: format!("invalid value for {}", name),
    })?;
    headers.insert(HeaderName::from_static(name), value);
    Ok(())
}

/// Sign a request in place.
///
/// `headers` must already contain `host`. Adds `x-amz-date`,
/// `x-amz-security-token` (for temporary credentials) and `authorization`.
#[allow(clippy::too_many_arguments)]
pub fn sign_request(
    method: &str,
    uri: &str,
    query_params: &[(String, String)],
    headers: &mut HeaderMap,
    payload: Option<&[u8]>,
    params: &SigningParams,
    timestamp: &DateTime<Utc>,
    cache: Option<Arc<SigningKeyCache>>,
) -> Result<(), SigningError> {
    if params.access_key_id.is_empty() || params.secret_access_key.is_empty() {
        return Err(SigningError::SigningFailed {
            message: "access key ID and secret access key are required".to_string(),
        });
    }
    if !headers.contains_key(http::header::HOST) {
        return Err(SigningError::MissingHeader {
            header: "host".to_string(),
        });
    }

    let date_stamp = format_date_stamp(timestamp);
    let amz_date = format_datetime(timestamp);
    let payload_hash = sha256_hex(payload.unwrap_or_default());

    insert_header(headers, "x-amz-date", &amz_date)?;
    if let Some(token) = &params.session_token {
        insert_header(headers, "x-amz-security-token", token)?;
    }

    let (canonical_header_block, signed_headers) = canonical_headers(headers);
    let canonical_request = format!(
        "{}\n{}\n{}\n{}\n{}\n{}",
        method.to_uppercase(),
        uri_encode(&normalize_uri_path(uri), false),
        canonical_query_string(query_params),
        canonical_header_block,
        signed_headers,
        payload_hash
    );

    let credential_scope = build_credential_scope(&date_stamp, &params.region, &params.service);
    let string_to_sign = format!(
        "{}\n{}\n{}\n{}",
        AWS_ALGORITHM,
        amz_date,
        credential_scope,
        sha256_hex(canonical_request.as_bytes())
    );

    let cached = cache.as_ref().and_then(|c| {
        c.get(&params.access_key_id, &params.region, &params.service, &date_stamp)
    });
    let signing_key = match cached {
        Some(key) => key,
        None => {
            let key = derive_signing_key(
                &params.secret_access_key,
                &date_stamp,
                &params.region,
                &params.service,
            )?;
            if let Some(c) = &cache {
                c.put(
                    &params.access_key_id,
                    &params.region,
                    &params.service,
                    &date_stamp,
                    key.clone(),
                );
            }
            key
        }
    };

    let signature = hex::encode(hmac_sha256(&signing_key, string_to_sign.as_bytes())?);
    let authorization = format!(
        "{} Credential={}/{}, SignedHeaders={}, Signature={}",
        AWS_ALGORITHM, params.access_key_id, credential_scope, signed_headers, signature
    );
    insert_header(headers, "authorization", &authorization)
}
