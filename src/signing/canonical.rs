//! Canonical request pieces.

use http::HeaderMap;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::collections::BTreeMap;

/// RFC 3986 unreserved characters stay literal; `/` too in paths.
const URI_PATH_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~')
    .remove(b'/');

const QUERY_SET: &AsciiSet = &URI_PATH_SET.add(b'/');

/// Percent-encode per SigV4 rules.
pub fn uri_encode(input: &str, encode_slash: bool) -> String {
    let set = if encode_slash { QUERY_SET } else { URI_PATH_SET };
    utf8_percent_encode(input, set).to_string()
}

/// Collapse empty, `.` and `..` segments.
pub fn normalize_uri_path(path: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            s => segments.push(s),
        }
    }

    let mut result = format!("/{}", segments.join("/"));
    if path.ends_with('/') && result.len() > 1 {
        result.push('/');
    }
    result
}

/// Sorted, encoded `key=value` pairs joined by `&`.
pub fn canonical_query_string(query_params: &[(String, String)]) -> String {
    let mut encoded: Vec<(String, String)> = query_params
        .iter()
        .map(|(k, v)| (uri_encode(k, true), uri_encode(v, true)))
        .collect();
    encoded.sort();

    encoded
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&")
}

/// Returns `(canonical_headers, signed_headers)`.
pub fn canonical_headers(headers: &HeaderMap) -> (String, String) {
    let mut signed: BTreeMap<String, Vec<String>> = BTreeMap::new();

    for (name, value) in headers {
        let name = name.as_str().to_lowercase();
        if !should_sign_header(&name) {
            continue;
        }
        let value = value
            .to_str()
            .unwrap_or("")
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ");
        signed.entry(name).or_default().push(value);
    }

    let canonical = signed
        .iter()
        .map(|(name, values)| format!("{}:{}\n", name, values.join(",")))
        .collect::<String>();
    let names = signed.keys().map(String::as_str).collect::<Vec<_>>().join(";");

    (canonical, names)
}

/// `host`, `content-type`, `content-md5` and every `x-amz-*` header.
pub fn should_sign_header(header_name: &str) -> bool {
    let name = header_name.to_lowercase();
    name == "host" || name == "content-type" || name == "content-md5" || name.starts_with("x-amz-")
}
