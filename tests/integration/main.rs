//! Integration tests using WireMock
//!
//! These tests run the full stack against a mock SES endpoint: query
//! serialization, SigV4 signing, the reqwest transport, retry, XML parsing
//! and error mapping.

mod async_client;
mod errors;
mod identities;
mod receipt;
mod sending;
mod support;
