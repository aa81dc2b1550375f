//! Sending authorization policies attached to identities.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::{require, require_json};
use crate::error::{SesError, SesResult};
use crate::protocol::{parse_map, FromXml, QueryWriter, SesOperation, XmlNode};
use crate::types::ResponseMetadata;

/// Policy names accepted by one `GetIdentityPolicies` call.
pub const MAX_POLICIES_PER_LOOKUP: usize = 20;

empty_result! {
    /// `PutIdentityPolicy` result.
    PutIdentityPolicyResult,
    /// `DeleteIdentityPolicy` result.
    DeleteIdentityPolicyResult,
}

/// Create or replace a sending authorization policy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PutIdentityPolicyRequest {
    /// Identity the policy applies to.
    pub identity: String,
    /// Policy name, unique per identity.
    pub policy_name: String,
    /// Policy document, JSON.
    pub policy: String,
}

impl PutIdentityPolicyRequest {
    /// Attach `policy` to `identity` as `policy_name`.
    pub fn new(identity: impl Into<String>, policy_name: impl Into<String>, policy: impl Into<String>) -> Self {
        Self {
            identity: identity.into(),
            policy_name: policy_name.into(),
            policy: policy.into(),
        }
    }
}

impl SesOperation for PutIdentityPolicyRequest {
    const ACTION: &'static str = "PutIdentityPolicy";
    type Output = PutIdentityPolicyResult;

    fn validate(&self) -> SesResult<()> {
        require("Identity", &self.identity)?;
        require("PolicyName", &self.policy_name)?;
        require_json("Policy", &self.policy)
    }

    fn serialize(&self, writer: &mut QueryWriter) {
        writer
            .string("Identity", self.identity.as_str())
            .string("PolicyName", self.policy_name.as_str())
            .string("Policy", self.policy.as_str());
    }
}

/// Remove a policy. Succeeds when the policy does not exist.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeleteIdentityPolicyRequest {
    /// Identity.
    pub identity: String,
    /// Policy name.
    pub policy_name: String,
}

impl DeleteIdentityPolicyRequest {
    /// Remove `policy_name` from `identity`.
    pub fn new(identity: impl Into<String>, policy_name: impl Into<String>) -> Self {
        Self {
            identity: identity.into(),
            policy_name: policy_name.into(),
        }
    }
}

impl SesOperation for DeleteIdentityPolicyRequest {
    const ACTION: &'static str = "DeleteIdentityPolicy";
    type Output = DeleteIdentityPolicyResult;

    fn validate(&self) -> SesResult<()> {
        require("Identity", &self.identity)?;
        require("PolicyName", &self.policy_name)
    }

    fn serialize(&self, writer: &mut QueryWriter) {
        writer
            .string("Identity", self.identity.as_str())
            .string("PolicyName", self.policy_name.as_str());
    }
}

/// Fetch policy documents by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetIdentityPoliciesRequest {
    /// Identity.
    pub identity: String,
    /// Names to fetch, at most 20.
    pub policy_names: Vec<String>,
}

impl GetIdentityPoliciesRequest {
    /// Fetch `policy_names` of `identity`.
    pub fn new<I, S>(identity: impl Into<String>, policy_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            identity: identity.into(),
            policy_names: policy_names.into_iter().map(Into::into).collect(),
        }
    }
}

impl SesOperation for GetIdentityPoliciesRequest {
    const ACTION: &'static str = "GetIdentityPolicies";
    type Output = GetIdentityPoliciesResult;

    fn validate(&self) -> SesResult<()> {
        require("Identity", &self.identity)?;
        if self.policy_names.len() > MAX_POLICIES_PER_LOOKUP {
            return Err(SesError::validation(
                "PolicyNames",
                format!(
                    "{} policy names exceeds the limit of {}",
                    self.policy_names.len(),
                    MAX_POLICIES_PER_LOOKUP
                ),
            ));
        }
        Ok(())
    }

    fn serialize(&self, writer: &mut QueryWriter) {
        writer
            .string("Identity", self.identity.as_str())
            .string_list("PolicyNames", &self.policy_names);
    }
}

/// Policy documents keyed by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetIdentityPoliciesResult {
    /// Name to JSON document; missing names are absent.
    pub policies: HashMap<String, String>,
    /// Response metadata.
    pub response_metadata: ResponseMetadata,
}

impl FromXml for GetIdentityPoliciesResult {
    fn from_xml(result: &XmlNode, metadata: ResponseMetadata) -> SesResult<Self> {
        Ok(Self {
            policies: parse_map(result, "Policies")?,
            response_metadata: metadata,
        })
    }
}

/// List the policy names attached to an identity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListIdentityPoliciesRequest {
    /// Identity.
    pub identity: String,
}

impl ListIdentityPoliciesRequest {
    /// List policies of `identity`.
    pub fn new(identity: impl Into<String>) -> Self {
        Self {
            identity: identity.into(),
        }
    }
}

impl SesOperation for ListIdentityPoliciesRequest {
    const ACTION: &'static str = "ListIdentityPolicies";
    type Output = ListIdentityPoliciesResult;

    fn validate(&self) -> SesResult<()> {
        require("Identity", &self.identity)
    }

    fn serialize(&self, writer: &mut QueryWriter) {
        writer.string("Identity", self.identity.as_str());
    }
}

/// Policy names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListIdentityPoliciesResult {
    /// Names.
    pub policy_names: Vec<String>,
    /// Response metadata.
    pub response_metadata: ResponseMetadata,
}

impl FromXml for ListIdentityPoliciesResult {
    fn from_xml(result: &XmlNode, metadata: ResponseMetadata) -> SesResult<Self> {
        Ok(Self {
            policy_names: result.string_list("PolicyNames"),
            response_metadata: metadata,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operations::test_support::{envelope, params, parse};

    const POLICY: &str = r#"{"Version":"2008-10-17","Statement":[{"Effect":"Allow","Action":["ses:SendEmail"]}]}"#;

    #[test]
    fn test_put_identity_policy() {
        let request = PutIdentityPolicyRequest::new("example.com", "allow-app", POLICY);
        assert!(request.validate().is_ok());

        let p = params(&request);
        assert_eq!(p.get("Identity"), Some("example.com"));
        assert_eq!(p.get("PolicyName"), Some("allow-app"));
        assert_eq!(p.get("Policy"), Some(POLICY));

        assert!(PutIdentityPolicyRequest::new("example.com", "p", "{").validate().is_err());
        assert!(PutIdentityPolicyRequest::new("example.com", "", POLICY).validate().is_err());
    }

    #[test]
    fn test_get_identity_policies() {
        let request = GetIdentityPoliciesRequest::new("example.com", ["allow-app", "deny-all"]);
        let p = params(&request);
        assert_eq!(p.get("PolicyNames.member.1"), Some("allow-app"));
        assert_eq!(p.get("PolicyNames.member.2"), Some("deny-all"));

        let result = parse::<GetIdentityPoliciesRequest>(&envelope(
            "GetIdentityPolicies",
            "<Policies><entry><key>allow-app</key><value>{&quot;Version&quot;:&quot;2008-10-17&quot;}</value></entry></Policies>",
        ));
        assert_eq!(result.policies["allow-app"], r#"{"Version":"2008-10-17"}"#);

        let many = (0..=MAX_POLICIES_PER_LOOKUP).map(|i| format!("p{}", i));
        assert!(GetIdentityPoliciesRequest::new("example.com", many).validate().is_err());
    }

    #[test]
    fn test_list_and_delete() {
        let result = parse::<ListIdentityPoliciesRequest>(&envelope(
            "ListIdentityPolicies",
            "<PolicyNames><member>allow-app</member></PolicyNames>",
        ));
        assert_eq!(result.policy_names, vec!["allow-app"]);

        let p = params(&DeleteIdentityPolicyRequest::new("example.com", "allow-app"));
        assert_eq!(p.get("Action"), Some("DeleteIdentityPolicy"));
        assert_eq!(p.get("PolicyName"), Some("allow-app"));
    }
}
