//! Inbound mail: IP filters, receipt rule sets and rules.

use serde::{Deserialize, Serialize};

use super::require;
use crate::error::{SesError, SesResult};
use crate::protocol::{parse_child, parse_members, FromXml, QueryWriter, SesOperation, XmlNode};
use crate::types::{ReceiptFilter, ReceiptRule, ReceiptRuleSetMetadata, ResponseMetadata};

empty_result! {
    /// `CreateReceiptFilter` result.
    CreateReceiptFilterResult,
    /// `DeleteReceiptFilter` result.
    DeleteReceiptFilterResult,
    /// `CreateReceiptRuleSet` result.
    CreateReceiptRuleSetResult,
    /// `CloneReceiptRuleSet` result.
    CloneReceiptRuleSetResult,
    /// `DeleteReceiptRuleSet` result.
    DeleteReceiptRuleSetResult,
    /// `ReorderReceiptRuleSet` result.
    ReorderReceiptRuleSetResult,
    /// `SetActiveReceiptRuleSet` result.
    SetActiveReceiptRuleSetResult,
    /// `CreateReceiptRule` result.
    CreateReceiptRuleResult,
    /// `DeleteReceiptRule` result.
    DeleteReceiptRuleResult,
    /// `SetReceiptRulePosition` result.
    SetReceiptRulePositionResult,
    /// `UpdateReceiptRule` result.
    UpdateReceiptRuleResult,
}

fn check_rule(rule: &ReceiptRule) -> SesResult<()> {
    require("Rule.Name", &rule.name)
}

/// Create an IP address filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateReceiptFilterRequest {
    /// The filter.
    pub filter: ReceiptFilter,
}

impl CreateReceiptFilterRequest {
    /// Create `filter`.
    pub fn new(filter: ReceiptFilter) -> Self {
        Self { filter }
    }
}

impl SesOperation for CreateReceiptFilterRequest {
    const ACTION: &'static str = "CreateReceiptFilter";
    type Output = CreateReceiptFilterResult;

    fn validate(&self) -> SesResult<()> {
        require("Filter.Name", &self.filter.name)?;
        require("Filter.IpFilter.Cidr", &self.filter.ip_filter.cidr)
    }

    fn serialize(&self, writer: &mut QueryWriter) {
        writer.structure("Filter", &self.filter);
    }
}

/// Delete an IP address filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeleteReceiptFilterRequest {
    /// Filter name.
    pub filter_name: String,
}

impl DeleteReceiptFilterRequest {
    /// Delete `filter_name`.
    pub fn new(filter_name: impl Into<String>) -> Self {
        Self {
            filter_name: filter_name.into(),
        }
    }
}

impl SesOperation for DeleteReceiptFilterRequest {
    const ACTION: &'static str = "DeleteReceiptFilter";
    type Output = DeleteReceiptFilterResult;

    fn validate(&self) -> SesResult<()> {
        require("FilterName", &self.filter_name)
    }

    fn serialize(&self, writer: &mut QueryWriter) {
        writer.string("FilterName", self.filter_name.as_str());
    }
}

/// List every IP address filter of the account.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListReceiptFiltersRequest;

impl SesOperation for ListReceiptFiltersRequest {
    const ACTION: &'static str = "ListReceiptFilters";
    type Output = ListReceiptFiltersResult;

    fn serialize(&self, _writer: &mut QueryWriter) {}
}

/// IP address filters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListReceiptFiltersResult {
    /// Filters.
    pub filters: Vec<ReceiptFilter>,
    /// Response metadata.
    pub response_metadata: ResponseMetadata,
}

impl FromXml for ListReceiptFiltersResult {
    fn from_xml(result: &XmlNode, metadata: ResponseMetadata) -> SesResult<Self> {
        Ok(Self {
            filters: parse_members(result, "Filters")?,
            response_metadata: metadata,
        })
    }
}

/// Request that names a single rule set.
macro_rules! rule_set_request {
    ($(#[$meta:meta])* $request:ident => $result:ident, $action:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(rename_all = "PascalCase")]
        pub struct $request {
            /// Rule set name.
            pub rule_set_name: String,
        }

        impl $request {
            /// Request for `rule_set_name`.
            pub fn new(rule_set_name: impl Into<String>) -> Self {
                Self {
                    rule_set_name: rule_set_name.into(),
                }
            }
        }

        impl SesOperation for $request {
            const ACTION: &'static str = $action;
            type Output = $result;

            fn validate(&self) -> SesResult<()> {
                require("RuleSetName", &self.rule_set_name)
            }

            fn serialize(&self, writer: &mut QueryWriter) {
                writer.string("RuleSetName", self.rule_set_name.as_str());
            }
        }
    };
}

rule_set_request! {
    /// Create an empty rule set.
    CreateReceiptRuleSetRequest => CreateReceiptRuleSetResult, "CreateReceiptRuleSet"
}

rule_set_request! {
    /// Delete an inactive rule set and its rules.
    DeleteReceiptRuleSetRequest => DeleteReceiptRuleSetResult, "DeleteReceiptRuleSet"
}

rule_set_request! {
    /// Read a rule set and its rules.
    DescribeReceiptRuleSetRequest => DescribeReceiptRuleSetResult, "DescribeReceiptRuleSet"
}

/// A rule set with its rules, in evaluation order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DescribeReceiptRuleSetResult {
    /// Name and creation time; `None` when there is no active set.
    pub metadata: Option<ReceiptRuleSetMetadata>,
    /// Rules.
    pub rules: Vec<ReceiptRule>,
    /// Response metadata.
    pub response_metadata: ResponseMetadata,
}

impl FromXml for DescribeReceiptRuleSetResult {
    fn from_xml(result: &XmlNode, metadata: ResponseMetadata) -> SesResult<Self> {
        Ok(Self {
            metadata: parse_child(result, "Metadata")?,
            rules: parse_members(result, "Rules")?,
            response_metadata: metadata,
        })
    }
}

/// `DescribeActiveReceiptRuleSet` result.
pub type DescribeActiveReceiptRuleSetResult = DescribeReceiptRuleSetResult;

/// Copy a rule set and all its rules under a new name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CloneReceiptRuleSetRequest {
    /// Name of the copy.
    pub rule_set_name: String,
    /// Rule set to copy.
    pub original_rule_set_name: String,
}

impl CloneReceiptRuleSetRequest {
    /// Clone `original_rule_set_name` as `rule_set_name`.
    pub fn new(rule_set_name: impl Into<String>, original_rule_set_name: impl Into<String>) -> Self {
        Self {
            rule_set_name: rule_set_name.into(),
            original_rule_set_name: original_rule_set_name.into(),
        }
    }
}

impl SesOperation for CloneReceiptRuleSetRequest {
    const ACTION: &'static str = "CloneReceiptRuleSet";
    type Output = CloneReceiptRuleSetResult;

    fn validate(&self) -> SesResult<()> {
        require("RuleSetName", &self.rule_set_name)?;
        require("OriginalRuleSetName", &self.original_rule_set_name)
    }

    fn serialize(&self, writer: &mut QueryWriter) {
        writer
            .string("RuleSetName", self.rule_set_name.as_str())
            .string("OriginalRuleSetName", self.original_rule_set_name.as_str());
    }
}

/// Read the active rule set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DescribeActiveReceiptRuleSetRequest;

impl SesOperation for DescribeActiveReceiptRuleSetRequest {
    const ACTION: &'static str = "DescribeActiveReceiptRuleSet";
    type Output = DescribeActiveReceiptRuleSetResult;

    fn serialize(&self, _writer: &mut QueryWriter) {}
}

/// List rule sets, 100 per page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListReceiptRuleSetsRequest {
    /// Token from a previous page.
    pub next_token: Option<String>,
}

impl ListReceiptRuleSetsRequest {
    /// First page.
    pub fn new() -> Self {
        Self::default()
    }

    /// Continue from a previous page.
    pub fn with_next_token(mut self, token: impl Into<String>) -> Self {
        self.next_token = Some(token.into());
        self
    }
}

impl SesOperation for ListReceiptRuleSetsRequest {
    const ACTION: &'static str = "ListReceiptRuleSets";
    type Output = ListReceiptRuleSetsResult;

    fn serialize(&self, writer: &mut QueryWriter) {
        writer.opt_string("NextToken", self.next_token.as_deref());
    }
}

/// One page of rule sets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListReceiptRuleSetsResult {
    /// Rule sets.
    pub rule_sets: Vec<ReceiptRuleSetMetadata>,
    /// Present when more pages follow.
    pub next_token: Option<String>,
    /// Response metadata.
    pub response_metadata: ResponseMetadata,
}

impl FromXml for ListReceiptRuleSetsResult {
    fn from_xml(result: &XmlNode, metadata: ResponseMetadata) -> SesResult<Self> {
        Ok(Self {
            rule_sets: parse_members(result, "RuleSets")?,
            next_token: result.text_of("NextToken"),
            response_metadata: metadata,
        })
    }
}

/// Replace the order of every rule in a rule set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ReorderReceiptRuleSetRequest {
    /// Rule set name.
    pub rule_set_name: String,
    /// All rule names, in the new order.
    pub rule_names: Vec<String>,
}

impl ReorderReceiptRuleSetRequest {
    /// Reorder `rule_set_name` to `rule_names`.
    pub fn new<I, S>(rule_set_name: impl Into<String>, rule_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            rule_set_name: rule_set_name.into(),
            rule_names: rule_names.into_iter().map(Into::into).collect(),
        }
    }
}

impl SesOperation for ReorderReceiptRuleSetRequest {
    const ACTION: &'static str = "ReorderReceiptRuleSet";
    type Output = ReorderReceiptRuleSetResult;

    fn validate(&self) -> SesResult<()> {
        require("RuleSetName", &self.rule_set_name)?;
        if self.rule_names.is_empty() {
            return Err(SesError::validation("RuleNames", "at least one rule name is required"));
        }
        Ok(())
    }

    fn serialize(&self, writer: &mut QueryWriter) {
        writer
            .string("RuleSetName", self.rule_set_name.as_str())
            .string_list("RuleNames", &self.rule_names);
    }
}

/// Activate a rule set, or deactivate all of them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SetActiveReceiptRuleSetRequest {
    /// Rule set to activate; `None` disables receiving.
    pub rule_set_name: Option<String>,
}

impl SetActiveReceiptRuleSetRequest {
    /// Activate `rule_set_name`.
    pub fn activate(rule_set_name: impl Into<String>) -> Self {
        Self {
            rule_set_name: Some(rule_set_name.into()),
        }
    }

    /// Deactivate the active rule set.
    pub fn deactivate() -> Self {
        Self::default()
    }
}

impl SesOperation for SetActiveReceiptRuleSetRequest {
    const ACTION: &'static str = "SetActiveReceiptRuleSet";
    type Output = SetActiveReceiptRuleSetResult;

    fn serialize(&self, writer: &mut QueryWriter) {
        writer.opt_string("RuleSetName", self.rule_set_name.as_deref());
    }
}

/// Add a rule to a rule set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateReceiptRuleRequest {
    /// Rule set name.
    pub rule_set_name: String,
    /// Insert after this rule; first position when unset.
    pub after: Option<String>,
    /// The rule.
    pub rule: ReceiptRule,
}

impl CreateReceiptRuleRequest {
    /// Add `rule` at the start of `rule_set_name`.
    pub fn new(rule_set_name: impl Into<String>, rule: ReceiptRule) -> Self {
        Self {
            rule_set_name: rule_set_name.into(),
            after: None,
            rule,
        }
    }

    /// Insert after another rule.
    pub fn after(mut self, rule_name: impl Into<String>) -> Self {
        self.after = Some(rule_name.into());
        self
    }
}

impl SesOperation for CreateReceiptRuleRequest {
    const ACTION: &'static str = "CreateReceiptRule";
    type Output = CreateReceiptRuleResult;

    fn validate(&self) -> SesResult<()> {
        require("RuleSetName", &self.rule_set_name)?;
        check_rule(&self.rule)
    }

    fn serialize(&self, writer: &mut QueryWriter) {
        writer
            .string("RuleSetName", self.rule_set_name.as_str())
            .opt_string("After", self.after.as_deref())
            .structure("Rule", &self.rule);
    }
}

/// Remove a rule from a rule set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeleteReceiptRuleRequest {
    /// Rule set name.
    pub rule_set_name: String,
    /// Rule name.
    pub rule_name: String,
}

impl DeleteReceiptRuleRequest {
    /// Delete `rule_name` from `rule_set_name`.
    pub fn new(rule_set_name: impl Into<String>, rule_name: impl Into<String>) -> Self {
        Self {
            rule_set_name: rule_set_name.into(),
            rule_name: rule_name.into(),
        }
    }
}

impl SesOperation for DeleteReceiptRuleRequest {
    const ACTION: &'static str = "DeleteReceiptRule";
    type Output = DeleteReceiptRuleResult;

    fn validate(&self) -> SesResult<()> {
        require("RuleSetName", &self.rule_set_name)?;
        require("RuleName", &self.rule_name)
    }

    fn serialize(&self, writer: &mut QueryWriter) {
        writer
            .string("RuleSetName", self.rule_set_name.as_str())
            .string("RuleName", self.rule_name.as_str());
    }
}

/// Read one rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DescribeReceiptRuleRequest {
    /// Rule set name.
    pub rule_set_name: String,
    /// Rule name.
    pub rule_name: String,
}

impl DescribeReceiptRuleRequest {
    /// Describe `rule_name` in `rule_set_name`.
    pub fn new(rule_set_name: impl Into<String>, rule_name: impl Into<String>) -> Self {
        Self {
            rule_set_name: rule_set_name.into(),
            rule_name: rule_name.into(),
        }
    }
}

impl SesOperation for DescribeReceiptRuleRequest {
    const ACTION: &'static str = "DescribeReceiptRule";
    type Output = DescribeReceiptRuleResult;

    fn validate(&self) -> SesResult<()> {
        require("RuleSetName", &self.rule_set_name)?;
        require("RuleName", &self.rule_name)
    }

    fn serialize(&self, writer: &mut QueryWriter) {
        writer
            .string("RuleSetName", self.rule_set_name.as_str())
            .string("RuleName", self.rule_name.as_str());
    }
}

/// The described rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DescribeReceiptRuleResult {
    /// Rule; `None` only when SES omits it.
    pub rule: Option<ReceiptRule>,
    /// Response metadata.
    pub response_metadata: ResponseMetadata,
}

impl FromXml for DescribeReceiptRuleResult {
    fn from_xml(result: &XmlNode, metadata: ResponseMetadata) -> SesResult<Self> {
        Ok(Self {
            rule: parse_child(result, "Rule")?,
            response_metadata: metadata,
        })
    }
}

/// Move a rule within its rule set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SetReceiptRulePositionRequest {
    /// Rule set name.
    pub rule_set_name: String,
    /// Rule to move.
    pub rule_name: String,
    /// Place after this rule; first position when unset.
    pub after: Option<String>,
}

impl SetReceiptRulePositionRequest {
    /// Move `rule_name` to the first position.
    pub fn new(rule_set_name: impl Into<String>, rule_name: impl Into<String>) -> Self {
        Self {
            rule_set_name: rule_set_name.into(),
            rule_name: rule_name.into(),
            after: None,
        }
    }

    /// Place after another rule.
    pub fn after(mut self, rule_name: impl Into<String>) -> Self {
        self.after = Some(rule_name.into());
        self
    }
}

impl SesOperation for SetReceiptRulePositionRequest {
    const ACTION: &'static str = "SetReceiptRulePosition";
    type Output = SetReceiptRulePositionResult;

    fn validate(&self) -> SesResult<()> {
        require("RuleSetName", &self.rule_set_name)?;
        require("RuleName", &self.rule_name)
    }

    fn serialize(&self, writer: &mut QueryWriter) {
        writer
            .string("RuleSetName", self.rule_set_name.as_str())
            .string("RuleName", self.rule_name.as_str())
            .opt_string("After", self.after.as_deref());
    }
}

/// Replace a rule, matched by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateReceiptRuleRequest {
    /// Rule set name.
    pub rule_set_name: String,
    /// New definition.
    pub rule: ReceiptRule,
}

impl UpdateReceiptRuleRequest {
    /// Replace the rule named `rule.name`.
    pub fn new(rule_set_name: impl Into<String>, rule: ReceiptRule) -> Self {
        Self {
            rule_set_name: rule_set_name.into(),
            rule,
        }
    }
}

impl SesOperation for UpdateReceiptRuleRequest {
    const ACTION: &'static str = "UpdateReceiptRule";
    type Output = UpdateReceiptRuleResult;

    fn validate(&self) -> SesResult<()> {
        require("RuleSetName", &self.rule_set_name)?;
        check_rule(&self.rule)
    }

    fn serialize(&self, writer: &mut QueryWriter) {
        writer
            .string("RuleSetName", self.rule_set_name.as_str())
            .structure("Rule", &self.rule);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operations::test_support::{envelope, params, parse};
    use crate::types::{LambdaAction, ReceiptAction, ReceiptFilterPolicy, StopAction};

    fn lambda_rule() -> ReceiptRule {
        ReceiptRule::new("invoke")
            .add_recipient("orders@example.com")
            .add_action(ReceiptAction::Lambda(LambdaAction {
                function_arn: "arn:aws:lambda:us-east-1:123456789012:function:orders".into(),
                ..Default::default()
            }))
            .add_action(ReceiptAction::Stop(StopAction::default()))
    }

    #[test]
    fn test_receipt_filters() {
        let request = CreateReceiptFilterRequest::new(ReceiptFilter::new(
            "block-range",
            ReceiptFilterPolicy::Block,
            "10.0.0.0/24",
        ));
        let p = params(&request);
        assert_eq!(p.get("Filter.Name"), Some("block-range"));
        assert_eq!(p.get("Filter.IpFilter.Policy"), Some("Block"));
        assert_eq!(p.get("Filter.IpFilter.Cidr"), Some("10.0.0.0/24"));

        let listed = parse::<ListReceiptFiltersRequest>(&envelope(
            "ListReceiptFilters",
            "<Filters><member><Name>block-range</Name>\
             <IpFilter><Policy>Block</Policy><Cidr>10.0.0.0/24</Cidr></IpFilter></member></Filters>",
        ));
        assert_eq!(listed.filters, vec![request.filter]);

        assert!(DeleteReceiptFilterRequest::new("").validate().is_err());
    }

    #[test]
    fn test_rule_set_requests() {
        let p = params(&CreateReceiptRuleSetRequest::new("inbound"));
        assert_eq!(p.get("Action"), Some("CreateReceiptRuleSet"));
        assert_eq!(p.get("RuleSetName"), Some("inbound"));

        let p = params(&CloneReceiptRuleSetRequest::new("inbound-copy", "inbound"));
        assert_eq!(p.get("OriginalRuleSetName"), Some("inbound"));

        let p = params(&ReorderReceiptRuleSetRequest::new("inbound", ["b", "a"]));
        assert_eq!(p.get("RuleNames.member.1"), Some("b"));
        assert_eq!(p.get("RuleNames.member.2"), Some("a"));
        let none: [&str; 0] = [];
        assert!(ReorderReceiptRuleSetRequest::new("inbound", none).validate().is_err());

        assert_eq!(params(&SetActiveReceiptRuleSetRequest::deactivate()).get("RuleSetName"), None);
        assert_eq!(
            params(&SetActiveReceiptRuleSetRequest::activate("inbound")).get("RuleSetName"),
            Some("inbound")
        );
    }

    #[test]
    fn test_describe_rule_set() {
        let result = parse::<DescribeReceiptRuleSetRequest>(&envelope(
            "DescribeReceiptRuleSet",
            "<Metadata><Name>inbound</Name><CreatedTimestamp>2016-07-15T16:25:59.607Z</CreatedTimestamp></Metadata>\
             <Rules><member><Name>invoke</Name><Enabled>true</Enabled><ScanEnabled>false</ScanEnabled>\
               <TlsPolicy>Optional</TlsPolicy>\
               <Recipients><member>orders@example.com</member></Recipients>\
               <Actions><member><LambdaAction>\
                 <FunctionArn>arn:aws:lambda:us-east-1:123456789012:function:orders</FunctionArn>\
                 <InvocationType>Event</InvocationType></LambdaAction></member>\
                 <member><StopAction><Scope>RuleSet</Scope></StopAction></member></Actions>\
             </member></Rules>",
        ));
        let meta = result.metadata.unwrap();
        assert_eq!(meta.name, "inbound");
        assert!(meta.created_timestamp.is_some());
        assert_eq!(result.rules.len(), 1);
        assert_eq!(result.rules[0].recipients, vec!["orders@example.com"]);
        assert_eq!(result.rules[0].actions.len(), 2);
        assert!(matches!(result.rules[0].actions[1], ReceiptAction::Stop(_)));
    }

    #[test]
    fn test_no_active_rule_set() {
        let result = parse::<DescribeActiveReceiptRuleSetRequest>(&envelope("DescribeActiveReceiptRuleSet", ""));
        assert!(result.metadata.is_none());
        assert!(result.rules.is_empty());
    }

    #[test]
    fn test_list_rule_sets() {
        let p = params(&ListReceiptRuleSetsRequest::new().with_next_token("t1"));
        assert_eq!(p.get("NextToken"), Some("t1"));

        let result = parse::<ListReceiptRuleSetsRequest>(&envelope(
            "ListReceiptRuleSets",
            "<RuleSets><member><Name>a</Name></member><member><Name>b</Name></member></RuleSets>",
        ));
        let names: Vec<_> = result.rule_sets.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(result.next_token, None);
    }

    #[test]
    fn test_rule_requests() {
        let p = params(&CreateReceiptRuleRequest::new("inbound", lambda_rule()).after("first"));
        assert_eq!(p.get("After"), Some("first"));
        assert_eq!(p.get("Rule.Name"), Some("invoke"));
        assert_eq!(p.get("Rule.Enabled"), Some("true"));
        assert_eq!(p.get("Rule.Recipients.member.1"), Some("orders@example.com"));
        assert_eq!(
            p.get("Rule.Actions.member.1.LambdaAction.FunctionArn"),
            Some("arn:aws:lambda:us-east-1:123456789012:function:orders")
        );
        assert_eq!(p.get("Rule.Actions.member.2.StopAction.Scope"), Some("RuleSet"));

        let p = params(&UpdateReceiptRuleRequest::new("inbound", lambda_rule()));
        assert_eq!(p.get("Action"), Some("UpdateReceiptRule"));

        assert!(CreateReceiptRuleRequest::new("inbound", ReceiptRule::new(""))
            .validate()
            .is_err());

        let p = params(&SetReceiptRulePositionRequest::new("inbound", "invoke"));
        assert_eq!(p.get("After"), None);

        let p = params(&DeleteReceiptRuleRequest::new("inbound", "invoke"));
        assert_eq!(p.get("RuleName"), Some("invoke"));
    }

    #[test]
    fn test_describe_rule() {
        let result = parse::<DescribeReceiptRuleRequest>(&envelope(
            "DescribeReceiptRule",
            "<Rule><Name>invoke</Name><Enabled>false</Enabled></Rule>",
        ));
        let rule = result.rule.unwrap();
        assert_eq!(rule.name, "invoke");
        assert_eq!(rule.enabled, Some(false));
        assert!(rule.actions.is_empty());
    }
}
