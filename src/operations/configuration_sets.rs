//! Configuration sets.

use serde::{Deserialize, Serialize};

use super::require;
use crate::error::SesResult;
use crate::protocol::{parse_child, parse_members, FromXml, QueryWriter, SesOperation, XmlNode};
use crate::types::{
    ConfigurationSet, ConfigurationSetAttribute, DeliveryOptions, ReputationOptions, ResponseMetadata,
    TrackingOptions,
};

empty_result! {
    /// `CreateConfigurationSet` result.
    CreateConfigurationSetResult,
    /// `DeleteConfigurationSet` result.
    DeleteConfigurationSetResult,
}

/// Create a configuration set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateConfigurationSetRequest {
    /// The set.
    pub configuration_set: ConfigurationSet,
}

impl CreateConfigurationSetRequest {
    /// Create a set called `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            configuration_set: ConfigurationSet::new(name),
        }
    }
}

impl SesOperation for CreateConfigurationSetRequest {
    const ACTION: &'static str = "CreateConfigurationSet";
    type Output = CreateConfigurationSetResult;

    fn validate(&self) -> SesResult<()> {
        require("ConfigurationSet.Name", &self.configuration_set.name)
    }

    fn serialize(&self, writer: &mut QueryWriter) {
        writer.structure("ConfigurationSet", &self.configuration_set);
    }
}

/// Delete a configuration set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeleteConfigurationSetRequest {
    /// Set name.
    pub configuration_set_name: String,
}

impl DeleteConfigurationSetRequest {
    /// Delete `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            configuration_set_name: name.into(),
        }
    }
}

impl SesOperation for DeleteConfigurationSetRequest {
    const ACTION: &'static str = "DeleteConfigurationSet";
    type Output = DeleteConfigurationSetResult;

    fn validate(&self) -> SesResult<()> {
        require("ConfigurationSetName", &self.configuration_set_name)
    }

    fn serialize(&self, writer: &mut QueryWriter) {
        writer.string("ConfigurationSetName", self.configuration_set_name.as_str());
    }
}

/// Read a configuration set and selected option groups.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DescribeConfigurationSetRequest {
    /// Set name.
    pub configuration_set_name: String,
    /// Option groups to include.
    pub configuration_set_attribute_names: Vec<ConfigurationSetAttribute>,
}

impl DescribeConfigurationSetRequest {
    /// Describe `name` without option groups.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            configuration_set_name: name.into(),
            configuration_set_attribute_names: Vec::new(),
        }
    }

    /// Include an option group.
    pub fn with_attribute(mut self, attribute: ConfigurationSetAttribute) -> Self {
        self.configuration_set_attribute_names.push(attribute);
        self
    }
}

impl SesOperation for DescribeConfigurationSetRequest {
    const ACTION: &'static str = "DescribeConfigurationSet";
    type Output = DescribeConfigurationSetResult;

    fn validate(&self) -> SesResult<()> {
        require("ConfigurationSetName", &self.configuration_set_name)
    }

    fn serialize(&self, writer: &mut QueryWriter) {
        let names: Vec<&str> = self
            .configuration_set_attribute_names
            .iter()
            .map(ConfigurationSetAttribute::as_str)
            .collect();
        writer
            .string("ConfigurationSetName", self.configuration_set_name.as_str())
            .string_list("ConfigurationSetAttributeNames", &names);
    }
}

/// A configuration set and the requested option groups.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DescribeConfigurationSetResult {
    /// The set.
    pub configuration_set: Option<ConfigurationSet>,
    /// Present when requested and configured.
    pub tracking_options: Option<TrackingOptions>,
    /// Present when requested and configured.
    pub delivery_options: Option<DeliveryOptions>,
    /// Present when requested.
    pub reputation_options: Option<ReputationOptions>,
    /// Response metadata.
    pub response_metadata: ResponseMetadata,
}

impl FromXml for DescribeConfigurationSetResult {
    fn from_xml(result: &XmlNode, metadata: ResponseMetadata) -> SesResult<Self> {
        Ok(Self {
            configuration_set: parse_child(result, "ConfigurationSet")?,
            tracking_options: parse_child(result, "TrackingOptions")?,
            delivery_options: parse_child(result, "DeliveryOptions")?,
            reputation_options: parse_child(result, "ReputationOptions")?,
            response_metadata: metadata,
        })
    }
}

/// List configuration sets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListConfigurationSetsRequest {
    /// Token from a previous page.
    pub next_token: Option<String>,
    /// Page size.
    pub max_items: Option<i64>,
}

impl ListConfigurationSetsRequest {
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

impl SesOperation for ListConfigurationSetsRequest {
    const ACTION: &'static str = "ListConfigurationSets";
    type Output = ListConfigurationSetsResult;

    fn serialize(&self, writer: &mut QueryWriter) {
        writer
            .opt_string("NextToken", self.next_token.as_deref())
            .opt_integer("MaxItems", self.max_items);
    }
}

/// One page of configuration sets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListConfigurationSetsResult {
    /// Sets.
    pub configuration_sets: Vec<ConfigurationSet>,
    /// Present when more pages follow.
    pub next_token: Option<String>,
    /// Response metadata.
    pub response_metadata: ResponseMetadata,
}

impl FromXml for ListConfigurationSetsResult {
    fn from_xml(result: &XmlNode, metadata: ResponseMetadata) -> SesResult<Self> {
        Ok(Self {
            configuration_sets: parse_members(result, "ConfigurationSets")?,
            next_token: result.text_of("NextToken"),
            response_metadata: metadata,
        })
    }
}
