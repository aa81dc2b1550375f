//! Configuration sets.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::SesResult;
use crate::protocol::{join, FromXmlNode, QueryParams, QueryWriter, XmlNode};

use super::TlsPolicy;

/// A named configuration set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ConfigurationSet {
    /// Name.
    pub name: String,
}

impl ConfigurationSet {
    /// Create a configuration set value.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl QueryParams for ConfigurationSet {
    fn write_params(&self, writer: &mut QueryWriter, prefix: &str) {
        writer.string(join(prefix, "Name"), self.name.as_str());
    }
}

impl FromXmlNode for ConfigurationSet {
    fn from_node(node: &XmlNode) -> SesResult<Self> {
        Ok(Self {
            name: node.required_text("Name")?,
        })
    }
}

wire_enum! {
    /// Optional sections returned by `DescribeConfigurationSet`.
    pub enum ConfigurationSetAttribute {
        /// Open and click tracking.
        TrackingOptions => "trackingOptions",
        /// TLS delivery requirement.
        DeliveryOptions => "deliveryOptions",
        /// Reputation metrics and sending state.
        ReputationOptions => "reputationOptions",
    }
}

/// Custom tracking domain.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TrackingOptions {
    /// Domain used in tracked links.
    pub custom_redirect_domain: Option<String>,
}

impl FromXmlNode for TrackingOptions {
    fn from_node(node: &XmlNode) -> SesResult<Self> {
        Ok(Self {
            custom_redirect_domain: node.text_of("CustomRedirectDomain"),
        })
    }
}

/// Outbound TLS requirement.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeliveryOptions {
    /// `Require` or `Optional`.
    pub tls_policy: Option<TlsPolicy>,
}

impl FromXmlNode for DeliveryOptions {
    fn from_node(node: &XmlNode) -> SesResult<Self> {
        Ok(Self {
            tls_policy: node.parsed_of("TlsPolicy")?,
        })
    }
}

/// Reputation settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ReputationOptions {
    /// Whether sending through the set is enabled.
    pub sending_enabled: bool,
    /// Whether reputation metrics are published.
    pub reputation_metrics_enabled: bool,
    /// When sending was last re-enabled.
    pub last_fresh_start: Option<DateTime<Utc>>,
}

impl FromXmlNode for ReputationOptions {
    fn from_node(node: &XmlNode) -> SesResult<Self> {
        Ok(Self {
            sending_enabled: node.bool_of("SendingEnabled")?.unwrap_or(true),
            reputation_metrics_enabled: node.bool_of("ReputationMetricsEnabled")?.unwrap_or(false),
            last_fresh_start: node.timestamp_of("LastFreshStart")?,
        })
    }
}
