//! SES Query protocol: request serialization and XML result parsing.
//!
//! Every operation goes through [`execute`]:
//!
//! 1. [`SesOperation::validate`] rejects requests SES would refuse anyway
//! 2. [`SesOperation::serialize`] writes Query parameters into a [`QueryWriter`]
//! 3. the form body is sent through an [`HttpClient`]
//! 4. the `<{Action}Result>` element is handed to [`FromXml::from_xml`]

mod query;
mod xml;

pub use query::{join, QueryParams, QueryWriter};
pub use xml::XmlNode;

use std::collections::HashMap;

use crate::error::SesResult;
use crate::http::{HttpClient, SesRequest};
use crate::types::ResponseMetadata;

/// One SES API action.
pub trait SesOperation: Send + Sync + 'static {
    /// Query `Action` name, e.g. `SendEmail`.
    const ACTION: &'static str;

    /// Typed result.
    type Output: FromXml + Send + 'static;

    /// Check required fields and limits before anything is sent.
    fn validate(&self) -> SesResult<()> {
        Ok(())
    }

    /// Write the request parameters (everything except `Action`/`Version`).
    fn serialize(&self, writer: &mut QueryWriter);
}

/// Builds an operation result from its `<{Action}Result>` element.
pub trait FromXml: Sized {
    /// `result` is an empty element when SES omitted it.
    fn from_xml(result: &XmlNode, metadata: ResponseMetadata) -> SesResult<Self>;
}

/// Builds a nested value from its element.
pub trait FromXmlNode: Sized {
    /// Parse `node`.
    fn from_node(node: &XmlNode) -> SesResult<Self>;
}

impl FromXml for () {
    fn from_xml(_result: &XmlNode, _metadata: ResponseMetadata) -> SesResult<Self> {
        Ok(())
    }
}

impl FromXmlNode for String {
    fn from_node(node: &XmlNode) -> SesResult<Self> {
        Ok(node.text.clone())
    }
}

/// `<name><member>…</member></name>` parsed as `T`.
pub fn parse_members<T: FromXmlNode>(parent: &XmlNode, name: &str) -> SesResult<Vec<T>> {
    parent.members(name).into_iter().map(T::from_node).collect()
}

/// Optional child parsed as `T`.
pub fn parse_child<T: FromXmlNode>(parent: &XmlNode, name: &str) -> SesResult<Option<T>> {
    parent.child(name).map(T::from_node).transpose()
}

/// `<name><entry><key/><value/></entry></name>` parsed as a map of `T`.
pub fn parse_map<T: FromXmlNode>(parent: &XmlNode, name: &str) -> SesResult<HashMap<String, T>> {
    parent
        .entries(name)?
        .into_iter()
        .map(|(key, value)| Ok((key, T::from_node(value)?)))
        .collect()
}

/// Run one operation over `http`.
pub async fn execute<O: SesOperation>(http: &dyn HttpClient, operation: &O) -> SesResult<O::Output> {
    operation.validate()?;

    let mut writer = QueryWriter::new(O::ACTION);
    operation.serialize(&mut writer);
    let request = SesRequest::new(O::ACTION, writer.encode()?);

    let response = http.send_request(request).await?;
    parse_response::<O::Output>(O::ACTION, response.body_string()?, response.request_id())
}

/// Parse a successful response body for `action`.
pub fn parse_response<T: FromXml>(
    action: &str,
    body: &str,
    header_request_id: Option<&str>,
) -> SesResult<T> {
    let result_name = format!("{}Result", action);
    let root = if body.trim().is_empty() {
        XmlNode::empty(format!("{}Response", action))
    } else {
        XmlNode::parse(body)?
    };

    let metadata = ResponseMetadata {
        request_id: root
            .child("ResponseMetadata")
            .and_then(|m| m.text_of("RequestId"))
            .or_else(|| header_request_id.map(str::to_string)),
    };

    let empty = XmlNode::empty(result_name.as_str());
    let result = root.child(&result_name).unwrap_or(&empty);
    T::from_xml(result, metadata)
}
