//! Minimal XML element tree for SES responses.
//!
//! SES responses are small, so the whole document is parsed into an
//! [`XmlNode`] tree and result types pull typed values out of it. Namespaces
//! are dropped: every element is addressed by its local name.

use chrono::{DateTime, Utc};
use quick_xml::events::Event;
use quick_xml::Reader;
use std::str::FromStr;

use crate::error::{SesError, SesResult};

/// An XML element with its text content and child elements.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlNode {
    /// Local element name.
    pub name: String,
    /// Concatenated, unescaped text content.
    pub text: String,
    /// Child elements in document order.
    pub children: Vec<XmlNode>,
}

impl XmlNode {
    /// An empty element named `name`.
    pub fn empty(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Parse a document and return its root element.
    pub fn parse(xml: &str) -> SesResult<Self> {
        let mut reader = Reader::from_str(xml);

        let mut stack: Vec<XmlNode> = Vec::new();
        let mut root: Option<XmlNode> = None;

        loop {
            match reader.read_event()? {
                Event::Start(e) => {
                    let name = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
                    stack.push(XmlNode::empty(name));
                }
                Event::Empty(e) => {
                    let name = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
                    attach(&mut stack, &mut root, XmlNode::empty(name));
                }
                Event::Text(e) => {
                    if let Some(current) = stack.last_mut() {
                        current.text.push_str(&e.unescape()?);
                    }
                }
                Event::CData(e) => {
                    if let Some(current) = stack.last_mut() {
                        current.text.push_str(&String::from_utf8_lossy(&e.into_inner()));
                    }
                }
                Event::End(_) => {
                    let mut node = stack
                        .pop()
                        .ok_or_else(|| SesError::serialization("unbalanced XML end tag"))?;
                    // Indentation between child elements is not content.
                    if !node.children.is_empty() && node.text.trim().is_empty() {
                        node.text.clear();
                    }
                    attach(&mut stack, &mut root, node);
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if !stack.is_empty() {
            return Err(SesError::serialization("unexpected end of XML document"));
        }
        root.ok_or_else(|| SesError::serialization("XML document has no root element"))
    }

    /// First child named `name`.
    pub fn child(&self, name: &str) -> Option<&XmlNode> {
        self.children.iter().find(|c| c.name == name)
    }

    /// All children named `name`.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlNode> + 'a {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// Text of the first child named `name`.
    pub fn text_of(&self, name: &str) -> Option<String> {
        self.child(name).map(|c| c.text.clone())
    }

    /// Text of a child that must be present.
    pub fn required_text(&self, name: &str) -> SesResult<String> {
        self.text_of(name).ok_or_else(|| {
            SesError::serialization(format!("missing element <{}> in <{}>", name, self.name))
        })
    }

    /// `<name><member/>…</name>` items.
    pub fn members<'a>(&'a self, name: &str) -> Vec<&'a XmlNode> {
        self.child(name)
            .map(|list| list.children_named("member").collect())
            .unwrap_or_default()
    }

    /// `<name><member>text</member>…</name>` as strings.
    pub fn string_list(&self, name: &str) -> Vec<String> {
        self.members(name).into_iter().map(|m| m.text.clone()).collect()
    }

    /// `<name><entry><key/><value/></entry>…</name>` as `(key, value node)` pairs.
    pub fn entries<'a>(&'a self, name: &str) -> SesResult<Vec<(String, &'a XmlNode)>> {
        let Some(map) = self.child(name) else {
            return Ok(Vec::new());
        };
        map.children_named("entry")
            .map(|entry| {
                let key = entry.required_text("key")?;
                let value = entry.child("value").ok_or_else(|| {
                    SesError::serialization(format!("map entry '{}' has no value", key))
                })?;
                Ok((key, value))
            })
            .collect()
    }

    /// Optional boolean child.
    pub fn bool_of(&self, name: &str) -> SesResult<Option<bool>> {
        self.text_of(name)
            .map(|text| match text.trim() {
                "true" => Ok(true),
                "false" => Ok(false),
                other => Err(SesError::serialization(format!(
                    "<{}> is not a boolean: '{}'",
                    name, other
                ))),
            })
            .transpose()
    }

    /// Optional floating point child.
    pub fn f64_of(&self, name: &str) -> SesResult<Option<f64>> {
        self.text_of(name)
            .map(|text| {
                text.trim().parse::<f64>().map_err(|_| {
                    SesError::serialization(format!("<{}> is not a number: '{}'", name, text))
                })
            })
            .transpose()
    }

    /// Optional integer child.
    pub fn i64_of(&self, name: &str) -> SesResult<Option<i64>> {
        self.text_of(name)
            .map(|text| {
                text.trim().parse::<i64>().map_err(|_| {
                    SesError::serialization(format!("<{}> is not an integer: '{}'", name, text))
                })
            })
            .transpose()
    }

    /// Optional child parsed with [`FromStr`], e.g. a wire enum.
    pub fn parsed_of<T>(&self, name: &str) -> SesResult<Option<T>>
    where
        T: FromStr<Err = SesError>,
    {
        self.text_of(name).map(|text| text.trim().parse()).transpose()
    }

    /// Optional ISO 8601 timestamp child.
    pub fn timestamp_of(&self, name: &str) -> SesResult<Option<DateTime<Utc>>> {
        self.text_of(name)
            .map(|text| {
                DateTime::parse_from_rfc3339(text.trim())
                    .map(|dt| dt.with_timezone(&Utc))
                    .map_err(|_| {
                        SesError::serialization(format!("<{}> is not a timestamp: '{}'", name, text))
                    })
            })
            .transpose()
    }
}

fn attach(stack: &mut [XmlNode], root: &mut Option<XmlNode>, node: XmlNode) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(node),
        None => {
            if root.is_none() {
                *root = Some(node);
            }
        }
    }
}
