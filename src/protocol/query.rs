//! AWS Query protocol serialization.
//!
//! Requests are flattened into dotted parameter names:
//!
//! ```text
//! Action=SendEmail
//! Version=2010-12-01
//! Source=sender@example.com
//! Destination.ToAddresses.member.1=a@example.com
//! Message.Subject.Data=Hello
//! Tags.member.1.Name=campaign
//! ```
//!
//! Lists are `Key.member.N` with 1-based indices, nested structures extend the
//! prefix with `.`.

use crate::config::API_VERSION;
use crate::error::{SesError, SesResult};

/// Values that serialize themselves under a parameter prefix.
pub trait QueryParams {
    /// Write this value's fields under `prefix`.
    fn write_params(&self, writer: &mut QueryWriter, prefix: &str);
}

/// Join a prefix and a field name.
pub fn join(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", prefix, name)
    }
}

/// Accumulates Query parameters for one request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryWriter {
    params: Vec<(String, String)>,
}

impl QueryWriter {
    /// Writer preloaded with `Action` and `Version`.
    pub fn new(action: &str) -> Self {
        let mut writer = Self::default();
        writer.string("Action", action);
        writer.string("Version", API_VERSION);
        writer
    }

    /// Write a string parameter.
    pub fn string(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.params.push((key.into(), value.into()));
        self
    }

    /// Write a string parameter when present.
    pub fn opt_string(&mut self, key: impl Into<String>, value: Option<&str>) -> &mut Self {
        if let Some(value) = value {
            self.string(key, value);
        }
        self
    }

    /// Write `true` / `false`.
    pub fn boolean(&mut self, key: impl Into<String>, value: bool) -> &mut Self {
        self.string(key, if value { "true" } else { "false" })
    }

    /// Write a boolean when present.
    pub fn opt_boolean(&mut self, key: impl Into<String>, value: Option<bool>) -> &mut Self {
        if let Some(value) = value {
            self.boolean(key, value);
        }
        self
    }

    /// Write an integer when present.
    pub fn opt_integer(&mut self, key: impl Into<String>, value: Option<i64>) -> &mut Self {
        if let Some(value) = value {
            self.string(key, value.to_string());
        }
        self
    }

    /// Write `key.member.N` for each string. Empty lists write nothing.
    pub fn string_list<S: AsRef<str>>(&mut self, key: &str, values: &[S]) -> &mut Self {
        for (i, value) in values.iter().enumerate() {
            self.string(format!("{}.member.{}", key, i + 1), value.as_ref());
        }
        self
    }

    /// Write a structure under `key`.
    pub fn structure<T: QueryParams + ?Sized>(&mut self, key: &str, value: &T) -> &mut Self {
        value.write_params(self, key);
        self
    }

    /// Write a structure under `key` when present.
    pub fn opt_structure<T: QueryParams>(&mut self, key: &str, value: Option<&T>) -> &mut Self {
        if let Some(value) = value {
            value.write_params(self, key);
        }
        self
    }

    /// Write `key.member.N.*` for each structure.
    pub fn structure_list<T: QueryParams>(&mut self, key: &str, values: &[T]) -> &mut Self {
        for (i, value) in values.iter().enumerate() {
            value.write_params(self, &format!("{}.member.{}", key, i + 1));
        }
        self
    }

    /// Value of the first parameter named `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// All parameters in insertion order.
    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }

    /// Number of parameters.
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Whether no parameters were written.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Form-encode the parameters.
    pub fn encode(&self) -> SesResult<String> {
        serde_urlencoded::to_string(&self.params).map_err(|e| SesError::Serialization {
            message: format!("failed to encode query parameters: {}", e),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Tag {
        name: &'static str,
        value: &'static str,
    }

    impl QueryParams for Tag {
        fn write_params(&self, writer: &mut QueryWriter, prefix: &str) {
            writer
                .string(join(prefix, "Name"), self.name)
                .string(join(prefix, "Value"), self.value);
        }
    }

    #[test]
    fn test_action_and_version_first() {
        let writer = QueryWriter::new("GetSendQuota");
        assert_eq!(
            writer.params(),
            &[
                ("Action".to_string(), "GetSendQuota".to_string()),
                ("Version".to_string(), "2010-12-01".to_string()),
            ]
        );
    }

    #[test]
    fn test_lists_are_one_based() {
        let mut writer = QueryWriter::new("X");
        writer.string_list("Destination.ToAddresses", &["a@example.com", "b@example.com"]);
        writer.structure_list(
            "Tags",
            &[Tag { name: "campaign", value: "spring" }],
        );

        assert_eq!(writer.get("Destination.ToAddresses.member.1"), Some("a@example.com"));
        assert_eq!(writer.get("Destination.ToAddresses.member.2"), Some("b@example.com"));
        assert_eq!(writer.get("Tags.member.1.Name"), Some("campaign"));
        assert_eq!(writer.get("Tags.member.1.Value"), Some("spring"));
        assert_eq!(writer.get("Tags.member.0.Name"), None);
    }

    #[test]
    fn test_optional_values_skipped() {
        let mut writer = QueryWriter::new("X");
        writer
            .opt_string("NextToken", None)
            .opt_boolean("Enabled", Some(false))
            .opt_integer("MaxItems", None)
            .string_list::<&str>("Empty", &[]);
        assert_eq!(writer.len(), 3);
        assert_eq!(writer.get("Enabled"), Some("false"));
    }

    #[test]
    fn test_encode() {
        let mut writer = QueryWriter::new("SendEmail");
        writer.string("Message.Subject.Data", "Hi & bye");
        assert_eq!(
            writer.encode().unwrap(),
            "Action=SendEmail&Version=2010-12-01&Message.Subject.Data=Hi+%26+bye"
        );
    }
}
