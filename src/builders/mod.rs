//! Fluent builders for the most common requests.
//!
//! - [`EmailBuilder`] builds a [`SendEmailRequest`](crate::operations::SendEmailRequest)
//! - [`TemplateBuilder`] builds a [`Template`](crate::types::Template)
//! - [`BulkEmailBuilder`] builds a
//!   [`SendBulkTemplatedEmailRequest`](crate::operations::SendBulkTemplatedEmailRequest)
//!
//! # Examples
//!
//! ## Sending a simple email
//!
//! ```rust
//! use integrations_aws_ses_classic::builders::EmailBuilder;
//!
//! let request = EmailBuilder::new()
//!     .from("sender@example.com")
//!     .to("recipient@example.com")
//!     .subject("Hello World")
//!     .text("This is a plain text email")
//!     .html("<p>This is an HTML email</p>")
//!     .build()?;
//! # Ok::<(), integrations_aws_ses_classic::builders::BuilderError>(())
//! ```
//!
//! ## Creating an email template
//!
//! ```rust
//! use integrations_aws_ses_classic::builders::TemplateBuilder;
//!
//! let template = TemplateBuilder::new()
//!     .name("welcome-email")
//!     .subject("Welcome {{name}}!")
//!     .html("<h1>Welcome {{name}}</h1><p>Thanks for joining!</p>")
//!     .text("Welcome {{name}}! Thanks for joining!")
//!     .build()?;
//! # Ok::<(), integrations_aws_ses_classic::builders::BuilderError>(())
//! ```
//!
//! ## Sending a template to many recipients
//!
//! ```rust
//! use integrations_aws_ses_classic::builders::BulkEmailBuilder;
//! use integrations_aws_ses_classic::types::{BulkEmailDestination, Destination};
//!
//! let request = BulkEmailBuilder::new()
//!     .from("sender@example.com")
//!     .template("newsletter")
//!     .default_template_data(serde_json::json!({ "issue": 12 }))
//!     .add_destination(BulkEmailDestination::new(Destination::new().add_to("user1@example.com")))
//!     .add_destination(BulkEmailDestination::new(Destination::new().add_to("user2@example.com")))
//!     .build()?;
//! # Ok::<(), integrations_aws_ses_classic::builders::BuilderError>(())
//! ```

mod bulk_builder;
mod email_builder;
mod template_builder;

pub use bulk_builder::BulkEmailBuilder;
pub use email_builder::EmailBuilder;
pub use template_builder::TemplateBuilder;

use thiserror::Error;

use crate::error::SesError;

/// Returned by `build()` when a builder is incomplete or inconsistent.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BuilderError {
    /// A mandatory field was never set.
    #[error("Missing required field: {field}")]
    MissingField {
        /// Field name.
        field: String,
    },

    /// A field was set to a value SES would reject.
    #[error("Invalid value for field '{field}': {message}")]
    InvalidValue {
        /// Field name.
        field: String,
        /// What is wrong with it.
        message: String,
    },
}

impl BuilderError {
    /// Create a missing field error.
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    /// Create an invalid value error.
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Name of the offending field.
    pub fn field(&self) -> &str {
        match self {
            Self::MissingField { field } | Self::InvalidValue { field, .. } => field,
        }
    }
}

impl From<BuilderError> for SesError {
    fn from(err: BuilderError) -> Self {
        SesError::validation(err.field(), err.to_string())
    }
}
