//! Error types for the content model and configuration.

use crate::content::WidgetKind;
use thiserror::Error;

/// Content payload does not match the declared widget type.
///
/// This is the schema-mismatch error surfaced to authoring forms; it is never
/// silently coerced away on the authoring path.
#[derive(Debug, Error)]
pub enum ContentError {
    /// A required field is absent or empty.
    #[error("{kind} widget is missing required field '{field}'")]
    MissingField {
        /// Declared widget kind
        kind: WidgetKind,
        /// Field name as it appears in the persisted JSON
        field: &'static str,
    },

    /// A field is present but unusable.
    #[error("{kind} widget has invalid '{field}': {message}")]
    InvalidField {
        /// Declared widget kind
        kind: WidgetKind,
        /// Field name
        field: &'static str,
        /// Human-readable reason
        message: String,
    },

    /// Payload could not be read as the content shape of `kind`.
    #[error("{kind} widget content is malformed: {source}")]
    Malformed {
        /// Declared widget kind
        kind: WidgetKind,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },

    /// The content belongs to a different kind than the widget it targets.
    #[error("content of type '{found}' cannot be stored on a {expected} widget")]
    KindMismatch {
        /// Kind of the widget being edited
        expected: WidgetKind,
        /// Kind of the supplied content
        found: String,
    },

    /// The discriminant is not one of the supported widget kinds.
    #[error("unsupported widget type '{0}'")]
    UnsupportedKind(String),
}

/// Errors loading an editor configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error reading the file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML could not be parsed.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// Parsed values are out of range.
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue {
        /// Field name
        field: String,
        /// Error message
        message: String,
    },
}
