//! Error types for the object editor.

use crate::core::value::ValueKind;
use crate::core::value_path::ValuePathParseError;
use crate::ui::element::ElementId;

/// Result type alias for editor operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while rendering, editing or addressing values.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Committed edit text is neither structured literal data nor `f()`.
    #[error("cannot parse edited text `{text}`: {source}")]
    MalformedEdit {
        text: String,
        #[source]
        source: serde_json::Error,
    },

    /// The tree renderer only mounts records and sequences.
    #[error("expected an object or array, got {kind}")]
    NotAContainer { kind: ValueKind },

    #[error("no value at path `{path}`")]
    MissingPath { path: String },

    #[error("invalid path: {0}")]
    InvalidPath(#[from] ValuePathParseError),

    /// A gesture targeted an element that is no longer mounted.
    #[error("element {0} is not mounted")]
    UnknownElement(ElementId),
}

impl Error {
    pub fn malformed_edit(text: impl Into<String>, source: serde_json::Error) -> Self {
        Self::MalformedEdit {
            text: text.into(),
            source,
        }
    }

    pub fn missing_path(path: impl ToString) -> Self {
        Self::MissingPath {
            path: path.to_string(),
        }
    }
}
