//! Error types for tree loading and document extraction.

/// Result type for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractError>;

/// Fatal errors raised while turning a compound tree into a [`Document`].
///
/// Parameter descriptions that don't line up with a declared parameter are
/// not errors; they are dropped during correlation.
///
/// [`Document`]: crate::model::Document
#[derive(thiserror::Error, Debug)]
pub enum ExtractError {
    /// The input is not a well-formed XML tree.
    #[error("malformed XML at byte {position}: {message}")]
    Parse {
        /// Byte offset where the reader gave up
        position: u64,
        /// Reader diagnostic
        message: String,
    },

    /// A required field is absent from an otherwise well-formed tree.
    #[error("missing required field `{field}` at {path}")]
    MissingField {
        /// Output field name (`name`, `kind`, ...)
        field: &'static str,
        /// Positional path of the node that should have carried it
        path: String,
    },

    /// The finished document could not be encoded.
    #[error("failed to serialize document: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl ExtractError {
    pub fn missing(field: &'static str, path: &str) -> Self {
        ExtractError::MissingField {
            field,
            path: path.to_string(),
        }
    }
}
