//! Errors raised while writing a script response.

use thiserror::Error;

use crate::content::ContentKind;

/// Errors that can occur while turning a descriptor into a response.
#[derive(Debug, Error)]
pub enum ResponseError {
    /// Dynamic content could not be serialized. Raised before any write.
    #[error("Failed to serialize dynamic content: {0}")]
    Normalization(#[source] serde_json::Error),

    /// No formatter accepted the content, even after text fallback.
    #[error("No output formatter for {kind} content (content type: {})", .content_type.as_deref().unwrap_or("none"))]
    Resolution {
        kind: ContentKind,
        content_type: Option<String>,
    },

    /// The transport failed while the body was being written.
    #[error("Response write failed: {0}")]
    Io(#[from] std::io::Error),

    /// A descriptor header cannot be represented on the wire.
    #[error("Invalid header {name:?}: {reason}")]
    InvalidHeader { name: String, reason: String },

    /// Status code outside 100..=999.
    #[error("Invalid status code {0}")]
    InvalidStatus(u16),
}

impl ResponseError {
    /// Whether the fault is a defect in the host rather than in user data.
    pub fn is_internal(&self) -> bool {
        matches!(self, ResponseError::Resolution { .. })
    }
}

/// Result type for response operations.
pub type ResponseResult<T> = Result<T, ResponseError>;
