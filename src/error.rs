//! Error types for the carousel editor.

use crate::carousel::validate::ValidationReport;

pub type Result<T> = std::result::Result<T, CarouselError>;

/// Every failure a carousel operation can surface to the user.
///
/// A failed operation leaves the editor exactly as it was before the call.
#[derive(Debug, thiserror::Error)]
pub enum CarouselError {
    /// Image URL is not a syntactically valid URL
    #[error("Please enter a valid image URL: {0:?}")]
    InvalidUrl(String),

    /// Image URL is already part of the list
    #[error("This image has already been added: {0}")]
    DuplicateUrl(String),

    /// Image could not be loaded or measured
    #[error("Image failed to load ({url}): {reason}")]
    ImageLoadFailed { url: String, reason: String },

    /// Import payload could not be understood
    #[error("Failed to import carousel: {0}")]
    MalformedPayload(String),

    /// Export blocked by the first failing validation class
    #[error("{0}")]
    ExportValidationFailed(ValidationReport),

    /// Banner id shared with another entry (advisory)
    #[error("Banner ID {banner_id:?} of image {index} is also used by image {other}")]
    BannerIdCollision {
        banner_id: String,
        index: usize,
        other: usize,
    },

    #[error("index {index} is out of bounds for {len} images")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("Add at least one image before exporting")]
    EmptyCarousel,

    #[error("A single banner holds one image, the list has {0}")]
    SingleRequiresOneImage(usize),

    #[error("unsupported aspect ratio {0:?}")]
    UnsupportedAspectRatio(String),

    #[error("campaign store error: {0:#}")]
    Storage(#[source] anyhow::Error),

    #[error("clipboard error: {0:#}")]
    Clipboard(#[source] anyhow::Error),
}

impl CarouselError {
    /// Advisory errors never block the operation that produced them.
    #[must_use]
    pub fn is_advisory(&self) -> bool {
        matches!(self, Self::BannerIdCollision { .. })
    }
}
