pub mod banner;
pub mod engine;
pub mod payload;
pub mod probe;
pub mod ratio;
pub mod validate;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::config::EditorConfig;
use crate::error::CarouselError;

/// Page id value meaning "use the custom page id instead"
pub const OTHER_PAGE_ID: &str = "other";

/// How the exported images are rendered on the page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayType {
    /// One banner; the list never holds more than one image
    Single,
    /// Ordered slides; banner ids carry the slide index
    #[default]
    Carousel,
}

impl DisplayType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Carousel => "carousel",
        }
    }
}

impl fmt::Display for DisplayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DisplayType {
    type Err = CarouselError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "single" => Ok(Self::Single),
            "carousel" => Ok(Self::Carousel),
            other => Err(CarouselError::MalformedPayload(format!(
                "unknown display type {other:?}"
            ))),
        }
    }
}

/// Metadata shared by every image and folded into each banner id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupingContext {
    pub display_type: DisplayType,
    pub category: String,
    pub page_id: String,
    /// Only consulted when `page_id` is [`OTHER_PAGE_ID`]
    pub custom_page_id: String,
    /// Raw form text; expected to hold a non-negative integer
    pub position: String,
    pub aspect_ratio: String,
    pub priority: Option<i64>,
}

impl GroupingContext {
    pub fn from_config(config: &EditorConfig) -> Self {
        Self {
            display_type: DisplayType::Carousel,
            category: config.default_category.clone(),
            page_id: String::new(),
            custom_page_id: String::new(),
            position: String::new(),
            aspect_ratio: config.default_aspect_ratio.clone(),
            priority: None,
        }
    }
}

impl Default for GroupingContext {
    fn default() -> Self {
        Self::from_config(&EditorConfig::default())
    }
}

/// One slide or banner
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageEntry {
    pub url: String,
    pub caption: String,
    pub link: String,
    pub banner_id: String,
    /// Configured ratio, overwritten whenever the context ratio changes
    pub aspect_ratio: String,
    /// Ratio measured from the image at add time, never recomputed
    display_aspect_ratio: String,
}

impl ImageEntry {
    pub fn new(
        url: impl Into<String>,
        aspect_ratio: impl Into<String>,
        display_aspect_ratio: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            caption: String::new(),
            link: String::new(),
            banner_id: String::new(),
            aspect_ratio: aspect_ratio.into(),
            display_aspect_ratio: display_aspect_ratio.into(),
        }
    }

    pub fn display_aspect_ratio(&self) -> &str {
        &self.display_aspect_ratio
    }

    /// True when the measured ratio differs from the configured one.
    pub fn has_aspect_ratio_mismatch(&self) -> bool {
        self.display_aspect_ratio != self.aspect_ratio
    }

    #[must_use]
    pub fn with_caption(self, caption: impl Into<String>) -> Self {
        Self {
            caption: caption.into(),
            ..self
        }
    }

    #[must_use]
    pub fn with_link(self, link: impl Into<String>) -> Self {
        Self {
            link: link.into(),
            ..self
        }
    }

    #[must_use]
    pub fn with_banner_id(self, banner_id: impl Into<String>) -> Self {
        Self {
            banner_id: banner_id.into(),
            ..self
        }
    }

    #[must_use]
    pub fn with_aspect_ratio(self, aspect_ratio: impl Into<String>) -> Self {
        Self {
            aspect_ratio: aspect_ratio.into(),
            ..self
        }
    }

    #[must_use]
    pub fn with_field(self, field: EntryField, value: impl Into<String>) -> Self {
        match field {
            EntryField::Caption => self.with_caption(value),
            EntryField::Link => self.with_link(value),
            EntryField::BannerId => self.with_banner_id(value),
        }
    }
}

/// User-editable entry fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryField {
    Caption,
    Link,
    BannerId,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_type_parses_wire_names() {
        assert_eq!("single".parse::<DisplayType>().unwrap(), DisplayType::Single);
        assert_eq!("carousel".parse::<DisplayType>().unwrap(), DisplayType::Carousel);
        assert!(matches!(
            "grid".parse::<DisplayType>(),
            Err(CarouselError::MalformedPayload(_))
        ));
    }

    #[test]
    fn test_field_edits_keep_display_ratio() {
        let entry = ImageEntry::new("https://cdn.test/a.png", "3:1", "16:9")
            .with_field(EntryField::Caption, "Hello")
            .with_field(EntryField::Link, "https://shop.test")
            .with_aspect_ratio("5:1");
        assert_eq!(entry.caption, "Hello");
        assert_eq!(entry.link, "https://shop.test");
        assert_eq!(entry.aspect_ratio, "5:1");
        assert_eq!(entry.display_aspect_ratio(), "16:9");
        assert!(entry.has_aspect_ratio_mismatch());
    }

    #[test]
    fn test_default_context_uses_config_defaults() {
        let ctx = GroupingContext::default();
        assert_eq!(ctx.display_type, DisplayType::Carousel);
        assert_eq!(ctx.category, "luxury");
        assert_eq!(ctx.aspect_ratio, "3:1");
        assert!(ctx.position.is_empty());
        assert_eq!(ctx.priority, None);
    }
}
