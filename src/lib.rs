#![deny(clippy::all)]

//! Carousel and banner configuration editor.
//!
//! [`CarouselList`] owns the ordered images and the grouping context their
//! banner ids are derived from; [`export_carousel`] turns a valid list into
//! the JSON payload consumed by the site and stores it as a named campaign.

pub mod campaign;
pub mod carousel;
pub mod config;
pub mod error;
pub mod export;
#[cfg(feature = "node")]
mod node;

pub use campaign::{Campaign, CampaignStore, FileStore, KeyValueStore, MemoryStore};
pub use carousel::banner::{derive_banner_id, effective_page_id};
pub use carousel::engine::{CarouselList, ContextChange, FieldUpdate};
pub use carousel::payload::{CarouselPayload, PayloadEntry, is_well_formed_json};
pub use carousel::probe::{FileImageProbe, ImageProbe, is_valid_url};
pub use carousel::ratio::{Dimensions, reduce_aspect_ratio};
pub use carousel::validate::{FieldErrors, ValidationReport, Violation, parse_index_input};
pub use carousel::{DisplayType, EntryField, GroupingContext, ImageEntry, OTHER_PAGE_ID};
pub use config::EditorConfig;
pub use error::{CarouselError, Result};
pub use export::{Clipboard, MemoryClipboard, export_carousel};
