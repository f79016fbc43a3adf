use super::banner::{derive_banner_id, effective_page_id};
use super::payload::{CarouselPayload, PayloadEntry, PayloadPosition};
use super::probe::{is_valid_url, ImageProbe};
use super::validate::{
    self, field_errors, find_banner_id_collision, position_number, FieldErrors, ValidationReport,
};
use super::{DisplayType, EntryField, GroupingContext, ImageEntry, OTHER_PAGE_ID};
use crate::config::EditorConfig;
use crate::error::{CarouselError, Result};

/// A change to one grouping-context field.
///
/// Every context edit goes through [`CarouselList::apply`], which decides
/// which derived entry fields have to follow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContextChange {
    DisplayType(DisplayType),
    /// Also clears the page ids, which are per-category
    Category(String),
    PageId(String),
    CustomPageId(String),
    Position(String),
    AspectRatio(String),
    Priority(Option<i64>),
}

/// Outcome of a field edit that was applied
#[derive(Debug, Default)]
pub struct FieldUpdate {
    /// Advisory [`CarouselError::BannerIdCollision`]; the edit is kept regardless
    pub collision: Option<CarouselError>,
}

/// Ordered image list plus the context its banner ids are derived from
#[derive(Debug)]
pub struct CarouselList<P> {
    probe: P,
    config: EditorConfig,
    context: GroupingContext,
    entries: Vec<ImageEntry>,
    has_changes: bool,
}

impl<P: ImageProbe> CarouselList<P> {
    pub fn new(probe: P, config: EditorConfig) -> Self {
        let context = GroupingContext::from_config(&config);
        Self {
            probe,
            config,
            context,
            entries: Vec::new(),
            has_changes: false,
        }
    }

    pub fn context(&self) -> &GroupingContext {
        &self.context
    }

    pub fn entries(&self) -> &[ImageEntry] {
        &self.entries
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Unsaved edits since construction, the last reset or the last export.
    pub fn has_changes(&self) -> bool {
        self.has_changes
    }

    pub fn mark_exported(&mut self) {
        self.has_changes = false;
    }

    /// Page ids offered for the current category.
    pub fn page_id_options(&self) -> Vec<String> {
        self.config.page_ids_for(&self.context.category)
    }

    /// Verify, measure and insert an image.
    ///
    /// Single banners replace the whole list. Carousels insert at
    /// `requested_index` (past the end appends) or append.
    pub async fn add(&mut self, url: &str, requested_index: Option<usize>) -> Result<&[ImageEntry]> {
        if !is_valid_url(url) {
            return Err(CarouselError::InvalidUrl(url.to_string()));
        }
        if self.entries.iter().any(|entry| entry.url == url) {
            return Err(CarouselError::DuplicateUrl(url.to_string()));
        }

        let dims = self.probe.load(url).await.map_err(|err| {
            tracing::warn!(url, error = %format!("{err:#}"), "image failed to load");
            CarouselError::ImageLoadFailed {
                url: url.to_string(),
                reason: err.to_string(),
            }
        })?;
        if dims.is_empty() {
            return Err(CarouselError::ImageLoadFailed {
                url: url.to_string(),
                reason: format!("image has no pixels ({dims})"),
            });
        }

        let entry = ImageEntry::new(url, self.context.aspect_ratio.clone(), dims.aspect_ratio());
        let index = match self.context.display_type {
            DisplayType::Single => {
                self.entries = vec![entry];
                0
            }
            DisplayType::Carousel => {
                let len = self.entries.len();
                let index = requested_index.map_or(len, |i| i.min(len));
                self.entries.insert(index, entry);
                index
            }
        };

        self.bulk_recompute_banner_ids();
        self.has_changes = true;
        tracing::info!(url, index, %dims, display_aspect_ratio = %dims.aspect_ratio(), "image added");
        Ok(&self.entries)
    }

    pub fn remove(&mut self, index: usize) -> Result<ImageEntry> {
        self.check_index(index)?;
        let removed = self.entries.remove(index);
        self.bulk_recompute_banner_ids();
        self.has_changes = true;
        tracing::info!(index, url = %removed.url, "image removed");
        Ok(removed)
    }

    /// Drag-and-drop reorder; the others keep their relative order.
    pub fn move_entry(&mut self, from: usize, to: usize) -> Result<()> {
        self.check_index(from)?;
        self.check_index(to)?;
        if from == to {
            return Ok(());
        }
        let entry = self.entries.remove(from);
        self.entries.insert(to, entry);
        self.bulk_recompute_banner_ids();
        self.has_changes = true;
        tracing::debug!(from, to, "image moved");
        Ok(())
    }

    pub fn update_field(
        &mut self,
        index: usize,
        field: EntryField,
        value: impl Into<String>,
    ) -> Result<FieldUpdate> {
        self.check_index(index)?;
        let value = value.into();

        let collision = match field {
            EntryField::BannerId => find_banner_id_collision(&self.entries, index, &value).map(|other| {
                CarouselError::BannerIdCollision {
                    banner_id: value.trim().to_string(),
                    index,
                    other,
                }
            }),
            EntryField::Caption | EntryField::Link => None,
        };

        let updated = self.entries[index].clone().with_field(field, value);
        self.entries[index] = updated;
        self.has_changes = true;
        Ok(FieldUpdate { collision })
    }

    /// Whether `banner_id` would collide with an entry other than `index`.
    pub fn has_duplicate_banner_id(&self, index: usize, banner_id: &str) -> bool {
        find_banner_id_collision(&self.entries, index, banner_id).is_some()
    }

    /// Apply one context edit and refresh the derived entry fields.
    pub fn apply(&mut self, change: ContextChange) -> Result<()> {
        match change {
            ContextChange::DisplayType(display_type) => {
                if display_type == DisplayType::Single && self.entries.len() > 1 {
                    return Err(CarouselError::SingleRequiresOneImage(self.entries.len()));
                }
                self.context.display_type = display_type;
                self.bulk_recompute_banner_ids();
            }
            ContextChange::Category(category) => {
                self.context.category = category;
                self.context.page_id.clear();
                self.context.custom_page_id.clear();
                self.bulk_recompute_banner_ids();
            }
            ContextChange::PageId(page_id) => {
                self.context.page_id = page_id;
                self.bulk_recompute_banner_ids();
            }
            ContextChange::CustomPageId(custom) => {
                self.context.custom_page_id = custom;
                self.bulk_recompute_banner_ids();
            }
            ContextChange::Position(position) => {
                self.context.position = position;
                self.bulk_recompute_banner_ids();
            }
            ContextChange::AspectRatio(aspect_ratio) => {
                if !self.config.is_supported_aspect_ratio(&aspect_ratio) {
                    return Err(CarouselError::UnsupportedAspectRatio(aspect_ratio));
                }
                self.bulk_set_aspect_ratio(&aspect_ratio);
                self.context.aspect_ratio = aspect_ratio;
            }
            ContextChange::Priority(priority) => {
                self.context.priority = priority;
            }
        }
        self.has_changes = true;
        Ok(())
    }

    /// Re-derive every banner id from the context and the entry's index.
    pub fn bulk_recompute_banner_ids(&mut self) {
        let ctx = &self.context;
        self.entries = std::mem::take(&mut self.entries)
            .into_iter()
            .enumerate()
            .map(|(index, entry)| entry.with_banner_id(derive_banner_id(ctx, index)))
            .collect();
    }

    /// Overwrite every configured ratio; measured ratios stay untouched.
    pub fn bulk_set_aspect_ratio(&mut self, value: &str) {
        self.entries = std::mem::take(&mut self.entries)
            .into_iter()
            .map(|entry| entry.with_aspect_ratio(value))
            .collect();
    }

    pub fn validate_for_export(&self) -> std::result::Result<(), ValidationReport> {
        validate::validate_for_export(&self.context, &self.entries)
    }

    /// Valid and non-empty.
    pub fn is_export_ready(&self) -> bool {
        !self.entries.is_empty() && self.validate_for_export().is_ok()
    }

    pub fn field_errors(&self) -> FieldErrors {
        field_errors(&self.context)
    }

    /// True when at least two images were measured with different ratios.
    pub fn has_inconsistent_aspect_ratios(&self) -> bool {
        match self.entries.split_first() {
            Some((first, rest)) => rest
                .iter()
                .any(|entry| entry.display_aspect_ratio() != first.display_aspect_ratio()),
            None => false,
        }
    }

    pub fn to_payload(&self) -> Result<CarouselPayload> {
        self.validate_for_export()
            .map_err(CarouselError::ExportValidationFailed)?;

        Ok(CarouselPayload {
            display_type: self.context.display_type,
            position: position_number(&self.context.position).map(PayloadPosition::from),
            page_id: effective_page_id(&self.context).to_string(),
            priority: self.context.priority,
            aspect_ratio: self.context.aspect_ratio.clone(),
            content: self.entries.iter().map(PayloadEntry::from_entry).collect(),
        })
    }

    pub fn serialize(&self) -> Result<String> {
        self.to_payload()?.to_json()
    }

    /// Replace context and entries from an export record; all or nothing.
    pub fn deserialize(&mut self, input: &str) -> Result<()> {
        let payload = CarouselPayload::from_json(input)?;
        self.import_payload(payload)
    }

    pub fn import_payload(&mut self, payload: CarouselPayload) -> Result<()> {
        if payload.display_type == DisplayType::Single && payload.content.len() > 1 {
            return Err(CarouselError::MalformedPayload(format!(
                "single banner payload holds {} images",
                payload.content.len()
            )));
        }

        // An exported custom page id may itself read "other"; keep it effective.
        let custom_page_id = if payload.page_id == OTHER_PAGE_ID {
            payload.page_id.clone()
        } else {
            String::new()
        };
        let context = GroupingContext {
            display_type: payload.display_type,
            category: self.context.category.clone(),
            page_id: payload.page_id,
            custom_page_id,
            position: payload
                .position
                .as_ref()
                .map(PayloadPosition::as_text)
                .unwrap_or_default(),
            aspect_ratio: payload.aspect_ratio,
            priority: payload.priority,
        };
        let entries: Vec<ImageEntry> = payload
            .content
            .into_iter()
            .map(|entry| entry.into_entry(&context.aspect_ratio))
            .collect();

        tracing::info!(
            display_type = %context.display_type,
            page_id = %context.page_id,
            images = entries.len(),
            "carousel imported"
        );
        self.context = context;
        self.entries = entries;
        self.has_changes = true;
        Ok(())
    }

    /// Back to the configured defaults with an empty list.
    pub fn reset(&mut self) {
        self.context = GroupingContext::from_config(&self.config);
        self.entries.clear();
        self.has_changes = false;
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.entries.len() {
            Ok(())
        } else {
            Err(CarouselError::IndexOutOfBounds {
                index,
                len: self.entries.len(),
            })
        }
    }
}
