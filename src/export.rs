//! Export flow: validated payload to the clipboard and, optionally, the campaign list.

use anyhow::Result;

use crate::campaign::{CampaignStore, KeyValueStore};
use crate::carousel::engine::CarouselList;
use crate::carousel::probe::ImageProbe;
use crate::error::{self, CarouselError};

pub trait Clipboard {
    fn write(&mut self, text: &str) -> Result<()>;
}

/// Keeps the last written text
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
    contents: Option<String>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }
}

impl Clipboard for MemoryClipboard {
    fn write(&mut self, text: &str) -> Result<()> {
        self.contents = Some(text.to_string());
        Ok(())
    }
}

/// Serialize the list, copy it and save it under `campaign_name` if given.
///
/// A blank name skips the campaign save. The clipboard is written last, so a
/// failed save leaves it untouched. On success the list is marked as
/// exported and the payload is returned.
pub fn export_carousel<P, S, C>(
    list: &mut CarouselList<P>,
    campaigns: &mut CampaignStore<S>,
    clipboard: &mut C,
    campaign_name: Option<&str>,
) -> error::Result<String>
where
    P: ImageProbe,
    S: KeyValueStore,
    C: Clipboard,
{
    if list.is_empty() {
        return Err(CarouselError::EmptyCarousel);
    }
    let payload = list.serialize()?;

    if let Some(name) = campaign_name.map(str::trim).filter(|name| !name.is_empty()) {
        campaigns.save(name, payload.clone())?;
    }

    clipboard.write(&payload).map_err(CarouselError::Clipboard)?;

    list.mark_exported();
    tracing::info!(images = list.len(), campaign = ?campaign_name, "carousel exported");
    Ok(payload)
}
