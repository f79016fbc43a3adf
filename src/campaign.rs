//! Named, persisted export snapshots.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use crate::carousel::engine::CarouselList;
use crate::carousel::probe::ImageProbe;
use crate::error::{self, CarouselError};

/// String key-value storage the campaigns live in
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;

    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// One file per key under a root directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Keys name a file directly under `root`; anything that could leave it is refused.
    fn path_for(&self, key: &str) -> Result<PathBuf> {
        if key.is_empty() || key == "." || key == ".." || key.contains(['/', '\\']) {
            anyhow::bail!("Invalid store key {key:?}");
        }
        Ok(self.root.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        if !path.exists() {
            return Ok(None);
        }
        let value = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Ok(Some(value))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.root)
            .with_context(|| format!("Failed to create {}", self.root.display()))?;
        fs::write(&path, value).with_context(|| format!("Failed to write {}", path.display()))
    }
}

/// A saved export; `data` is the payload JSON exactly as exported
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Campaign {
    pub name: String,
    pub data: String,
}

/// Campaign list kept in sync with a [`KeyValueStore`] entry
#[derive(Debug)]
pub struct CampaignStore<S> {
    store: S,
    key: String,
    campaigns: Vec<Campaign>,
}

impl<S: KeyValueStore> CampaignStore<S> {
    /// Load the saved campaigns; a missing entry means none yet.
    pub fn load(store: S, key: impl Into<String>) -> error::Result<Self> {
        let key = key.into();
        let campaigns: Vec<Campaign> = match store.get(&key).map_err(CarouselError::Storage)? {
            Some(raw) => serde_json::from_str(&raw)
                .with_context(|| format!("Stored campaigns under {key:?} are not a campaign list"))
                .map_err(CarouselError::Storage)?,
            None => Vec::new(),
        };
        tracing::debug!(key = %key, count = campaigns.len(), "campaigns loaded");
        Ok(Self {
            store,
            key,
            campaigns,
        })
    }

    pub fn campaigns(&self) -> &[Campaign] {
        &self.campaigns
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.campaigns.iter().map(|campaign| campaign.name.as_str())
    }

    /// First campaign saved under `name`.
    pub fn find(&self, name: &str) -> Option<&Campaign> {
        self.campaigns.iter().find(|campaign| campaign.name == name)
    }

    /// Append a campaign and persist the whole list.
    ///
    /// Names are not unique; saving the same name twice keeps both.
    pub fn save(&mut self, name: impl Into<String>, data: impl Into<String>) -> error::Result<&Campaign> {
        let mut campaigns = self.campaigns.clone();
        campaigns.push(Campaign {
            name: name.into(),
            data: data.into(),
        });

        let raw = serde_json::to_string(&campaigns)
            .context("Failed to encode campaigns")
            .map_err(CarouselError::Storage)?;
        self.store
            .set(&self.key, &raw)
            .map_err(CarouselError::Storage)?;

        self.campaigns = campaigns;
        let saved = &self.campaigns[self.campaigns.len() - 1];
        tracing::info!(name = %saved.name, total = self.campaigns.len(), "campaign saved");
        Ok(saved)
    }

    /// Replace the editor contents with the campaign called `name`.
    pub fn import_into<P: ImageProbe>(&self, name: &str, list: &mut CarouselList<P>) -> error::Result<()> {
        let campaign = self
            .find(name)
            .ok_or_else(|| CarouselError::MalformedPayload(format!("no campaign named {name:?}")))?;
        list.deserialize(&campaign.data)
    }

    pub fn into_inner(self) -> S {
        self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>> {
            Ok(Some("[]".to_string()))
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<()> {
            anyhow::bail!("quota exceeded")
        }
    }

    #[test]
    fn test_save_persists_and_reloads() {
        let mut campaigns = CampaignStore::load(MemoryStore::new(), "campaigns").unwrap();
        assert!(campaigns.campaigns().is_empty());

        campaigns.save("Diwali", r#"{"type":"single"}"#).unwrap();
        campaigns.save("Diwali", r#"{"type":"carousel"}"#).unwrap();
        assert_eq!(campaigns.names().collect::<Vec<_>>(), vec!["Diwali", "Diwali"]);
        assert_eq!(campaigns.find("Diwali").unwrap().data, r#"{"type":"single"}"#);

        let reloaded = CampaignStore::load(campaigns.into_inner(), "campaigns").unwrap();
        assert_eq!(reloaded.campaigns().len(), 2);
    }

    #[test]
    fn test_stored_format_is_name_data_list() {
        let mut campaigns = CampaignStore::load(MemoryStore::new(), "campaigns").unwrap();
        campaigns.save("Sale", "{}").unwrap();
        let raw = campaigns.into_inner().get("campaigns").unwrap().unwrap();
        assert_eq!(raw, r#"[{"name":"Sale","data":"{}"}]"#);
    }

    #[test]
    fn test_failed_write_keeps_previous_list() {
        let mut campaigns = CampaignStore::load(BrokenStore, "campaigns").unwrap();
        let err = campaigns.save("Sale", "{}").unwrap_err();
        assert!(matches!(err, CarouselError::Storage(_)));
        assert!(err.to_string().contains("quota exceeded"));
        assert!(campaigns.campaigns().is_empty());
    }

    #[test]
    fn test_corrupt_store_is_reported() {
        let mut store = MemoryStore::new();
        store.set("campaigns", "{oops").unwrap();
        assert!(matches!(
            CampaignStore::load(store, "campaigns"),
            Err(CarouselError::Storage(_))
        ));
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path().join("state"));
        assert_eq!(store.get("campaigns").unwrap(), None);

        store.set("campaigns", "[]").unwrap();
        assert_eq!(store.get("campaigns").unwrap().as_deref(), Some("[]"));
        assert!(dir.path().join("state/campaigns.json").exists());
    }

    #[test]
    fn test_file_store_keeps_keys_inside_root() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path().join("state"));

        for key in ["../escape", "nested/key", "..", "", "win\\path"] {
            assert!(store.set(key, "[]").is_err(), "key {key:?} accepted");
            assert!(store.get(key).is_err(), "key {key:?} accepted");
        }
        assert!(!dir.path().join("escape.json").exists());
        assert!(!dir.path().join("state").exists());
    }
}
