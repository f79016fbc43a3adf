//! Editor defaults and page catalogues.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const DEFAULT_CATEGORY: &str = "luxury";
pub const DEFAULT_ASPECT_RATIO: &str = "3:1";
pub const DEFAULT_CAMPAIGN_KEY: &str = "campaigns";

/// Settings shared by the engine, the campaign store and the UI pickers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EditorConfig {
    pub default_category: String,
    pub default_aspect_ratio: String,
    pub aspect_ratio_options: Vec<String>,
    /// Page ids offered for every category
    pub common_page_ids: Vec<String>,
    /// Page ids offered only for one category, appended after the common ones
    pub category_page_ids: BTreeMap<String, Vec<String>>,
    pub campaign_store_key: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        let luxury = [
            "men-home-page",
            "women-home-page",
            "the-watch-store",
            "beauty-home-page",
            "handbags-store",
            "footwear-store",
            "indiluxe",
            "lifestyle-home-page",
            "kids-clp",
            "the-collective",
            "footwear-microsite",
            "hybrid-plp-menswatches",
            "bvlgari",
        ];
        let fashion = [
            "Checkout",
            "Search",
            "beauty-homepage",
            "women-homepage",
            "footwear-homepage",
            "men-homepage",
            "westside/c-mbh11a00004",
            "home-homepage",
            "accessories-homepage",
            "kids-homepage",
        ];

        let mut category_page_ids = BTreeMap::new();
        category_page_ids.insert("luxury".to_string(), to_strings(&luxury));
        category_page_ids.insert("fashion".to_string(), to_strings(&fashion));

        Self {
            default_category: DEFAULT_CATEGORY.to_string(),
            default_aspect_ratio: DEFAULT_ASPECT_RATIO.to_string(),
            aspect_ratio_options: to_strings(&["3:1", "5:1"]),
            common_page_ids: to_strings(&["Cart", "Wishlist"]),
            category_page_ids,
            campaign_store_key: DEFAULT_CAMPAIGN_KEY.to_string(),
        }
    }
}

impl EditorConfig {
    /// Parse a config document; missing fields fall back to the defaults.
    pub fn from_json_str(input: &str) -> Result<Self> {
        serde_json::from_str(input).context("Failed to parse editor config")
    }

    /// Page ids selectable for `category`, common ones first.
    pub fn page_ids_for(&self, category: &str) -> Vec<String> {
        let mut ids = self.common_page_ids.clone();
        if let Some(specific) = self.category_page_ids.get(category) {
            ids.extend(specific.iter().cloned());
        }
        ids
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.category_page_ids.keys().map(String::as_str)
    }

    pub fn is_supported_aspect_ratio(&self, value: &str) -> bool {
        self.aspect_ratio_options.iter().any(|option| option == value)
    }
}

fn to_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}
