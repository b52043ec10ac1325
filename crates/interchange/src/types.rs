//! Typed records decoded from the layout schema JSON.
//!
//! These are the concrete shapes the placeholder resolver walks. Fields the
//! engines never interpret (layout trees, settings) stay as
//! `serde_json::Value` so the renderer can decode them however it likes.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Flat string-to-string copy map (creative copy, catalog-item copy).
pub type CopyMap = BTreeMap<String, String>;

// ── Catalog item ────────────────────────────────────────────────────

/// A purchasable catalog item attached to an offer.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItem {
    #[serde(default)]
    pub catalog_item_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cart_item_id: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<serde_json::Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<serde_json::Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<serde_json::Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linked_product_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_data: Option<String>,
    /// Catalog-item scoped copy. Keys are usually dotted (`ui.title`).
    #[serde(default)]
    pub copy: CopyMap,
}

// ── Creative ────────────────────────────────────────────────────────

/// Which of the two response options a call site is bound to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ResponseKey {
    Positive,
    Negative,
}

impl ResponseKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseKey::Positive => "positive",
            ResponseKey::Negative => "negative",
        }
    }
}

impl std::str::FromStr for ResponseKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "positive" => Ok(ResponseKey::Positive),
            "negative" => Ok(ResponseKey::Negative),
            other => Err(format!("unknown response key '{}'", other)),
        }
    }
}

/// One of the accept/decline options offered by a creative.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResponseOption {
    #[serde(default)]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    #[serde(default)]
    pub instance_guid: String,
    #[serde(default)]
    pub token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signal_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub long_label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_success_label: Option<String>,
    #[serde(default)]
    pub is_positive: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(
        default,
        rename = "responseJWTToken",
        skip_serializing_if = "Option::is_none"
    )]
    pub response_jwt_token: Option<String>,
}

/// The `positive` / `negative` response pair of a creative.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ResponseOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub positive: Option<ResponseOption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub negative: Option<ResponseOption>,
}

impl ResponseOptions {
    pub fn get(&self, key: ResponseKey) -> Option<&ResponseOption> {
        match key {
            ResponseKey::Positive => self.positive.as_ref(),
            ResponseKey::Negative => self.negative.as_ref(),
        }
    }
}

/// A titled hyperlink carried by a creative (privacy policy, terms...).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreativeLink {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
}

/// An image with light and dark renditions.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreativeImage {
    #[serde(default)]
    pub light: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dark: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// The creative of an offer: its copy, responses, links and images.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Creative {
    #[serde(default)]
    pub referral_creative_id: String,
    #[serde(default)]
    pub instance_guid: String,
    #[serde(default)]
    pub token: String,
    #[serde(default)]
    pub copy: CopyMap,
    #[serde(default)]
    pub response_options_map: ResponseOptions,
    #[serde(default)]
    pub links: BTreeMap<String, CreativeLink>,
    #[serde(default)]
    pub images: BTreeMap<String, CreativeImage>,
}

// ── Offer / slot / schema ───────────────────────────────────────────

/// An offer: one creative plus zero or more catalog items.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Offer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub campaign_id: Option<String>,
    #[serde(default)]
    pub creative: Creative,
    #[serde(default)]
    pub catalog_items: Vec<CatalogItem>,
}

/// A slot in the layout, carrying one offer and an optional layout variant.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Slot {
    #[serde(default)]
    pub instance_guid: String,
    #[serde(default)]
    pub token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offer: Option<Offer>,
    /// Renderer-owned layout variant tree, not interpreted here.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout_variant: Option<serde_json::Value>,
}

/// The decoded layout schema document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutSchema {
    pub session_id: String,
    pub page_instance_guid: String,
    pub token: String,
    /// Breakpoint name to minimum pixel width.
    pub breakpoints: BTreeMap<String, u32>,
    /// Renderer-owned settings, not interpreted here.
    pub settings: serde_json::Value,
    /// Renderer-owned layout tree, not interpreted here.
    pub layout: Option<serde_json::Value>,
    pub slots: Vec<Slot>,
}

impl LayoutSchema {
    /// The offer of slot `index`, if that slot exists and carries one.
    pub fn offer(&self, index: usize) -> Option<&Offer> {
        self.slots.get(index).and_then(|s| s.offer.as_ref())
    }
}
