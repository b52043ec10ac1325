//! Placeholder namespaces and the scopes call sites declare over them.

use std::fmt;

/// Which data source a placeholder link resolves against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Namespace {
    CatalogItem,
    CreativeCopy,
    CreativeResponse,
    CreativeLink,
    ImageCarousel,
    State,
}

/// Prefix shared by every data-bearing namespace.
pub const DATA_PREFIX: &str = "DATA";
/// Prefix of the live-state namespace.
pub const STATE_PREFIX: &str = "STATE";

impl Namespace {
    /// Look up a data namespace by the segment following `DATA.`.
    pub fn from_data_segment(segment: &str) -> Option<Namespace> {
        match segment {
            "catalogItem" => Some(Namespace::CatalogItem),
            "creativeCopy" => Some(Namespace::CreativeCopy),
            "creativeResponse" => Some(Namespace::CreativeResponse),
            "creativeLink" => Some(Namespace::CreativeLink),
            "dataImageCarousel" => Some(Namespace::ImageCarousel),
            _ => None,
        }
    }

    /// The namespace as written in a template.
    pub fn as_str(&self) -> &'static str {
        match self {
            Namespace::CatalogItem => "DATA.catalogItem",
            Namespace::CreativeCopy => "DATA.creativeCopy",
            Namespace::CreativeResponse => "DATA.creativeResponse",
            Namespace::CreativeLink => "DATA.creativeLink",
            Namespace::ImageCarousel => "DATA.dataImageCarousel",
            Namespace::State => "STATE",
        }
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Namespaces legal inside an offer (creative-level) expansion.
pub const OFFER_SCOPE: &[Namespace] = &[
    Namespace::CreativeCopy,
    Namespace::CreativeResponse,
    Namespace::CreativeLink,
    Namespace::ImageCarousel,
    Namespace::State,
];

/// Namespaces legal inside a catalog-item expansion.
pub const CATALOG_ITEM_SCOPE: &[Namespace] = &[Namespace::CatalogItem, Namespace::State];

/// Every namespace; used where an offer and one of its catalog items are
/// both in view.
pub const FULL_SCOPE: &[Namespace] = &[
    Namespace::CatalogItem,
    Namespace::CreativeCopy,
    Namespace::CreativeResponse,
    Namespace::CreativeLink,
    Namespace::ImageCarousel,
    Namespace::State,
];

/// Only live state; for text outside any offer.
pub const STATE_SCOPE: &[Namespace] = &[Namespace::State];
