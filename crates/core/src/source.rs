//! The data a placeholder expansion is allowed to see.

use placard_interchange::{CatalogItem, Creative, ResponseKey};

use crate::error::PlaceholderError;
use crate::namespace::{
    Namespace, CATALOG_ITEM_SCOPE, FULL_SCOPE, OFFER_SCOPE, STATE_SCOPE,
};
use crate::property::{walk, walk_from, Property};

/// Borrowed view of the records in scope at one call site, plus the set of
/// namespaces that call site declares legal.
///
/// Referencing a namespace outside the scope is an error. Referencing a
/// namespace inside the scope whose record is absent simply finds nothing.
#[derive(Debug, Clone, Copy)]
pub struct DataSource<'a> {
    scope: &'a [Namespace],
    creative: Option<&'a Creative>,
    catalog_item: Option<&'a CatalogItem>,
    response_key: Option<ResponseKey>,
}

impl<'a> DataSource<'a> {
    /// An empty source with an explicit scope.
    pub fn new(scope: &'a [Namespace]) -> Self {
        DataSource {
            scope,
            creative: None,
            catalog_item: None,
            response_key: None,
        }
    }

    /// Creative-level expansion (copy, responses, links, images, state).
    pub fn offer(creative: &'a Creative) -> Self {
        DataSource::new(OFFER_SCOPE).with_creative(creative)
    }

    /// Catalog-item expansion (catalog item fields, state).
    pub fn catalog_item(item: &'a CatalogItem) -> Self {
        DataSource::new(CATALOG_ITEM_SCOPE).with_catalog_item(item)
    }

    /// Both the creative and one of its catalog items are in view.
    pub fn offer_with_catalog_item(creative: &'a Creative, item: &'a CatalogItem) -> Self {
        DataSource::new(FULL_SCOPE)
            .with_creative(creative)
            .with_catalog_item(item)
    }

    /// Live state only.
    pub fn state_only() -> Self {
        DataSource::new(STATE_SCOPE)
    }

    pub fn with_creative(mut self, creative: &'a Creative) -> Self {
        self.creative = Some(creative);
        self
    }

    pub fn with_catalog_item(mut self, item: &'a CatalogItem) -> Self {
        self.catalog_item = Some(item);
        self
    }

    /// Bind the response option `DATA.creativeResponse` links read from.
    pub fn with_response(mut self, key: ResponseKey) -> Self {
        self.response_key = Some(key);
        self
    }

    pub fn scope(&self) -> &'a [Namespace] {
        self.scope
    }

    pub fn creative(&self) -> Option<&'a Creative> {
        self.creative
    }

    pub fn catalog_item_record(&self) -> Option<&'a CatalogItem> {
        self.catalog_item
    }

    /// Fail unless `namespace` is legal here.
    pub fn check(&self, namespace: Namespace) -> Result<(), PlaceholderError> {
        if self.scope.contains(&namespace) {
            Ok(())
        } else {
            Err(PlaceholderError::IllegalNamespace {
                namespace: namespace.to_string(),
            })
        }
    }

    /// Resolve `path` within a data namespace. Empty strings count as absent.
    ///
    /// `Namespace::State` never yields a literal here; state links are
    /// handled by the resolver as bindings.
    pub fn lookup(&self, namespace: Namespace, path: &str) -> Option<String> {
        let value = match namespace {
            Namespace::CatalogItem => walk(self.catalog_item?, path),
            Namespace::CreativeCopy => walk_from(Property::Map(&self.creative?.copy), path),
            Namespace::CreativeResponse => {
                let option = self
                    .creative?
                    .response_options_map
                    .get(self.response_key?)?;
                walk(option, path)
            }
            Namespace::CreativeLink => {
                let link = self.creative?.links.get(path)?;
                if link.title.is_empty() || link.url.is_empty() {
                    None
                } else {
                    Some(format!("<a href=\"{}\">{}</a>", link.url, link.title))
                }
            }
            Namespace::ImageCarousel => {
                let image = self.creative?.images.get(path)?;
                Some(image.light.clone())
            }
            Namespace::State => None,
        };
        value.filter(|v| !v.is_empty())
    }
}
