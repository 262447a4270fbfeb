//! Product types as returned by the search backend.

use crate::ids::{GoogleProductId, ProductId};
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// Price block attached to a product.
///
/// The backend fills these fields from different sources, so any of them may
/// be missing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ProductPrice {
    /// Lowest known price in euros.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_eur: Option<f64>,
    /// Pre-formatted pound sterling price.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_gbp: Option<String>,
    /// Pre-formatted number of offers ("12 offers").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offer_count: Option<String>,
}

impl ProductPrice {
    /// The euro price as [`Money`], if one is present and non-zero.
    pub fn eur(&self) -> Option<Money> {
        self.price_eur
            .map(|amount| Money::from_decimal(amount, Currency::EUR))
            .filter(|money| !money.is_zero())
    }
}

/// A product in the backend's catalog.
///
/// Only `id` and `title` are expected on every record; everything else is
/// displayed when present and skipped otherwise. Empty strings and `null`
/// lists sent by the backend are treated the same as absent fields.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Product {
    /// Opaque backend identifier.
    #[serde(default)]
    pub id: ProductId,
    /// Display title.
    #[serde(default)]
    pub title: String,
    /// Category label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Short feature strings, in backend order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub features: Option<Vec<String>>,
    /// Product image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Google Shopping identifier used by the backend to source offers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub google_product_id: Option<GoogleProductId>,
    /// Price information.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<ProductPrice>,
}

impl Product {
    /// Create a product with just an id and title.
    pub fn new(id: impl Into<ProductId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            ..Default::default()
        }
    }

    /// Set the category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Set the feature list.
    pub fn with_features<I, S>(mut self, features: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.features = Some(features.into_iter().map(Into::into).collect());
        self
    }

    /// Set the image URL.
    pub fn with_image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }

    /// Set the euro price.
    pub fn with_price_eur(mut self, price_eur: f64) -> Self {
        self.price.get_or_insert_with(ProductPrice::default).price_eur = Some(price_eur);
        self
    }

    /// Category, if the backend sent a non-empty one.
    pub fn category(&self) -> Option<&str> {
        non_empty(self.category.as_deref())
    }

    /// Image URL, if the backend sent a non-empty one.
    pub fn image_url(&self) -> Option<&str> {
        non_empty(self.image_url.as_deref())
    }

    /// Features in backend order (empty when absent).
    pub fn features(&self) -> &[String] {
        self.features.as_deref().unwrap_or(&[])
    }

    /// Euro price badge, e.g. `€999.00`.
    pub fn display_price(&self) -> Option<String> {
        self.price.as_ref().and_then(ProductPrice::eur).map(|m| m.display())
    }

    /// Number-of-offers label, if the backend sent one.
    pub fn offer_count(&self) -> Option<&str> {
        non_empty(self.price.as_ref().and_then(|p| p.offer_count.as_deref()))
    }

    /// The first `limit` features plus a count of the ones left out.
    pub fn feature_preview(&self, limit: usize) -> FeaturePreview<'_> {
        let features = self.features();
        let shown = &features[..features.len().min(limit)];
        FeaturePreview {
            shown,
            remaining: features.len() - shown.len(),
        }
    }
}

/// A truncated view of a product's feature list for listings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeaturePreview<'a> {
    /// Features to show.
    pub shown: &'a [String],
    /// How many features were cut.
    pub remaining: usize,
}

impl FeaturePreview<'_> {
    /// The "+N more" label, if anything was cut.
    pub fn more_label(&self) -> Option<String> {
        (self.remaining > 0).then(|| format!("+{} more", self.remaining))
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
