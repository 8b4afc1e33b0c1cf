use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};

/// A catalog category. Categories form a tree through `parent_id`; the
/// tree is not checked for cycles here.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Category {
    pub id: i64,
    /// References `Category::id` of the parent.
    pub parent_id: i64,
    /// Unique within a store; used as the section directory name.
    pub slug: String,
    pub name: String,
    pub description: String,
    pub meta_title: String,
    pub meta_description: String,
    pub meta_keywords: String,
    /// Level in the category tree.
    pub depth: i32,
    /// Ordering among siblings with the same parent.
    pub sort_order: i32,
}

/// Response envelope for `GET /v1/categories`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryList {
    #[serde(deserialize_with = "null_as_default")]
    pub categories: Vec<Category>,
}

/// Lightweight product entry returned by the paginated product listing.
/// The full record comes from the per-slug detail endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductSummary {
    pub slug: String,
    pub name: String,
}

/// Response envelope for `GET /v1/products/{page}/{page_size}`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductPage {
    #[serde(deserialize_with = "null_as_default")]
    pub products: Vec<ProductSummary>,
    pub total_records: i64,
    pub total_pages: i64,
}

/// Full product record, both as decoded from the detail endpoint and as
/// written to the page front matter.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Product {
    /// Unique; used as the page file stem.
    pub slug: String,
    pub title: String,
    /// Wire-only. Moved into `title` before writing.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    /// Used on category listing pages.
    pub short_description: String,
    pub description: String,
    pub meta_title: String,
    pub meta_description: String,
    pub meta_keywords: String,
    #[serde(deserialize_with = "null_as_default")]
    pub variants: Vec<Variant>,
    #[serde(deserialize_with = "null_as_default")]
    pub default_image: Asset,
    #[serde(deserialize_with = "null_as_default")]
    pub images: Vec<Asset>,
    #[serde(deserialize_with = "null_as_default")]
    pub categories: Vec<CategoryPair>,
    /// Generation date of the page, not a product attribute.
    #[serde(
        deserialize_with = "leading_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub date: Option<NaiveDate>,
    #[serde(deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
}

impl Product {
    /// The first variant flagged as default. Each product is expected to
    /// carry exactly one.
    pub fn default_variant(&self) -> Option<&Variant> {
        self.variants.iter().find(|v| v.is_default)
    }
}

/// A purchasable configuration of a product.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Variant {
    pub is_default: bool,
    pub sku: String,
    // Shipping dimensions.
    pub weight: f64,
    pub height: f64,
    pub width: f64,
    pub depth: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub price: Price,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Price {
    pub amount: f64,
    pub sale_price: f64,
    pub formatted_sale_price: String,
    pub retail_price: f64,
    pub formatted_retail_price: String,
    /// ISO currency code, e.g. `USD`.
    pub currency: String,
}

/// A media file attached to a product.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Asset {
    /// Weak reference to a variant id.
    pub variant_id: i64,
    pub name: String,
    pub display_name: String,
    /// Full, publicly accessible URL.
    pub url: String,
    pub kind: AssetKind,
    /// MIME type.
    pub content_type: String,
    pub sort_order: i64,
    /// Size tag to URL.
    #[serde(deserialize_with = "null_as_default")]
    pub sizes: BTreeMap<String, String>,
}

/// Asset classification, stored as an integer both on the wire and on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum AssetKind {
    #[default]
    Unknown,
    Image,
    Document,
    Audio,
    Video,
    Archive,
    Other(i64),
}

impl From<i64> for AssetKind {
    fn from(code: i64) -> Self {
        match code {
            0 => Self::Unknown,
            1 => Self::Image,
            2 => Self::Document,
            3 => Self::Audio,
            4 => Self::Video,
            5 => Self::Archive,
            other => Self::Other(other),
        }
    }
}

impl From<AssetKind> for i64 {
    fn from(kind: AssetKind) -> Self {
        match kind {
            AssetKind::Unknown => 0,
            AssetKind::Image => 1,
            AssetKind::Document => 2,
            AssetKind::Audio => 3,
            AssetKind::Video => 4,
            AssetKind::Archive => 5,
            AssetKind::Other(code) => code,
        }
    }
}

/// Denormalized reference from a product back to a category.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryPair {
    pub slug: String,
    pub name: String,
}

/// The store API encodes empty collections and objects as `null`.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accepts `YYYY-MM-DD` or any timestamp starting with one. Anything else
/// (including the zero timestamp the API sends) is treated as unset.
fn leading_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw
        .as_deref()
        .and_then(|s| s.get(..10))
        .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
        .filter(|d| d.year() > 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_category_list_envelope() {
        let json = r#"{
            "categories": [
                {"id": 1, "parent_id": 0, "slug": "shoes", "name": "Shoes",
                 "description": "All shoes", "meta_title": "Shoes",
                 "meta_description": "Buy shoes", "meta_keywords": "shoes",
                 "depth": 0, "sort_order": 2}
            ]
        }"#;
        let list: CategoryList = serde_json::from_str(json).unwrap();

        assert_eq!(list.categories.len(), 1);
        let cat = &list.categories[0];
        assert_eq!(cat.slug, "shoes");
        assert_eq!(cat.name, "Shoes");
        assert_eq!(cat.sort_order, 2);
    }

    #[test]
    fn null_collections_decode_as_empty() {
        let json = r#"{
            "slug": "widget",
            "name": "Widget",
            "variants": null,
            "default_image": null,
            "images": null,
            "categories": null,
            "tags": null
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();

        assert!(product.variants.is_empty());
        assert!(product.images.is_empty());
        assert!(product.categories.is_empty());
        assert!(product.tags.is_empty());
        assert_eq!(product.default_image, Asset::default());
    }

    #[test]
    fn missing_fields_take_zero_values() {
        let product: Product = serde_json::from_str(r#"{"slug": "bare"}"#).unwrap();

        assert_eq!(product.slug, "bare");
        assert_eq!(product.title, "");
        assert_eq!(product.date, None);

        let page: ProductPage = serde_json::from_str("{}").unwrap();
        assert!(page.products.is_empty());
        assert_eq!(page.total_pages, 0);
    }

    #[test]
    fn asset_kind_is_an_integer() {
        let asset: Asset =
            serde_json::from_str(r#"{"kind": 1, "sizes": {"thumb": "https://cdn/t.jpg"}}"#)
                .unwrap();
        assert_eq!(asset.kind, AssetKind::Image);
        assert_eq!(asset.sizes["thumb"], "https://cdn/t.jpg");

        let other: Asset = serde_json::from_str(r#"{"kind": 42}"#).unwrap();
        assert_eq!(other.kind, AssetKind::Other(42));
        assert_eq!(i64::from(other.kind), 42);

        let json = serde_json::to_string(&AssetKind::Video).unwrap();
        assert_eq!(json, "4");
    }

    #[test]
    fn wire_zero_timestamp_is_unset() {
        let product: Product =
            serde_json::from_str(r#"{"date": "0001-01-01T00:00:00Z"}"#).unwrap();
        assert_eq!(product.date, None);

        let dated: Product = serde_json::from_str(r#"{"date": "2024-03-05T10:00:00Z"}"#).unwrap();
        assert_eq!(dated.date, NaiveDate::from_ymd_opt(2024, 3, 5));
    }

    #[test]
    fn default_variant_picks_flagged_entry() {
        let product = Product {
            variants: vec![
                Variant {
                    sku: "W-S".into(),
                    ..Default::default()
                },
                Variant {
                    sku: "W-M".into(),
                    is_default: true,
                    ..Default::default()
                },
            ],
            ..Default::default()
        };

        assert_eq!(product.default_variant().map(|v| v.sku.as_str()), Some("W-M"));
    }
}
