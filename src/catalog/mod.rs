//! Catalog entities - plain records mirroring the admin backend's wire format.
//!
//! Entities carry no behavior. Identity is a string id, unique within its
//! collection. A `Product.tags` entry is a `Tag` id and may dangle after a
//! tag deletion until the store sweeps it.
//!
//! Field names follow the backend's camelCase JSON (`basePrice`,
//! `lastPage`, ...), so these types serialize straight onto the wire.

use serde::{Deserialize, Serialize};

/// A catalog product.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// Tag ids. May reference tags that no longer exist until the next sweep.
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub barcode: Option<String>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub vendor: Option<String>,
    #[serde(default)]
    pub stock: u32,
    #[serde(default)]
    pub reserved: u32,
    #[serde(default)]
    pub cost: f64,
    #[serde(default)]
    pub base_price: f64,
    #[serde(default)]
    pub tax_percent: f64,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub weight: f64,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub active: bool,
}

/// A product brand.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Brand {
    pub id: String,
    pub name: String,
    pub slug: String,
}

/// A product category. `parent_id` forms a self-referential tree that is
/// never validated for cycles.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    #[serde(default)]
    pub parent_id: Option<String>,
    pub name: String,
    pub slug: String,
}

/// A product tag. Both fields are optional on the wire: a create request
/// carries a tag with a title but no id yet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}

/// A product vendor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vendor {
    pub id: String,
    pub name: String,
    pub slug: String,
}

/// Paging metadata for a product listing. Purely descriptive - recomputed
/// server-side on every listing, never derived locally.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub length: usize,
    pub size: usize,
    pub page: usize,
    pub last_page: usize,
    pub start_index: usize,
    pub end_index: usize,
}

/// One page of a product listing: items plus the paging metadata that
/// describes them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductPage {
    pub pagination: Pagination,
    pub products: Vec<Product>,
}

/// Sort direction for a product listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

/// Query parameters for a product listing. The server owns filtering,
/// sorting, and paging; the client never reorders what comes back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductQuery {
    pub page: usize,
    pub size: usize,
    pub sort: String,
    pub order: SortOrder,
    pub search: String,
}

impl Default for ProductQuery {
    fn default() -> Self {
        Self {
            page: 0,
            size: 10,
            sort: "name".to_string(),
            order: SortOrder::Asc,
            search: String::new(),
        }
    }
}

impl ProductQuery {
    /// Render the query as key/value pairs for an HTTP query string.
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("page", self.page.to_string()),
            ("size", self.size.to_string()),
            ("sort", self.sort.clone()),
            ("order", self.order.as_str().to_string()),
            ("search", self.search.clone()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_round_trips_camel_case_wire_fields() {
        let json = r#"{
            "id": "p-1",
            "name": "Widget",
            "vendor": null,
            "tags": ["t-1"],
            "stock": 12,
            "reserved": 2,
            "cost": 1.5,
            "basePrice": 4.0,
            "taxPercent": 20.0,
            "price": 4.8,
            "weight": 0.2,
            "thumbnail": "images/widget.jpg",
            "images": [],
            "active": true
        }"#;

        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.base_price, 4.0);
        assert_eq!(product.tax_percent, 20.0);
        assert_eq!(product.tags, vec!["t-1".to_string()]);

        let value = serde_json::to_value(&product).unwrap();
        assert_eq!(value["basePrice"], 4.0);
        assert_eq!(value["taxPercent"], 20.0);
    }

    #[test]
    fn pagination_uses_camel_case_wire_fields() {
        let json = r#"{
            "length": 42,
            "size": 10,
            "page": 1,
            "lastPage": 5,
            "startIndex": 10,
            "endIndex": 19
        }"#;

        let pagination: Pagination = serde_json::from_str(json).unwrap();
        assert_eq!(pagination.last_page, 5);
        assert_eq!(pagination.start_index, 10);
        assert_eq!(pagination.end_index, 19);
    }

    #[test]
    fn query_defaults_match_the_listing_contract() {
        let query = ProductQuery::default();
        let pairs = query.to_pairs();
        assert_eq!(
            pairs,
            vec![
                ("page", "0".to_string()),
                ("size", "10".to_string()),
                ("sort", "name".to_string()),
                ("order", "asc".to_string()),
                ("search", "".to_string()),
            ]
        );
    }
}
