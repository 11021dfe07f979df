use serde::{Deserialize, Serialize};

/// A catalog entry, stored with the same camelCase keys the storefront uses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: u32,
    #[serde(flatten)]
    pub details: ProductDetails,
}

/// Everything about a product except its id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetails {
    pub name: String,
    pub name_en: String,
    pub description: String,
    pub description_en: String,
    pub price: String,
    pub image: String,
    pub category: String,
    pub category_en: String,
    pub brand: String,
}

impl ProductDetails {
    pub fn new() -> Self {
        Self {
            image: "/solar-panel-1.jpg".to_string(),
            brand: "SRNE".to_string(),
            ..Self::default()
        }
    }
}
