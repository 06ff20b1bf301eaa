//! Shop product model and DTOs. Products carry no moderation state.

use aidex_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Full product row from the `shop_products` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ShopProduct {
    pub id: DbId,
    pub name: String,
    pub slug: String,
    pub short_description: String,
    pub description: String,
    pub image: String,
    pub image_alt: String,
    pub monthly_price: f64,
    pub half_yearly_price: f64,
    pub yearly_price: f64,
    pub original_price: f64,
    pub discount: f64,
    pub features: Vec<String>,
    pub category: String,
    pub created_at: Timestamp,
    pub updated_at: Option<Timestamp>,
}

/// DTO for creating a product (admin only).
#[derive(Debug, Deserialize, Validate)]
pub struct CreateShopProduct {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[serde(default)]
    pub short_description: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub image_alt: String,
    #[serde(default)]
    pub monthly_price: f64,
    #[serde(default)]
    pub half_yearly_price: f64,
    #[serde(default)]
    pub yearly_price: f64,
    #[serde(default)]
    pub original_price: f64,
    #[serde(default)]
    pub discount: f64,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub category: String,
}

/// DTO for updating a product. Only provided fields are applied.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateShopProduct {
    pub name: Option<String>,
    pub short_description: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub image_alt: Option<String>,
    pub monthly_price: Option<f64>,
    pub half_yearly_price: Option<f64>,
    pub yearly_price: Option<f64>,
    pub original_price: Option<f64>,
    pub discount: Option<f64>,
    pub features: Option<Vec<String>>,
    pub category: Option<String>,
}
