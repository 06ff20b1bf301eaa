//! Repository for the `shop_products` table.

use aidex_core::slug::with_suffix;
use aidex_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::shop_product::{CreateShopProduct, ShopProduct, UpdateShopProduct};

const COLUMNS: &str = "id, name, slug, short_description, description, image, image_alt, \
    monthly_price, half_yearly_price, yearly_price, original_price, discount, features, \
    category, created_at, updated_at";

/// Provides CRUD operations for shop products.
pub struct ShopProductRepo;

impl ShopProductRepo {
    /// Insert a new product with the given (already unique) slug.
    pub async fn insert_in(
        conn: &mut PgConnection,
        input: &CreateShopProduct,
        slug: &str,
    ) -> Result<ShopProduct, sqlx::Error> {
        let query = format!(
            "INSERT INTO shop_products \
                (name, slug, short_description, description, image, image_alt, \
                 monthly_price, half_yearly_price, yearly_price, original_price, discount, \
                 features, category) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ShopProduct>(&query)
            .bind(&input.name)
            .bind(slug)
            .bind(&input.short_description)
            .bind(&input.description)
            .bind(&input.image)
            .bind(&input.image_alt)
            .bind(input.monthly_price)
            .bind(input.half_yearly_price)
            .bind(input.yearly_price)
            .bind(input.original_price)
            .bind(input.discount)
            .bind(&input.features)
            .bind(&input.category)
            .fetch_one(conn)
            .await
    }

    /// Resolve a free slug for `base`, appending `-2`, `-3`, ... on
    /// collision.
    pub async fn ensure_unique_slug(
        conn: &mut PgConnection,
        base: &str,
    ) -> Result<String, sqlx::Error> {
        let taken: Vec<String> = sqlx::query_scalar(
            "SELECT slug FROM shop_products WHERE slug = $1 OR slug LIKE $1 || '-%'",
        )
        .bind(base)
        .fetch_all(&mut *conn)
        .await?;

        if !taken.iter().any(|s| s == base) {
            return Ok(base.to_string());
        }
        let mut n = 2;
        loop {
            let candidate = with_suffix(base, n);
            if !taken.contains(&candidate) {
                return Ok(candidate);
            }
            n += 1;
        }
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<ShopProduct>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM shop_products WHERE id = $1");
        sqlx::query_as::<_, ShopProduct>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_slug(
        pool: &PgPool,
        slug: &str,
    ) -> Result<Option<ShopProduct>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM shop_products WHERE slug = $1");
        sqlx::query_as::<_, ShopProduct>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// All products, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<ShopProduct>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM shop_products ORDER BY created_at DESC");
        sqlx::query_as::<_, ShopProduct>(&query).fetch_all(pool).await
    }

    /// Partial-field update; only provided fields overwrite.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateShopProduct,
    ) -> Result<Option<ShopProduct>, sqlx::Error> {
        let query = format!(
            "UPDATE shop_products SET
                name = COALESCE($2, name),
                short_description = COALESCE($3, short_description),
                description = COALESCE($4, description),
                image = COALESCE($5, image),
                image_alt = COALESCE($6, image_alt),
                monthly_price = COALESCE($7, monthly_price),
                half_yearly_price = COALESCE($8, half_yearly_price),
                yearly_price = COALESCE($9, yearly_price),
                original_price = COALESCE($10, original_price),
                discount = COALESCE($11, discount),
                features = COALESCE($12, features),
                category = COALESCE($13, category),
                updated_at = now()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ShopProduct>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.short_description)
            .bind(&input.description)
            .bind(&input.image)
            .bind(&input.image_alt)
            .bind(input.monthly_price)
            .bind(input.half_yearly_price)
            .bind(input.yearly_price)
            .bind(input.original_price)
            .bind(input.discount)
            .bind(&input.features)
            .bind(&input.category)
            .fetch_optional(pool)
            .await
    }

    /// Hard delete. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM shop_products WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
