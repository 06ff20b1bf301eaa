//! Handlers for the `/shop` resource. Products carry no moderation
//! state; reads are public, writes are admin-only.

use aidex_core::error::CoreError;
use aidex_core::slug::slugify;
use aidex_core::types::DbId;
use aidex_db::models::shop_product::{CreateShopProduct, ShopProduct, UpdateShopProduct};
use aidex_db::repositories::ShopProductRepo;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::{DataResponse, MessageResponse};
use crate::state::AppState;

/// GET /api/v1/shop -- all products, newest first.
pub async fn list(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<ShopProduct>>>> {
    let products = ShopProductRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: products }))
}

/// GET /api/v1/shop/{slug}
pub async fn get_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<DataResponse<ShopProduct>>> {
    let product = ShopProductRepo::find_by_slug(&state.pool, &slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Product '{slug}'")))?;
    Ok(Json(DataResponse { data: product }))
}

/// POST /api/v1/shop -- create a product (admin only).
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(body): Json<CreateShopProduct>,
) -> AppResult<(StatusCode, Json<DataResponse<ShopProduct>>)> {
    body.validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let mut conn = state.pool.acquire().await?;
    let slug = ShopProductRepo::ensure_unique_slug(&mut conn, &slugify(&body.name)).await?;
    let product = ShopProductRepo::insert_in(&mut conn, &body, &slug).await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: product })))
}

/// PUT /api/v1/shop/{id} -- partial update (admin only).
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(body): Json<UpdateShopProduct>,
) -> AppResult<Json<DataResponse<ShopProduct>>> {
    let product = ShopProductRepo::update(&state.pool, id, &body)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Product",
            id,
        }))?;
    Ok(Json(DataResponse { data: product }))
}

/// DELETE /api/v1/shop/{id} -- hard delete (admin only).
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<MessageResponse>> {
    let deleted = ShopProductRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Product",
            id,
        }));
    }
    Ok(Json(MessageResponse {
        message: "Product deleted".to_string(),
    }))
}
