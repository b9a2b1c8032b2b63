//! Fish product listings.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use tidal_core::{FishProduct, FishProductPatch, NewFishProduct, ProductFilter};

use crate::error::{ApiError, ApiResult};
use crate::AppState;

pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<NewFishProduct>,
) -> ApiResult<(StatusCode, Json<FishProduct>)> {
    let product = state.db.products().create(&input).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// Every filter is optional and they combine with AND. No filter at all
/// returns inactive listings too.
pub async fn list(
    State(state): State<AppState>,
    Query(filter): Query<ProductFilter>,
) -> ApiResult<Json<Vec<FishProduct>>> {
    let products = state.db.products().list(&filter).await?;
    Ok(Json(products))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<FishProduct>> {
    state
        .db
        .products()
        .get_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("FishProduct", id))
}

pub async fn list_for_fisherman(
    State(state): State<AppState>,
    Path(fisherman_id): Path<i64>,
) -> ApiResult<Json<Vec<FishProduct>>> {
    let products = state.db.products().list_for_fisherman(fisherman_id).await?;
    Ok(Json(products))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(patch): Json<FishProductPatch>,
) -> ApiResult<Json<FishProduct>> {
    let product = state.db.products().update(id, &patch).await?;
    Ok(Json(product))
}

pub async fn soft_delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<FishProduct>> {
    let product = state.db.products().soft_delete(id).await?;
    Ok(Json(product))
}
