//! Cash-on-pickup orders.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use tidal_core::{NewOrder, Order, OrderStatus};

use crate::error::{ApiError, ApiResult};
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct OrderListQuery {
    #[serde(default)]
    pub status: Option<OrderStatus>,
}

#[derive(Debug, Deserialize)]
pub struct StatusUpdate {
    pub status: OrderStatus,
}

/// Places an order and decrements stock in one transaction.
pub async fn place(
    State(state): State<AppState>,
    Json(input): Json<NewOrder>,
) -> ApiResult<(StatusCode, Json<Order>)> {
    let order = state.db.orders().place(&input).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

pub async fn get(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<Json<Order>> {
    state
        .db
        .orders()
        .get_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Order", id))
}

pub async fn list_for_fisherman(
    State(state): State<AppState>,
    Path(fisherman_id): Path<i64>,
    Query(query): Query<OrderListQuery>,
) -> ApiResult<Json<Vec<Order>>> {
    let orders = state
        .db
        .orders()
        .list_for_fisherman(fisherman_id, query.status)
        .await?;
    Ok(Json(orders))
}

/// Any status may follow any other.
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(update): Json<StatusUpdate>,
) -> ApiResult<Json<Order>> {
    let order = state.db.orders().update_status(id, update.status).await?;
    Ok(Json(order))
}
