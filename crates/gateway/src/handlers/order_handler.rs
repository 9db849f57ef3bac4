//! Order handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};

use common::AppResult;
use domain::{Confirmation, Input, Order, FIELD_FLAVORS, FIELD_SIZE, FIELD_TOTAL_PRICE, FIELD_TYPE};

use crate::extractors::{BearerToken, RawJson};
use crate::state::AppState;

/// Create order routes
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_by_user).post(add_order))
        .route("/all", get(list_all))
        .route("/:id", get(retrieve_one).delete(remove_one))
}

/// Place an order
pub async fn add_order(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    body: RawJson,
) -> AppResult<(StatusCode, Json<Order>)> {
    let order = state
        .services
        .orders
        .add_order(
            &token,
            body.field(FIELD_FLAVORS),
            body.field(FIELD_SIZE),
            body.field(FIELD_TYPE),
            body.field(FIELD_TOTAL_PRICE),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(order)))
}

/// List the caller's orders
pub async fn list_by_user(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
) -> AppResult<Json<Vec<Order>>> {
    let orders = state.services.orders.list_by_user(&token).await?;
    Ok(Json(orders))
}

/// List every order (superUser only)
pub async fn list_all(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
) -> AppResult<Json<Vec<Order>>> {
    let orders = state.services.orders.list_all(&token).await?;
    Ok(Json(orders))
}

/// Get a single order
pub async fn retrieve_one(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Vec<Order>>> {
    let orders = state.services.orders.retrieve_one(&Input::from(id)).await?;
    Ok(Json(orders))
}

/// Delete one of the caller's orders
pub async fn remove_one(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    Path(id): Path<String>,
) -> AppResult<Json<Confirmation>> {
    let confirmation = state
        .services
        .orders
        .remove_one(&token, &Input::from(id))
        .await?;

    Ok(Json(confirmation))
}
