//! User handlers.

use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};

use common::AppResult;
use domain::{
    Confirmation, UserResponse, FIELD_DATA, FIELD_EMAIL, FIELD_NAME, FIELD_PASSWORD, FIELD_SURNAME,
};
use gelato_service_lib::service::TokenResponse;

use crate::extractors::{BearerToken, RawJson};
use crate::state::AppState;

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(register).get(retrieve).patch(update).delete(delete))
        .route("/auth", post(authenticate))
}

/// Register a new account
pub async fn register(
    State(state): State<AppState>,
    body: RawJson,
) -> AppResult<(StatusCode, Json<Confirmation>)> {
    let confirmation = state
        .services
        .users
        .register(
            body.field(FIELD_NAME),
            body.field(FIELD_SURNAME),
            body.field(FIELD_EMAIL),
            body.field(FIELD_PASSWORD),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(confirmation)))
}

/// Log in with email and password
pub async fn authenticate(
    State(state): State<AppState>,
    body: RawJson,
) -> AppResult<Json<TokenResponse>> {
    let token = state
        .services
        .users
        .authenticate(body.field(FIELD_EMAIL), body.field(FIELD_PASSWORD))
        .await?;

    Ok(Json(token))
}

/// Get the caller's profile
pub async fn retrieve(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
) -> AppResult<Json<UserResponse>> {
    let user = state.services.users.retrieve(&token).await?;
    Ok(Json(user))
}

/// Update the caller's name or surname
pub async fn update(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    body: RawJson,
) -> AppResult<Json<Confirmation>> {
    let confirmation = state
        .services
        .users
        .update(&token, body.field(FIELD_DATA))
        .await?;

    Ok(Json(confirmation))
}

/// Delete the caller's account and orders
pub async fn delete(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
) -> AppResult<Json<Confirmation>> {
    let confirmation = state.services.users.delete(&token).await?;
    Ok(Json(confirmation))
}
