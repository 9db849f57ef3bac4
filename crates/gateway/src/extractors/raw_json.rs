//! Raw JSON extractor.

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde_json::Value;

use common::AppError;
use domain::Input;

/// JSON body kept untyped so the domain layer can validate each field.
pub struct RawJson(pub Input);

impl RawJson {
    /// Raw value of one top-level field; `Missing` if absent.
    pub fn field(&self, key: &str) -> &Input {
        self.0.field(key)
    }
}

#[async_trait]
impl<S> FromRequest<S> for RawJson
where
    S: Send + Sync,
    Json<Value>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|e| AppError::bad_request(e.body_text()))?;

        Ok(RawJson(Input::from(value)))
    }
}
