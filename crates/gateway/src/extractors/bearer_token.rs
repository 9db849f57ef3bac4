//! Bearer token extractor.

use std::convert::Infallible;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use domain::{Input, BEARER_TOKEN_PREFIX};

/// Token from the `Authorization` header, unvalidated.
///
/// A missing header becomes `Input::Missing`; the `Bearer ` prefix is
/// stripped when present. Shape and signature checks belong to the services.
pub struct BearerToken(pub Input);

#[async_trait]
impl<S> FromRequestParts<S> for BearerToken
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let token = match parts.headers.get(AUTHORIZATION) {
            None => Input::Missing,
            Some(value) => match value.to_str() {
                Ok(header) => Input::from(
                    header
                        .strip_prefix(BEARER_TOKEN_PREFIX)
                        .unwrap_or(header)
                        .trim(),
                ),
                Err(_) => Input::Missing,
            },
        };

        Ok(BearerToken(token))
    }
}
