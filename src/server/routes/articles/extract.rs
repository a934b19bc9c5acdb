use crate::error::ApiError;
use crate::model::ArticleInput;
use axum::{
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
};

/// The `{id}` path segment parsed as an integer.
pub(crate) struct ArticleId(pub(crate) i64);

impl<S> FromRequestParts<S> for ArticleId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| ApiError::InvalidId(rejection.body_text()))?;

        raw.parse::<i64>()
            .map(ArticleId)
            .map_err(|_| ApiError::InvalidId(raw))
    }
}

/// JSON article body.
///
/// The body is decoded regardless of `content-type`, so `curl -d` style clients work. Anything
/// that is not a JSON object of the right shape is a `Decode` error (400).
pub(crate) struct ArticlePayload(pub(crate) ArticleInput);

impl<S> FromRequest<S> for ArticlePayload
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let body = Bytes::from_request(req, state).await?;
        let input = serde_json::from_slice::<ArticleInput>(&body)?;
        Ok(ArticlePayload(input))
    }
}
