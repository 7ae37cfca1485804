//! `?limit=` extractor for ranked and paged lists

use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use nearby_service::dto::LimitQuery;
use validator::Validate;

use crate::response::ApiError;

/// Optional result cap, 1-100 when given
#[derive(Debug, Clone, Copy, Default)]
pub struct Limit(pub Option<u32>);

#[async_trait]
impl<S> FromRequestParts<S> for Limit
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(query) = Query::<LimitQuery>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_query(e.body_text()))?;
        query.validate()?;

        Ok(Limit(query.limit))
    }
}
