//! Extractors that reject malformed requests before they reach the category service.

use axum::{
    Json,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
};
use axum_extra::extract::WithRejection;
use serde::Deserialize;

use crate::{
    Error,
    category::{CategoryDto, CategoryId},
};

/// A category ID taken from the request path. Only positive integers are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryIdPath(pub CategoryId);

impl<S> FromRequestParts<S> for CategoryIdPath
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw_id) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                tracing::debug!("rejected path parameters: {rejection}");
                Error::validation(rejection.body_text())
            })?;

        parse_category_id(&raw_id).map(Self)
    }
}

/// Parse a category ID from a path segment.
///
/// # Errors
///
/// Returns an [Error::ValidationFailure] if `raw_id` is not an integer or is not positive.
pub fn parse_category_id(raw_id: &str) -> Result<CategoryId, Error> {
    let id: CategoryId = raw_id
        .parse()
        .map_err(|_| Error::ValidationFailure("id must be a number".to_owned()))?;

    if id <= 0 {
        return Err(Error::validation("id must be a positive number"));
    }

    Ok(id)
}

/// A JSON request body that describes a valid category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidCategory(pub CategoryDto);

impl<S> FromRequest<S> for ValidCategory
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request(request: Request, state: &S) -> Result<Self, Self::Rejection> {
        let WithRejection(Json(category), _) =
            WithRejection::<Json<CategoryDto>, Error>::from_request(request, state).await?;

        category.validate().map(Self)
    }
}

/// The query string for searching categories by name.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchParams {
    /// The exact name to look for.
    pub name: String,
}
