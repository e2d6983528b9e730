//! Category deletion endpoint.

use axum::{extract::State, http::StatusCode};

use crate::{
    Error,
    category::{CategoryIdPath, CategoryService},
};

/// Delete a category. Responds with 204 No Content, or 404 Not Found if the category does not
/// exist.
pub async fn delete_category_endpoint(
    CategoryIdPath(category_id): CategoryIdPath,
    State(service): State<CategoryService>,
) -> Result<StatusCode, Error> {
    tracing::info!("Request received to delete category with id {category_id}");

    service.delete_by_id(category_id)?;

    Ok(StatusCode::NO_CONTENT)
}
