//! Category update endpoint.

use axum::{Json, extract::State};

use crate::{
    Error,
    category::{CategoryDto, CategoryIdPath, CategoryService, ValidCategory},
};

/// Replace the name of an existing category.
///
/// The ID always comes from the path; an ID in the body is ignored. Responds with 404 Not Found
/// if the category does not exist.
pub async fn update_category_endpoint(
    CategoryIdPath(category_id): CategoryIdPath,
    State(service): State<CategoryService>,
    ValidCategory(category): ValidCategory,
) -> Result<Json<CategoryDto>, Error> {
    tracing::info!("Request received to update the category with id {category_id}");

    let updated = service.update_by_id(category_id, category)?;

    Ok(Json(updated))
}
