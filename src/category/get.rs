//! Endpoints for reading categories.

use axum::{
    Json,
    extract::{Query, State},
};
use axum_extra::extract::WithRejection;

use crate::{
    Error,
    category::{CategoryDto, CategoryIdPath, CategoryService, SearchParams},
};

/// List every category.
///
/// Responds with 404 Not Found when there are no categories.
pub async fn list_categories_endpoint(
    State(service): State<CategoryService>,
) -> Result<Json<Vec<CategoryDto>>, Error> {
    tracing::info!("Request received to fetch all categories");

    let categories = service.list()?;

    tracing::info!("Retrieved {} categories successfully", categories.len());

    Ok(Json(categories))
}

/// Get a single category by its ID.
pub async fn get_category_endpoint(
    CategoryIdPath(category_id): CategoryIdPath,
    State(service): State<CategoryService>,
) -> Result<Json<CategoryDto>, Error> {
    tracing::info!("Request received to fetch category with id {category_id}");

    let category = service.get_by_id(category_id)?;

    tracing::info!("Category with id {category_id} fetched successfully");

    Ok(Json(category))
}

/// Get a single category by its name, given as the `name` query parameter.
pub async fn search_categories_endpoint(
    State(service): State<CategoryService>,
    WithRejection(Query(params), _): WithRejection<Query<SearchParams>, Error>,
) -> Result<Json<CategoryDto>, Error> {
    tracing::info!("Request received to fetch category with name {}", params.name);

    let category = service.get_by_name(&params.name)?;

    tracing::info!("Category with name {} fetched successfully", params.name);

    Ok(Json(category))
}
