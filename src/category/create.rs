//! Category creation endpoint.

use axum::{
    Json,
    extract::State,
    http::{StatusCode, header::LOCATION},
    response::{IntoResponse, Response},
};

use crate::{
    Error,
    category::{CategoryService, ValidCategory},
    endpoints,
};

/// Create a category from the JSON body.
///
/// Responds with 201 Created, the saved category, and a `Location` header pointing at the new
/// category.
pub async fn create_category_endpoint(
    State(service): State<CategoryService>,
    ValidCategory(category): ValidCategory,
) -> Result<Response, Error> {
    tracing::info!(
        "Request received to save the category with name {}",
        category.category_name
    );

    let saved = service.create(category)?;
    let id = saved.category_id.ok_or_else(|| {
        tracing::error!("saved category {} has no ID", saved.category_name);
        Error::UnexpectedFailure
    })?;

    tracing::info!(
        "Category saved successfully with name: {}",
        saved.category_name
    );

    let location = endpoints::format_endpoint(endpoints::CATEGORY, id);

    Ok((StatusCode::CREATED, [(LOCATION, location)], Json(saved)).into_response())
}
