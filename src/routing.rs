//! Application router configuration.

use axum::{
    Json, Router,
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::get,
};

use crate::{
    AppState, Error, ErrorResponse,
    category::{
        create_category_endpoint, delete_category_endpoint, get_category_endpoint,
        list_categories_endpoint, search_categories_endpoint, update_category_endpoint,
    },
    endpoints,
    logging::logging_middleware,
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            endpoints::CATEGORIES,
            get(list_categories_endpoint).post(create_category_endpoint),
        )
        .route(endpoints::SEARCH_CATEGORIES, get(search_categories_endpoint))
        .route(
            endpoints::CATEGORY,
            get(get_category_endpoint)
                .put(update_category_endpoint)
                .delete(delete_category_endpoint),
        )
        .fallback(get_404_not_found)
        .method_not_allowed_fallback(get_405_method_not_allowed)
        .layer(middleware::from_fn(logging_middleware))
        .with_state(state)
}

async fn get_404_not_found() -> Error {
    Error::NotFound("the requested resource could not be found".to_owned())
}

async fn get_405_method_not_allowed() -> Response {
    let status = StatusCode::METHOD_NOT_ALLOWED;
    let body = ErrorResponse {
        status: status.as_u16(),
        message: "method not allowed".to_owned(),
    };

    (status, Json(body)).into_response()
}
