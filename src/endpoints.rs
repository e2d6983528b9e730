//! The API endpoint URIs.
//!
//! For endpoints that take a parameter, e.g., '/categories/{category_id}', use [format_endpoint].

/// The route for creating and listing categories.
pub const CATEGORIES: &str = "/categories";
/// The route for reading, updating, and deleting a single category.
pub const CATEGORY: &str = "/categories/{category_id}";
/// The route for finding a category by name, e.g., '/categories/search?name=Books'.
pub const SEARCH_CATEGORIES: &str = "/categories/search";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter is the text from a left brace up to and including the next right brace, e.g., in
/// '/categories/{category_id}' the parameter is '{category_id}'. Only the first parameter is
/// replaced. If there is no closing brace, everything after the left brace is replaced.
///
/// If no parameter is found in `endpoint_path`, the original `endpoint_path` is returned.
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    let Some(param_start) = endpoint_path.find('{') else {
        return endpoint_path.to_owned();
    };

    let param_end = endpoint_path[param_start..]
        .find('}')
        .map_or(endpoint_path.len(), |offset| param_start + offset + 1);

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}
