use axum::{body::Body, response::Response};
use serde::de::DeserializeOwned;

#[track_caller]
pub(crate) fn get_header(response: &Response<Body>, header_name: &str) -> String {
    let header_error_message = format!("Headers missing {header_name}");

    response
        .headers()
        .get(header_name)
        .expect(&header_error_message)
        .to_str()
        .expect("Could not convert to str")
        .to_string()
}

pub(crate) async fn parse_json<T: DeserializeOwned>(response: Response<Body>) -> T {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Could not read response body");

    serde_json::from_slice(&body).expect("Could not parse response body as JSON")
}
