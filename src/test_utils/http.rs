use axum::{body::Body, http::header::CONTENT_TYPE, response::Response};
use serde_json::Value;

/// Read a JSON response body, checking the content type along the way.
pub(crate) async fn parse_json(response: Response<Body>) -> Value {
    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .expect("content-type header missing")
        .to_str()
        .expect("Could not convert to str")
        .to_owned();
    assert_eq!(content_type, "application/json");

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Could not get response body");

    serde_json::from_slice(&body).expect("Could not parse response body as JSON")
}
