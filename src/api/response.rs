use axum::Json;
use axum::http::StatusCode;
use serde::Serialize;

#[derive(Serialize)]
pub struct ErrorResponse {
    error: String,
}

/// The only success shape the endpoint produces: `200` with the bullet
/// array as the JSON body, even when the array is empty.
pub fn bullets(items: Vec<String>) -> (StatusCode, Json<Vec<String>>) {
    (StatusCode::OK, Json(items))
}

/// Answer for a request body that is absent or not a `{"url": ...}` object.
pub fn rejected(err: &serde_json::Error) -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: format!("Invalid request body: {}", err),
        }),
    )
}
