use axum::{Json, Router, http::StatusCode, routing::get};

use super::MessageResponse;
use crate::core::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(home))
}

/// Greeting; answers 201, not 200
async fn home() -> (StatusCode, Json<MessageResponse>) {
    (StatusCode::CREATED, Json(MessageResponse::new("HOME GET!!!")))
}
