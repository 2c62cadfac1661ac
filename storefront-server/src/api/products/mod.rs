//! Product Routes
//!
//! | Method | Path | Handler |
//! |--------|------|---------|
//! | GET | /products | list |
//! | POST | /products | create (multipart) |
//! | PUT | /products/{id} | update |
//! | DELETE | /products/{id} | delete |

mod handler;

use axum::{
    Router,
    routing::{get, put},
};

use crate::core::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/products", get(handler::list).post(handler::create))
        .route(
            "/products/{id}",
            put(handler::update).delete(handler::delete),
        )
}
