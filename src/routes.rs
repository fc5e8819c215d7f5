use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::handlers;
use crate::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/readyz", get(handlers::health::readyz))
        .route("/create/diary", post(handlers::diary::create_diary))
        .route("/read/diary", get(handlers::diary::read_diary))
        .route("/read/diaries", get(handlers::diary::read_diaries))
        .route("/update/diary", put(handlers::diary::update_diary))
        .route("/delete/diary", delete(handlers::diary::delete_diary))
        .with_state(state)
}
