use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;

use crate::handlers;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/execute", post(handlers::execute))
        .route("/run-tests", post(handlers::run_tests))
        .route("/languages", get(handlers::list_languages))
        .route("/languages/:name/template", get(handlers::language_template))
        .route("/status", get(handlers::health_check))
        .route("/metrics", get(handlers::metrics))
}
