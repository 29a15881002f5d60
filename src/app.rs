use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/random", post(handlers::random))
        .route("/category/:category", post(handlers::category))
        .route("/retry", post(handlers::retry))
        .route("/api/state", get(handlers::get_state))
        .route("/api/random", post(handlers::api_random))
        .route("/api/category/:category", post(handlers::api_category))
        .route("/api/retry", post(handlers::api_retry))
        .route("/healthz", get(handlers::healthz))
        .with_state(state)
}
