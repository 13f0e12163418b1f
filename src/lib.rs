pub mod api;
pub mod config;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod models;
pub mod services;
pub mod state;
pub mod storage;

use std::path::Path;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

pub use state::AppState;

/// Full application router: JSON API plus the static front end from `public_dir`
pub fn app(state: AppState, public_dir: impl AsRef<Path>) -> Router {
    Router::new()
        .route("/health", get(handlers::health::get))
        .merge(student_routes())
        .merge(ranking_routes())
        .with_state(state)
        // Anything else is a static asset; "/" resolves to index.html
        .fallback_service(ServeDir::new(public_dir.as_ref()))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

fn student_routes() -> Router<AppState> {
    use handlers::students;

    Router::new()
        .route(
            "/api/students",
            post(students::create).delete(students::delete_without_id),
        )
        .route(
            "/api/students/:id",
            get(students::get)
                .put(students::update)
                .delete(students::delete),
        )
}

fn ranking_routes() -> Router<AppState> {
    Router::new().route("/api/rankings", get(handlers::rankings::get))
}
