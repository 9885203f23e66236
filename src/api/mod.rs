mod error;
mod handlers;
pub mod validation;

use axum::{routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::db::Database;

pub use error::ApiError;

pub fn create_router(db: Database) -> Router {
    Router::new()
        .route(
            "/notes",
            get(handlers::list_notes).post(handlers::create_note),
        )
        .route(
            "/notes/{id}",
            get(handlers::get_note)
                .put(handlers::update_note)
                .delete(handlers::delete_note),
        )
        // CORS outermost so error responses carry the headers too.
        // Origin is mirrored because credentials rule out a `*` origin.
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::very_permissive())
        .with_state(db)
}
