//! HTTP router
//!
//! Returns a composable `Router` with every registry endpoint mounted at the
//! root. Requests are traced through `tower-http`.

use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::api::handlers;
use crate::core::registry::PatientRegistry;

/// Build the registry router.
///
/// NOTE: Path params use `:param` syntax (matchit 0.7 / axum 0.7).
pub fn registry_router(registry: PatientRegistry) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/about", get(handlers::about))
        .route("/view", get(handlers::view))
        .route("/patient/:patient_id", get(handlers::patient))
        .route("/sort", get(handlers::sort))
        .route("/create", post(handlers::create))
        .with_state(registry)
        .layer(TraceLayer::new_for_http())
}
