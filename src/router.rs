use crate::handlers::{self, AppState};
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer, trace::TraceLayer};

/// Questionnaire payloads are small; anything larger is rejected.
const MAX_BODY_BYTES: usize = 64 * 1024;

/// API routes that sit behind the rate limiter.
pub fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/v1/catalog", get(handlers::get_catalog))
        .route("/api/v1/assessments", post(handlers::submit_assessment))
        .route(
            "/api/v1/assessments/:id",
            get(handlers::get_assessment)
                .post(handlers::resubmit_assessment)
                .delete(handlers::reset_assessment),
        )
        .route("/api/v1/assessments/:id/report", get(handlers::get_report))
        .route("/api/v1/assessments/:id/booking", get(handlers::get_booking))
        .layer(ServiceBuilder::new().layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES)))
}

/// Assembles the application: health check, the given API routes, tracing
/// and CORS.
///
/// `/health` is merged outside `api` so probes bypass whatever layers the
/// caller put on the API routes.
pub fn build_router(state: Arc<AppState>, api: Router<Arc<AppState>>) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .merge(api)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
