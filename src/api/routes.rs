use crate::api::{handlers, AppState};
use crate::metrics::track_metrics;
use axum::{
    middleware,
    routing::{get, put},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    timeout::TimeoutLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};

/// Build the main API router
pub fn build_router(state: AppState) -> Router {
    let request_timeout = state.request_timeout;

    Router::new()
        // Health endpoints
        .route("/health", get(handlers::health_check))
        .route("/metrics", get(handlers::metrics))
        // Analytics
        .route("/v1/analytics/sla", get(handlers::sla_report))
        // Ticket snapshot
        .route("/v1/tickets", put(handlers::import_tickets))
        .route("/v1/tickets/count", get(handlers::ticket_count))
        // Add state
        .with_state(state)
        // Add middleware
        .layer(middleware::from_fn(track_metrics))
        .layer(TimeoutLayer::new(request_timeout))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().include_headers(true))
                .on_response(DefaultOnResponse::new().include_headers(true)),
        )
        .layer(CorsLayer::permissive())
}
