use crate::handlers::{
    accounts::{get_account, get_user_accounts},
    beneficiaries::get_user_beneficiaries,
    health::health_check,
    scheduled_transfers::{
        advance_due_transfers, cancel_scheduled_transfer, create_scheduled_transfer,
        get_upcoming_occurrences, get_user_scheduled_transfers,
    },
};
use crate::schemas::{ApiDoc, AppState};
use axum::{
    routing::{delete, get, post},
    Router,
};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Create application router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_check))
        // Scheduled transfer routes
        .route("/api/v1/scheduled-transfers", post(create_scheduled_transfer))
        .route("/api/v1/scheduled-transfers/advance", post(advance_due_transfers))
        .route(
            "/api/v1/scheduled-transfers/:transfer_id",
            delete(cancel_scheduled_transfer),
        )
        .route(
            "/api/v1/scheduled-transfers/:transfer_id/occurrences",
            get(get_upcoming_occurrences),
        )
        .route(
            "/api/v1/users/:user_id/scheduled-transfers",
            get(get_user_scheduled_transfers),
        )
        // Read-only directory routes
        .route("/api/v1/users/:user_id/accounts", get(get_user_accounts))
        .route("/api/v1/users/:user_id/beneficiaries", get(get_user_beneficiaries))
        .route("/api/v1/accounts/:account_id", get(get_account))
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Add middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(TimeoutLayer::new(Duration::from_secs(30)))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
