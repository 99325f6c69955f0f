use std::sync::Arc;

use common::{OccurrencePreview, ValidationErrors};
use compute::scheduler::TransferScheduler;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use utoipa::{OpenApi, ToSchema};

/// Application state shared across handlers
#[derive(Clone, Debug)]
pub struct AppState {
    /// The scheduling facade. Mutating handlers take the write guard so
    /// creation, cancellation and advancement are serialized per process;
    /// read handlers share the read guard and see consistent snapshots.
    pub scheduler: Arc<RwLock<TransferScheduler>>,
}

/// API response wrapper
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Response data
    pub data: T,
    /// Response message
    pub message: String,
    /// Success status
    pub success: bool,
}

/// Error response
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
    /// Success status (always false for errors)
    pub success: bool,
}

/// Error response for rejected transfer drafts, carrying the complete
/// field-keyed violation map so the caller can render per-field feedback.
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ValidationErrorResponse {
    /// Violated field -> reason
    pub errors: ValidationErrors,
    /// Response message
    pub message: String,
    /// Success status (always false for errors)
    pub success: bool,
}

/// Health check response
#[derive(Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
    /// Directory summary (loaded accounts and beneficiaries)
    pub directory: String,
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health::health_check,
        crate::handlers::accounts::get_user_accounts,
        crate::handlers::accounts::get_account,
        crate::handlers::beneficiaries::get_user_beneficiaries,
        crate::handlers::scheduled_transfers::create_scheduled_transfer,
        crate::handlers::scheduled_transfers::get_user_scheduled_transfers,
        crate::handlers::scheduled_transfers::cancel_scheduled_transfer,
        crate::handlers::scheduled_transfers::advance_due_transfers,
        crate::handlers::scheduled_transfers::get_upcoming_occurrences,
    ),
    components(
        schemas(
            ErrorResponse,
            HealthResponse,
            ValidationErrorResponse,
            ValidationErrors,
            OccurrencePreview,
            crate::handlers::accounts::AccountResponse,
            crate::handlers::beneficiaries::BeneficiaryResponse,
            crate::handlers::scheduled_transfers::CreateScheduledTransferRequest,
            crate::handlers::scheduled_transfers::ScheduledTransferResponse,
            crate::handlers::scheduled_transfers::AdvanceScheduleRequest,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "accounts", description = "Read-only account directory endpoints"),
        (name = "beneficiaries", description = "Read-only beneficiary directory endpoints"),
        (name = "scheduled-transfers", description = "Recurring transfer scheduling endpoints"),
    ),
    info(
        title = "BankRust API",
        description = "Recurring transfer scheduling service for the banking portal",
        version = "0.1.0",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    )
)]
pub struct ApiDoc;
