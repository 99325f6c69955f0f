use crate::schemas::{ApiResponse, AppState, ErrorResponse, ValidationErrorResponse};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use chrono::{DateTime, NaiveDate, Utc};
use common::OccurrencePreview;
use compute::error::SchedulerError;
use compute::validate::{DraftDestination, TransferDraft};
use model::entities::scheduled_transfer::{
    RecurrencePeriod, ScheduledTransfer, TransferDestination, TransferMethod,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, trace, warn};
use utoipa::{IntoParams, ToSchema};

/// Request body for creating a scheduled transfer
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateScheduledTransferRequest {
    /// Owner of the new schedule
    pub owner_id: i32,
    /// Transfer kind: "OwnAccount" or "ThirdParty"
    pub kind: String,
    /// Origin account ID
    pub origin_account_id: i32,
    /// Destination account ID (required when kind = OwnAccount)
    pub destination_account_id: Option<i32>,
    /// Destination beneficiary ID (required when kind = ThirdParty)
    pub beneficiary_id: Option<i32>,
    /// Settlement method, "ACH" or "RTGS" (third-party transfers only)
    pub method: Option<String>,
    /// Amount in the origin account's currency
    pub amount: Decimal,
    /// Optional free-text memo
    pub memo: Option<String>,
    /// Recurrence frequency. Will be parsed to RecurrencePeriod
    pub frequency: Option<String>,
    /// Date of the first occurrence
    pub start_date: Option<NaiveDate>,
}

/// Scheduled transfer response model
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ScheduledTransferResponse {
    pub id: i32,
    pub owner_id: i32,
    pub kind: String,
    pub origin_account_id: i32,
    pub destination_account_id: Option<i32>,
    pub beneficiary_id: Option<i32>,
    pub method: Option<String>,
    pub amount: Decimal,
    pub memo: Option<String>,
    pub frequency: String,
    pub start_date: NaiveDate,
    pub next_occurrence: NaiveDate,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl From<ScheduledTransfer> for ScheduledTransferResponse {
    fn from(transfer: ScheduledTransfer) -> Self {
        let (kind, destination_account_id, beneficiary_id, method) = match transfer.destination {
            TransferDestination::OwnAccount { account_id } => {
                ("OwnAccount", Some(account_id), None, None)
            }
            TransferDestination::ThirdParty { beneficiary_id, method } => {
                ("ThirdParty", None, Some(beneficiary_id), Some(method.to_string()))
            }
        };
        Self {
            id: transfer.id,
            owner_id: transfer.owner_id,
            kind: kind.to_string(),
            origin_account_id: transfer.origin_account_id,
            destination_account_id,
            beneficiary_id,
            method,
            amount: transfer.amount,
            memo: transfer.memo,
            frequency: format!("{:?}", transfer.frequency),
            start_date: transfer.start_date,
            next_occurrence: transfer.next_occurrence,
            status: format!("{:?}", transfer.status),
            created_at: transfer.created_at,
        }
    }
}

/// Query parameters naming the acting user
#[derive(Debug, Deserialize, ToSchema, IntoParams)]
pub struct OwnerQuery {
    /// Acting user; must own the transfer
    pub owner_id: i32,
}

/// Query parameters for the occurrence preview
#[derive(Debug, Deserialize, ToSchema, IntoParams)]
pub struct OccurrencesQuery {
    /// Acting user; must own the transfer
    pub owner_id: i32,
    /// Number of dates to return (default: 6)
    pub limit: Option<usize>,
}

/// Request body for advancing due schedules
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct AdvanceScheduleRequest {
    /// Evaluation date; every active transfer due on or before it advances one period
    pub as_of: NaiveDate,
}

// Helper function to parse frequency string to RecurrencePeriod enum
fn parse_recurrence_period(period_str: &str) -> Option<RecurrencePeriod> {
    match period_str {
        "Daily" => Some(RecurrencePeriod::Daily),
        "Weekly" => Some(RecurrencePeriod::Weekly),
        "Biweekly" => Some(RecurrencePeriod::Biweekly),
        "Monthly" => Some(RecurrencePeriod::Monthly),
        _ => None,
    }
}

// Helper function to parse method string to TransferMethod enum
fn parse_transfer_method(method_str: &str) -> Option<TransferMethod> {
    match method_str {
        "ACH" => Some(TransferMethod::Ach),
        "RTGS" => Some(TransferMethod::Rtgs),
        _ => None,
    }
}

/// Maps a wire request onto a typed draft.
///
/// Unrecognized frequency or method strings become `None` in the draft and
/// surface as field-level validation errors; a request whose destination
/// reference is missing entirely cannot form a draft at all and is rejected
/// here as malformed.
fn build_draft(request: &CreateScheduledTransferRequest) -> Result<TransferDraft, String> {
    let destination = match request.kind.as_str() {
        "OwnAccount" => {
            let account_id = request
                .destination_account_id
                .ok_or("destination_account_id is required when kind is OwnAccount")?;
            DraftDestination::OwnAccount { account_id }
        }
        "ThirdParty" => {
            let beneficiary_id = request
                .beneficiary_id
                .ok_or("beneficiary_id is required when kind is ThirdParty")?;
            DraftDestination::ThirdParty {
                beneficiary_id,
                method: request.method.as_deref().and_then(parse_transfer_method),
            }
        }
        other => return Err(format!("unknown transfer kind: {other}")),
    };

    Ok(TransferDraft {
        owner_id: request.owner_id,
        origin_account_id: request.origin_account_id,
        destination,
        amount: request.amount,
        memo: request.memo.clone(),
        frequency: request.frequency.as_deref().and_then(parse_recurrence_period),
        start_date: request.start_date,
    })
}

/// Create a new scheduled transfer
#[utoipa::path(
    post,
    path = "/api/v1/scheduled-transfers",
    tag = "scheduled-transfers",
    request_body = CreateScheduledTransferRequest,
    responses(
        (status = 201, description = "Scheduled transfer created successfully", body = ApiResponse<ScheduledTransferResponse>),
        (status = 400, description = "Malformed request", body = ErrorResponse),
        (status = 422, description = "Draft failed validation", body = ValidationErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn create_scheduled_transfer(
    State(state): State<AppState>,
    Json(request): Json<CreateScheduledTransferRequest>,
) -> Response {
    trace!("Entering create_scheduled_transfer function");
    debug!(
        "Creating scheduled transfer for owner {} from account {}",
        request.owner_id, request.origin_account_id
    );

    let draft = match build_draft(&request) {
        Ok(draft) => draft,
        Err(reason) => {
            warn!("Malformed scheduled transfer request: {}", reason);
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: reason,
                    code: "MALFORMED_DRAFT".to_string(),
                    success: false,
                }),
            )
                .into_response();
        }
    };

    let mut scheduler = state.scheduler.write().await;
    match scheduler.create_scheduled_transfer(&draft) {
        Ok(transfer) => {
            info!("Successfully created scheduled transfer with ID: {}", transfer.id);
            let response = ApiResponse {
                data: ScheduledTransferResponse::from(transfer),
                message: "Scheduled transfer created successfully".to_string(),
                success: true,
            };
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(SchedulerError::Validation(errors)) => {
            warn!("Scheduled transfer draft rejected: {}", errors);
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ValidationErrorResponse {
                    errors,
                    message: "Scheduled transfer draft failed validation".to_string(),
                    success: false,
                }),
            )
                .into_response()
        }
        Err(e) => {
            error!("Failed to create scheduled transfer: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to create scheduled transfer".to_string(),
                    code: "SCHEDULER_ERROR".to_string(),
                    success: false,
                }),
            )
                .into_response()
        }
    }
}

/// Get the active scheduled transfers for a user
#[utoipa::path(
    get,
    path = "/api/v1/users/{user_id}/scheduled-transfers",
    tag = "scheduled-transfers",
    params(
        ("user_id" = i32, Path, description = "Owner user ID"),
    ),
    responses(
        (status = 200, description = "Scheduled transfers retrieved successfully", body = ApiResponse<Vec<ScheduledTransferResponse>>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_user_scheduled_transfers(
    Path(user_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<ScheduledTransferResponse>>>, StatusCode> {
    trace!("Entering get_user_scheduled_transfers function");
    debug!("Fetching scheduled transfers for user: {}", user_id);

    let scheduler = state.scheduler.read().await;
    let transfers: Vec<ScheduledTransferResponse> = scheduler
        .list_for_user(user_id)
        .into_iter()
        .map(ScheduledTransferResponse::from)
        .collect();

    info!(
        "Retrieved {} scheduled transfers for user {}",
        transfers.len(),
        user_id
    );
    let response = ApiResponse {
        data: transfers,
        message: "Scheduled transfers retrieved successfully".to_string(),
        success: true,
    };
    Ok(Json(response))
}

/// Cancel a scheduled transfer
#[utoipa::path(
    delete,
    path = "/api/v1/scheduled-transfers/{transfer_id}",
    tag = "scheduled-transfers",
    params(
        ("transfer_id" = i32, Path, description = "Scheduled transfer ID"),
        OwnerQuery,
    ),
    responses(
        (status = 200, description = "Scheduled transfer cancelled successfully", body = ApiResponse<String>),
        (status = 403, description = "Transfer belongs to another user", body = ErrorResponse),
        (status = 404, description = "Scheduled transfer not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn cancel_scheduled_transfer(
    Path(transfer_id): Path<i32>,
    Query(query): Query<OwnerQuery>,
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<ApiResponse<String>>), (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering cancel_scheduled_transfer function");
    debug!(
        "Cancelling scheduled transfer {} for user {}",
        transfer_id, query.owner_id
    );

    let mut scheduler = state.scheduler.write().await;
    match scheduler.cancel_scheduled_transfer(transfer_id, query.owner_id) {
        Ok(()) => {
            info!("Scheduled transfer {} cancelled", transfer_id);
            let response = ApiResponse {
                data: format!("Scheduled transfer {transfer_id} cancelled"),
                message: "Scheduled transfer cancelled successfully".to_string(),
                success: true,
            };
            Ok((StatusCode::OK, Json(response)))
        }
        Err(SchedulerError::TransferNotFound(_)) => {
            warn!("Scheduled transfer with ID {} not found", transfer_id);
            Err((
                StatusCode::NOT_FOUND,
                Json(ErrorResponse {
                    error: format!("Scheduled transfer with id {transfer_id} does not exist"),
                    code: "SCHEDULED_TRANSFER_NOT_FOUND".to_string(),
                    success: false,
                }),
            ))
        }
        Err(SchedulerError::Forbidden { .. }) => {
            warn!(
                "User {} attempted to cancel transfer {} they do not own",
                query.owner_id, transfer_id
            );
            Err((
                StatusCode::FORBIDDEN,
                Json(ErrorResponse {
                    error: "Scheduled transfer belongs to another user".to_string(),
                    code: "FORBIDDEN".to_string(),
                    success: false,
                }),
            ))
        }
        Err(e) => {
            error!("Failed to cancel scheduled transfer: {}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to cancel scheduled transfer".to_string(),
                    code: "SCHEDULER_ERROR".to_string(),
                    success: false,
                }),
            ))
        }
    }
}

/// Advance every due schedule one period
///
/// Invoked by the execution collaborator after it confirms a firing was
/// processed. Returns the transfers whose next occurrence changed.
#[utoipa::path(
    post,
    path = "/api/v1/scheduled-transfers/advance",
    tag = "scheduled-transfers",
    request_body = AdvanceScheduleRequest,
    responses(
        (status = 200, description = "Due schedules advanced", body = ApiResponse<Vec<ScheduledTransferResponse>>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn advance_due_transfers(
    State(state): State<AppState>,
    Json(request): Json<AdvanceScheduleRequest>,
) -> Result<Json<ApiResponse<Vec<ScheduledTransferResponse>>>, StatusCode> {
    trace!("Entering advance_due_transfers function");
    debug!("Advancing schedules due as of {}", request.as_of);

    let mut scheduler = state.scheduler.write().await;
    let advanced: Vec<ScheduledTransferResponse> = scheduler
        .advance_due(request.as_of)
        .into_iter()
        .map(ScheduledTransferResponse::from)
        .collect();

    info!("Advanced {} due scheduled transfers", advanced.len());
    let message = format!("Advanced {} scheduled transfers", advanced.len());
    let response = ApiResponse {
        data: advanced,
        message,
        success: true,
    };
    Ok(Json(response))
}

/// Preview the upcoming occurrence dates of a scheduled transfer
#[utoipa::path(
    get,
    path = "/api/v1/scheduled-transfers/{transfer_id}/occurrences",
    tag = "scheduled-transfers",
    params(
        ("transfer_id" = i32, Path, description = "Scheduled transfer ID"),
        OccurrencesQuery,
    ),
    responses(
        (status = 200, description = "Occurrence preview retrieved successfully", body = ApiResponse<OccurrencePreview>),
        (status = 403, description = "Transfer belongs to another user", body = ErrorResponse),
        (status = 404, description = "Scheduled transfer not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_upcoming_occurrences(
    Path(transfer_id): Path<i32>,
    Query(query): Query<OccurrencesQuery>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<OccurrencePreview>>, (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering get_upcoming_occurrences function");
    let limit = query.limit.unwrap_or(6);
    debug!(
        "Previewing {} occurrences of transfer {} for user {}",
        limit, transfer_id, query.owner_id
    );

    let scheduler = state.scheduler.read().await;
    match scheduler.upcoming_occurrences(transfer_id, query.owner_id, limit) {
        Ok(dates) => {
            info!(
                "Computed {} upcoming occurrences for transfer {}",
                dates.len(),
                transfer_id
            );
            let response = ApiResponse {
                data: OccurrencePreview { transfer_id, dates },
                message: "Occurrence preview retrieved successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Err(SchedulerError::TransferNotFound(_)) => Err((
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: format!("Scheduled transfer with id {transfer_id} does not exist"),
                code: "SCHEDULED_TRANSFER_NOT_FOUND".to_string(),
                success: false,
            }),
        )),
        Err(SchedulerError::Forbidden { .. }) => Err((
            StatusCode::FORBIDDEN,
            Json(ErrorResponse {
                error: "Scheduled transfer belongs to another user".to_string(),
                code: "FORBIDDEN".to_string(),
                success: false,
            }),
        )),
        Err(e) => {
            error!("Failed to preview occurrences: {}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to preview occurrences".to_string(),
                    code: "SCHEDULER_ERROR".to_string(),
                    success: false,
                }),
            ))
        }
    }
}
