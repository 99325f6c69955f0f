use crate::schemas::{ApiResponse, AppState};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use model::entities::beneficiary::Beneficiary;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, trace};
use utoipa::ToSchema;

/// Beneficiary response model
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BeneficiaryResponse {
    pub id: i32,
    pub owner_id: i32,
    pub name: String,
    pub account_number: String,
    pub bank_name: String,
    pub kind: String,
    /// Whether this beneficiary can be picked as a transfer destination
    pub transfer_destination: bool,
}

impl From<&Beneficiary> for BeneficiaryResponse {
    fn from(beneficiary: &Beneficiary) -> Self {
        Self {
            id: beneficiary.id,
            owner_id: beneficiary.owner_id,
            name: beneficiary.name.clone(),
            account_number: beneficiary.account_number.clone(),
            bank_name: beneficiary.bank_name.clone(),
            kind: format!("{:?}", beneficiary.kind),
            transfer_destination: beneficiary.is_transfer_destination(),
        }
    }
}

/// Get the beneficiaries saved by a user
#[utoipa::path(
    get,
    path = "/api/v1/users/{user_id}/beneficiaries",
    tag = "beneficiaries",
    params(
        ("user_id" = i32, Path, description = "Owner user ID"),
    ),
    responses(
        (status = 200, description = "Beneficiaries retrieved successfully", body = ApiResponse<Vec<BeneficiaryResponse>>),
        (status = 500, description = "Internal server error", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument]
pub async fn get_user_beneficiaries(
    Path(user_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<BeneficiaryResponse>>>, StatusCode> {
    trace!("Entering get_user_beneficiaries function");
    debug!("Fetching beneficiaries for user: {}", user_id);

    let scheduler = state.scheduler.read().await;
    let beneficiaries: Vec<BeneficiaryResponse> = scheduler
        .directory()
        .beneficiaries_for_user(user_id)
        .into_iter()
        .map(BeneficiaryResponse::from)
        .collect();

    info!(
        "Retrieved {} beneficiaries for user {}",
        beneficiaries.len(),
        user_id
    );
    let response = ApiResponse {
        data: beneficiaries,
        message: "Beneficiaries retrieved successfully".to_string(),
        success: true,
    };
    Ok(Json(response))
}
