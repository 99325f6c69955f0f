use crate::schemas::{ApiResponse, AppState};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use model::entities::account::Account;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, trace, warn};
use utoipa::ToSchema;

/// Account response model
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AccountResponse {
    pub id: i32,
    pub owner_id: i32,
    pub account_number: String,
    pub currency_code: String,
    pub available_balance: Decimal,
    pub status: String,
}

impl From<&Account> for AccountResponse {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id,
            owner_id: account.owner_id,
            account_number: account.account_number.clone(),
            currency_code: account.currency_code.clone(),
            available_balance: account.available_balance,
            status: format!("{:?}", account.status),
        }
    }
}

/// Get the accounts owned by a user
#[utoipa::path(
    get,
    path = "/api/v1/users/{user_id}/accounts",
    tag = "accounts",
    params(
        ("user_id" = i32, Path, description = "Owner user ID"),
    ),
    responses(
        (status = 200, description = "Accounts retrieved successfully", body = ApiResponse<Vec<AccountResponse>>),
        (status = 500, description = "Internal server error", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument]
pub async fn get_user_accounts(
    Path(user_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<AccountResponse>>>, StatusCode> {
    trace!("Entering get_user_accounts function");
    debug!("Fetching accounts for user: {}", user_id);

    let scheduler = state.scheduler.read().await;
    let accounts: Vec<AccountResponse> = scheduler
        .directory()
        .accounts_for_user(user_id)
        .into_iter()
        .map(AccountResponse::from)
        .collect();

    info!("Retrieved {} accounts for user {}", accounts.len(), user_id);
    let response = ApiResponse {
        data: accounts,
        message: "Accounts retrieved successfully".to_string(),
        success: true,
    };
    Ok(Json(response))
}

/// Get a specific account by ID
#[utoipa::path(
    get,
    path = "/api/v1/accounts/{account_id}",
    tag = "accounts",
    params(
        ("account_id" = i32, Path, description = "Account ID"),
    ),
    responses(
        (status = 200, description = "Account retrieved successfully", body = ApiResponse<AccountResponse>),
        (status = 404, description = "Account not found", body = crate::schemas::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument]
pub async fn get_account(
    Path(account_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<AccountResponse>>, StatusCode> {
    trace!("Entering get_account function for account_id: {}", account_id);

    let scheduler = state.scheduler.read().await;
    match scheduler.directory().account(account_id) {
        Some(account) => {
            info!("Successfully retrieved account with ID: {}", account.id);
            let response = ApiResponse {
                data: AccountResponse::from(account),
                message: "Account retrieved successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        None => {
            warn!("Account with ID {} not found", account_id);
            Err(StatusCode::NOT_FOUND)
        }
    }
}
