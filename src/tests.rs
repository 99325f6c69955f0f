#[cfg(test)]
mod integration_tests {
    use crate::handlers::scheduled_transfers::{
        AdvanceScheduleRequest, CreateScheduledTransferRequest,
    };
    use crate::schemas::{ApiResponse, ValidationErrorResponse};
    use crate::test_utils::test_utils::setup_test_app;
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use chrono::NaiveDate;
    use common::TransferField;
    use rust_decimal::Decimal;

    /// A request that passes validation as written; tests tweak single
    /// fields to provoke the failure they exercise.
    fn own_account_request() -> CreateScheduledTransferRequest {
        CreateScheduledTransferRequest {
            owner_id: 1,
            kind: "OwnAccount".to_string(),
            origin_account_id: 1,
            destination_account_id: Some(2),
            beneficiary_id: None,
            method: None,
            amount: Decimal::new(10_000, 2),
            memo: Some("Savings".to_string()),
            frequency: Some("Monthly".to_string()),
            start_date: NaiveDate::from_ymd_opt(2026, 2, 1),
        }
    }

    fn third_party_request() -> CreateScheduledTransferRequest {
        CreateScheduledTransferRequest {
            owner_id: 1,
            kind: "ThirdParty".to_string(),
            origin_account_id: 1,
            destination_account_id: None,
            beneficiary_id: Some(1),
            method: Some("ACH".to_string()),
            amount: Decimal::new(5_000, 2),
            memo: None,
            frequency: Some("Weekly".to_string()),
            start_date: NaiveDate::from_ymd_opt(2026, 1, 15),
        }
    }

    #[tokio::test]
    async fn test_health_check() {
        let app = setup_test_app();
        let server = TestServer::new(app).unwrap();

        let response = server.get("/health").await;

        response.assert_status(StatusCode::OK);
        let body: serde_json::Value = response.json();
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["directory"], "4 accounts, 4 beneficiaries");
    }

    #[tokio::test]
    async fn test_create_own_account_transfer() {
        let app = setup_test_app();
        let server = TestServer::new(app).unwrap();

        let response = server
            .post("/api/v1/scheduled-transfers")
            .json(&own_account_request())
            .await;

        response.assert_status(StatusCode::CREATED);
        let body: ApiResponse<serde_json::Value> = response.json();
        assert!(body.success);
        assert_eq!(body.message, "Scheduled transfer created successfully");

        let transfer = &body.data;
        assert_eq!(transfer["kind"], "OwnAccount");
        assert_eq!(transfer["status"], "Active");
        assert_eq!(transfer["next_occurrence"], "2026-02-01");
        assert_eq!(transfer["start_date"], "2026-02-01");
        assert_eq!(transfer["amount"], "100.00");
        assert!(transfer["id"].as_i64().unwrap() > 0);
        assert!(transfer["method"].is_null());
    }

    #[tokio::test]
    async fn test_create_third_party_transfer() {
        let app = setup_test_app();
        let server = TestServer::new(app).unwrap();

        let response = server
            .post("/api/v1/scheduled-transfers")
            .json(&third_party_request())
            .await;

        response.assert_status(StatusCode::CREATED);
        let body: ApiResponse<serde_json::Value> = response.json();
        assert_eq!(body.data["kind"], "ThirdParty");
        assert_eq!(body.data["method"], "ACH");
        assert_eq!(body.data["beneficiary_id"], 1);
        assert!(body.data["destination_account_id"].is_null());
    }

    #[tokio::test]
    async fn test_create_rejects_same_origin_and_destination() {
        let app = setup_test_app();
        let server = TestServer::new(app).unwrap();

        let mut request = own_account_request();
        request.destination_account_id = Some(request.origin_account_id);

        let response = server
            .post("/api/v1/scheduled-transfers")
            .json(&request)
            .await;

        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        let body: ValidationErrorResponse = response.json();
        assert!(!body.success);
        assert_eq!(
            body.errors.reason(TransferField::Destination),
            Some("destination account must differ from the origin account")
        );
    }

    #[tokio::test]
    async fn test_create_rejects_amount_over_balance() {
        let app = setup_test_app();
        let server = TestServer::new(app).unwrap();

        let mut request = own_account_request();
        request.amount = Decimal::new(100_000_000, 2);

        let response = server
            .post("/api/v1/scheduled-transfers")
            .json(&request)
            .await;

        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        let body: ValidationErrorResponse = response.json();
        assert_eq!(
            body.errors.reason(TransferField::Amount),
            Some("amount exceeds the available balance of the origin account")
        );
    }

    #[tokio::test]
    async fn test_create_third_party_without_method() {
        let app = setup_test_app();
        let server = TestServer::new(app).unwrap();

        let mut request = third_party_request();
        request.method = None;

        let response = server
            .post("/api/v1/scheduled-transfers")
            .json(&request)
            .await;

        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        let body: ValidationErrorResponse = response.json();
        assert_eq!(body.errors.len(), 1);
        assert!(body.errors.reason(TransferField::Method).is_some());
    }

    #[tokio::test]
    async fn test_create_rejects_unrecognized_frequency() {
        let app = setup_test_app();
        let server = TestServer::new(app).unwrap();

        let mut request = own_account_request();
        request.frequency = Some("Fortnightly".to_string());

        let response = server
            .post("/api/v1/scheduled-transfers")
            .json(&request)
            .await;

        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        let body: ValidationErrorResponse = response.json();
        assert_eq!(body.errors.len(), 1);
        assert!(body.errors.reason(TransferField::Frequency).is_some());
    }

    #[tokio::test]
    async fn test_create_malformed_draft_is_bad_request() {
        let app = setup_test_app();
        let server = TestServer::new(app).unwrap();

        let mut request = third_party_request();
        request.beneficiary_id = None;

        let response = server
            .post("/api/v1/scheduled-transfers")
            .json(&request)
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: serde_json::Value = response.json();
        assert_eq!(body["code"], "MALFORMED_DRAFT");
    }

    #[tokio::test]
    async fn test_list_excludes_cancelled_transfers() {
        let app = setup_test_app();
        let server = TestServer::new(app).unwrap();

        let first = server
            .post("/api/v1/scheduled-transfers")
            .json(&own_account_request())
            .await;
        first.assert_status(StatusCode::CREATED);
        let first_body: ApiResponse<serde_json::Value> = first.json();
        let first_id = first_body.data["id"].as_i64().unwrap();

        let second = server
            .post("/api/v1/scheduled-transfers")
            .json(&third_party_request())
            .await;
        second.assert_status(StatusCode::CREATED);
        let second_body: ApiResponse<serde_json::Value> = second.json();
        let second_id = second_body.data["id"].as_i64().unwrap();

        let cancel = server
            .delete(&format!("/api/v1/scheduled-transfers/{first_id}?owner_id=1"))
            .await;
        cancel.assert_status(StatusCode::OK);

        let list = server.get("/api/v1/users/1/scheduled-transfers").await;
        list.assert_status(StatusCode::OK);
        let list_body: ApiResponse<Vec<serde_json::Value>> = list.json();
        assert_eq!(list_body.data.len(), 1);
        assert_eq!(list_body.data[0]["id"].as_i64().unwrap(), second_id);
    }

    #[tokio::test]
    async fn test_list_orders_by_next_occurrence() {
        let app = setup_test_app();
        let server = TestServer::new(app).unwrap();

        // Created second, due first.
        let mut late = own_account_request();
        late.start_date = NaiveDate::from_ymd_opt(2026, 3, 1);
        server
            .post("/api/v1/scheduled-transfers")
            .json(&late)
            .await
            .assert_status(StatusCode::CREATED);

        let mut soon = third_party_request();
        soon.start_date = NaiveDate::from_ymd_opt(2026, 1, 10);
        server
            .post("/api/v1/scheduled-transfers")
            .json(&soon)
            .await
            .assert_status(StatusCode::CREATED);

        let list = server.get("/api/v1/users/1/scheduled-transfers").await;
        let body: ApiResponse<Vec<serde_json::Value>> = list.json();
        let dates: Vec<&str> = body
            .data
            .iter()
            .map(|t| t["next_occurrence"].as_str().unwrap())
            .collect();
        assert_eq!(dates, vec!["2026-01-10", "2026-03-01"]);
    }

    #[tokio::test]
    async fn test_cancel_is_idempotent() {
        let app = setup_test_app();
        let server = TestServer::new(app).unwrap();

        let created = server
            .post("/api/v1/scheduled-transfers")
            .json(&own_account_request())
            .await;
        let created_body: ApiResponse<serde_json::Value> = created.json();
        let id = created_body.data["id"].as_i64().unwrap();

        let first = server
            .delete(&format!("/api/v1/scheduled-transfers/{id}?owner_id=1"))
            .await;
        first.assert_status(StatusCode::OK);

        let second = server
            .delete(&format!("/api/v1/scheduled-transfers/{id}?owner_id=1"))
            .await;
        second.assert_status(StatusCode::OK);
    }

    #[tokio::test]
    async fn test_cancel_unknown_transfer_not_found() {
        let app = setup_test_app();
        let server = TestServer::new(app).unwrap();

        let response = server
            .delete("/api/v1/scheduled-transfers/999?owner_id=1")
            .await;

        response.assert_status(StatusCode::NOT_FOUND);
        let body: serde_json::Value = response.json();
        assert_eq!(body["code"], "SCHEDULED_TRANSFER_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_cancel_foreign_transfer_forbidden() {
        let app = setup_test_app();
        let server = TestServer::new(app).unwrap();

        let created = server
            .post("/api/v1/scheduled-transfers")
            .json(&own_account_request())
            .await;
        let created_body: ApiResponse<serde_json::Value> = created.json();
        let id = created_body.data["id"].as_i64().unwrap();

        let response = server
            .delete(&format!("/api/v1/scheduled-transfers/{id}?owner_id=2"))
            .await;

        response.assert_status(StatusCode::FORBIDDEN);
        let body: serde_json::Value = response.json();
        assert_eq!(body["code"], "FORBIDDEN");
    }

    #[tokio::test]
    async fn test_advance_rolls_due_schedules_forward() {
        let app = setup_test_app();
        let server = TestServer::new(app).unwrap();

        let mut request = own_account_request();
        request.frequency = Some("Weekly".to_string());
        request.start_date = NaiveDate::from_ymd_opt(2026, 1, 5);
        server
            .post("/api/v1/scheduled-transfers")
            .json(&request)
            .await
            .assert_status(StatusCode::CREATED);

        let advance = server
            .post("/api/v1/scheduled-transfers/advance")
            .json(&AdvanceScheduleRequest {
                as_of: NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
            })
            .await;
        advance.assert_status(StatusCode::OK);
        let body: ApiResponse<Vec<serde_json::Value>> = advance.json();
        assert_eq!(body.data.len(), 1);
        assert_eq!(body.data[0]["next_occurrence"], "2026-01-12");

        // Not due yet: nothing changes.
        let advance = server
            .post("/api/v1/scheduled-transfers/advance")
            .json(&AdvanceScheduleRequest {
                as_of: NaiveDate::from_ymd_opt(2026, 1, 10).unwrap(),
            })
            .await;
        let body: ApiResponse<Vec<serde_json::Value>> = advance.json();
        assert!(body.data.is_empty());
    }

    #[tokio::test]
    async fn test_occurrence_preview_clamps_month_ends() {
        let app = setup_test_app();
        let server = TestServer::new(app).unwrap();

        let mut request = own_account_request();
        request.start_date = NaiveDate::from_ymd_opt(2026, 1, 31);
        let created = server
            .post("/api/v1/scheduled-transfers")
            .json(&request)
            .await;
        let created_body: ApiResponse<serde_json::Value> = created.json();
        let id = created_body.data["id"].as_i64().unwrap();

        let response = server
            .get(&format!(
                "/api/v1/scheduled-transfers/{id}/occurrences?owner_id=1&limit=3"
            ))
            .await;

        response.assert_status(StatusCode::OK);
        let body: ApiResponse<serde_json::Value> = response.json();
        assert_eq!(body.data["transfer_id"].as_i64().unwrap(), id);
        assert_eq!(
            body.data["dates"],
            serde_json::json!(["2026-01-31", "2026-02-28", "2026-03-28"])
        );
    }

    #[tokio::test]
    async fn test_get_user_accounts_and_beneficiaries() {
        let app = setup_test_app();
        let server = TestServer::new(app).unwrap();

        let accounts = server.get("/api/v1/users/1/accounts").await;
        accounts.assert_status(StatusCode::OK);
        let accounts_body: ApiResponse<Vec<serde_json::Value>> = accounts.json();
        assert_eq!(accounts_body.data.len(), 3);

        let beneficiaries = server.get("/api/v1/users/1/beneficiaries").await;
        beneficiaries.assert_status(StatusCode::OK);
        let beneficiaries_body: ApiResponse<Vec<serde_json::Value>> = beneficiaries.json();
        assert_eq!(beneficiaries_body.data.len(), 3);
        let biller = beneficiaries_body
            .data
            .iter()
            .find(|b| b["kind"] == "Biller")
            .expect("biller fixture present");
        assert_eq!(biller["transfer_destination"], false);
    }

    #[tokio::test]
    async fn test_get_account_not_found() {
        let app = setup_test_app();
        let server = TestServer::new(app).unwrap();

        let response = server.get("/api/v1/accounts/99").await;
        response.assert_status(StatusCode::NOT_FOUND);
    }
}
