//! Shared fixtures for scheduling tests: a small seeded directory and
//! ready-made drafts that pass validation as written. Tests mutate the
//! drafts to trigger the failure they exercise.

use chrono::NaiveDate;
use model::entities::account::{Account, AccountStatus};
use model::entities::beneficiary::{Beneficiary, BeneficiaryKind};
use model::entities::scheduled_transfer::{RecurrencePeriod, TransferMethod};
use rust_decimal::Decimal;

use crate::directory::InMemoryDirectory;
use crate::validate::{DraftDestination, TransferDraft};

/// The frozen "today" the fixtures are written against.
pub const TODAY: NaiveDate = match NaiveDate::from_ymd_opt(2026, 1, 1) {
    Some(date) => date,
    None => panic!("fixture date is valid"),
};

fn account(id: i32, owner_id: i32, balance: Decimal, status: AccountStatus) -> Account {
    Account {
        id,
        owner_id,
        account_number: format!("020-00456{id:02}-1"),
        currency_code: "DOP".to_string(),
        available_balance: balance,
        status,
    }
}

fn beneficiary(id: i32, owner_id: i32, name: &str, kind: BeneficiaryKind) -> Beneficiary {
    Beneficiary {
        id,
        owner_id,
        name: name.to_string(),
        account_number: format!("020-00332{id:02}-5"),
        bank_name: "Banco del Caribe".to_string(),
        kind,
    }
}

/// Four accounts (one inactive, one foreign) and four beneficiaries
/// (one foreign, one biller) for user 1.
pub fn sample_directory() -> InMemoryDirectory {
    InMemoryDirectory::new(
        vec![
            account(1, 1, Decimal::new(100_000, 2), AccountStatus::Active),
            account(2, 1, Decimal::new(25_000, 2), AccountStatus::Active),
            account(3, 1, Decimal::new(500_000, 2), AccountStatus::Inactive),
            account(4, 2, Decimal::new(1_500_000, 2), AccountStatus::Active),
        ],
        vec![
            beneficiary(1, 1, "Laura Pena", BeneficiaryKind::OwnBank),
            beneficiary(2, 1, "Miguel Santos", BeneficiaryKind::OtherBank),
            beneficiary(3, 2, "Carmen Diaz", BeneficiaryKind::OwnBank),
            beneficiary(4, 1, "Electric Utility", BeneficiaryKind::Biller),
        ],
    )
}

/// A monthly transfer between user 1's two active accounts.
pub fn own_account_draft() -> TransferDraft {
    TransferDraft {
        owner_id: 1,
        origin_account_id: 1,
        destination: DraftDestination::OwnAccount { account_id: 2 },
        amount: Decimal::new(10_000, 2),
        memo: Some("Savings".to_string()),
        frequency: Some(RecurrencePeriod::Monthly),
        start_date: NaiveDate::from_ymd_opt(2026, 2, 1),
    }
}

/// A weekly ACH transfer from user 1 to their first beneficiary.
pub fn third_party_draft() -> TransferDraft {
    TransferDraft {
        owner_id: 1,
        origin_account_id: 1,
        destination: DraftDestination::ThirdParty {
            beneficiary_id: 1,
            method: Some(TransferMethod::Ach),
        },
        amount: Decimal::new(5_000, 2),
        memo: None,
        frequency: Some(RecurrencePeriod::Weekly),
        start_date: NaiveDate::from_ymd_opt(2026, 1, 15),
    }
}
