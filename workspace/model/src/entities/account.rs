use rust_decimal::Decimal;
use rusty_money::iso;
use serde::{Deserialize, Serialize};

/// Lifecycle state of a directory account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccountStatus {
    Active,
    Inactive,
}

/// A deposit account as published by the account directory.
/// The directory owns these records; the scheduling core only reads them
/// to resolve origins and destinations.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: i32,
    /// The user who owns this account.
    pub owner_id: i32,
    pub account_number: String,
    /// ISO 4217 currency code, e.g., "DOP", "USD".
    /// We use the `rusty_money` crate to resolve this in the business logic layer.
    pub currency_code: String,
    /// Funds available for new transfers, net of holds.
    pub available_balance: Decimal,
    pub status: AccountStatus,
}

impl Account {
    pub fn is_active(&self) -> bool {
        self.status == AccountStatus::Active
    }

    /// Resolves the ISO 4217 code against the rusty-money registry.
    /// Returns `None` for codes the registry does not know.
    pub fn currency(&self) -> Option<&'static iso::Currency> {
        iso::find(&self.currency_code)
    }
}
