use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Enum for recurrence periods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecurrencePeriod {
    Daily,
    Weekly,
    Biweekly,
    Monthly,
}

/// Settlement rail for third-party transfers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransferMethod {
    /// Batched low-value rail.
    Ach,
    /// Real-time gross settlement, for high-value transfers.
    Rtgs,
}

impl fmt::Display for TransferMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransferMethod::Ach => write!(f, "ACH"),
            TransferMethod::Rtgs => write!(f, "RTGS"),
        }
    }
}

/// Lifecycle state of a scheduled transfer. Cancellation is terminal; the
/// record stays around so history remains inspectable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransferStatus {
    Active,
    Cancelled,
}

/// Where a scheduled transfer sends funds.
///
/// The settlement method only exists for third-party destinations; a transfer
/// between own accounts has no rail to choose. Keeping the method inside the
/// `ThirdParty` payload makes that a structural guarantee instead of a
/// runtime check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum TransferDestination {
    OwnAccount { account_id: i32 },
    ThirdParty { beneficiary_id: i32, method: TransferMethod },
}

impl TransferDestination {
    pub fn is_own_account(&self) -> bool {
        matches!(self, TransferDestination::OwnAccount { .. })
    }

    pub fn method(&self) -> Option<TransferMethod> {
        match self {
            TransferDestination::OwnAccount { .. } => None,
            TransferDestination::ThirdParty { method, .. } => Some(*method),
        }
    }
}

/// A transfer that repeats on a regular schedule between a user's account and
/// either another of their accounts or a saved beneficiary.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScheduledTransfer {
    pub id: i32,
    /// The user who created the schedule.
    pub owner_id: i32,
    /// The funding account; always one of the owner's active accounts.
    pub origin_account_id: i32,
    pub destination: TransferDestination,
    /// The value of each occurrence, in the origin account's currency.
    pub amount: Decimal,
    pub memo: Option<String>,
    /// The frequency of the transfer.
    pub frequency: RecurrencePeriod,
    /// The date of the first occurrence.
    pub start_date: NaiveDate,
    /// The date the next occurrence is due. Never before `start_date`;
    /// maintained exclusively by the registry's advance operation.
    pub next_occurrence: NaiveDate,
    pub status: TransferStatus,
    pub created_at: DateTime<Utc>,
}

impl ScheduledTransfer {
    pub fn is_active(&self) -> bool {
        self.status == TransferStatus::Active
    }
}
