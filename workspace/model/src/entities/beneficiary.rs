use serde::{Deserialize, Serialize};

/// What a saved beneficiary points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BeneficiaryKind {
    /// An account held at this bank.
    OwnBank,
    /// An account held at another domestic bank.
    OtherBank,
    /// A bill-payment counterparty; not a valid transfer destination.
    Biller,
}

/// A saved counterparty as published by the account directory.
/// Read-only to the scheduling core.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Beneficiary {
    pub id: i32,
    /// The user who saved this beneficiary.
    pub owner_id: i32,
    pub name: String,
    pub account_number: String,
    pub bank_name: String,
    pub kind: BeneficiaryKind,
}

impl Beneficiary {
    /// Billers are reachable through the bill-payment flows only.
    pub fn is_transfer_destination(&self) -> bool {
        matches!(self.kind, BeneficiaryKind::OwnBank | BeneficiaryKind::OtherBank)
    }
}
