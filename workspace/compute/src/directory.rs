use std::collections::BTreeMap;

use model::entities::account::Account;
use model::entities::beneficiary::Beneficiary;
use tracing::debug;

/// Read-only access to the account and beneficiary directory.
///
/// An external collaborator owns these records; the scheduler only looks
/// them up while validating drafts and serving directory views.
pub trait Directory: std::fmt::Debug {
    fn account(&self, account_id: i32) -> Option<&Account>;

    fn beneficiary(&self, beneficiary_id: i32) -> Option<&Beneficiary>;

    /// Accounts owned by the user, in id order.
    fn accounts_for_user(&self, owner_id: i32) -> Vec<&Account>;

    /// Beneficiaries saved by the user, in id order.
    fn beneficiaries_for_user(&self, owner_id: i32) -> Vec<&Beneficiary>;

    fn account_count(&self) -> usize;

    fn beneficiary_count(&self) -> usize;
}

/// Directory held entirely in memory, hydrated from seed data at startup.
#[derive(Debug, Default)]
pub struct InMemoryDirectory {
    accounts: BTreeMap<i32, Account>,
    beneficiaries: BTreeMap<i32, Beneficiary>,
}

impl InMemoryDirectory {
    pub fn new(accounts: Vec<Account>, beneficiaries: Vec<Beneficiary>) -> Self {
        debug!(
            accounts = accounts.len(),
            beneficiaries = beneficiaries.len(),
            "building in-memory directory"
        );
        Self {
            accounts: accounts.into_iter().map(|a| (a.id, a)).collect(),
            beneficiaries: beneficiaries.into_iter().map(|b| (b.id, b)).collect(),
        }
    }
}

impl Directory for InMemoryDirectory {
    fn account(&self, account_id: i32) -> Option<&Account> {
        self.accounts.get(&account_id)
    }

    fn beneficiary(&self, beneficiary_id: i32) -> Option<&Beneficiary> {
        self.beneficiaries.get(&beneficiary_id)
    }

    fn accounts_for_user(&self, owner_id: i32) -> Vec<&Account> {
        self.accounts
            .values()
            .filter(|account| account.owner_id == owner_id)
            .collect()
    }

    fn beneficiaries_for_user(&self, owner_id: i32) -> Vec<&Beneficiary> {
        self.beneficiaries
            .values()
            .filter(|beneficiary| beneficiary.owner_id == owner_id)
            .collect()
    }

    fn account_count(&self) -> usize {
        self.accounts.len()
    }

    fn beneficiary_count(&self) -> usize {
        self.beneficiaries.len()
    }
}
