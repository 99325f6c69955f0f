use std::fs;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use compute::default_scheduler;
use compute::directory::InMemoryDirectory;
use model::entities::account::Account;
use model::entities::beneficiary::Beneficiary;
use model::entities::scheduled_transfer::ScheduledTransfer;
use serde::Deserialize;
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::schemas::AppState;

/// Top-level shape of `accounts.json`.
#[derive(Debug, Deserialize)]
pub struct AccountsFile {
    pub accounts: Vec<Account>,
}

/// Top-level shape of `beneficiaries.json`.
#[derive(Debug, Deserialize)]
pub struct BeneficiariesFile {
    pub beneficiaries: Vec<Beneficiary>,
}

/// Top-level shape of `scheduled_transfers.json`.
#[derive(Debug, Deserialize)]
pub struct ScheduledTransfersFile {
    pub scheduled_transfers: Vec<ScheduledTransfer>,
}

/// Everything the seed directory provides at startup.
#[derive(Debug)]
pub struct SeedData {
    pub accounts: Vec<Account>,
    pub beneficiaries: Vec<Beneficiary>,
    pub scheduled_transfers: Vec<ScheduledTransfer>,
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading seed file {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing seed file {}", path.display()))
}

/// Loads the three seed files from the data directory.
pub fn load_seed_data(data_dir: &Path) -> Result<SeedData> {
    let accounts: AccountsFile = read_json(&data_dir.join("accounts.json"))?;
    let beneficiaries: BeneficiariesFile = read_json(&data_dir.join("beneficiaries.json"))?;
    let transfers: ScheduledTransfersFile = read_json(&data_dir.join("scheduled_transfers.json"))?;

    // Unknown currency codes are tolerated but called out; balances still
    // compare fine, only display-layer formatting would suffer.
    for account in &accounts.accounts {
        if account.currency().is_none() {
            warn!(
                id = account.id,
                code = %account.currency_code,
                "account has an unrecognized currency code"
            );
        }
    }

    Ok(SeedData {
        accounts: accounts.accounts,
        beneficiaries: beneficiaries.beneficiaries,
        scheduled_transfers: transfers.scheduled_transfers,
    })
}

/// Initialize application configuration and state
pub fn initialize_app_state(data_dir: &Path) -> Result<AppState> {
    info!("Loading seed data from {}", data_dir.display());
    let seed = load_seed_data(data_dir)?;

    let directory = InMemoryDirectory::new(seed.accounts, seed.beneficiaries);
    let mut scheduler = default_scheduler(directory, None);

    let total = seed.scheduled_transfers.len();
    let mut restored = 0usize;
    for transfer in seed.scheduled_transfers {
        if scheduler.restore(transfer) {
            restored += 1;
        }
    }
    info!(restored, total, "scheduled transfers restored from seed data");

    Ok(AppState {
        scheduler: Arc::new(RwLock::new(scheduler)),
    })
}
