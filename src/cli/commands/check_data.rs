use std::path::Path;

use anyhow::{bail, Result};
use model::entities::scheduled_transfer::TransferDestination;
use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::config::load_seed_data;

/// Validates the seed files without starting the server: every scheduled
/// transfer must reference existing records and honor the schedule
/// invariants the registry expects.
pub fn check_data(data_dir: &Path) -> Result<()> {
    info!("Checking seed data in {}", data_dir.display());
    let seed = load_seed_data(data_dir)?;
    info!(
        accounts = seed.accounts.len(),
        beneficiaries = seed.beneficiaries.len(),
        scheduled_transfers = seed.scheduled_transfers.len(),
        "seed files parsed"
    );

    let mut problems = 0usize;
    for transfer in &seed.scheduled_transfers {
        if !seed.accounts.iter().any(|a| a.id == transfer.origin_account_id) {
            warn!(
                id = transfer.id,
                origin = transfer.origin_account_id,
                "origin account does not exist in accounts.json"
            );
            problems += 1;
        }
        match transfer.destination {
            TransferDestination::OwnAccount { account_id } => {
                if !seed.accounts.iter().any(|a| a.id == account_id) {
                    warn!(
                        id = transfer.id,
                        account_id, "destination account does not exist in accounts.json"
                    );
                    problems += 1;
                }
            }
            TransferDestination::ThirdParty { beneficiary_id, .. } => {
                if !seed.beneficiaries.iter().any(|b| b.id == beneficiary_id) {
                    warn!(
                        id = transfer.id,
                        beneficiary_id, "beneficiary does not exist in beneficiaries.json"
                    );
                    problems += 1;
                }
            }
        }
        if transfer.amount <= Decimal::ZERO {
            warn!(id = transfer.id, amount = %transfer.amount, "amount is not positive");
            problems += 1;
        }
        if transfer.next_occurrence < transfer.start_date {
            warn!(
                id = transfer.id,
                next_occurrence = %transfer.next_occurrence,
                start_date = %transfer.start_date,
                "next occurrence precedes the start date"
            );
            problems += 1;
        }
    }

    if problems > 0 {
        bail!("{problems} integrity problems found in seed data");
    }

    info!("Seed data looks consistent");
    Ok(())
}
