use chrono::NaiveDate;
use common::{TransferField, ValidationErrors};
use model::entities::scheduled_transfer::{RecurrencePeriod, TransferDestination, TransferMethod};
use rust_decimal::Decimal;
use tracing::debug;

use crate::directory::Directory;

/// An unvalidated, caller-supplied scheduled transfer.
///
/// `method`, `frequency` and `start_date` are optional because their absence
/// is user feedback, not a programmer error. The destination variant itself
/// is structural: a draft that names no destination reference at all cannot
/// be built, which keeps that case in the malformed-input tier.
#[derive(Debug, Clone, PartialEq)]
pub struct TransferDraft {
    pub owner_id: i32,
    pub origin_account_id: i32,
    pub destination: DraftDestination,
    pub amount: Decimal,
    pub memo: Option<String>,
    pub frequency: Option<RecurrencePeriod>,
    pub start_date: Option<NaiveDate>,
}

/// Destination of a draft. Mirrors [`TransferDestination`] with the
/// settlement method still unconfirmed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DraftDestination {
    OwnAccount { account_id: i32 },
    ThirdParty { beneficiary_id: i32, method: Option<TransferMethod> },
}

/// A draft that passed every rule. Only [`validate`] constructs one, so the
/// registry can only be handed checked records.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedTransfer {
    pub owner_id: i32,
    pub origin_account_id: i32,
    pub destination: TransferDestination,
    pub amount: Decimal,
    pub memo: Option<String>,
    pub frequency: RecurrencePeriod,
    pub start_date: NaiveDate,
}

/// Checks a draft against the directory and the current date.
///
/// Every rule group is evaluated; failures accumulate per field so the
/// caller gets the complete picture in one pass. No rule mutates anything.
pub fn validate(
    draft: &TransferDraft,
    directory: &dyn Directory,
    today: NaiveDate,
) -> Result<ValidatedTransfer, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    // Origin: must exist, belong to the requester and be active.
    let origin_account = match directory.account(draft.origin_account_id) {
        None => {
            errors.record(TransferField::Origin, "origin account does not exist");
            None
        }
        Some(account) if account.owner_id != draft.owner_id => {
            errors.record(
                TransferField::Origin,
                "origin account does not belong to the requesting user",
            );
            None
        }
        Some(account) if !account.is_active() => {
            errors.record(TransferField::Origin, "origin account is not active");
            None
        }
        Some(account) => Some(account),
    };

    // Destination: checked per kind. The same-account rule compares raw ids
    // so it fires even when the origin lookup itself failed.
    let destination = match draft.destination {
        DraftDestination::OwnAccount { account_id } => {
            if account_id == draft.origin_account_id {
                errors.record(
                    TransferField::Destination,
                    "destination account must differ from the origin account",
                );
            }
            match directory.account(account_id) {
                None => {
                    errors.record(TransferField::Destination, "destination account does not exist");
                    None
                }
                Some(account) if account.owner_id != draft.owner_id => {
                    errors.record(
                        TransferField::Destination,
                        "destination account does not belong to the requesting user",
                    );
                    None
                }
                Some(account) if !account.is_active() => {
                    errors.record(TransferField::Destination, "destination account is not active");
                    None
                }
                Some(_) if account_id == draft.origin_account_id => None,
                Some(_) => Some(TransferDestination::OwnAccount { account_id }),
            }
        }
        DraftDestination::ThirdParty { beneficiary_id, method } => {
            let beneficiary_ok = match directory.beneficiary(beneficiary_id) {
                None => {
                    errors.record(TransferField::Destination, "beneficiary does not exist");
                    false
                }
                Some(beneficiary) if beneficiary.owner_id != draft.owner_id => {
                    errors.record(
                        TransferField::Destination,
                        "beneficiary does not belong to the requesting user",
                    );
                    false
                }
                Some(beneficiary) if !beneficiary.is_transfer_destination() => {
                    errors.record(
                        TransferField::Destination,
                        "beneficiary cannot receive transfers",
                    );
                    false
                }
                Some(_) => true,
            };
            match method {
                None => {
                    errors.record(TransferField::Method, "transfer method must be ACH or RTGS");
                    None
                }
                Some(method) if beneficiary_ok => {
                    Some(TransferDestination::ThirdParty { beneficiary_id, method })
                }
                Some(_) => None,
            }
        }
    };

    // Amount: positive, and covered by the origin's available balance. The
    // balance check only makes sense against a fully resolved origin.
    if draft.amount <= Decimal::ZERO {
        errors.record(TransferField::Amount, "amount must be greater than zero");
    } else if let Some(account) = origin_account {
        if draft.amount > account.available_balance {
            errors.record(
                TransferField::Amount,
                "amount exceeds the available balance of the origin account",
            );
        }
    }

    // Start date: present and not in the past.
    let start_date = match draft.start_date {
        None => {
            errors.record(TransferField::StartDate, "start date is required");
            None
        }
        Some(date) if date < today => {
            errors.record(TransferField::StartDate, "start date must not be in the past");
            None
        }
        Some(date) => Some(date),
    };

    // Frequency: one of the recognized periods.
    let frequency = match draft.frequency {
        None => {
            errors.record(
                TransferField::Frequency,
                "frequency must be one of Daily, Weekly, Biweekly or Monthly",
            );
            None
        }
        Some(frequency) => Some(frequency),
    };

    match (destination, start_date, frequency) {
        (Some(destination), Some(start_date), Some(frequency)) if errors.is_empty() => {
            Ok(ValidatedTransfer {
                owner_id: draft.owner_id,
                origin_account_id: draft.origin_account_id,
                destination,
                amount: draft.amount,
                memo: draft.memo.clone(),
                frequency,
                start_date,
            })
        }
        _ => {
            debug!(error_count = errors.len(), "transfer draft rejected");
            Err(errors)
        }
    }
}
