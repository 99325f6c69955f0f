//! This file serves as the root for all domain entity modules.
//! The records here are plain serde-backed structs: the account directory
//! publishes them as JSON and the scheduling core keeps them in memory,
//! so no persistence framework is involved.

pub mod account;
pub mod beneficiary;
pub mod scheduled_transfer;

pub mod prelude {
    //! A prelude module for easy importing of all entities.
    pub use super::account::{Account, AccountStatus};
    pub use super::beneficiary::{Beneficiary, BeneficiaryKind};
    pub use super::scheduled_transfer::{
        RecurrencePeriod, ScheduledTransfer, TransferDestination, TransferMethod, TransferStatus,
    };
}
