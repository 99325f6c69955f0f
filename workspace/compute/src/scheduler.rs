use chrono::NaiveDate;
use model::entities::scheduled_transfer::ScheduledTransfer;
use tracing::debug;

use crate::clock::Clock;
use crate::directory::Directory;
use crate::error::{Result, SchedulerError};
use crate::recurrence;
use crate::registry::TransferRegistry;
use crate::validate::{self, TransferDraft};

/// The public entry point for scheduled transfers.
///
/// Owns the canonical registry behind the injected directory and clock, so
/// every view of the schedule — however many consumers observe it — reads
/// the same state. Callers sharing a scheduler across tasks serialize
/// mutations with whatever guard wraps it; the operations themselves are
/// synchronous and never suspend.
#[derive(Debug)]
pub struct TransferScheduler {
    directory: Box<dyn Directory + Send + Sync>,
    clock: Box<dyn Clock + Send + Sync>,
    registry: TransferRegistry,
}

impl TransferScheduler {
    pub fn new(
        directory: Box<dyn Directory + Send + Sync>,
        clock: Box<dyn Clock + Send + Sync>,
    ) -> Self {
        Self {
            directory,
            clock,
            registry: TransferRegistry::new(),
        }
    }

    /// Validates a draft and, on success, registers it as a new active
    /// series. The draft is untouched on failure; nothing is partially
    /// applied.
    pub fn create_scheduled_transfer(&mut self, draft: &TransferDraft) -> Result<ScheduledTransfer> {
        debug!(owner_id = draft.owner_id, "validating scheduled transfer draft");
        let validated = validate::validate(draft, self.directory.as_ref(), self.clock.today())
            .map_err(SchedulerError::Validation)?;
        Ok(self.registry.add(validated, self.clock.now()))
    }

    /// Cancels one of the caller's transfers. Unknown ids are `NotFound`;
    /// an id owned by someone else is `Forbidden`. Cancelling twice
    /// succeeds both times.
    pub fn cancel_scheduled_transfer(&mut self, id: i32, owner_id: i32) -> Result<()> {
        let transfer = self
            .registry
            .get(id)
            .ok_or(SchedulerError::TransferNotFound(id))?;
        if transfer.owner_id != owner_id {
            return Err(SchedulerError::Forbidden {
                transfer_id: id,
                owner_id,
            });
        }
        self.registry.cancel(id)
    }

    /// Active transfers for the user, soonest occurrence first.
    pub fn list_for_user(&self, owner_id: i32) -> Vec<ScheduledTransfer> {
        self.registry.list_active(owner_id)
    }

    /// Rolls every due active transfer forward one period; returns the
    /// records that changed.
    pub fn advance_due(&mut self, as_of: NaiveDate) -> Vec<ScheduledTransfer> {
        self.registry.advance_due(as_of)
    }

    /// The next `limit` dates one of the caller's series will fire on,
    /// starting with its current next occurrence. A cancelled series has no
    /// upcoming occurrences.
    pub fn upcoming_occurrences(&self, id: i32, owner_id: i32, limit: usize) -> Result<Vec<NaiveDate>> {
        let transfer = self
            .registry
            .get(id)
            .ok_or(SchedulerError::TransferNotFound(id))?;
        if transfer.owner_id != owner_id {
            return Err(SchedulerError::Forbidden {
                transfer_id: id,
                owner_id,
            });
        }
        if !transfer.is_active() {
            return Ok(Vec::new());
        }
        Ok(recurrence::upcoming(
            transfer.next_occurrence,
            transfer.frequency,
            limit,
        ))
    }

    /// Hydrates a pre-existing record from seed data, bypassing draft
    /// validation. Returns whether the record was kept.
    pub fn restore(&mut self, transfer: ScheduledTransfer) -> bool {
        self.registry.restore(transfer)
    }

    pub fn directory(&self) -> &dyn Directory {
        self.directory.as_ref()
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn transfer_count(&self) -> usize {
        self.registry.len()
    }
}
