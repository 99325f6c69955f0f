use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use model::entities::scheduled_transfer::{ScheduledTransfer, TransferStatus};
use tracing::{debug, info, warn};

use crate::error::{Result, SchedulerError};
use crate::recurrence;
use crate::validate::ValidatedTransfer;

/// Owns every scheduled transfer and is the single source of truth for
/// status and next-occurrence dates. All mutation goes through here; views
/// only ever receive clones.
///
/// Duplicates of the same economic transfer are allowed on purpose — the id
/// is the only identity a record has.
#[derive(Debug, Default)]
pub struct TransferRegistry {
    transfers: BTreeMap<i32, ScheduledTransfer>,
    next_id: i32,
}

impl TransferRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a validated transfer as a new active series due on its start
    /// date, and returns the stored record.
    pub fn add(&mut self, transfer: ValidatedTransfer, created_at: DateTime<Utc>) -> ScheduledTransfer {
        self.next_id += 1;
        let record = ScheduledTransfer {
            id: self.next_id,
            owner_id: transfer.owner_id,
            origin_account_id: transfer.origin_account_id,
            destination: transfer.destination,
            amount: transfer.amount,
            memo: transfer.memo,
            frequency: transfer.frequency,
            start_date: transfer.start_date,
            next_occurrence: transfer.start_date,
            status: TransferStatus::Active,
            created_at,
        };
        info!(
            id = record.id,
            owner_id = record.owner_id,
            next_occurrence = %record.next_occurrence,
            "scheduled transfer created"
        );
        self.transfers.insert(record.id, record.clone());
        record
    }

    /// Re-inserts a record from a backing store without re-validation.
    ///
    /// Records whose next occurrence precedes their start date would break
    /// the registry's invariant and are skipped with a warning; startup
    /// continues with the rest. Returns whether the record was kept.
    pub fn restore(&mut self, transfer: ScheduledTransfer) -> bool {
        if transfer.next_occurrence < transfer.start_date {
            warn!(
                id = transfer.id,
                next_occurrence = %transfer.next_occurrence,
                start_date = %transfer.start_date,
                "skipping restore: next occurrence precedes start date"
            );
            return false;
        }
        self.next_id = self.next_id.max(transfer.id);
        debug!(id = transfer.id, "scheduled transfer restored");
        self.transfers.insert(transfer.id, transfer);
        true
    }

    pub fn get(&self, id: i32) -> Option<&ScheduledTransfer> {
        self.transfers.get(&id)
    }

    pub fn len(&self) -> usize {
        self.transfers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transfers.is_empty()
    }

    /// Active transfers for one user, soonest occurrence first. Ties resolve
    /// by creation time, then id, so the order is stable for display and
    /// testing.
    pub fn list_active(&self, owner_id: i32) -> Vec<ScheduledTransfer> {
        let mut transfers: Vec<ScheduledTransfer> = self
            .transfers
            .values()
            .filter(|transfer| transfer.owner_id == owner_id && transfer.is_active())
            .cloned()
            .collect();
        transfers.sort_by_key(|transfer| (transfer.next_occurrence, transfer.created_at, transfer.id));
        transfers
    }

    /// Cancels a transfer. Cancelling an already-cancelled transfer is a
    /// no-op success; nothing about the record changes either way except the
    /// status.
    pub fn cancel(&mut self, id: i32) -> Result<()> {
        let transfer = self
            .transfers
            .get_mut(&id)
            .ok_or(SchedulerError::TransferNotFound(id))?;
        if transfer.status == TransferStatus::Cancelled {
            debug!(id, "scheduled transfer already cancelled");
            return Ok(());
        }
        transfer.status = TransferStatus::Cancelled;
        info!(id, "scheduled transfer cancelled");
        Ok(())
    }

    /// Rolls every due active transfer forward by one period and returns the
    /// records that changed.
    ///
    /// This never moves money; the execution collaborator calls it once per
    /// confirmed firing. Calling it again for the same date advances any
    /// record that is still due — at-most-once-per-day gating belongs to the
    /// caller.
    pub fn advance_due(&mut self, as_of: NaiveDate) -> Vec<ScheduledTransfer> {
        let mut advanced = Vec::new();
        for transfer in self.transfers.values_mut() {
            if transfer.is_active() && recurrence::is_due(transfer.next_occurrence, as_of) {
                let next = recurrence::next_after(transfer.next_occurrence, transfer.frequency);
                debug!(
                    id = transfer.id,
                    from = %transfer.next_occurrence,
                    to = %next,
                    "advancing schedule"
                );
                transfer.next_occurrence = next;
                advanced.push(transfer.clone());
            }
        }
        if !advanced.is_empty() {
            info!(count = advanced.len(), %as_of, "advanced due transfers");
        }
        advanced
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{own_account_draft, sample_directory, third_party_draft, TODAY};
    use crate::validate;
    use chrono::TimeZone;
    use model::entities::scheduled_transfer::RecurrencePeriod;

    fn created_at(seconds: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(seconds, 0).unwrap()
    }

    fn validated(draft: &validate::TransferDraft) -> ValidatedTransfer {
        validate::validate(draft, &sample_directory(), TODAY).expect("fixture draft should pass")
    }

    #[test]
    fn add_assigns_sequential_ids_and_starts_the_series() {
        let mut registry = TransferRegistry::new();
        let first = registry.add(validated(&own_account_draft()), created_at(0));
        let second = registry.add(validated(&own_account_draft()), created_at(1));

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(first.status, TransferStatus::Active);
        assert_eq!(first.next_occurrence, first.start_date);
    }

    #[test]
    fn duplicate_economic_transfers_are_permitted() {
        let mut registry = TransferRegistry::new();
        registry.add(validated(&own_account_draft()), created_at(0));
        registry.add(validated(&own_account_draft()), created_at(0));

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.list_active(1).len(), 2);
    }

    #[test]
    fn list_active_orders_by_occurrence_then_creation() {
        let mut registry = TransferRegistry::new();

        let mut late = validated(&own_account_draft());
        late.start_date = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
        let late_id = registry.add(late, created_at(0)).id;

        let soon_second = registry.add(validated(&third_party_draft()), created_at(10)).id;
        let mut soon_first = validated(&own_account_draft());
        soon_first.start_date = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
        let soon_first_id = registry.add(soon_first, created_at(5)).id;

        let order: Vec<i32> = registry.list_active(1).iter().map(|t| t.id).collect();
        assert_eq!(order, vec![soon_first_id, soon_second, late_id]);
    }

    #[test]
    fn cancel_is_idempotent_and_preserves_the_schedule() {
        let mut registry = TransferRegistry::new();
        let id = registry.add(validated(&own_account_draft()), created_at(0)).id;
        let before = registry.get(id).unwrap().next_occurrence;

        registry.cancel(id).expect("first cancel succeeds");
        registry.cancel(id).expect("second cancel is a no-op success");

        let record = registry.get(id).unwrap();
        assert_eq!(record.status, TransferStatus::Cancelled);
        assert_eq!(record.next_occurrence, before);
    }

    #[test]
    fn cancel_unknown_id_reports_not_found() {
        let mut registry = TransferRegistry::new();
        assert!(matches!(
            registry.cancel(42),
            Err(SchedulerError::TransferNotFound(42))
        ));
    }

    #[test]
    fn cancelled_transfers_disappear_from_listings() {
        let mut registry = TransferRegistry::new();
        let keep = registry.add(validated(&own_account_draft()), created_at(0)).id;
        let drop = registry.add(validated(&third_party_draft()), created_at(1)).id;

        registry.cancel(drop).unwrap();

        let ids: Vec<i32> = registry.list_active(1).iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![keep]);
    }

    #[test]
    fn advance_due_moves_exactly_one_period() {
        let mut registry = TransferRegistry::new();
        let mut draft = validated(&own_account_draft());
        draft.frequency = RecurrencePeriod::Weekly;
        draft.start_date = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
        let id = registry.add(draft, created_at(0)).id;

        let changed = registry.advance_due(NaiveDate::from_ymd_opt(2026, 1, 5).unwrap());
        assert_eq!(changed.len(), 1);
        assert_eq!(
            registry.get(id).unwrap().next_occurrence,
            NaiveDate::from_ymd_opt(2026, 1, 12).unwrap()
        );
    }

    #[test]
    fn advance_due_leaves_future_transfers_alone() {
        let mut registry = TransferRegistry::new();
        let mut draft = validated(&own_account_draft());
        draft.start_date = NaiveDate::from_ymd_opt(2026, 2, 1).unwrap();
        let id = registry.add(draft, created_at(0)).id;

        let changed = registry.advance_due(NaiveDate::from_ymd_opt(2026, 1, 31).unwrap());
        assert!(changed.is_empty());
        assert_eq!(
            registry.get(id).unwrap().next_occurrence,
            NaiveDate::from_ymd_opt(2026, 2, 1).unwrap()
        );
    }

    #[test]
    fn advance_due_skips_cancelled_transfers() {
        let mut registry = TransferRegistry::new();
        let mut draft = validated(&own_account_draft());
        draft.start_date = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
        let id = registry.add(draft, created_at(0)).id;
        registry.cancel(id).unwrap();

        let changed = registry.advance_due(NaiveDate::from_ymd_opt(2026, 3, 1).unwrap());
        assert!(changed.is_empty());
    }

    #[test]
    fn advancing_twice_on_the_same_date_advances_again_while_due() {
        let mut registry = TransferRegistry::new();
        let mut draft = validated(&own_account_draft());
        draft.frequency = RecurrencePeriod::Daily;
        draft.start_date = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
        let id = registry.add(draft, created_at(0)).id;

        let as_of = NaiveDate::from_ymd_opt(2026, 1, 6).unwrap();
        assert_eq!(registry.advance_due(as_of).len(), 1);
        assert_eq!(registry.advance_due(as_of).len(), 1);
        // Two single-period steps: Jan 5 -> Jan 6 -> Jan 7, now beyond as_of.
        assert_eq!(
            registry.get(id).unwrap().next_occurrence,
            NaiveDate::from_ymd_opt(2026, 1, 7).unwrap()
        );
        assert!(registry.advance_due(as_of).is_empty());
    }

    #[test]
    fn restore_keeps_valid_records_and_skips_broken_ones() {
        let mut registry = TransferRegistry::new();
        let mut seeded = {
            let mut registry = TransferRegistry::new();
            registry.add(validated(&own_account_draft()), created_at(0))
        };
        seeded.id = 7;
        seeded.next_occurrence = seeded.start_date + chrono::Duration::days(30);

        assert!(registry.restore(seeded.clone()));
        assert_eq!(registry.get(7).unwrap().next_occurrence, seeded.next_occurrence);

        let mut broken = seeded;
        broken.id = 8;
        broken.next_occurrence = broken.start_date.pred_opt().unwrap();
        assert!(!registry.restore(broken));
        assert!(registry.get(8).is_none());

        // New ids continue above the restored one.
        let fresh = registry.add(validated(&own_account_draft()), created_at(1));
        assert_eq!(fresh.id, 8);
    }
}
