use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Upcoming occurrence dates for one scheduled transfer, soonest first.
/// The first entry is the transfer's current next occurrence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct OccurrencePreview {
    pub transfer_id: i32,
    pub dates: Vec<NaiveDate>,
}
