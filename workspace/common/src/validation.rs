use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// The draft fields a validation failure can point at.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum TransferField {
    Origin,
    Destination,
    Method,
    Amount,
    StartDate,
    Frequency,
}

impl fmt::Display for TransferField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TransferField::Origin => "origin",
            TransferField::Destination => "destination",
            TransferField::Method => "method",
            TransferField::Amount => "amount",
            TransferField::StartDate => "start_date",
            TransferField::Frequency => "frequency",
        };
        write!(f, "{name}")
    }
}

/// Field-keyed set of business-rule violations for a transfer draft.
///
/// Every rule is evaluated before this is returned, so the caller sees all
/// failing fields in one round trip and can render field-level feedback.
/// One reason per field; the first recorded reason wins so the most
/// fundamental check speaks for a field.
///
/// Serializes as a flat `field -> reason` object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct ValidationErrors {
    #[schema(value_type = Object)]
    errors: BTreeMap<TransferField, String>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a violation unless the field already carries one.
    pub fn record(&mut self, field: TransferField, reason: impl Into<String>) {
        self.errors.entry(field).or_insert_with(|| reason.into());
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn reason(&self, field: TransferField) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    /// The violated fields, in their stable serialization order.
    pub fn fields(&self) -> impl Iterator<Item = TransferField> + '_ {
        self.errors.keys().copied()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, reason) in &self.errors {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{field}: {reason}")?;
            first = false;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_recorded_reason_wins() {
        let mut errors = ValidationErrors::new();
        errors.record(TransferField::Amount, "amount must be greater than zero");
        errors.record(TransferField::Amount, "amount exceeds the available balance");

        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors.reason(TransferField::Amount),
            Some("amount must be greater than zero")
        );
    }

    #[test]
    fn serializes_as_flat_field_map() {
        let mut errors = ValidationErrors::new();
        errors.record(TransferField::Destination, "destination account does not exist");
        errors.record(TransferField::StartDate, "start date is required");

        let json = serde_json::to_value(&errors).expect("errors should serialize");
        assert_eq!(json["destination"], "destination account does not exist");
        assert_eq!(json["start_date"], "start date is required");
    }

    #[test]
    fn display_joins_fields_in_order() {
        let mut errors = ValidationErrors::new();
        errors.record(TransferField::Frequency, "frequency is unrecognized");
        errors.record(TransferField::Origin, "origin account does not exist");

        assert_eq!(
            errors.to_string(),
            "origin: origin account does not exist; frequency: frequency is unrecognized"
        );
    }
}
