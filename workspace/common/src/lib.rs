//! Common transport-layer value types shared between the backend handlers
//! and any API consumer. The shapes here appear verbatim in HTTP payloads,
//! so consumers can deserialize responses without duplicating them.

mod preview;
mod validation;

pub use preview::OccurrencePreview;
pub use validation::{TransferField, ValidationErrors};
