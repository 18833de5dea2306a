//! Partner records: raw store rows, the normalized projection, and the
//! eligibility selector.

pub mod model;
pub mod selector;

pub use model::{normalize_or_placeholder, PartnerRecord, RawPartnerRow, PLACEHOLDER};
pub use selector::{is_eligible, select_eligible_partners, select_from_rows};
