//! Eligibility filtering over raw partner rows.

use crate::db::{PartnerStore, QueryError};

use super::model::{PartnerRecord, RawPartnerRow};

/// Categories, compared lower-cased, that qualify a partner for a document.
pub const ELIGIBLE_CATEGORIES: [&str; 2] = ["cliente", "clipy"];

/// A row is eligible when it has no cancellation date and its category is
/// one of [`ELIGIBLE_CATEGORIES`].
pub fn is_eligible(row: &RawPartnerRow) -> bool {
    if row.datacancelamento.is_some() {
        return false;
    }

    match row.tipo.as_deref() {
        Some(tipo) => {
            let tipo = tipo.to_lowercase();
            ELIGIBLE_CATEGORIES.contains(&tipo.as_str())
        }
        None => false,
    }
}

/// Filter and project rows, keeping store order.
pub fn select_from_rows(rows: &[RawPartnerRow]) -> Vec<PartnerRecord> {
    rows.iter()
        .filter(|row| {
            let eligible = is_eligible(row);
            if !eligible {
                log::debug!(
                    "Skipping partner {:?}: tipo={:?}, cancelled={}",
                    row.razaosocial,
                    row.tipo,
                    row.datacancelamento.is_some()
                );
            }
            eligible
        })
        .map(PartnerRecord::from_row)
        .collect()
}

/// Query the store and return every eligible partner.
///
/// A store failure fails the whole selection; no partial result is returned.
pub async fn select_eligible_partners(
    store: &dyn PartnerStore,
) -> Result<Vec<PartnerRecord>, QueryError> {
    let rows = store.fetch_partner_rows().await?;
    let partners = select_from_rows(&rows);
    log::info!(
        "Selected {} eligible partners out of {} rows",
        partners.len(),
        rows.len()
    );
    Ok(partners)
}
