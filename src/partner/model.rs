use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Sentinel written in place of any absent partner field.
pub const PLACEHOLDER: &str = "****";

/// One row of the `empresas` table, as returned by the store.
#[derive(Debug, Clone, Default, sqlx::FromRow)]
pub struct RawPartnerRow {
    pub razaosocial: Option<String>,
    pub cgc: Option<String>,
    pub endereco: Option<String>,
    pub numero: Option<String>,
    pub bairro: Option<String>,
    pub cidade: Option<String>,
    pub uf: Option<String>,
    pub cep: Option<String>,
    pub datacancelamento: Option<NaiveDate>,
    pub tipo: Option<String>,
}

/// Granting partner, normalized and ready for templating.
///
/// Every field is non-empty: absent source values are replaced with
/// [`PLACEHOLDER`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartnerRecord {
    pub name: String,
    pub tax_id: String,
    pub street: String,
    pub number: String,
    pub neighborhood: String,
    pub postal_code: String,
    pub city: String,
    pub state: String,
}

/// Replace an absent or empty value with [`PLACEHOLDER`].
pub fn normalize_or_placeholder(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => PLACEHOLDER.to_string(),
    }
}

impl PartnerRecord {
    /// Project a raw row onto the eight template fields.
    pub fn from_row(row: &RawPartnerRow) -> Self {
        Self {
            name: normalize_or_placeholder(row.razaosocial.as_deref()),
            tax_id: normalize_or_placeholder(row.cgc.as_deref()),
            street: normalize_or_placeholder(row.endereco.as_deref()),
            number: normalize_or_placeholder(row.numero.as_deref()),
            neighborhood: normalize_or_placeholder(row.bairro.as_deref()),
            postal_code: normalize_or_placeholder(row.cep.as_deref()),
            city: normalize_or_placeholder(row.cidade.as_deref()),
            state: normalize_or_placeholder(row.uf.as_deref()),
        }
    }
}
