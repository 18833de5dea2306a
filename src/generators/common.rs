//! Common utilities for document generation.
//!
//! Shared helpers for date formatting, Typst escaping, and output naming.

use chrono::{Datelike, Local, NaiveDate};
use lazy_static::lazy_static;
use regex::Regex;
use std::path::Path;

lazy_static! {
    static ref FILENAME_RESERVED: Regex = Regex::new(r#"[\\/:"*?<>|]"#).unwrap();
}

const MONTHS: [&str; 12] = [
    "janeiro",
    "fevereiro",
    "março",
    "abril",
    "maio",
    "junho",
    "julho",
    "agosto",
    "setembro",
    "outubro",
    "novembro",
    "dezembro",
];

/// Format a date as a Brazilian Portuguese long date (e.g., "19 de outubro de 2026").
///
/// The first day of the month is written as an ordinal ("1º de março de 2024").
pub fn format_portuguese_date(date: NaiveDate) -> String {
    let month = MONTHS[(date.month0() as usize).min(MONTHS.len() - 1)];
    let day = match date.day() {
        1 => "1º".to_string(),
        d => d.to_string(),
    };
    format!("{} de {} de {}", day, month, date.year())
}

/// Format the current local date as a Portuguese long date.
pub fn format_portuguese_today() -> String {
    format_portuguese_date(Local::now().date_naive())
}

/// Escape special characters for Typst strings.
pub fn escape_typst_string(value: &str) -> String {
    value
        .replace('\\', r"\\")
        .replace('"', r#"\""#)
        .replace('\n', r"\n")
        .replace('\r', r"\r")
}

/// Replace every filename-reserved character (`\ / : " * ? < > |`) with a hyphen.
///
/// The rest of the name is kept verbatim, so applying this twice gives the
/// same result as applying it once.
pub fn sanitize_file_stem(name: &str) -> String {
    FILENAME_RESERVED.replace_all(name, "-").into_owned()
}

/// Get the bundled assets directory path.
pub fn get_assets_dir() -> &'static Path {
    Path::new(concat!(env!("CARGO_MANIFEST_DIR"), "/assets"))
}
