//! View model handed to whatever renders holidays.

use chrono::NaiveDate;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::Serialize;

use crate::province::Province;
use crate::state::{AcquisitionSnapshot, FetchFailure, Phase};
use crate::types::Holiday;

const SEARCH_BASE: &str = "https://www.google.com/search?q=";

/// Characters left as-is by JavaScript's `encodeURIComponent`.
const QUERY_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewPhase {
    Loading,
    Error,
    Ready,
}

/// One rendered holiday row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HolidayView {
    pub date: NaiveDate,
    /// Zero-padded day and short month, e.g. `"01 Jul"`.
    pub display_date: String,
    pub title: String,
    pub local_name: String,
    /// URL-encoded `"{name} holiday Canada"`.
    pub search_query: String,
    pub search_url: String,
}

impl From<&Holiday> for HolidayView {
    fn from(h: &Holiday) -> Self {
        let search_query = encode_query(&format!("{} holiday Canada", h.name));
        Self {
            date: h.date,
            display_date: display_date(h.date),
            title: h.name.clone(),
            local_name: h.local_name.clone(),
            search_url: format!("{}{}", SEARCH_BASE, search_query),
            search_query,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewModel {
    pub phase: ViewPhase,
    /// The year as typed.
    pub year: String,
    /// Province label.
    pub province: String,
    pub heading: String,
    /// Set only in the error phase.
    pub message: Option<String>,
    /// Empty unless the phase is `Ready`.
    pub holidays: Vec<HolidayView>,
}

impl ViewModel {
    /// A ready view over already projected holidays.
    pub fn ready(year: &str, province: &Province, holidays: &[Holiday]) -> Self {
        Self {
            phase: ViewPhase::Ready,
            year: year.to_string(),
            province: province.label.to_string(),
            heading: heading(year, province),
            message: None,
            holidays: holidays.iter().map(HolidayView::from).collect(),
        }
    }

    /// An error view for a failed fetch.
    pub fn failed(year: &str, province: &Province, failure: &FetchFailure) -> Self {
        Self {
            phase: ViewPhase::Error,
            year: year.to_string(),
            province: province.label.to_string(),
            heading: heading(year, province),
            message: Some(error_message(failure)),
            holidays: Vec::new(),
        }
    }
}

impl From<&AcquisitionSnapshot> for ViewModel {
    fn from(snapshot: &AcquisitionSnapshot) -> Self {
        let year = snapshot.year.as_str();
        match &snapshot.phase {
            Phase::Ready => ViewModel::ready(year, snapshot.province, &snapshot.holidays),
            Phase::Error(failure) => ViewModel::failed(year, snapshot.province, failure),
            Phase::Idle | Phase::Loading => Self {
                phase: ViewPhase::Loading,
                year: year.to_string(),
                province: snapshot.province.label.to_string(),
                heading: heading(year, snapshot.province),
                message: None,
                holidays: Vec::new(),
            },
        }
    }
}

pub fn error_message(failure: &FetchFailure) -> String {
    match failure {
        FetchFailure::InvalidYear { year } => format!(
            "The year: {} is not supported. Please enter a valid year and try again.",
            year
        ),
        FetchFailure::RequestFailed { year } => format!(
            "Could not load holidays for {}. The request failed; check your connection and try again.",
            year
        ),
    }
}

fn heading(year: &str, province: &Province) -> String {
    format!(
        "Public Holidays in {} for Calendar year {}",
        province.label, year
    )
}

pub fn display_date(date: NaiveDate) -> String {
    date.format("%d %b").to_string()
}

fn encode_query(text: &str) -> String {
    utf8_percent_encode(text, QUERY_COMPONENT).to_string()
}
