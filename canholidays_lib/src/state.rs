//! Acquisition state and its transitions.
//!
//! Every transition is a synchronous method returning what happened, so the
//! async controller only decides *when* to call them. Work that completes
//! later (fetches, delayed province recomputation) is tagged with a
//! [`Generation`]; a completion whose tag is no longer the in-flight one is
//! reported as [`Outcome::Stale`] and leaves the state untouched.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::error::FetchError;
use crate::filter;
use crate::province::{self, Province};
use crate::types::Holiday;

/// Monotonic tag attached to each fetch or recomputation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What the presentation layer learns about a failed fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FetchFailure {
    /// The API rejected the year.
    InvalidYear { year: String },
    /// The request did not complete or its body could not be read.
    RequestFailed { year: String },
}

impl FetchFailure {
    pub fn year(&self) -> &str {
        match self {
            Self::InvalidYear { year } | Self::RequestFailed { year } => year,
        }
    }
}

impl From<&FetchError> for FetchFailure {
    fn from(err: &FetchError) -> Self {
        match err {
            FetchError::InvalidYear { year, .. } => Self::InvalidYear { year: year.clone() },
            FetchError::Network { year, .. } => Self::RequestFailed { year: year.clone() },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Nothing has been requested yet.
    Idle,
    Loading,
    Ready,
    Error(FetchFailure),
}

impl Phase {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}

/// Result of applying a tagged completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    /// The completion was superseded and ignored.
    Stale,
}

/// Result of a province selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProvinceChange {
    /// The code matched no province; nothing changed.
    Unknown,
    /// Already selected; nothing changed.
    Unchanged,
    /// Selection stored. Any needed projection has already happened or will
    /// happen when the in-flight fetch lands.
    Recorded,
    /// Selection stored and the phase is `Loading`; call
    /// [`AcquisitionState::complete_recompute`] with this tag to finish.
    Recompute(Generation),
}

/// The controller's owned state. Only the controller mutates it; everyone
/// else sees [`AcquisitionSnapshot`]s.
#[derive(Debug, Clone)]
pub struct AcquisitionState {
    year: String,
    debounced_year: String,
    full_year: Arc<[Holiday]>,
    visible: Arc<[Holiday]>,
    province: &'static Province,
    phase: Phase,
    version: u64,
    next_generation: u64,
    pending_fetch: Option<Generation>,
    pending_recompute: Option<Generation>,
}

impl AcquisitionState {
    pub fn new(initial_year: impl Into<String>, province: &'static Province) -> Self {
        let year = initial_year.into();
        Self {
            debounced_year: year.clone(),
            year,
            full_year: Arc::from(Vec::new()),
            visible: Arc::from(Vec::new()),
            province,
            phase: Phase::Idle,
            version: 0,
            next_generation: 0,
            pending_fetch: None,
            pending_recompute: None,
        }
    }

    pub fn year(&self) -> &str {
        &self.year
    }

    pub fn debounced_year(&self) -> &str {
        &self.debounced_year
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn province(&self) -> &'static Province {
        self.province
    }

    pub fn full_year(&self) -> &[Holiday] {
        &self.full_year
    }

    pub fn visible(&self) -> &[Holiday] {
        &self.visible
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    fn next_generation(&mut self) -> Generation {
        self.next_generation += 1;
        Generation(self.next_generation)
    }

    fn touch(&mut self) {
        self.version += 1;
    }

    fn reproject(&mut self) {
        self.visible = Arc::from(filter::project(&self.full_year, self.province));
    }

    /// Records raw year text as typed. Fetching waits for the debouncer.
    pub fn set_year_input(&mut self, raw: impl Into<String>) {
        let raw = raw.into();
        if raw != self.year {
            self.year = raw;
            self.touch();
        }
    }

    /// Whether a settled year should trigger a fetch. Re-settling on the year
    /// already shown is a duplicate, unless that fetch failed.
    pub fn should_fetch(&self, settled: &str) -> bool {
        match self.phase {
            Phase::Idle | Phase::Error(_) => true,
            Phase::Loading | Phase::Ready => settled != self.debounced_year,
        }
    }

    /// Enters `Loading` for `year`. The returned tag supersedes every earlier
    /// fetch and any pending province recomputation.
    pub fn begin_fetch(&mut self, year: impl Into<String>) -> Generation {
        let generation = self.next_generation();
        self.debounced_year = year.into();
        self.pending_fetch = Some(generation);
        self.pending_recompute = None;
        self.phase = Phase::Loading;
        self.touch();
        generation
    }

    /// Applies a fetch result if `generation` is still the in-flight fetch.
    ///
    /// On failure the previous datasets are kept; only the phase changes.
    pub fn complete_fetch(
        &mut self,
        generation: Generation,
        result: Result<Vec<Holiday>, FetchError>,
    ) -> Outcome {
        if self.pending_fetch != Some(generation) {
            return Outcome::Stale;
        }
        self.pending_fetch = None;
        match result {
            Ok(holidays) => {
                self.full_year = Arc::from(holidays);
                self.reproject();
                self.phase = Phase::Ready;
            }
            Err(err) => {
                self.phase = Phase::Error(FetchFailure::from(&err));
            }
        }
        self.touch();
        Outcome::Applied
    }

    /// Handles a province code from the selector.
    pub fn select_province(&mut self, code: &str) -> ProvinceChange {
        let Some(selected) = province::by_code(code) else {
            return ProvinceChange::Unknown;
        };
        if selected == self.province {
            return ProvinceChange::Unchanged;
        }
        self.province = selected;
        self.touch();

        if self.pending_fetch.is_some() || self.full_year.is_empty() {
            return ProvinceChange::Recorded;
        }
        if self.phase.is_error() {
            // The error view stays up; keep the projection current underneath it.
            self.pending_recompute = None;
            self.reproject();
            return ProvinceChange::Recorded;
        }

        let generation = self.next_generation();
        self.pending_recompute = Some(generation);
        self.phase = Phase::Loading;
        ProvinceChange::Recompute(generation)
    }

    /// Finishes a province recomputation started by [`select_province`](Self::select_province).
    pub fn complete_recompute(&mut self, generation: Generation) -> Outcome {
        if self.pending_recompute != Some(generation) {
            return Outcome::Stale;
        }
        self.pending_recompute = None;
        self.reproject();
        self.phase = Phase::Ready;
        self.touch();
        Outcome::Applied
    }

    /// Read-only copy for the presentation layer.
    pub fn snapshot(&self) -> AcquisitionSnapshot {
        AcquisitionSnapshot {
            version: self.version,
            year: self.year.clone(),
            debounced_year: self.debounced_year.clone(),
            province: self.province,
            phase: self.phase.clone(),
            holidays: Arc::clone(&self.visible),
            full_year_count: self.full_year.len(),
        }
    }
}

/// Immutable view of [`AcquisitionState`] at one `version`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcquisitionSnapshot {
    pub version: u64,
    pub year: String,
    pub debounced_year: String,
    pub province: &'static Province,
    pub phase: Phase,
    /// Province-filtered, date-ascending holidays.
    pub holidays: Arc<[Holiday]>,
    pub full_year_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ontario() -> &'static Province {
        province::by_code("CA-ON").unwrap()
    }

    fn holiday(name: &str, month: u32, day: u32, counties: Option<&[&str]>) -> Holiday {
        Holiday {
            date: NaiveDate::from_ymd_opt(2025, month, day).unwrap(),
            local_name: name.to_string(),
            name: name.to_string(),
            country_code: "CA".to_string(),
            fixed: false,
            global: counties.is_none(),
            counties: counties.map(|c| c.iter().map(|s| s.to_string()).collect()),
            launch_year: None,
            types: vec!["Public".to_string()],
        }
    }

    fn year_2025() -> Vec<Holiday> {
        vec![
            holiday("Canada Day", 7, 1, None),
            holiday("National Holiday", 6, 24, Some(&["CA-QC"])),
            holiday("Civic Holiday", 8, 4, Some(&["CA-ON"])),
            holiday("New Year's Day", 1, 1, None),
        ]
    }

    fn names(holidays: &[Holiday]) -> Vec<&str> {
        holidays.iter().map(|h| h.name.as_str()).collect()
    }

    fn ready_state() -> AcquisitionState {
        let mut state = AcquisitionState::new("2025", ontario());
        let generation = state.begin_fetch("2025");
        assert_eq!(state.complete_fetch(generation, Ok(year_2025())), Outcome::Applied);
        state
    }

    #[test]
    fn starts_idle() {
        let state = AcquisitionState::new("2025", ontario());
        assert_eq!(state.phase(), &Phase::Idle);
        assert_eq!(state.year(), "2025");
        assert_eq!(state.debounced_year(), "2025");
        assert!(state.visible().is_empty());
        assert!(state.should_fetch("2025"));
    }

    #[test]
    fn successful_fetch_projects_and_sorts() {
        let state = ready_state();
        assert_eq!(state.phase(), &Phase::Ready);
        assert_eq!(state.full_year().len(), 4);
        assert_eq!(
            names(state.visible()),
            vec!["New Year's Day", "Canada Day", "Civic Holiday"]
        );
    }

    #[test]
    fn stale_fetch_is_discarded() {
        let mut state = AcquisitionState::new("2024", ontario());
        let first = state.begin_fetch("2024");
        let second = state.begin_fetch("2025");
        assert!(second > first);

        assert_eq!(state.complete_fetch(second, Ok(year_2025())), Outcome::Applied);
        let version = state.version();

        let late = vec![holiday("Old", 1, 1, None)];
        assert_eq!(state.complete_fetch(first, Ok(late)), Outcome::Stale);
        assert_eq!(state.version(), version);
        assert_eq!(state.debounced_year(), "2025");
        assert_eq!(state.full_year().len(), 4);
    }

    #[test]
    fn failed_fetch_keeps_previous_data() {
        let mut state = ready_state();
        let generation = state.begin_fetch("abcd");
        let err = FetchError::InvalidYear {
            year: "abcd".to_string(),
            status: 400,
        };
        assert_eq!(state.complete_fetch(generation, Err(err)), Outcome::Applied);

        assert_eq!(
            state.phase(),
            &Phase::Error(FetchFailure::InvalidYear {
                year: "abcd".to_string()
            })
        );
        assert_eq!(state.full_year().len(), 4);
        assert_eq!(state.visible().len(), 3);
    }

    #[test]
    fn network_failure_maps_to_request_failed() {
        let mut state = AcquisitionState::new("2025", ontario());
        let generation = state.begin_fetch("2025");
        let err = FetchError::Network {
            year: "2025".to_string(),
            reason: "timeout".to_string(),
        };
        state.complete_fetch(generation, Err(err));
        assert_eq!(
            state.phase(),
            &Phase::Error(FetchFailure::RequestFailed {
                year: "2025".to_string()
            })
        );
        // A failed year may be retried by settling on it again.
        assert!(state.should_fetch("2025"));
    }

    #[test]
    fn duplicate_settle_is_ignored() {
        let state = ready_state();
        assert!(!state.should_fetch("2025"));
        assert!(state.should_fetch("2026"));
    }

    #[test]
    fn province_change_recomputes_without_fetch() {
        let mut state = ready_state();
        let change = state.select_province("CA-QC");
        let ProvinceChange::Recompute(generation) = change else {
            panic!("expected recompute, got {:?}", change);
        };
        assert_eq!(state.phase(), &Phase::Loading);
        assert_eq!(state.pending_fetch, None);

        assert_eq!(state.complete_recompute(generation), Outcome::Applied);
        assert_eq!(state.phase(), &Phase::Ready);
        assert_eq!(
            names(state.visible()),
            vec!["New Year's Day", "National Holiday", "Canada Day"]
        );
    }

    #[test]
    fn unknown_province_code_is_a_no_op() {
        let mut state = ready_state();
        let before = state.snapshot();
        assert_eq!(state.select_province("CA-XX"), ProvinceChange::Unknown);
        assert_eq!(state.select_province("Ontario"), ProvinceChange::Unknown);
        assert_eq!(state.snapshot(), before);
    }

    #[test]
    fn reselecting_current_province_is_a_no_op() {
        let mut state = ready_state();
        let version = state.version();
        assert_eq!(state.select_province("CA-ON"), ProvinceChange::Unchanged);
        assert_eq!(state.version(), version);
    }

    #[test]
    fn superseded_recompute_is_stale() {
        let mut state = ready_state();
        let ProvinceChange::Recompute(first) = state.select_province("CA-QC") else {
            panic!("expected recompute");
        };
        let ProvinceChange::Recompute(second) = state.select_province("CA-BC") else {
            panic!("expected recompute");
        };
        assert_eq!(state.complete_recompute(first), Outcome::Stale);
        assert_eq!(state.phase(), &Phase::Loading);
        assert_eq!(state.complete_recompute(second), Outcome::Applied);
        assert_eq!(state.province().code, "CA-BC");
        assert_eq!(names(state.visible()), vec!["New Year's Day", "Canada Day"]);
    }

    #[test]
    fn new_fetch_cancels_pending_recompute() {
        let mut state = ready_state();
        let ProvinceChange::Recompute(recompute) = state.select_province("CA-QC") else {
            panic!("expected recompute");
        };
        let fetch = state.begin_fetch("2026");
        assert_eq!(state.complete_recompute(recompute), Outcome::Stale);
        assert_eq!(state.phase(), &Phase::Loading);

        state.complete_fetch(fetch, Ok(year_2025()));
        // The fetch projected with the newer selection.
        assert_eq!(
            names(state.visible()),
            vec!["New Year's Day", "National Holiday", "Canada Day"]
        );
    }

    #[test]
    fn province_change_during_fetch_is_applied_on_arrival() {
        let mut state = AcquisitionState::new("2025", ontario());
        let fetch = state.begin_fetch("2025");
        assert_eq!(state.select_province("CA-QC"), ProvinceChange::Recorded);
        state.complete_fetch(fetch, Ok(year_2025()));
        assert_eq!(state.province().code, "CA-QC");
        assert!(names(state.visible()).contains(&"National Holiday"));
    }

    #[test]
    fn province_change_in_error_stays_in_error() {
        let mut state = ready_state();
        let generation = state.begin_fetch("abcd");
        state.complete_fetch(
            generation,
            Err(FetchError::InvalidYear {
                year: "abcd".to_string(),
                status: 404,
            }),
        );
        assert_eq!(state.select_province("CA-QC"), ProvinceChange::Recorded);
        assert!(state.phase().is_error());
        assert!(names(state.visible()).contains(&"National Holiday"));
    }

    #[test]
    fn set_year_input_tracks_raw_text_only() {
        let mut state = ready_state();
        let version = state.version();
        state.set_year_input("20");
        assert_eq!(state.year(), "20");
        assert_eq!(state.debounced_year(), "2025");
        assert_eq!(state.version(), version + 1);
        state.set_year_input("20");
        assert_eq!(state.version(), version + 1);
    }
}
