//! Library layer for canholidays: the holiday acquisition pipeline.
//!
//! Turns free-text year input and a province selection into a debounced,
//! race-free, province-filtered list of Canadian public holidays, fetched from
//! the Nager.Date API through the `nager_date_api` crate.

pub mod config;
pub mod controller;
pub mod debounce;
pub mod error;
pub mod filter;
pub mod province;
pub mod source;
pub mod state;
pub mod view;

pub use nager_date_api;
pub use nager_date_api::types;

pub use config::Config;
pub use controller::{AcquisitionController, Command, ControllerHandle};
pub use debounce::Debouncer;
pub use error::{ConfigError, ControllerClosed, FetchError};
pub use province::{Province, PROVINCES};
pub use source::{HolidaySource, NagerHolidaySource};
pub use state::{AcquisitionSnapshot, AcquisitionState, FetchFailure, Phase};
pub use types::Holiday;
pub use view::{HolidayView, ViewModel, ViewPhase};
