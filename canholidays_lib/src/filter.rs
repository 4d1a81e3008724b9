//! Province projection of a full-year holiday list.
//!
//! Filtering and ordering are separate steps: [`filter`] keeps input order,
//! [`sort_by_date`] orders the result. [`project`] does both and is what the
//! controller and the one-shot listing use.

use crate::province::Province;
use crate::types::Holiday;

/// Holidays that are nationwide or list `province` among their subdivisions,
/// in input order.
pub fn filter(all: &[Holiday], province: &Province) -> Vec<Holiday> {
    all.iter()
        .filter(|h| h.applies_to(province.code))
        .cloned()
        .collect()
}

/// Stable ascending sort by date; holidays on the same day keep their order.
pub fn sort_by_date(holidays: &mut [Holiday]) {
    holidays.sort_by_key(|h| h.date);
}

/// [`filter`] followed by [`sort_by_date`].
pub fn project(all: &[Holiday], province: &Province) -> Vec<Holiday> {
    let mut visible = filter(all, province);
    sort_by_date(&mut visible);
    visible
}
