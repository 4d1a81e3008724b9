use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A public holiday as returned by `/api/v3/PublicHolidays/{year}/{countryCode}`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Holiday {
    pub date: NaiveDate,

    pub local_name: String,

    pub name: String,

    pub country_code: String,

    pub fixed: bool,

    pub global: bool,

    /// ISO-3166-2 subdivision codes the holiday is limited to.
    /// `None` means the holiday is observed nationwide.
    pub counties: Option<Vec<String>>,

    pub launch_year: Option<i32>,

    #[serde(default)]
    pub types: Vec<String>,
}

impl Holiday {
    /// True when the holiday is nationwide or lists `code` among its subdivisions.
    pub fn applies_to(&self, code: &str) -> bool {
        match &self.counties {
            None => true,
            Some(counties) => counties.iter().any(|c| c == code),
        }
    }
}
