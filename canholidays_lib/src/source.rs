//! Where full-year holiday lists come from.

use std::future::Future;
use std::time::Duration;

use nager_date_api::Client;

use crate::error::FetchError;
use crate::types::Holiday;

/// Country code every request is made for.
pub const COUNTRY_CODE: &str = "CA";

/// Fetches the unfiltered, unsorted holiday list for one year.
///
/// Implementations make exactly one request per call and keep no cache;
/// duplicate triggers are filtered out by the caller.
pub trait HolidaySource: Send + Sync + 'static {
    fn fetch_year(
        &self,
        year: &str,
    ) -> impl Future<Output = Result<Vec<Holiday>, FetchError>> + Send;
}

/// [`HolidaySource`] backed by the Nager.Date API.
#[derive(Clone, Debug, Default)]
pub struct NagerHolidaySource {
    inner: Client,
}

impl NagerHolidaySource {
    /// Creates a source using the production API URL.
    pub fn new() -> Self {
        Self {
            inner: Client::new(),
        }
    }

    /// Creates a source with a custom base URL. Used for testing.
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            inner: Client::with_base_url(base_url),
        }
    }

    pub fn with_timeout(self, timeout: Duration) -> Self {
        Self {
            inner: self.inner.with_timeout(timeout),
        }
    }
}

impl HolidaySource for NagerHolidaySource {
    async fn fetch_year(&self, year: &str) -> Result<Vec<Holiday>, FetchError> {
        match self.inner.get_public_holidays(year, COUNTRY_CODE).await {
            Ok(holidays) => {
                tracing::debug!("Fetched {} holidays for {}", holidays.len(), year);
                Ok(holidays)
            }
            Err(nager_date_api::Error::HttpStatus { status, .. }) => {
                tracing::warn!("Holiday API rejected year '{}' (HTTP {})", year, status);
                Err(FetchError::InvalidYear {
                    year: year.to_string(),
                    status,
                })
            }
            Err(e) => {
                tracing::error!("Fetching holidays for '{}' failed: {}", year, e);
                Err(FetchError::Network {
                    year: year.to_string(),
                    reason: e.to_string(),
                })
            }
        }
    }
}
