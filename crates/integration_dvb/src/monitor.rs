//! Stop monitor (`/dm`)
//!
//! Real-time departures or arrivals at a single stop.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::http::RequestDescriptor;
use crate::models::{Diva, Platform, Status, parse_timestamp};
use crate::query::{QueryBuilder, QueryPairs};

/// Path of the stop monitor endpoint
pub const MONITOR_PATH: &str = "/dm";

/// Parameters for [`DvbApi::monitor_stop`](crate::DvbApi::monitor_stop)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MonitorStopParams {
    /// Stop to monitor (required), see the point finder for IDs
    pub stop_id: String,
    /// Response format
    pub format: Option<String>,
    /// Reference time, defaults to now on the server
    pub time: Option<String>,
    /// Show arrivals instead of departures
    pub is_arrival: Option<bool>,
    /// Maximum number of results
    pub limit: Option<u32>,
    /// Include short-term changes such as delays and cancellations
    pub short_term_changes: Option<bool>,
    /// Only use data from the Mentz system
    pub mentz_only: Option<bool>,
}

impl MonitorStopParams {
    /// Monitor the stop with the given ID
    #[must_use]
    pub fn new(stop_id: impl Into<String>) -> Self {
        Self {
            stop_id: stop_id.into(),
            ..Default::default()
        }
    }

    /// Set the response format
    #[must_use]
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    /// Set the reference time
    #[must_use]
    pub fn with_time(mut self, time: impl Into<String>) -> Self {
        self.time = Some(time.into());
        self
    }

    /// Ask for arrivals (`true`) or departures (`false`)
    #[must_use]
    pub fn with_arrival(mut self, is_arrival: bool) -> Self {
        self.is_arrival = Some(is_arrival);
        self
    }

    /// Limit the number of results
    #[must_use]
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Include or exclude short-term changes
    #[must_use]
    pub fn with_short_term_changes(mut self, enabled: bool) -> Self {
        self.short_term_changes = Some(enabled);
        self
    }

    /// Restrict to Mentz data
    #[must_use]
    pub fn with_mentz_only(mut self, enabled: bool) -> Self {
        self.mentz_only = Some(enabled);
        self
    }

    /// Encode as query parameters
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if `stop_id` is empty.
    pub fn to_query(&self) -> Result<QueryPairs, ValidationError> {
        Ok(QueryBuilder::new()
            .required("stopid", &self.stop_id)?
            .optional_str("format", self.format.as_deref())
            .optional_str("time", self.time.as_deref())
            .optional_bool("isarrival", self.is_arrival)
            .optional_positive("limit", self.limit)
            .optional_bool("shorttermchanges", self.short_term_changes)
            .optional_bool("mentzonly", self.mentz_only)
            .build())
    }

    pub(crate) fn to_request(&self) -> Result<RequestDescriptor, ValidationError> {
        Ok(RequestDescriptor::get(MONITOR_PATH).with_query(self.to_query()?))
    }
}

/// Response of the stop monitor
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct MonitorStopResponse {
    /// Name of the monitored stop
    #[serde(deserialize_with = "crate::models::null_default")]
    pub name: String,
    /// API status
    #[serde(deserialize_with = "crate::models::null_default")]
    pub status: Status,
    /// City or area of the stop
    #[serde(deserialize_with = "crate::models::null_default")]
    pub place: String,
    /// When the data should be refreshed (advisory)
    #[serde(deserialize_with = "crate::models::null_default")]
    pub expiration_time: String,
    /// Upcoming departures or arrivals
    #[serde(deserialize_with = "crate::models::null_default")]
    pub departures: Vec<Departure>,
}

impl MonitorStopResponse {
    /// Parsed [`expiration_time`](Self::expiration_time)
    #[must_use]
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.expiration_time)
    }
}

/// A single departure or arrival
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Departure {
    /// Departure identifier
    #[serde(deserialize_with = "crate::models::null_default")]
    pub id: String,
    /// DVB line identifier
    #[serde(deserialize_with = "crate::models::null_default")]
    pub dl_id: String,
    /// Line name, e.g. `"11"` or `"S1"`
    #[serde(deserialize_with = "crate::models::null_default")]
    pub line_name: String,
    /// Destination
    #[serde(deserialize_with = "crate::models::null_default")]
    pub direction: String,
    /// Platform the vehicle leaves from
    #[serde(deserialize_with = "crate::models::null_default")]
    pub platform: Platform,
    /// Mode of transport, e.g. `"Tram"`
    #[serde(deserialize_with = "crate::models::null_default")]
    pub mot: String,
    /// Expected time including delay
    #[serde(deserialize_with = "crate::models::null_default")]
    pub real_time: String,
    /// Planned time
    #[serde(deserialize_with = "crate::models::null_default")]
    pub scheduled_time: String,
    /// e.g. `"InTime"`, `"Delayed"`, `"Cancelled"`
    #[serde(deserialize_with = "crate::models::null_default")]
    pub state: String,
    /// Route change identifiers
    #[serde(deserialize_with = "crate::models::null_default")]
    pub route_changes: Vec<String>,
    /// Cross-network line identifier
    #[serde(deserialize_with = "crate::models::null_default")]
    pub diva: Diva,
    /// Reasons for a cancellation
    #[serde(deserialize_with = "crate::models::null_default")]
    pub cancel_reasons: Vec<String>,
    /// Expected load, e.g. `"ManySeats"`
    #[serde(deserialize_with = "crate::models::null_default")]
    pub occupancy: String,
}

impl Departure {
    /// Parsed [`real_time`](Self::real_time)
    #[must_use]
    pub fn real_time_at(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.real_time)
    }

    /// Parsed [`scheduled_time`](Self::scheduled_time)
    #[must_use]
    pub fn scheduled_time_at(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.scheduled_time)
    }

    /// Delay in whole minutes, negative if early
    ///
    /// `None` if either time is missing or unparsable.
    #[must_use]
    pub fn delay_minutes(&self) -> Option<i64> {
        let real = self.real_time_at()?;
        let scheduled = self.scheduled_time_at()?;
        Some((real - scheduled).num_minutes())
    }
}
