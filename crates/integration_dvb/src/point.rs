//! Point finder (`/tr/pointfinder`)
//!
//! Search for stops, addresses and places. The API answers with
//! pipe-separated strings; [`Point::parse`] splits them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::http::RequestDescriptor;
use crate::models::{Status, parse_timestamp};
use crate::query::{QueryBuilder, QueryPairs};

/// Path of the point finder endpoint
pub const POINT_PATH: &str = "/tr/pointfinder";

/// Parameters for [`DvbApi::get_point`](crate::DvbApi::get_point)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PointParams {
    /// Search term (required), e.g. `"Hauptbahnhof"`
    pub query: String,
    /// Response format
    pub format: Option<String>,
    /// Only return stops
    pub stops_only: Option<bool>,
    /// Only return stops assigned to lines
    pub assigned_stops: Option<bool>,
    /// Maximum number of results
    pub limit: Option<u32>,
    /// Only return DVB stops
    pub dvb: Option<bool>,
}

impl PointParams {
    /// Search for `query`
    #[must_use]
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Default::default()
        }
    }

    /// Set the response format
    #[must_use]
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    /// Restrict results to stops
    #[must_use]
    pub fn with_stops_only(mut self, enabled: bool) -> Self {
        self.stops_only = Some(enabled);
        self
    }

    /// Restrict results to stops assigned to lines
    #[must_use]
    pub fn with_assigned_stops(mut self, enabled: bool) -> Self {
        self.assigned_stops = Some(enabled);
        self
    }

    /// Limit the number of results
    #[must_use]
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Restrict results to DVB stops
    #[must_use]
    pub fn with_dvb(mut self, enabled: bool) -> Self {
        self.dvb = Some(enabled);
        self
    }

    /// Encode as query parameters
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if `query` is empty.
    pub fn to_query(&self) -> Result<QueryPairs, ValidationError> {
        Ok(QueryBuilder::new()
            .required("query", &self.query)?
            .optional_str("format", self.format.as_deref())
            .optional_positive("limit", self.limit)
            .optional_bool("stopsOnly", self.stops_only)
            .optional_bool("assignedStops", self.assigned_stops)
            .optional_bool("dvb", self.dvb)
            .build())
    }

    pub(crate) fn to_request(&self) -> Result<RequestDescriptor, ValidationError> {
        Ok(RequestDescriptor::get(POINT_PATH).with_query(self.to_query()?))
    }
}

/// Response of the point finder
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct PointResponse {
    /// Search outcome, e.g. `"Identified"` or `"List"`
    #[serde(deserialize_with = "crate::models::null_default")]
    pub point_status: String,
    /// API status
    #[serde(deserialize_with = "crate::models::null_default")]
    pub status: Status,
    /// Raw pipe-separated point records
    #[serde(deserialize_with = "crate::models::null_default")]
    pub points: Vec<String>,
    /// When the data should be refreshed (advisory)
    #[serde(deserialize_with = "crate::models::null_default")]
    pub expiration_time: String,
}

impl PointResponse {
    /// Parsed [`expiration_time`](Self::expiration_time)
    #[must_use]
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.expiration_time)
    }

    /// All point records that could be parsed
    #[must_use]
    pub fn parsed_points(&self) -> Vec<Point> {
        self.points.iter().filter_map(|raw| Point::parse(raw)).collect()
    }
}

/// A point record from the point finder
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    /// Stop or place identifier
    pub id: String,
    /// Record kind; empty for stops
    pub kind: String,
    /// City, may be empty for stops in Dresden
    pub place: String,
    /// Display name
    pub name: String,
    /// Right (easting) coordinate, if present
    pub right: Option<i64>,
    /// Up (northing) coordinate, if present
    pub up: Option<i64>,
}

impl Point {
    /// Split a raw `id|kind|place|name|right|up|...` record
    ///
    /// Returns `None` for records with fewer than four columns.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let mut columns = raw.split('|');
        let id = columns.next()?;
        let kind = columns.next()?;
        let place = columns.next()?;
        let name = columns.next()?;
        let right = columns.next().and_then(|v| v.parse().ok());
        let up = columns.next().and_then(|v| v.parse().ok());

        Some(Self {
            id: id.to_string(),
            kind: kind.to_string(),
            place: place.to_string(),
            name: name.to_string(),
            right,
            up,
        })
    }

    /// Returns true if the record is a stop
    #[must_use]
    pub fn is_stop(&self) -> bool {
        self.kind.is_empty()
    }
}
