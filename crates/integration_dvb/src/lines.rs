//! Line lookup (`/stt/lines`)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::http::RequestDescriptor;
use crate::models::{Diva, Status, parse_timestamp};
use crate::query::{QueryBuilder, QueryPairs};

/// Path of the line lookup endpoint
pub const LINES_PATH: &str = "/stt/lines";

/// Parameters for [`DvbApi::get_lines`](crate::DvbApi::get_lines)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinesParams {
    /// Stop whose lines to list (required)
    pub stop_id: String,
    /// Response format
    pub format: Option<String>,
}

impl LinesParams {
    /// List the lines serving the stop with the given ID
    #[must_use]
    pub fn new(stop_id: impl Into<String>) -> Self {
        Self {
            stop_id: stop_id.into(),
            format: None,
        }
    }

    /// Set the response format
    #[must_use]
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
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
            .build())
    }

    pub(crate) fn to_request(&self) -> Result<RequestDescriptor, ValidationError> {
        Ok(RequestDescriptor::get(LINES_PATH).with_query(self.to_query()?))
    }
}

/// Response of the line lookup
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct LinesResponse {
    /// Lines serving the stop
    #[serde(deserialize_with = "crate::models::null_default")]
    pub lines: Vec<Line>,
    /// API status
    #[serde(deserialize_with = "crate::models::null_default")]
    pub status: Status,
    /// When the data should be refreshed (advisory)
    #[serde(deserialize_with = "crate::models::null_default")]
    pub expiration_time: String,
}

impl LinesResponse {
    /// Parsed [`expiration_time`](Self::expiration_time)
    #[must_use]
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.expiration_time)
    }
}

/// A line serving a stop
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Line {
    /// Line name
    #[serde(deserialize_with = "crate::models::null_default")]
    pub name: String,
    /// Mode of transport
    #[serde(deserialize_with = "crate::models::null_default")]
    pub mot: String,
    /// Change identifiers
    #[serde(
        skip_serializing_if = "Vec::is_empty",
        deserialize_with = "crate::models::null_default"
    )]
    pub changes: Vec<String>,
    /// Directions served from this stop
    #[serde(deserialize_with = "crate::models::null_default")]
    pub directions: Vec<Direction>,
    /// Cross-network line identifier
    #[serde(deserialize_with = "crate::models::null_default")]
    pub diva: Diva,
}

/// One direction of a line
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Direction {
    /// Destination name
    #[serde(deserialize_with = "crate::models::null_default")]
    pub name: String,
    /// Timetable variants
    #[serde(deserialize_with = "crate::models::null_default")]
    pub time_tables: Vec<TimeTable>,
}

/// A timetable variant, e.g. weekdays or Saturdays
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct TimeTable {
    /// Timetable identifier
    #[serde(deserialize_with = "crate::models::null_default")]
    pub id: String,
    /// Display name
    #[serde(deserialize_with = "crate::models::null_default")]
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query() {
        let query = LinesParams::new("33000028")
            .with_format("json")
            .to_query()
            .unwrap();
        assert_eq!(
            query,
            vec![
                ("stopid".to_string(), "33000028".to_string()),
                ("format".to_string(), "json".to_string()),
            ]
        );
    }

    #[test]
    fn test_query_empty_stop_id() {
        let err = LinesParams::new("").to_query().unwrap_err();
        assert_eq!(err.field, "stopid");
    }

    #[test]
    fn test_request_path() {
        let request = LinesParams::new("33000028").to_request().unwrap();
        assert_eq!(request.path, "/stt/lines");
    }

    #[test]
    fn test_decode_response() {
        let json = r#"{
            "Lines": [{
                "Name": "3",
                "Mot": "Tram",
                "Directions": [{
                    "Name": "Wilder Mann",
                    "TimeTables": [{ "Id": "voe:11003: :H:j17", "Name": "Standardfahrplan" }]
                }],
                "Diva": { "Number": "11003", "Network": "voe" }
            }],
            "Status": { "Code": "Ok" },
            "ExpirationTime": "/Date(1487282400000+0100)/"
        }"#;

        let response: LinesResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.lines.len(), 1);
        assert!(response.lines[0].changes.is_empty());
        assert_eq!(response.lines[0].directions[0].time_tables[0].name, "Standardfahrplan");
        assert!(response.expires_at().is_some());
    }

    #[test]
    fn test_decode_null_fields() {
        let json = r#"{
            "Lines": [{ "Name": "3", "Directions": null, "Diva": null }],
            "Status": null,
            "ExpirationTime": null
        }"#;

        let response: LinesResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.lines[0].name, "3");
        assert!(response.lines[0].directions.is_empty());
        assert!(!response.status.is_ok());
    }
}
