//! Trip planner (`/tr/trips`)
//!
//! Journey options between two locations, each made of one or more partial
//! routes (a ride or a walk).

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::http::RequestDescriptor;
use crate::models::{Diva, Platform, Status};
use crate::query::{QueryBuilder, QueryPairs};

/// Path of the trip planner endpoint
pub const ROUTE_PATH: &str = "/tr/trips";

/// Parameters for [`DvbApi::get_route`](crate::DvbApi::get_route)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteParams {
    /// Start of the journey (required): a stop ID or a place name
    pub origin: String,
    /// End of the journey (required): a stop ID or a place name
    pub destination: String,
    /// Response format
    pub format: Option<String>,
    /// Treat `time` as arrival instead of departure time
    pub is_arrival_time: Option<bool>,
    /// Include short-term changes such as delays and cancellations
    pub short_term_changes: Option<bool>,
    /// Departure or arrival time, defaults to now on the server
    pub time: Option<String>,
    /// Intermediate stop the journey must pass
    pub via: Option<String>,
}

impl RouteParams {
    /// Plan a journey from `origin` to `destination`
    #[must_use]
    pub fn new(origin: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            destination: destination.into(),
            ..Default::default()
        }
    }

    /// Set the response format
    #[must_use]
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    /// Treat the time as arrival (`true`) or departure (`false`)
    #[must_use]
    pub fn with_arrival_time(mut self, is_arrival_time: bool) -> Self {
        self.is_arrival_time = Some(is_arrival_time);
        self
    }

    /// Include or exclude short-term changes
    #[must_use]
    pub fn with_short_term_changes(mut self, enabled: bool) -> Self {
        self.short_term_changes = Some(enabled);
        self
    }

    /// Set the departure or arrival time
    #[must_use]
    pub fn with_time(mut self, time: impl Into<String>) -> Self {
        self.time = Some(time.into());
        self
    }

    /// Route via an intermediate stop
    #[must_use]
    pub fn with_via(mut self, via: impl Into<String>) -> Self {
        self.via = Some(via.into());
        self
    }

    /// Encode as query parameters
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if `origin` or `destination` is empty.
    pub fn to_query(&self) -> Result<QueryPairs, ValidationError> {
        Ok(QueryBuilder::new()
            .required("origin", &self.origin)?
            .required("destination", &self.destination)?
            .optional_str("format", self.format.as_deref())
            .optional_bool("isarrivaltime", self.is_arrival_time)
            .optional_bool("shorttermchanges", self.short_term_changes)
            .optional_str("time", self.time.as_deref())
            .optional_str("via", self.via.as_deref())
            .build())
    }

    pub(crate) fn to_request(&self) -> Result<RequestDescriptor, ValidationError> {
        Ok(RequestDescriptor::get(ROUTE_PATH).with_query(self.to_query()?))
    }
}

/// Response of the trip planner
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct RouteResponse {
    /// Planner session, needed for follow-up requests
    #[serde(deserialize_with = "crate::models::null_default")]
    pub session_id: String,
    /// API status
    #[serde(deserialize_with = "crate::models::null_default")]
    pub status: Status,
    /// Journey options
    #[serde(deserialize_with = "crate::models::null_default")]
    pub routes: Vec<Route>,
}

/// One journey option
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Route {
    /// Fare level
    #[serde(deserialize_with = "crate::models::null_default")]
    pub price_level: i32,
    /// Single ticket price
    #[serde(deserialize_with = "crate::models::null_default")]
    pub price: String,
    /// Day ticket price
    #[serde(deserialize_with = "crate::models::null_default")]
    pub price_day_ticket: String,
    /// Transport network, e.g. `"VVO"`
    #[serde(deserialize_with = "crate::models::null_default")]
    pub net: String,
    /// Total duration in minutes
    #[serde(deserialize_with = "crate::models::null_default")]
    pub duration: i32,
    /// Number of changes
    #[serde(deserialize_with = "crate::models::null_default")]
    pub interchanges: i32,
    /// Lines used, in order
    #[serde(deserialize_with = "crate::models::null_default")]
    pub mot_chain: Vec<MotChain>,
    /// Fare zones crossed
    #[serde(deserialize_with = "crate::models::null_default")]
    pub number_of_fare_zones: String,
    /// Fare zones counted for a day ticket
    #[serde(deserialize_with = "crate::models::null_default")]
    pub number_of_fare_zones_day_ticket: String,
    /// Names of the fare zones crossed
    #[serde(deserialize_with = "crate::models::null_default")]
    pub fare_zone_names: String,
    /// Names of the fare zones counted for a day ticket
    #[serde(deserialize_with = "crate::models::null_default")]
    pub fare_zone_names_day_ticket: String,
    /// Fare zone of the origin
    #[serde(deserialize_with = "crate::models::null_default")]
    pub fare_zone_origin: i32,
    /// Fare zone of the destination
    #[serde(deserialize_with = "crate::models::null_default")]
    pub fare_zone_destination: i32,
    /// Route identifier
    #[serde(deserialize_with = "crate::models::null_default")]
    pub route_id: i32,
    /// Legs of the journey
    #[serde(deserialize_with = "crate::models::null_default")]
    pub partial_routes: Vec<PartialRoute>,
    /// Encoded map geometry, indexed by [`PartialRoute::map_data_index`]
    #[serde(deserialize_with = "crate::models::null_default")]
    pub map_data: Vec<String>,
    /// Ticket options
    #[serde(deserialize_with = "crate::models::null_default")]
    pub tickets: Vec<Ticket>,
}

impl Route {
    /// Legs that are rides, not walks
    pub fn rides(&self) -> impl Iterator<Item = &PartialRoute> {
        self.partial_routes.iter().filter(|leg| !leg.is_walk())
    }
}

/// Summary of a line used in a route
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct MotChain {
    /// DVB line identifier
    #[serde(deserialize_with = "crate::models::null_default")]
    pub dl_id: String,
    /// Alternative line identifier
    #[serde(deserialize_with = "crate::models::null_default")]
    pub stateless_id: String,
    /// Mode of transport, e.g. `"Tram"`
    #[serde(rename = "Type", deserialize_with = "crate::models::null_default")]
    pub kind: String,
    /// Line name
    #[serde(deserialize_with = "crate::models::null_default")]
    pub name: String,
    /// Destination
    #[serde(deserialize_with = "crate::models::null_default")]
    pub direction: String,
    /// Change identifiers
    #[serde(deserialize_with = "crate::models::null_default")]
    pub changes: Vec<String>,
    /// Cross-network line identifier
    #[serde(deserialize_with = "crate::models::null_default")]
    pub diva: Diva,
    /// Operator name
    #[serde(deserialize_with = "crate::models::null_default")]
    pub transportation_company: String,
    /// Operator code
    #[serde(deserialize_with = "crate::models::null_default")]
    pub operator_code: String,
    /// Product, e.g. `"Straßenbahn"`
    #[serde(deserialize_with = "crate::models::null_default")]
    pub product_name: String,
    /// Train number for rail services
    #[serde(deserialize_with = "crate::models::null_default")]
    pub train_number: String,
}

/// One leg of a route
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct PartialRoute {
    /// Leg identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partial_route_id: Option<i32>,
    /// Duration in minutes
    #[serde(deserialize_with = "crate::models::null_default")]
    pub duration: i32,
    /// Mode of transport of this leg
    #[serde(deserialize_with = "crate::models::null_default")]
    pub mot: Mot,
    /// Index into [`Route::map_data`]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub map_data_index: Option<i32>,
    /// Timing shift
    #[serde(deserialize_with = "crate::models::null_default")]
    pub shift: String,
    /// Stops served on this leg
    #[serde(
        skip_serializing_if = "Vec::is_empty",
        deserialize_with = "crate::models::null_default"
    )]
    pub regular_stops: Vec<RegularStop>,
    /// Whether the change to the next leg is at risk
    #[serde(skip_serializing_if = "Option::is_none")]
    pub changeover_endangered: Option<bool>,
    /// Later departure options
    #[serde(
        skip_serializing_if = "Vec::is_empty",
        deserialize_with = "crate::models::null_default"
    )]
    pub next_departure_times: Vec<String>,
    /// Earlier departure options
    #[serde(
        skip_serializing_if = "Vec::is_empty",
        deserialize_with = "crate::models::null_default"
    )]
    pub previous_departure_times: Vec<String>,
}

impl PartialRoute {
    /// Returns true for walking legs
    #[must_use]
    pub fn is_walk(&self) -> bool {
        matches!(self.mot.kind.as_str(), "Footpath" | "Walking")
    }
}

/// Mode of transport of a single leg
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Mot {
    /// DVB line identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dl_id: Option<String>,
    /// Alternative line identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stateless_id: Option<String>,
    /// Mode of transport, e.g. `"Tram"` or `"Footpath"`
    #[serde(rename = "Type", deserialize_with = "crate::models::null_default")]
    pub kind: String,
    /// Line name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Destination
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<String>,
    /// Change identifiers
    #[serde(
        skip_serializing_if = "Vec::is_empty",
        deserialize_with = "crate::models::null_default"
    )]
    pub changes: Vec<String>,
    /// Cross-network line identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diva: Option<Diva>,
    /// Operator name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transportation_company: Option<String>,
    /// Operator code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operator_code: Option<String>,
    /// Product name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
    /// Train number for rail services
    #[serde(skip_serializing_if = "Option::is_none")]
    pub train_number: Option<String>,
}

/// A stop served on a leg
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct RegularStop {
    /// Planned arrival
    #[serde(deserialize_with = "crate::models::null_default")]
    pub arrival_time: String,
    /// Planned departure
    #[serde(deserialize_with = "crate::models::null_default")]
    pub departure_time: String,
    /// Expected arrival
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arrival_real_time: Option<String>,
    /// Expected departure
    #[serde(skip_serializing_if = "Option::is_none")]
    pub departure_real_time: Option<String>,
    /// City or area
    #[serde(deserialize_with = "crate::models::null_default")]
    pub place: String,
    /// Stop name
    #[serde(deserialize_with = "crate::models::null_default")]
    pub name: String,
    /// Stop kind
    #[serde(rename = "Type", deserialize_with = "crate::models::null_default")]
    pub kind: String,
    /// Stop identifier
    #[serde(deserialize_with = "crate::models::null_default")]
    pub data_id: String,
    /// Global stop identifier (DHID)
    #[serde(deserialize_with = "crate::models::null_default")]
    pub dh_id: String,
    /// Platform
    #[serde(deserialize_with = "crate::models::null_default")]
    pub platform: Platform,
    /// Latitude in the API's integer (GK4) coordinates
    #[serde(deserialize_with = "crate::models::null_default")]
    pub latitude: i64,
    /// Longitude in the API's integer (GK4) coordinates
    #[serde(deserialize_with = "crate::models::null_default")]
    pub longitude: i64,
    /// Departure state
    #[serde(skip_serializing_if = "Option::is_none")]
    pub departure_state: Option<String>,
    /// Arrival state
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arrival_state: Option<String>,
    /// Reasons for a cancellation
    #[serde(deserialize_with = "crate::models::null_default")]
    pub cancel_reasons: Vec<String>,
    /// Park and ride facilities
    #[serde(deserialize_with = "crate::models::null_default")]
    pub park_and_rail: Vec<String>,
    /// Expected load
    #[serde(deserialize_with = "crate::models::null_default")]
    pub occupancy: String,
}

/// A ticket valid for a route
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Ticket {
    /// Ticket name
    #[serde(deserialize_with = "crate::models::null_default")]
    pub name: String,
    /// Fare level
    #[serde(deserialize_with = "crate::models::null_default")]
    pub price_level: i32,
    /// Price
    #[serde(deserialize_with = "crate::models::null_default")]
    pub price: String,
    /// Fare zones covered
    #[serde(deserialize_with = "crate::models::null_default")]
    pub number_of_fare_zones: String,
    /// Names of the fare zones covered
    #[serde(deserialize_with = "crate::models::null_default")]
    pub fare_zone_names: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(key: &str, value: &str) -> (String, String) {
        (key.to_string(), value.to_string())
    }

    #[test]
    fn test_query_required_only() {
        let query = RouteParams::new("33000028", "33000016").to_query().unwrap();
        assert_eq!(
            query,
            vec![pair("origin", "33000028"), pair("destination", "33000016")]
        );
    }

    #[test]
    fn test_query_all_fields() {
        let query = RouteParams::new("33000028", "33000016")
            .with_format("json")
            .with_arrival_time(false)
            .with_short_term_changes(true)
            .with_time("2024-01-01T08:00:00Z")
            .with_via("33000037")
            .to_query()
            .unwrap();

        assert_eq!(
            query,
            vec![
                pair("origin", "33000028"),
                pair("destination", "33000016"),
                pair("format", "json"),
                pair("isarrivaltime", "false"),
                pair("shorttermchanges", "true"),
                pair("time", "2024-01-01T08:00:00Z"),
                pair("via", "33000037"),
            ]
        );
    }

    #[test]
    fn test_query_empty_origin() {
        let err = RouteParams::new("", "33000016").to_query().unwrap_err();
        assert_eq!(err.field, "origin");
    }

    #[test]
    fn test_query_empty_destination() {
        let err = RouteParams::new("33000028", "").to_query().unwrap_err();
        assert_eq!(err.field, "destination");
    }

    #[test]
    fn test_request_path() {
        let request = RouteParams::new("a", "b").to_request().unwrap();
        assert_eq!(request.path, "/tr/trips");
    }

    #[test]
    fn test_decode_response() {
        let json = r#"{
            "SessionId": "367417461:efa4",
            "Status": { "Code": "Ok" },
            "Routes": [{
                "PriceLevel": 1,
                "Price": "2,50",
                "PriceDayTicket": "6,00",
                "Net": "VVO",
                "Duration": 14,
                "Interchanges": 0,
                "MotChain": [{
                    "DlId": "de:vvo:11-3",
                    "Type": "Tram",
                    "Name": "3",
                    "Direction": "Wilder Mann",
                    "Diva": { "Number": "11003", "Network": "voe" }
                }],
                "FareZoneOrigin": 10,
                "FareZoneDestination": 10,
                "RouteId": 1,
                "PartialRoutes": [
                    {
                        "PartialRouteId": 0,
                        "Duration": 2,
                        "Mot": { "Type": "Footpath" },
                        "MapDataIndex": 0,
                        "Shift": "None"
                    },
                    {
                        "Duration": 12,
                        "Mot": {
                            "DlId": "de:vvo:11-3",
                            "Type": "Tram",
                            "Name": "3",
                            "Diva": { "Number": "11003", "Network": "voe" }
                        },
                        "RegularStops": [{
                            "ArrivalTime": "/Date(1487277180000+0100)/",
                            "DepartureTime": "/Date(1487277180000+0100)/",
                            "Place": "Dresden",
                            "Name": "Hauptbahnhof",
                            "Type": "Stop",
                            "DataId": "33000028",
                            "Platform": { "Name": "3", "Type": "Platform" },
                            "Latitude": 5655904,
                            "Longitude": 4621157
                        }],
                        "ChangeoverEndangered": false
                    }
                ],
                "MapData": ["Footpath|5655904|4621157|"],
                "Tickets": [{ "Name": "Einzelfahrt", "PriceLevel": 1, "Price": "2,50" }]
            }]
        }"#;

        let response: RouteResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.session_id, "367417461:efa4");
        assert_eq!(response.routes.len(), 1);

        let route = &response.routes[0];
        assert_eq!(route.duration, 14);
        assert_eq!(route.mot_chain[0].kind, "Tram");
        assert_eq!(route.partial_routes.len(), 2);
        assert_eq!(route.tickets[0].name, "Einzelfahrt");

        let walk = &route.partial_routes[0];
        assert!(walk.is_walk());
        assert_eq!(walk.partial_route_id, Some(0));
        assert!(walk.mot.name.is_none());

        let ride = &route.partial_routes[1];
        assert!(!ride.is_walk());
        assert!(ride.partial_route_id.is_none());
        assert_eq!(ride.changeover_endangered, Some(false));
        assert_eq!(ride.regular_stops[0].latitude, 5_655_904);
        assert!(ride.regular_stops[0].arrival_real_time.is_none());

        assert_eq!(route.rides().count(), 1);
    }

    #[test]
    fn test_decode_null_fields() {
        let json = r#"{
            "SessionId": null,
            "Status": { "Code": "Ok" },
            "Routes": [{
                "Duration": null,
                "MotChain": null,
                "PartialRoutes": [{
                    "Mot": { "Type": "Footpath", "Changes": null },
                    "RegularStops": null
                }],
                "Tickets": null
            }]
        }"#;

        let response: RouteResponse = serde_json::from_str(json).unwrap();
        assert!(response.session_id.is_empty());

        let route = &response.routes[0];
        assert_eq!(route.duration, 0);
        assert!(route.mot_chain.is_empty());
        assert!(route.tickets.is_empty());
        assert!(route.partial_routes[0].is_walk());
        assert!(route.partial_routes[0].regular_stops.is_empty());

        let empty: RouteResponse = serde_json::from_str(r#"{"Routes":null}"#).unwrap();
        assert!(empty.routes.is_empty());
    }
}
