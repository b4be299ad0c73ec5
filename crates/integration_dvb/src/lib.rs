#![forbid(unsafe_code)]
//! Client for the Dresden public transit (DVB / VVO) real-time API
//!
//! Covers the four public endpoints of [webapi.vvo-online.de](https://webapi.vvo-online.de):
//! stop monitoring, trip planning, line lookup and the point finder.
//!
//! # Architecture
//!
//! The crate follows a client-trait pattern consistent with other integration crates.
//! [`DvbApi`] defines the interface and is implemented by [`DvbClient`]. Every call
//! encodes its parameter struct into a query string, sends exactly one request, and
//! either decodes the JSON body or classifies the failure into a [`DvbError`].
//! Calls take a [`RequestContext`] for cancellation and deadlines.
//!
//! # Example
//!
//! ```rust,ignore
//! use integration_dvb::{DvbApi, DvbClient, DvbConfig, MonitorStopParams, RequestContext};
//!
//! let client = DvbClient::new(DvbConfig::default())?;
//! let ctx = RequestContext::with_timeout(std::time::Duration::from_secs(5));
//!
//! let response = client
//!     .monitor_stop(&ctx, &MonitorStopParams::new("33000028").with_limit(10))
//!     .await?;
//! for departure in &response.departures {
//!     println!("{} → {}", departure.line_name, departure.direction);
//! }
//! ```

mod client;
mod config;
mod context;
mod error;
mod http;
mod lines;
mod models;
mod monitor;
mod point;
mod query;
mod route;

pub use client::{DvbApi, DvbClient};
pub use config::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS, DvbConfig};
pub use context::RequestContext;
pub use error::{ApiError, DvbError, ErrorKind, TransportError, ValidationError};
pub use http::{HttpMethod, RequestDescriptor};
pub use lines::{Direction, LINES_PATH, Line, LinesParams, LinesResponse, TimeTable};
pub use models::{Diva, Platform, Status, parse_timestamp};
pub use monitor::{Departure, MONITOR_PATH, MonitorStopParams, MonitorStopResponse};
pub use point::{POINT_PATH, Point, PointParams, PointResponse};
pub use query::{QueryBuilder, QueryPairs};
pub use route::{
    Mot, MotChain, PartialRoute, ROUTE_PATH, RegularStop, Route, RouteParams, RouteResponse,
    Ticket,
};
pub use tokio_util::sync::CancellationToken;
