//! DVB client handle and API trait

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, instrument};

use crate::config::DvbConfig;
use crate::context::RequestContext;
use crate::error::{DvbError, TransportError};
use crate::lines::{LinesParams, LinesResponse};
use crate::monitor::{MonitorStopParams, MonitorStopResponse};
use crate::point::{PointParams, PointResponse};
use crate::route::{RouteParams, RouteResponse};

/// Trait for DVB API clients
#[async_trait]
pub trait DvbApi: Send + Sync {
    /// Upcoming departures (or arrivals) at a stop
    async fn monitor_stop(
        &self,
        ctx: &RequestContext,
        params: &MonitorStopParams,
    ) -> Result<MonitorStopResponse, DvbError>;

    /// Journey options between two locations
    async fn get_route(
        &self,
        ctx: &RequestContext,
        params: &RouteParams,
    ) -> Result<RouteResponse, DvbError>;

    /// Lines serving a stop
    async fn get_lines(
        &self,
        ctx: &RequestContext,
        params: &LinesParams,
    ) -> Result<LinesResponse, DvbError>;

    /// Stops and places matching a search term
    async fn get_point(
        &self,
        ctx: &RequestContext,
        params: &PointParams,
    ) -> Result<PointResponse, DvbError>;
}

/// HTTP client for the DVB web API
///
/// Immutable after construction. Cloning is cheap and clones share the
/// underlying connection pool, so one client can serve any number of
/// concurrent calls.
#[derive(Debug, Clone)]
pub struct DvbClient {
    base_url: String,
    user_agent: String,
    timeout: Option<Duration>,
    http: Client,
}

impl DvbClient {
    /// Create a new DVB client
    ///
    /// Empty configuration values fall back to their defaults.
    ///
    /// # Errors
    ///
    /// Returns a transport error if the HTTP client cannot be initialized.
    pub fn new(config: DvbConfig) -> Result<Self, DvbError> {
        let config = config.normalized();
        let timeout = Duration::from_secs(config.timeout_secs);
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(TransportError::Request)?;

        debug!(base_url = %config.base_url, timeout_secs = config.timeout_secs, "DVB client created");

        Ok(Self {
            base_url: config.base_url,
            user_agent: config.user_agent,
            timeout: Some(timeout),
            http,
        })
    }

    /// Create a new client with default configuration
    ///
    /// # Errors
    ///
    /// Returns a transport error if the HTTP client cannot be initialized.
    pub fn with_defaults() -> Result<Self, DvbError> {
        Self::new(DvbConfig::default())
    }

    /// Create a client around an existing `reqwest` client
    ///
    /// `http` keeps its own timeout settings. `config.timeout_secs` is
    /// ignored, and timeout errors from such a client carry no duration.
    #[must_use]
    pub fn with_http_client(config: DvbConfig, http: Client) -> Self {
        let config = config.normalized();
        Self {
            timeout: None,
            base_url: config.base_url,
            user_agent: config.user_agent,
            http,
        }
    }

    /// Base URL requests are sent to
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// User-Agent header sent with every request
    #[must_use]
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Request timeout of the underlying HTTP client
    ///
    /// `None` if the HTTP client was supplied by the caller.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub(crate) const fn http(&self) -> &Client {
        &self.http
    }
}

#[async_trait]
impl DvbApi for DvbClient {
    #[instrument(skip(self, ctx, params), fields(stop_id = %params.stop_id))]
    async fn monitor_stop(
        &self,
        ctx: &RequestContext,
        params: &MonitorStopParams,
    ) -> Result<MonitorStopResponse, DvbError> {
        let response: MonitorStopResponse = self.request(ctx, params.to_request()?).await?;
        debug!(count = response.departures.len(), "Departures received");
        Ok(response)
    }

    #[instrument(skip(self, ctx, params), fields(origin = %params.origin, destination = %params.destination))]
    async fn get_route(
        &self,
        ctx: &RequestContext,
        params: &RouteParams,
    ) -> Result<RouteResponse, DvbError> {
        let response: RouteResponse = self.request(ctx, params.to_request()?).await?;
        debug!(count = response.routes.len(), "Routes received");
        Ok(response)
    }

    #[instrument(skip(self, ctx, params), fields(stop_id = %params.stop_id))]
    async fn get_lines(
        &self,
        ctx: &RequestContext,
        params: &LinesParams,
    ) -> Result<LinesResponse, DvbError> {
        let response: LinesResponse = self.request(ctx, params.to_request()?).await?;
        debug!(count = response.lines.len(), "Lines received");
        Ok(response)
    }

    #[instrument(skip(self, ctx, params), fields(query = %params.query))]
    async fn get_point(
        &self,
        ctx: &RequestContext,
        params: &PointParams,
    ) -> Result<PointResponse, DvbError> {
        let response: PointResponse = self.request(ctx, params.to_request()?).await?;
        debug!(count = response.points.len(), "Points received");
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_applies_defaults() {
        let client = DvbClient::new(DvbConfig {
            base_url: String::new(),
            user_agent: String::new(),
            timeout_secs: 0,
        })
        .unwrap();

        assert_eq!(client.base_url(), "https://webapi.vvo-online.de");
        assert!(client.user_agent().starts_with("dvb-rs-client/"));
        assert_eq!(client.timeout(), Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_with_http_client() {
        let config = DvbConfig {
            base_url: "http://localhost:1234".to_string(),
            user_agent: "custom/1.0".to_string(),
            timeout_secs: 3,
        };
        let client = DvbClient::with_http_client(config, Client::new());

        assert_eq!(client.base_url(), "http://localhost:1234");
        assert_eq!(client.user_agent(), "custom/1.0");
        assert!(client.timeout().is_none());
    }

    #[test]
    fn test_client_is_shareable() {
        fn assert_send_sync<T: Send + Sync + Clone>() {}
        assert_send_sync::<DvbClient>();
    }

    #[tokio::test]
    async fn test_validation_happens_before_dispatch() {
        let client = DvbClient::new(DvbConfig::with_base_url("not a url")).unwrap();
        let ctx = RequestContext::new();

        let err = client
            .monitor_stop(&ctx, &MonitorStopParams::new(""))
            .await
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[tokio::test]
    async fn test_invalid_base_url_is_transport_error() {
        let client = DvbClient::new(DvbConfig::with_base_url("not a url")).unwrap();
        let ctx = RequestContext::new();

        let err = client
            .get_lines(&ctx, &LinesParams::new("33000028"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DvbError::Transport(TransportError::InvalidBaseUrl(_))
        ));
    }
}
