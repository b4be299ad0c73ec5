//! Request dispatch and response decoding
//!
//! Every endpoint goes through the same pipeline: a [`RequestDescriptor`] is
//! turned into one HTTP request against the configured base URL, sent exactly
//! once, and the response is either decoded into the endpoint's result type
//! or classified into an [`ApiError`].

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue, USER_AGENT};
use reqwest::{Method, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::client::DvbClient;
use crate::context::RequestContext;
use crate::error::{ApiError, DvbError, TransportError};
use crate::query::QueryPairs;

/// HTTP methods understood by the dispatcher
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HttpMethod {
    /// `GET`
    #[default]
    Get,
    /// `POST`
    Post,
    /// `PUT`
    Put,
    /// `DELETE`
    Delete,
    /// `PATCH`
    Patch,
}

impl From<HttpMethod> for Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => Self::GET,
            HttpMethod::Post => Self::POST,
            HttpMethod::Put => Self::PUT,
            HttpMethod::Delete => Self::DELETE,
            HttpMethod::Patch => Self::PATCH,
        }
    }
}

/// Everything needed to send one request
#[derive(Debug, Clone, Default)]
pub struct RequestDescriptor {
    /// HTTP method
    pub method: HttpMethod,
    /// Absolute path, replacing any path of the base URL
    pub path: String,
    /// Query parameters in send order
    pub query: QueryPairs,
    /// JSON body, sent with `Content-Type: application/json`
    pub body: Option<serde_json::Value>,
    /// Extra headers, applied after the client headers
    pub headers: Vec<(String, String)>,
}

impl RequestDescriptor {
    /// A `GET` request for `path`
    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Get,
            path: path.into(),
            ..Default::default()
        }
    }

    /// Set the query parameters
    #[must_use]
    pub fn with_query(mut self, query: QueryPairs) -> Self {
        self.query = query;
        self
    }

    /// Add a header
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Attach a JSON body
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Serialize`] if `body` cannot be represented
    /// as JSON.
    pub fn with_json_body<B: Serialize>(mut self, body: &B) -> Result<Self, DvbError> {
        let value = serde_json::to_value(body).map_err(TransportError::Serialize)?;
        self.body = Some(value);
        Ok(self)
    }

    /// Resolve the full target URL against `base_url`
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn url(&self, base_url: &str) -> Result<Url, TransportError> {
        let mut url = Url::parse(base_url).map_err(TransportError::InvalidBaseUrl)?;
        url.set_path(&self.path);
        url.set_query(None);
        if !self.query.is_empty() {
            url.query_pairs_mut().extend_pairs(&self.query);
        }
        Ok(url)
    }

    /// Build the header map: user agent first, then caller headers
    ///
    /// Caller headers overwrite earlier values with the same name, including
    /// the user agent.
    fn header_map(&self, user_agent: &str) -> Result<HeaderMap, TransportError> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, header_value(user_agent)?);
        if self.body.is_some() {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }

        for (name, value) in &self.headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| TransportError::InvalidHeader(format!("{name}: {e}")))?;
            headers.insert(name, header_value(value)?);
        }

        Ok(headers)
    }
}

fn header_value(value: &str) -> Result<HeaderValue, TransportError> {
    HeaderValue::from_str(value).map_err(|e| TransportError::InvalidHeader(e.to_string()))
}

impl DvbClient {
    /// Send a request and decode a JSON response into `T`
    ///
    /// An empty 2xx body yields `T::default()`.
    ///
    /// # Errors
    ///
    /// Returns a transport error if the request cannot be sent or the context
    /// ends first, an [`ApiError`] for non-2xx responses, and
    /// [`DvbError::Decode`] if the body is not valid JSON for `T`.
    pub async fn request<T>(
        &self,
        ctx: &RequestContext,
        descriptor: RequestDescriptor,
    ) -> Result<T, DvbError>
    where
        T: DeserializeOwned + Default,
    {
        ctx.run(async {
            let response = self.send(descriptor).await?;
            self.decode(response).await
        })
        .await
    }

    /// Send a request and only check that it succeeded
    ///
    /// The body of a successful response is not read.
    ///
    /// # Errors
    ///
    /// Same as [`DvbClient::request`], minus decode errors.
    pub async fn request_unit(
        &self,
        ctx: &RequestContext,
        descriptor: RequestDescriptor,
    ) -> Result<(), DvbError> {
        ctx.run(async {
            let response = self.send(descriptor).await?;
            Self::expect_success(response).await
        })
        .await
    }

    /// Send a request and return the raw response
    ///
    /// # Errors
    ///
    /// Returns a transport error if the request cannot be built or sent, or
    /// if the context is cancelled or its deadline passes first.
    pub async fn dispatch(
        &self,
        ctx: &RequestContext,
        descriptor: RequestDescriptor,
    ) -> Result<Response, DvbError> {
        ctx.run(self.send(descriptor)).await
    }

    async fn send(&self, descriptor: RequestDescriptor) -> Result<Response, DvbError> {
        let url = descriptor.url(self.base_url())?;
        let headers = descriptor.header_map(self.user_agent())?;
        let method = Method::from(descriptor.method);

        debug!(%method, path = %descriptor.path, "Dispatching DVB request");

        let mut builder = self.http().request(method, url).headers(headers);
        if let Some(body) = &descriptor.body {
            let bytes = serde_json::to_vec(body).map_err(TransportError::Serialize)?;
            builder = builder.body(bytes);
        }

        let response = builder.send().await.map_err(|e| self.transport_error(e))?;
        debug!(status = %response.status(), "DVB response received");
        Ok(response)
    }

    async fn decode<T>(&self, response: Response) -> Result<T, DvbError>
    where
        T: DeserializeOwned + Default,
    {
        let status = response.status();
        if !status.is_success() {
            return Err(Self::classify(response).await.into());
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| self.transport_error(e))?;

        if body.is_empty() {
            debug!(%status, "Empty response body");
            return Ok(T::default());
        }

        serde_json::from_slice(&body).map_err(DvbError::Decode)
    }

    async fn expect_success(response: Response) -> Result<(), DvbError> {
        if response.status().is_success() {
            return Ok(());
        }
        Err(Self::classify(response).await.into())
    }

    /// Turn a non-2xx response into an [`ApiError`]
    async fn classify(response: Response) -> ApiError {
        let status = response.status();
        match response.bytes().await {
            Ok(body) => ApiError::from_body(status, &body),
            Err(_) => ApiError::unreadable(status),
        }
    }

    fn transport_error(&self, err: reqwest::Error) -> TransportError {
        if err.is_timeout() {
            TransportError::Timeout {
                timeout_secs: self.timeout().map(|t| t.as_secs()),
            }
        } else {
            TransportError::Request(err)
        }
    }
}
