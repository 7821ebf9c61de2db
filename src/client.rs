//! HTTP transport for the Yuque API with tracing instrumentation.
//!
//! [`ApiClient`] owns the connection configuration (API token, base URL) and
//! the primitive verbs the resource clients are built on. The underlying
//! `reqwest::Client` is bound to the configuration at construction time and
//! rebuilt whole on every reconfiguration, so a stale connection handle is
//! never picked up by a call that starts after the change. Calls already in
//! flight finish on the handle they snapshotted.

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, instrument, Span};
use url::Url;

use crate::error::{ApiError, Result};
use crate::types::{Envelope, Hello};

/// Base URL used when none is given.
pub const DEFAULT_BASE_URL: &str = "https://www.yuque.com/api/v2";

/// Header carrying the API token. Omitted entirely for empty tokens.
const AUTH_HEADER: &str = "X-Auth-Token";

/// The `{token, base_url}` pair governing how a client talks to the API.
///
/// An empty token is legal and means unauthenticated calls. The base URL is
/// validated on the way in and stored without a trailing slash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    token: String,
    base_url: String,
}

impl ClientConfig {
    pub fn new(token: impl Into<String>, base_url: &str) -> Result<Self> {
        Url::parse(base_url)?;
        Ok(Self {
            token: token.into(),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Partial update: a `None` field keeps its previous value.
    fn merged(&self, token: Option<&str>, base_url: Option<&str>) -> Result<Self> {
        let token = token.unwrap_or(&self.token).to_string();
        match base_url {
            Some(base_url) => Self::new(token, base_url),
            None => Ok(Self {
                token,
                base_url: self.base_url.clone(),
            }),
        }
    }
}

/// A connection handle derived from one [`ClientConfig`].
#[derive(Debug)]
struct Connection {
    http: reqwest::Client,
    config: ClientConfig,
}

impl Connection {
    fn open(config: ClientConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if !config.token().is_empty() {
            let mut value =
                HeaderValue::from_str(config.token()).map_err(|_| ApiError::InvalidToken)?;
            value.set_sensitive(true);
            headers.insert(AUTH_HEADER, value);
        }
        let http = reqwest::Client::builder()
            .default_headers(headers)
            .pool_max_idle_per_host(10)
            .build()?;
        Ok(Self { http, config })
    }
}

/// Async HTTP client bound to one Yuque endpoint configuration.
///
/// Exposes the primitive verbs (`get`/`post`/`put`/`delete`), accessors for
/// the current configuration, and in-place reconfiguration. Reconfiguration
/// merges the given fields into the current config and swaps in a freshly
/// built connection; it never patches the live one.
#[derive(Debug)]
pub struct ApiClient {
    state: RwLock<Connection>,
}

impl ApiClient {
    /// Creates a client against the default Yuque endpoint.
    pub fn new(token: impl Into<String>) -> Result<Self> {
        Self::with_base_url(token, DEFAULT_BASE_URL)
    }

    /// Creates a client against a custom endpoint.
    pub fn with_base_url(token: impl Into<String>, base_url: &str) -> Result<Self> {
        let connection = Connection::open(ClientConfig::new(token, base_url)?)?;
        Ok(Self {
            state: RwLock::new(connection),
        })
    }

    /// The configured API token. Empty for unauthenticated clients.
    pub fn api_token(&self) -> String {
        self.read().config.token().to_string()
    }

    /// The configured base URL, without trailing slash.
    pub fn base_url(&self) -> String {
        self.read().config.base_url().to_string()
    }

    /// Replaces the API token, keeping the base URL.
    pub fn update_token(&self, token: &str) -> Result<()> {
        self.update_config(Some(token), None)
    }

    /// Replaces the base URL, keeping the token.
    pub fn update_base_url(&self, base_url: &str) -> Result<()> {
        self.update_config(None, Some(base_url))
    }

    /// Partial reconfiguration: any `None` field keeps its previous value.
    ///
    /// The merged config is validated and a new connection built before the
    /// swap, so on error the client keeps its previous configuration.
    pub fn update_config(&self, token: Option<&str>, base_url: Option<&str>) -> Result<()> {
        let mut state = self.write();
        let connection = Connection::open(state.config.merged(token, base_url)?)?;
        *state = connection;
        Ok(())
    }

    /// Issues a GET request and parses the response body.
    #[instrument(
        name = "yuque_request",
        skip_all,
        fields(http.method = "GET", http.url = tracing::field::Empty, http.status_code = tracing::field::Empty)
    )]
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.send(self.request(Method::GET, path)).await
    }

    /// Issues a GET request with a query string.
    ///
    /// `query` serializes through serde; `Option` fields annotated with
    /// `skip_serializing_if` are left out of the request entirely.
    #[instrument(
        name = "yuque_request",
        skip_all,
        fields(http.method = "GET", http.url = tracing::field::Empty, http.status_code = tracing::field::Empty)
    )]
    pub async fn get_query<T, Q>(&self, path: &str, query: &Q) -> Result<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        self.send(self.request(Method::GET, path).query(query)).await
    }

    /// Issues a POST request with a JSON body.
    #[instrument(
        name = "yuque_request",
        skip_all,
        fields(http.method = "POST", http.url = tracing::field::Empty, http.status_code = tracing::field::Empty)
    )]
    pub async fn post<T, B>(&self, path: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send(self.request(Method::POST, path).json(body)).await
    }

    /// Issues a PUT request with a JSON body.
    #[instrument(
        name = "yuque_request",
        skip_all,
        fields(http.method = "PUT", http.url = tracing::field::Empty, http.status_code = tracing::field::Empty)
    )]
    pub async fn put<T, B>(&self, path: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send(self.request(Method::PUT, path).json(body)).await
    }

    /// Issues a DELETE request.
    #[instrument(
        name = "yuque_request",
        skip_all,
        fields(http.method = "DELETE", http.url = tracing::field::Empty, http.status_code = tracing::field::Empty)
    )]
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.send(self.request(Method::DELETE, path)).await
    }

    /// Health check against `/hello`.
    pub async fn hello(&self) -> Result<Hello> {
        Ok(self.get::<Envelope<Hello>>("/hello").await?.data)
    }

    /// Builds a request against the current connection.
    ///
    /// The lock is read once per call; a reconfiguration that lands after
    /// this point does not affect the request being built.
    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let state = self.read();
        let url = format!("{}{}", state.config.base_url(), path);
        Span::current().record("http.url", url.as_str());
        state.http.request(method, url)
    }

    async fn send<T: DeserializeOwned>(&self, request: reqwest::RequestBuilder) -> Result<T> {
        let response = request.send().await?;
        let status = response.status();
        Span::current().record("http.status_code", status.as_u16());
        debug!(status = status.as_u16(), "yuque api response");

        if !status.is_success() {
            let message = response.text().await.unwrap_or_else(|_| status.to_string());
            return Err(ApiError::HttpStatus {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    // The guarded state is a plain value that is valid at every instant, so
    // a poisoned lock is recovered rather than propagated.
    fn read(&self) -> RwLockReadGuard<'_, Connection> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Connection> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tracing_test::traced_test;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn mock_hello(server: &MockServer) {
        Mock::given(method("GET"))
            .and(path("/hello"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": { "message": "Hello Yuque" }
            })))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn hello_unwraps_the_envelope() {
        let server = MockServer::start().await;
        mock_hello(&server).await;

        let client = ApiClient::with_base_url("", &server.uri()).unwrap();
        let hello = client.hello().await.unwrap();
        assert_eq!(hello.message, "Hello Yuque");
    }

    #[tokio::test]
    async fn empty_token_sends_no_auth_header() {
        let server = MockServer::start().await;
        mock_hello(&server).await;

        let client = ApiClient::with_base_url("", &server.uri()).unwrap();
        client.hello().await.unwrap();

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        assert!(!requests[0].headers.contains_key("x-auth-token"));
    }

    #[tokio::test]
    async fn token_and_content_type_are_sent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/hello"))
            .and(header("X-Auth-Token", "secret-token"))
            .and(header("Content-Type", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": { "message": "authenticated" }
            })))
            .mount(&server)
            .await;

        let client = ApiClient::with_base_url("secret-token", &server.uri()).unwrap();
        let hello = client.hello().await.unwrap();
        assert_eq!(hello.message, "authenticated");
    }

    #[tokio::test]
    async fn non_success_status_surfaces_with_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/hello"))
            .respond_with(ResponseTemplate::new(404).set_body_string("no such route"))
            .mount(&server)
            .await;

        let client = ApiClient::with_base_url("", &server.uri()).unwrap();
        let err = client.hello().await.unwrap_err();
        match err {
            ApiError::HttpStatus { status, message } => {
                assert_eq!(status, 404);
                assert_eq!(message, "no such route");
            }
            other => panic!("expected HttpStatus, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn malformed_body_is_a_parse_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/hello"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let client = ApiClient::with_base_url("", &server.uri()).unwrap();
        let err = client.hello().await.unwrap_err();
        assert!(matches!(err, ApiError::Parse(_)));
    }

    #[tokio::test]
    async fn update_token_takes_effect_on_the_next_call() {
        let server = MockServer::start().await;
        mock_hello(&server).await;

        let client = ApiClient::with_base_url("first", &server.uri()).unwrap();
        client.hello().await.unwrap();
        client.update_token("second").unwrap();
        client.hello().await.unwrap();

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests[0].headers.get("x-auth-token").unwrap(), "first");
        assert_eq!(requests[1].headers.get("x-auth-token").unwrap(), "second");
    }

    #[tokio::test]
    async fn updating_to_an_empty_token_drops_the_header() {
        let server = MockServer::start().await;
        mock_hello(&server).await;

        let client = ApiClient::with_base_url("first", &server.uri()).unwrap();
        client.update_token("").unwrap();
        client.hello().await.unwrap();

        let requests = server.received_requests().await.unwrap();
        assert!(!requests[0].headers.contains_key("x-auth-token"));
    }

    #[test]
    fn partial_update_preserves_the_untouched_field() {
        let client = ApiClient::new("token-a").unwrap();

        client.update_config(Some("token-b"), None).unwrap();
        assert_eq!(client.api_token(), "token-b");
        assert_eq!(client.base_url(), DEFAULT_BASE_URL);

        client
            .update_config(None, Some("https://yuque.internal/api/v2"))
            .unwrap();
        assert_eq!(client.api_token(), "token-b");
        assert_eq!(client.base_url(), "https://yuque.internal/api/v2");
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = ApiClient::with_base_url("", "https://yuque.internal/api/v2/").unwrap();
        assert_eq!(client.base_url(), "https://yuque.internal/api/v2");
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let err = ApiClient::with_base_url("", "not a url").unwrap_err();
        assert!(matches!(err, ApiError::InvalidBaseUrl(_)));
    }

    #[test]
    fn invalid_token_is_rejected_and_state_kept() {
        let client = ApiClient::new("good").unwrap();
        let err = client.update_token("bad\ntoken").unwrap_err();
        assert!(matches!(err, ApiError::InvalidToken));
        assert_eq!(client.api_token(), "good");
    }

    #[traced_test]
    #[tokio::test]
    async fn request_path_emits_a_response_event() {
        let server = MockServer::start().await;
        mock_hello(&server).await;

        let client = ApiClient::with_base_url("", &server.uri()).unwrap();
        client.hello().await.unwrap();
        assert!(logs_contain("yuque api response"));
    }
}
