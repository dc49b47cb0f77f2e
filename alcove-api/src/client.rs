//! Shared HTTP transport for all services
//!
//! Owns the base URL, the reqwest client (with its request timeout), and
//! the optional session whose bearer token is attached to every request.
//! The client holds no per-request state: operations are independent round
//! trips with no deduplication, ordering, or retry.

use alcove_core::config::ApiConfig;
use alcove_core::core_session::Session;
use metrics::{counter, describe_counter};
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::error::{ApiError, ApiResult};
use crate::wire::MessageBody;

/// Register metric descriptions (call once at startup)
pub fn init_metrics() {
    describe_counter!(
        "alcove_api_requests_total",
        "Total number of API requests issued, labeled by operation"
    );

    describe_counter!(
        "alcove_api_failures_total",
        "Total number of API requests that failed, labeled by operation"
    );
}

/// HTTP client shared by all services
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
    session: Option<Arc<Session>>,
}

impl ApiClient {
    /// An unauthenticated client, for the login surface
    pub fn new(config: &ApiConfig) -> ApiResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            base_url: config.base_url.clone(),
            http,
            session: None,
        })
    }

    /// A client that attaches `Authorization: Bearer <token>` to every
    /// request. The session is read-only shared state.
    pub fn with_session(config: &ApiConfig, session: Arc<Session>) -> ApiResult<Self> {
        let mut client = Self::new(config)?;
        client.session = Some(session);
        Ok(client)
    }

    /// The session this client authenticates as, if any
    pub fn session(&self) -> Option<&Session> {
        self.session.as_deref()
    }

    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        op: &'static str,
        path: &str,
    ) -> ApiResult<T> {
        self.execute(op, self.request(Method::GET, path)).await
    }

    pub(crate) async fn get_with_query<T: DeserializeOwned>(
        &self,
        op: &'static str,
        path: &str,
        query: &[(&str, String)],
    ) -> ApiResult<T> {
        self.execute(op, self.request(Method::GET, path).query(query))
            .await
    }

    pub(crate) async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        op: &'static str,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        self.execute(op, self.request(Method::POST, path).json(body))
            .await
    }

    pub(crate) async fn post_empty<T: DeserializeOwned>(
        &self,
        op: &'static str,
        path: &str,
    ) -> ApiResult<T> {
        self.execute(op, self.request(Method::POST, path)).await
    }

    pub(crate) async fn delete<T: DeserializeOwned>(
        &self,
        op: &'static str,
        path: &str,
    ) -> ApiResult<T> {
        self.execute(op, self.request(Method::DELETE, path)).await
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.http.request(method, url);
        if let Some(session) = &self.session {
            request = request.bearer_auth(session.bearer_token());
        }
        request
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        op: &'static str,
        request: RequestBuilder,
    ) -> ApiResult<T> {
        counter!("alcove_api_requests_total", "operation" => op).increment(1);
        debug!(operation = op, "issuing request");

        let response = match request.send().await {
            Ok(response) => response,
            Err(err) => {
                counter!("alcove_api_failures_total", "operation" => op).increment(1);
                warn!(operation = op, "transport failure: {}", err);
                return Err(ApiError::Network(err));
            }
        };

        let status = response.status();
        if status.is_success() {
            return Ok(response.json::<T>().await?);
        }

        counter!("alcove_api_failures_total", "operation" => op).increment(1);
        let message = error_message(response).await;
        warn!(operation = op, %status, "request failed: {}", message);
        Err(ApiError::from_response(status, message))
    }
}

/// Extract the `{message}` body of a failed response, falling back to the
/// status line when the body is absent or malformed
async fn error_message(response: Response) -> String {
    let status = response.status();
    match response.json::<MessageBody>().await {
        Ok(body) => body.message,
        Err(_) => format!("Request failed with status {}", status),
    }
}
