//! The session-aware request pipeline.
//!
//! Every call goes through [`ApiClient::execute`]: the request stage attaches
//! the JSON content type and, when a credential is stored, the bearer header.
//! The response stage turns non-2xx statuses into errors. A 401 additionally
//! clears the stored credential and broadcasts one
//! [`SessionEvent::LoginRequired`].

use crate::config::ApiConfig;
use crate::event::SessionEvent;
use crate::transport::{ReqwestTransport, Transport};
use crate::{FetchError, Method, RequestBuilder, Response};
use priceflow_auth::Session;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::broadcast;

const EVENT_CAPACITY: usize = 16;

/// HTTP client bound to the backend and the visitor's session.
#[derive(Clone)]
pub struct ApiClient {
    config: ApiConfig,
    session: Session,
    transport: Arc<dyn Transport>,
    events: broadcast::Sender<SessionEvent>,
}

impl ApiClient {
    /// Create a client over a `reqwest` transport.
    pub fn new(config: ApiConfig, session: Session) -> Result<Self, FetchError> {
        let transport = ReqwestTransport::new(config.timeout)?;
        Ok(Self::with_transport(config, session, transport))
    }

    /// Create a client over any transport.
    pub fn with_transport(
        config: ApiConfig,
        session: Session,
        transport: impl Transport + 'static,
    ) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            config,
            session,
            transport: Arc::new(transport),
            events,
        }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Listen for session events raised by later calls.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    /// Create a GET request.
    pub fn get(&self, path: &str) -> ClientRequestBuilder<'_> {
        self.request(Method::Get, path)
    }

    /// Create a POST request.
    pub fn post(&self, path: &str) -> ClientRequestBuilder<'_> {
        self.request(Method::Post, path)
    }

    /// Create a PUT request.
    pub fn put(&self, path: &str) -> ClientRequestBuilder<'_> {
        self.request(Method::Put, path)
    }

    /// Create a DELETE request.
    pub fn delete(&self, path: &str) -> ClientRequestBuilder<'_> {
        self.request(Method::Delete, path)
    }

    /// Create a request with a custom method.
    pub fn request(&self, method: Method, path: &str) -> ClientRequestBuilder<'_> {
        ClientRequestBuilder {
            client: self,
            builder: RequestBuilder::new(method, self.config.url(path)),
        }
    }

    /// Run a request through both pipeline stages.
    pub async fn execute(&self, request: RequestBuilder) -> Result<Response, FetchError> {
        let request = self.prepare(request);
        let method = request.method();
        let url = request.url().to_string();
        tracing::debug!(method = method.as_str(), url = %url, "sending request");

        let response = match self.transport.send(request).await {
            Ok(response) => response,
            Err(e) => {
                tracing::debug!(method = method.as_str(), url = %url, error = %e, "request failed");
                return Err(e);
            }
        };
        tracing::debug!(
            method = method.as_str(),
            url = %url,
            status = response.status,
            "response received"
        );

        if response.is_unauthorized() {
            self.expire_session();
        }
        response.error_for_status()
    }

    fn prepare(&self, request: RequestBuilder) -> RequestBuilder {
        let request = if request.header_value("Content-Type").is_none() {
            request.content_type("application/json")
        } else {
            request
        };
        match self.session.bearer() {
            Some(bearer) => request.header("Authorization", bearer),
            None => request,
        }
    }

    fn expire_session(&self) {
        match self.session.clear() {
            Ok(_) => tracing::warn!("credential rejected by backend, session cleared"),
            Err(e) => tracing::warn!(error = %e, "credential rejected but could not be cleared"),
        }
        // No subscriber is not an error
        let _ = self.events.send(SessionEvent::login_required());
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("config", &self.config)
            .field("session", &self.session)
            .finish()
    }
}

/// A request builder bound to a client.
pub struct ClientRequestBuilder<'a> {
    client: &'a ApiClient,
    builder: RequestBuilder,
}

impl<'a> ClientRequestBuilder<'a> {
    /// Add a header to the request.
    pub fn header(mut self, key: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.builder = self.builder.header(key, value);
        self
    }

    /// Set the request body as JSON.
    pub fn json<T: Serialize + ?Sized>(mut self, value: &T) -> Result<Self, FetchError> {
        self.builder = self.builder.json(value)?;
        Ok(self)
    }

    /// Send the request through the pipeline.
    pub async fn send(self) -> Result<Response, FetchError> {
        self.client.execute(self.builder).await
    }

    /// Send and parse a JSON body.
    pub async fn send_json<T: DeserializeOwned>(self) -> Result<T, FetchError> {
        self.send().await?.json()
    }
}
