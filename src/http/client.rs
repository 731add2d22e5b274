//! Campus API client.
//!
//! # Responsibilities
//! - Own one [`reqwest::Client`], one [`SessionStore`], and one
//!   [`InFlightRegistry`]; no ambient state anywhere
//! - Run every request through the full pipeline: fingerprint check,
//!   header attachment, dispatch, response normalization
//!
//! # Data Flow
//! ```text
//! request(method, path, body)
//!     → serialize body once (fingerprint and wire share the bytes)
//!     → dedup: registry.begin → guard, or DuplicateSuppressed
//!     → attach bearer token + x-request-id
//!     → send over reqwest
//!     → normalize: 401 → expire session, else hand back
//!     → guard drops (settlement frees the fingerprint)
//! ```
//!
//! # Design Decisions
//! - Suppressed duplicates return an error without touching the network;
//!   nothing in this crate retries
//! - The client is `Clone`; clones share the session and the registry

use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, Response, Url};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::broadcast;

use crate::config::ClientConfig;
use crate::dedup::{self, Fingerprint, InFlightRegistry};
use crate::http::request;
use crate::http::response;
use crate::http::types::{ClientError, ClientResult};
use crate::observability::metrics;
use crate::session::{SessionEvent, SessionStore};

/// HTTP client for the campus backend.
///
/// Construct one per application and share it; clones are cheap and share
/// the credential store and the in-flight registry.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    session: Arc<SessionStore>,
    registry: InFlightRegistry,
    dedup_enabled: bool,
}

impl ApiClient {
    /// Build a client from configuration, creating its own session store.
    ///
    /// When `session.token_file` is set, a persisted credential is loaded
    /// from it.
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let session = match &config.session.token_file {
            Some(path) => SessionStore::with_token_file(path),
            None => SessionStore::new(),
        };
        Self::with_session(config, Arc::new(session))
    }

    /// Build a client around an existing session store.
    ///
    /// Lets several clients (or tests) share one credential.
    pub fn with_session(config: &ClientConfig, session: Arc<SessionStore>) -> ClientResult<Self> {
        let base_url = Url::parse(&config.api.base_url)
            .map_err(|e| ClientError::InvalidBaseUrl(format!("{}: {}", config.api.base_url, e)))?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.api.request_timeout_secs))
            .connect_timeout(Duration::from_secs(config.api.connect_timeout_secs))
            .user_agent(config.api.user_agent.as_str())
            .build()?;

        Ok(Self {
            http,
            base_url,
            session,
            registry: InFlightRegistry::new(Duration::from_millis(config.dedup.grace_window_ms)),
            dedup_enabled: config.dedup.enabled,
        })
    }

    /// The session store backing this client.
    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    /// Subscribe to session lifecycle events.
    ///
    /// The application decides what expiry means (typically: navigate to the
    /// login view); this crate only reports it.
    pub fn subscribe_session_events(&self) -> broadcast::Receiver<SessionEvent> {
        self.session.subscribe()
    }

    /// GET `path` relative to the base URL.
    pub async fn get(&self, path: &str) -> ClientResult<Response> {
        self.request::<()>(Method::GET, path, None).await
    }

    /// DELETE `path` relative to the base URL.
    pub async fn delete(&self, path: &str) -> ClientResult<Response> {
        self.request::<()>(Method::DELETE, path, None).await
    }

    /// POST a JSON body to `path`.
    pub async fn post<B>(&self, path: &str, body: &B) -> ClientResult<Response>
    where
        B: Serialize + ?Sized,
    {
        self.request(Method::POST, path, Some(body)).await
    }

    /// PUT a JSON body to `path`.
    pub async fn put<B>(&self, path: &str, body: &B) -> ClientResult<Response>
    where
        B: Serialize + ?Sized,
    {
        self.request(Method::PUT, path, Some(body)).await
    }

    /// PATCH a JSON body to `path`. PATCH is outside the dedup allow-list
    /// and always transmits.
    pub async fn patch<B>(&self, path: &str, body: &B) -> ClientResult<Response>
    where
        B: Serialize + ?Sized,
    {
        self.request(Method::PATCH, path, Some(body)).await
    }

    /// Dispatch one request through the full pipeline.
    ///
    /// `path` is joined onto the configured base URL and may carry a query
    /// string. A `Some` body is serialized to JSON exactly once; the same
    /// bytes feed the fingerprint and the wire.
    pub async fn request<B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> ClientResult<Response>
    where
        B: Serialize + ?Sized,
    {
        let url = self
            .base_url
            .join(path)
            .map_err(|e| ClientError::InvalidPath(format!("{}: {}", path, e)))?;

        let body_bytes = match body {
            Some(value) => Some(serde_json::to_vec(value)?),
            None => None,
        };

        // Held until this call settles; dropping it frees the fingerprint.
        let _in_flight = if self.dedup_enabled && dedup::applies_to(&method) {
            let fingerprint = Fingerprint::derive(&method, path, body_bytes.as_deref());
            match self.registry.begin(&fingerprint) {
                Some(guard) => Some(guard),
                None => {
                    metrics::record_suppressed(method.as_str());
                    tracing::debug!(
                        fingerprint = %fingerprint,
                        "Suppressing duplicate in-flight request"
                    );
                    return Err(ClientError::DuplicateSuppressed {
                        fingerprint: fingerprint.to_string(),
                    });
                }
            }
        } else {
            None
        };

        let mut builder = self.http.request(method.clone(), url);
        if let Some(bytes) = body_bytes {
            builder = builder.header(CONTENT_TYPE, "application/json").body(bytes);
        }
        let (builder, request_id) = request::attach_headers(builder, &self.session);

        tracing::debug!(
            request_id = %request_id,
            method = %method,
            path = %path,
            "Dispatching request"
        );
        let start = Instant::now();

        match builder.send().await {
            Ok(raw) => response::normalize(raw, &self.session, &method, request_id, start),
            Err(e) => {
                metrics::record_transport_error(method.as_str());
                tracing::error!(request_id = %request_id, error = %e, "Transport failure");
                Err(ClientError::Transport(e))
            }
        }
    }
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url.as_str())
            .field("dedup_enabled", &self.dedup_enabled)
            .field("in_flight", &self.registry.len())
            .finish()
    }
}
