pub mod envelope;
pub mod error;
pub mod query;

pub use envelope::ApiResponse;
pub use error::ApiError;
pub use query::QueryParams;

use crate::config::Config;
use crate::storage::{ClientStorage, TOKEN_KEY};
use anyhow::{Context, Result};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::multipart::Form;
use reqwest::{Client, Method, Request};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

/// Body attached to an outgoing request
pub enum RequestBody {
    Empty,
    Json(Value),
    /// Content type (with boundary) is set by the HTTP runtime
    Multipart(Form),
}

impl RequestBody {
    /// Serialize any value into a JSON body
    pub fn json<T: Serialize + ?Sized>(body: &T) -> Result<Self, ApiError> {
        serde_json::to_value(body)
            .map(RequestBody::Json)
            .map_err(ApiError::Encode)
    }
}

/// Thin HTTP wrapper shared by every service
///
/// Attaches the stored bearer token, serializes bodies and normalizes every
/// response into an [`ApiResponse`]. No retries, no caching.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    client: Client,
    storage: Arc<dyn ClientStorage>,
}

impl ApiClient {
    /// Create a client for `config.api_url`, reading tokens from `storage`
    pub fn new(config: &Config, storage: Arc<dyn ClientStorage>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            base_url: config.api_url.trim_end_matches('/').to_string(),
            client,
            storage,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn storage(&self) -> &Arc<dyn ClientStorage> {
        &self.storage
    }

    /// Absolute URL for an endpoint path such as `/properties?page=1`
    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// Stored bearer token; storage failures count as "no token"
    pub async fn token(&self) -> Option<String> {
        match self.storage.get(TOKEN_KEY).await {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(e) => {
                warn!("Failed to read auth token from storage: {:#}", e);
                None
            }
        }
    }

    /// Assemble the request without sending it
    pub async fn build_request(
        &self,
        method: Method,
        path: &str,
        body: RequestBody,
    ) -> Result<Request, ApiError> {
        let mut builder = self.client.request(method, self.url(path));

        if let Some(token) = self.token().await {
            builder = builder.header(AUTHORIZATION, format!("Bearer {}", token));
        }

        builder = match body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(&value),
            RequestBody::Multipart(form) => builder.multipart(form),
        };

        Ok(builder.build()?)
    }

    /// Issue a request and wrap the response in an envelope
    ///
    /// Never fails on a non-2xx status; check `success` on the result.
    pub async fn fetch(
        &self,
        method: Method,
        path: &str,
        body: RequestBody,
    ) -> Result<ApiResponse, ApiError> {
        let request = self.build_request(method, path, body).await?;
        debug!("{} {}", request.method(), request.url());

        let response = self.client.execute(request).await?;
        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response.bytes().await?;

        let envelope = ApiResponse::from_parts(status, content_type.as_deref(), &body)?;
        if envelope.success {
            debug!("{} -> {}", path, status);
        } else {
            debug!("{} -> {} ({})", path, status, envelope.error_text());
        }
        Ok(envelope)
    }

    pub async fn get(&self, path: &str) -> Result<ApiResponse, ApiError> {
        self.fetch(Method::GET, path, RequestBody::Empty).await
    }

    pub async fn post<T: Serialize + ?Sized>(&self, path: &str, body: &T) -> Result<ApiResponse, ApiError> {
        self.fetch(Method::POST, path, RequestBody::json(body)?).await
    }

    pub async fn put<T: Serialize + ?Sized>(&self, path: &str, body: &T) -> Result<ApiResponse, ApiError> {
        self.fetch(Method::PUT, path, RequestBody::json(body)?).await
    }

    pub async fn delete(&self, path: &str) -> Result<ApiResponse, ApiError> {
        self.fetch(Method::DELETE, path, RequestBody::Empty).await
    }

    /// POST a multipart form (file uploads)
    pub async fn upload_form(&self, path: &str, form: Form) -> Result<ApiResponse, ApiError> {
        self.fetch(Method::POST, path, RequestBody::Multipart(form)).await
    }
}
