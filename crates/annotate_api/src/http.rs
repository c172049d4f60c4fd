//! HTTP transport for the persistence service.
//!
//! Wraps the service's JSON endpoints using [`reqwest`].

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::model::{Comment, Line, Page};
use crate::store::{Method, Reply, Request, Store};

/// HTTP client for one persistence service instance.
#[derive(Debug, Clone)]
pub struct HttpStore {
    client: reqwest::Client,
    api_url: String,
}

impl HttpStore {
    /// Create a client for a service.
    ///
    /// * `api_url` - Base HTTP URL, e.g. `http://localhost:8000`.
    pub fn new(api_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), api_url)
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, api_url: impl Into<String>) -> Self {
        let api_url = api_url.into().trim_end_matches('/').to_string();
        Self { client, api_url }
    }

    /// Base URL requests are resolved against.
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Absolute URL for a path.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_url, path)
    }

    fn builder(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let url = self.url(path);
        match method {
            Method::Get => self.client.get(url),
            Method::Post => self.client.post(url),
            Method::Patch => self.client.patch(url),
            Method::Delete => self.client.delete(url),
        }
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    /// Parse a successful JSON response body into the expected type.
    async fn parse_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
        let response = Self::ensure_success(response).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl Store for HttpStore {
    async fn execute(&self, request: &Request) -> Result<Reply, ApiError> {
        let path = request.path();
        log::debug!("{:?} {}", request.method(), path);

        let mut builder = self.builder(request.method(), &path);
        if let Some(body) = request.body()? {
            builder = builder.json(&body);
        }
        let response = builder.send().await?;

        match request {
            Request::ListComments { .. } => {
                let comments: Vec<Comment> = Self::parse_response(response).await?;
                Ok(Reply::Comments(comments))
            }
            Request::CreateComment { .. } | Request::UpdateComment { .. } => {
                Ok(Reply::Comment(Self::parse_response(response).await?))
            }
            Request::ListLines { .. } => {
                let lines: Vec<Line> = Self::parse_response(response).await?;
                Ok(Reply::Lines(lines))
            }
            Request::CreateLine { .. } => Ok(Reply::Line(Self::parse_response(response).await?)),
            Request::DeleteComment { .. } | Request::DeleteLine { .. } => {
                Self::ensure_success(response).await?;
                Ok(Reply::Deleted)
            }
        }
    }

    async fn list_pages(&self, project_id: &str) -> Result<Vec<Page>, ApiError> {
        let response = self
            .builder(Method::Get, &format!("/projects/{project_id}/pages"))
            .send()
            .await?;
        Self::parse_response(response).await
    }
}
