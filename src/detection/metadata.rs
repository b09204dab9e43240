//! Async HTTP client for link-local metadata endpoints.

use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::warn;

/// An enumeration of potential errors related to the HTTP client.
#[derive(Error, Debug)]
pub(crate) enum HttpClientError {
    /// The request could not be sent or the body could not be received.
    #[error("transport HTTP client error: `{0}`")]
    TransportError(#[from] reqwest::Error),
    /// The endpoint answered with a non-success status.
    #[error("status code: `{0}`, reason: `{1}`")]
    ResponseError(u16, String),
    /// The body was not the expected JSON document.
    #[error("could not decode response body: `{0}`")]
    DecodeError(#[from] serde_json::Error),
    /// The body was expected to be text but was not valid UTF-8.
    #[error("response body is not valid UTF-8")]
    InvalidUtf8,
    /// The underlying HTTP client could not be built.
    #[error("HTTP client is unavailable")]
    ClientUnavailable,
}

/// Thin wrapper around a `reqwest::Client` for metadata queries.
///
/// Proxies are disabled: metadata endpoints are link-local and must never be
/// reached through an HTTP proxy configured in the environment.
///
/// If the client cannot be built every request fails with
/// [`HttpClientError::ClientUnavailable`].
#[derive(Debug, Clone)]
pub(crate) struct MetadataClient {
    client: Option<Client>,
}

impl MetadataClient {
    pub(crate) fn new() -> Self {
        let client = match Client::builder().no_proxy().build() {
            Ok(client) => Some(client),
            Err(err) => {
                warn!(error = %err, "Could not build the metadata HTTP client");
                None
            }
        };
        Self { client }
    }

    /// GET `url` and return the raw body of a successful response.
    pub(crate) async fn get(
        &self,
        url: &str,
        headers: &[(&str, &str)],
    ) -> Result<Vec<u8>, HttpClientError> {
        self.send(Method::GET, url, headers).await
    }

    /// GET `url` and decode the body as JSON.
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        headers: &[(&str, &str)],
    ) -> Result<T, HttpClientError> {
        let body = self.get(url, headers).await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// PUT an empty body to `url` and return the response as text.
    ///
    /// Used to obtain session tokens from token-protected metadata services.
    pub(crate) async fn put_text(
        &self,
        url: &str,
        headers: &[(&str, &str)],
    ) -> Result<String, HttpClientError> {
        let body = self.send(Method::PUT, url, headers).await?;
        String::from_utf8(body).map_err(|_| HttpClientError::InvalidUtf8)
    }

    async fn send(
        &self,
        method: Method,
        url: &str,
        headers: &[(&str, &str)],
    ) -> Result<Vec<u8>, HttpClientError> {
        let client = self
            .client
            .as_ref()
            .ok_or(HttpClientError::ClientUnavailable)?;
        let mut request = client.request(method, url);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }

        let response = request.send().await?;

        // return error if status code is not within 200-299.
        let status = response.status();
        if !status.is_success() {
            return Err(HttpClientError::ResponseError(
                status.as_u16(),
                status.canonical_reason().unwrap_or_default().to_string(),
            ));
        }

        Ok(response.bytes().await?.to_vec())
    }
}

impl Default for MetadataClient {
    fn default() -> Self {
        Self::new()
    }
}
