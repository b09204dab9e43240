//! Akamai Connected Cloud (Linode) detection.

use crate::detection::{confirmed, MetadataClient, ProbeError};
use crate::{Provider, ProviderId};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

const METADATA_URL: &str = "http://169.254.169.254/v1/instance";
const TOKEN_URL: &str = "http://169.254.169.254/v1/token";
const IDENTIFIER: ProviderId = ProviderId::Akamai;

const TOKEN_HEADER: &str = "metadata-token";
const TOKEN_EXPIRY_HEADER: &str = "metadata-token-expiry-seconds";
const TOKEN_EXPIRY_SECONDS: &str = "60";

#[derive(Deserialize, Default)]
#[serde(default)]
struct Instance {
    id: i64,
    host_uuid: String,
}

/// Detects Akamai instances through the token-protected metadata service.
///
/// Akamai exposes no distinctive DMI vendor string, so there is no file check.
#[derive(Debug)]
pub struct Akamai {
    client: MetadataClient,
    metadata_url: String,
    token_url: String,
}

impl Default for Akamai {
    fn default() -> Self {
        Self {
            client: MetadataClient::new(),
            metadata_url: METADATA_URL.to_string(),
            token_url: TOKEN_URL.to_string(),
        }
    }
}

impl Akamai {
    async fn check_metadata_server(&self) -> Result<bool, ProbeError> {
        debug!(provider = %IDENTIFIER, url = %self.metadata_url, "Checking metadata server");
        let token = self
            .client
            .put_text(&self.token_url, &[(TOKEN_EXPIRY_HEADER, TOKEN_EXPIRY_SECONDS)])
            .await?;

        let instance: Instance = self
            .client
            .get_json(&self.metadata_url, &[(TOKEN_HEADER, token.trim())])
            .await?;
        Ok(instance.id > 0 && !instance.host_uuid.trim().is_empty())
    }
}

#[async_trait]
impl Provider for Akamai {
    fn identifier(&self) -> ProviderId {
        IDENTIFIER
    }

    async fn identify(&self) -> bool {
        confirmed(IDENTIFIER, "metadata server", self.check_metadata_server().await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn akamai(server: &MockServer) -> Akamai {
        Akamai {
            client: MetadataClient::new(),
            metadata_url: server.url("/v1/instance"),
            token_url: server.url("/v1/token"),
        }
    }

    async fn mock_token(server: &MockServer) {
        server
            .mock_async(|when, then| {
                when.method(PUT)
                    .path("/v1/token")
                    .header(TOKEN_EXPIRY_HEADER, TOKEN_EXPIRY_SECONDS);
                then.status(200).body("test_token");
            })
            .await;
    }

    #[test]
    fn test_identifier() {
        assert_eq!(Akamai::default().identifier(), ProviderId::Akamai);
    }

    #[tokio::test]
    async fn test_metadata_server_match() {
        let server = MockServer::start_async().await;
        mock_token(&server).await;
        let metadata_mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/v1/instance")
                    .header(TOKEN_HEADER, "test_token");
                then.status(200).body(
                    r#"{"id": 12345, "host_uuid": "3a2b9f1e6c", "label": "linode12345", "region": "us-ord"}"#,
                );
            })
            .await;

        assert!(akamai(&server).identify().await);
        metadata_mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_blank_host_uuid_is_no_evidence() {
        let server = MockServer::start_async().await;
        mock_token(&server).await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/v1/instance");
                then.status(200).body(r#"{"id": 12345, "host_uuid": "   "}"#);
            })
            .await;

        assert!(!akamai(&server).identify().await);
    }

    #[tokio::test]
    async fn test_token_refused() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(PUT).path("/v1/token");
                then.status(401);
            })
            .await;
        let metadata_mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/v1/instance");
                then.status(200).body(r#"{"id": 1, "host_uuid": "abc"}"#);
            })
            .await;

        assert!(!akamai(&server).identify().await);
        metadata_mock.assert_hits_async(0).await;
    }
}
