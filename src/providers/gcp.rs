//! Google Cloud Platform detection.

use crate::detection::{confirmed, read_vendor_file, MetadataClient, ProbeError};
use crate::{Provider, ProviderId};
use async_trait::async_trait;
use std::path::PathBuf;
use tracing::debug;

const METADATA_URL: &str = "http://metadata.google.internal/computeMetadata/v1/instance/tags";
const VENDOR_FILE: &str = "/sys/class/dmi/id/product_name";
const IDENTIFIER: ProviderId = ProviderId::Gcp;

const HEADER_KEY: &str = "metadata-flavor";
const HEADER_VALUE: &str = "Google";

/// Detects Compute Engine instances. Any successful answer from the metadata
/// server counts as evidence.
#[derive(Debug)]
pub struct Gcp {
    client: MetadataClient,
    metadata_url: String,
    vendor_file: PathBuf,
}

impl Default for Gcp {
    fn default() -> Self {
        Self {
            client: MetadataClient::new(),
            metadata_url: METADATA_URL.to_string(),
            vendor_file: PathBuf::from(VENDOR_FILE),
        }
    }
}

impl Gcp {
    async fn check_metadata_server(&self) -> Result<bool, ProbeError> {
        debug!(provider = %IDENTIFIER, url = %self.metadata_url, "Checking metadata server");
        self.client
            .get(&self.metadata_url, &[(HEADER_KEY, HEADER_VALUE)])
            .await?;
        Ok(true)
    }

    async fn check_vendor_file(&self) -> Result<bool, ProbeError> {
        let content = read_vendor_file(&self.vendor_file).await?;
        Ok(content.contains("Google"))
    }
}

#[async_trait]
impl Provider for Gcp {
    fn identifier(&self) -> ProviderId {
        IDENTIFIER
    }

    async fn identify(&self) -> bool {
        confirmed(IDENTIFIER, "metadata server", self.check_metadata_server().await)
            || confirmed(IDENTIFIER, "vendor file", self.check_vendor_file().await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::test_support::{missing_file, vendor_file};
    use httpmock::prelude::*;

    const PATH: &str = "/computeMetadata/v1/instance/tags";

    fn gcp(server: &MockServer, vendor_file: PathBuf) -> Gcp {
        Gcp {
            client: MetadataClient::new(),
            metadata_url: server.url(PATH),
            vendor_file,
        }
    }

    #[test]
    fn test_identifier() {
        assert_eq!(Gcp::default().identifier(), ProviderId::Gcp);
    }

    #[tokio::test]
    async fn test_metadata_server_match() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path(PATH).header(HEADER_KEY, HEADER_VALUE);
                then.status(200).body(r#"["http-server","https-server"]"#);
            })
            .await;

        assert!(gcp(&server, missing_file()).identify().await);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_vendor_file_fallback() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path(PATH);
                then.status(403);
            })
            .await;
        let file = vendor_file("Google Compute Engine\n");

        assert!(gcp(&server, file.path().to_path_buf()).identify().await);
    }

    #[tokio::test]
    async fn test_no_evidence() {
        let server = MockServer::start_async().await;
        let file = vendor_file("VirtualBox\n");

        assert!(!gcp(&server, file.path().to_path_buf()).identify().await);
    }
}
