//! Alibaba Cloud ECS detection.

use crate::detection::{confirmed, read_vendor_file, MetadataClient, ProbeError};
use crate::{Provider, ProviderId};
use async_trait::async_trait;
use std::path::PathBuf;
use tracing::debug;

const METADATA_URL: &str =
    "http://100.100.100.200/latest/meta-data/instance/virtualization-solution";
const VENDOR_FILE: &str = "/sys/class/dmi/id/product_name";
const IDENTIFIER: ProviderId = ProviderId::Alibaba;

/// Detects ECS instances through the virtualization solution reported by the
/// metadata service, or the DMI product name.
#[derive(Debug)]
pub struct Alibaba {
    client: MetadataClient,
    metadata_url: String,
    vendor_file: PathBuf,
}

impl Default for Alibaba {
    fn default() -> Self {
        Self {
            client: MetadataClient::new(),
            metadata_url: METADATA_URL.to_string(),
            vendor_file: PathBuf::from(VENDOR_FILE),
        }
    }
}

impl Alibaba {
    async fn check_metadata_server(&self) -> Result<bool, ProbeError> {
        debug!(provider = %IDENTIFIER, url = %self.metadata_url, "Checking metadata server");
        let body = self.client.get(&self.metadata_url, &[]).await?;
        Ok(String::from_utf8_lossy(&body).contains("ECS Virt"))
    }

    async fn check_vendor_file(&self) -> Result<bool, ProbeError> {
        let content = read_vendor_file(&self.vendor_file).await?;
        Ok(content.contains("Alibaba Cloud ECS"))
    }
}

#[async_trait]
impl Provider for Alibaba {
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

    const PATH: &str = "/latest/meta-data/instance/virtualization-solution";

    fn alibaba(server: &MockServer, vendor_file: PathBuf) -> Alibaba {
        Alibaba {
            client: MetadataClient::new(),
            metadata_url: server.url(PATH),
            vendor_file,
        }
    }

    #[test]
    fn test_identifier() {
        assert_eq!(Alibaba::default().identifier(), ProviderId::Alibaba);
    }

    #[tokio::test]
    async fn test_metadata_server_match() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path(PATH);
                then.status(200).body("ECS Virt");
            })
            .await;

        assert!(alibaba(&server, missing_file()).identify().await);
    }

    #[tokio::test]
    async fn test_vendor_file_fallback() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path(PATH);
                then.status(200).body("KVM");
            })
            .await;
        let file = vendor_file("Alibaba Cloud ECS\n");

        assert!(alibaba(&server, file.path().to_path_buf()).identify().await);
    }

    #[tokio::test]
    async fn test_no_evidence() {
        let server = MockServer::start_async().await;
        let file = vendor_file("Standard PC (Q35 + ICH9, 2009)\n");

        assert!(!alibaba(&server, file.path().to_path_buf()).identify().await);
    }
}
