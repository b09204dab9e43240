//! Microsoft Azure detection.

use crate::detection::{confirmed, read_vendor_file, MetadataClient, ProbeError};
use crate::{Provider, ProviderId};
use async_trait::async_trait;
use serde::Deserialize;
use std::path::PathBuf;
use tracing::debug;

const METADATA_URL: &str = "http://169.254.169.254/metadata/instance?api-version=2017-12-01";
const VENDOR_FILE: &str = "/sys/class/dmi/id/sys_vendor";
const IDENTIFIER: ProviderId = ProviderId::Azure;

const HEADER_KEY: &str = "metadata";
const HEADER_VALUE: &str = "true";

#[derive(Deserialize, Default)]
#[serde(default)]
struct Compute {
    #[serde(rename = "vmId")]
    vm_id: String,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct MetadataResponse {
    compute: Compute,
}

/// Detects Azure virtual machines through the Instance Metadata Service or
/// the DMI system vendor.
#[derive(Debug)]
pub struct Azure {
    client: MetadataClient,
    metadata_url: String,
    vendor_file: PathBuf,
}

impl Default for Azure {
    fn default() -> Self {
        Self {
            client: MetadataClient::new(),
            metadata_url: METADATA_URL.to_string(),
            vendor_file: PathBuf::from(VENDOR_FILE),
        }
    }
}

impl Azure {
    async fn check_metadata_server(&self) -> Result<bool, ProbeError> {
        debug!(provider = %IDENTIFIER, url = %self.metadata_url, "Checking metadata server");
        let metadata: MetadataResponse = self
            .client
            .get_json(&self.metadata_url, &[(HEADER_KEY, HEADER_VALUE)])
            .await?;
        Ok(!metadata.compute.vm_id.is_empty())
    }

    async fn check_vendor_file(&self) -> Result<bool, ProbeError> {
        let content = read_vendor_file(&self.vendor_file).await?;
        Ok(content.contains("Microsoft Corporation"))
    }
}

#[async_trait]
impl Provider for Azure {
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

    fn azure(server: &MockServer, vendor_file: PathBuf) -> Azure {
        Azure {
            client: MetadataClient::new(),
            metadata_url: server.url("/metadata/instance"),
            vendor_file,
        }
    }

    #[test]
    fn test_identifier() {
        assert_eq!(Azure::default().identifier(), ProviderId::Azure);
    }

    #[tokio::test]
    async fn test_metadata_server_match() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/metadata/instance")
                    .header(HEADER_KEY, HEADER_VALUE);
                then.status(200).body(
                    r#"{"compute": {"vmId": "02aab8a4-74ef-476e-8182-f6d2ba4166a6", "location": "westeurope"}}"#,
                );
            })
            .await;

        assert!(azure(&server, missing_file()).identify().await);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_empty_vm_id_is_no_evidence() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/metadata/instance");
                then.status(200).body(r#"{"compute": {}}"#);
            })
            .await;

        assert!(!azure(&server, missing_file()).identify().await);
    }

    #[tokio::test]
    async fn test_vendor_file_fallback() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/metadata/instance");
                then.status(404);
            })
            .await;
        let file = vendor_file("Microsoft Corporation\n");

        assert!(azure(&server, file.path().to_path_buf()).identify().await);
    }

    #[tokio::test]
    async fn test_no_evidence() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/metadata/instance");
                then.status(500);
            })
            .await;
        let file = vendor_file("QEMU\n");

        assert!(!azure(&server, file.path().to_path_buf()).identify().await);
    }
}
