//! Oracle Cloud Infrastructure detection.

use crate::detection::{confirmed, read_vendor_file, MetadataClient, ProbeError};
use crate::{Provider, ProviderId};
use async_trait::async_trait;
use serde::Deserialize;
use std::path::PathBuf;
use tracing::debug;

const METADATA_URL: &str = "http://169.254.169.254/opc/v1/instance/metadata";
const VENDOR_FILE: &str = "/sys/class/dmi/id/chassis_asset_tag";
const IDENTIFIER: ProviderId = ProviderId::Oci;

#[derive(Deserialize, Default)]
#[serde(default)]
struct MetadataResponse {
    oke_tm: String,
}

/// Detects OCI instances through the OKE marker in the instance metadata or
/// the DMI chassis asset tag.
#[derive(Debug)]
pub struct Oci {
    client: MetadataClient,
    metadata_url: String,
    vendor_file: PathBuf,
}

impl Default for Oci {
    fn default() -> Self {
        Self {
            client: MetadataClient::new(),
            metadata_url: METADATA_URL.to_string(),
            vendor_file: PathBuf::from(VENDOR_FILE),
        }
    }
}

impl Oci {
    async fn check_metadata_server(&self) -> Result<bool, ProbeError> {
        debug!(provider = %IDENTIFIER, url = %self.metadata_url, "Checking metadata server");
        let metadata: MetadataResponse = self.client.get_json(&self.metadata_url, &[]).await?;
        Ok(metadata.oke_tm.contains("oke"))
    }

    async fn check_vendor_file(&self) -> Result<bool, ProbeError> {
        let content = read_vendor_file(&self.vendor_file).await?;
        Ok(content.contains("OracleCloud"))
    }
}

#[async_trait]
impl Provider for Oci {
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

    fn oci(server: &MockServer, vendor_file: PathBuf) -> Oci {
        Oci {
            client: MetadataClient::new(),
            metadata_url: server.url("/opc/v1/instance/metadata"),
            vendor_file,
        }
    }

    #[test]
    fn test_identifier() {
        assert_eq!(Oci::default().identifier(), ProviderId::Oci);
    }

    #[tokio::test]
    async fn test_metadata_server_match() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/opc/v1/instance/metadata");
                then.status(200).body(r#"{"oke_tm": "oke", "oke-k8version": "v1.29.1"}"#);
            })
            .await;

        assert!(oci(&server, missing_file()).identify().await);
    }

    #[tokio::test]
    async fn test_vendor_file_fallback() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/opc/v1/instance/metadata");
                then.status(200).body(r#"{"ssh_authorized_keys": "ssh-ed25519 AAAA"}"#);
            })
            .await;
        let file = vendor_file("OracleCloud.com\n");

        assert!(oci(&server, file.path().to_path_buf()).identify().await);
    }

    #[tokio::test]
    async fn test_no_evidence() {
        let server = MockServer::start_async().await;

        assert!(!oci(&server, missing_file()).identify().await);
    }
}
