//! Amazon Web Services EC2 detection.

use crate::detection::{confirmed, read_vendor_file, MetadataClient, ProbeError};
use crate::{Provider, ProviderId};
use async_trait::async_trait;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// The default AWS instance identity document endpoint.
const METADATA_URL: &str = "http://169.254.169.254/latest/dynamic/instance-identity/document";
/// The default AWS instance metadata token endpoint.
const TOKEN_URL: &str = "http://169.254.169.254/latest/api/token";
const PRODUCT_VERSION_FILE: &str = "/sys/class/dmi/id/product_version";
const BIOS_VENDOR_FILE: &str = "/sys/class/dmi/id/bios_vendor";
const IDENTIFIER: ProviderId = ProviderId::Aws;

const TOKEN_HEADER: &str = "x-aws-ec2-metadata-token";
const TTL_TOKEN_HEADER: &str = "x-aws-ec2-metadata-token-ttl-seconds";
const TTL_TOKEN_SECONDS: &str = "60";

#[derive(Deserialize, Default)]
#[serde(default)]
struct IdentityDocument {
    #[serde(rename = "imageId")]
    image_id: String,
    #[serde(rename = "instanceId")]
    instance_id: String,
}

impl IdentityDocument {
    fn is_ec2(&self) -> bool {
        self.image_id.starts_with("ami-") && self.instance_id.starts_with("i-")
    }
}

/// Detects EC2 instances.
///
/// Tries IMDSv2 (session token) first, then IMDSv1, then the DMI product
/// version and BIOS vendor files.
#[derive(Debug)]
pub struct Aws {
    client: MetadataClient,
    metadata_url: String,
    token_url: String,
    product_version_file: PathBuf,
    bios_vendor_file: PathBuf,
}

impl Default for Aws {
    fn default() -> Self {
        Self {
            client: MetadataClient::new(),
            metadata_url: METADATA_URL.to_string(),
            token_url: TOKEN_URL.to_string(),
            product_version_file: PathBuf::from(PRODUCT_VERSION_FILE),
            bios_vendor_file: PathBuf::from(BIOS_VENDOR_FILE),
        }
    }
}

impl Aws {
    async fn check_metadata_server_v2(&self) -> Result<bool, ProbeError> {
        debug!(provider = %IDENTIFIER, url = %self.token_url, "Requesting IMDSv2 token");
        let token = self
            .client
            .put_text(&self.token_url, &[(TTL_TOKEN_HEADER, TTL_TOKEN_SECONDS)])
            .await?;

        let document: IdentityDocument = self
            .client
            .get_json(&self.metadata_url, &[(TOKEN_HEADER, token.trim())])
            .await?;
        Ok(document.is_ec2())
    }

    async fn check_metadata_server_v1(&self) -> Result<bool, ProbeError> {
        debug!(provider = %IDENTIFIER, url = %self.metadata_url, "Checking IMDSv1 metadata");
        let document: IdentityDocument = self.client.get_json(&self.metadata_url, &[]).await?;
        Ok(document.is_ec2())
    }

    async fn check_amazon_file(path: &Path) -> Result<bool, ProbeError> {
        let content = read_vendor_file(path).await?;
        Ok(content.to_lowercase().contains("amazon"))
    }
}

#[async_trait]
impl Provider for Aws {
    fn identifier(&self) -> ProviderId {
        IDENTIFIER
    }

    async fn identify(&self) -> bool {
        confirmed(IDENTIFIER, "IMDSv2", self.check_metadata_server_v2().await)
            || confirmed(IDENTIFIER, "IMDSv1", self.check_metadata_server_v1().await)
            || confirmed(
                IDENTIFIER,
                "product version file",
                Self::check_amazon_file(&self.product_version_file).await,
            )
            || confirmed(
                IDENTIFIER,
                "bios vendor file",
                Self::check_amazon_file(&self.bios_vendor_file).await,
            )
    }
}
