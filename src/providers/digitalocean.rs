//! DigitalOcean droplet detection.

use crate::detection::{confirmed, read_vendor_file, MetadataClient, ProbeError};
use crate::{Provider, ProviderId};
use async_trait::async_trait;
use serde::Deserialize;
use std::path::PathBuf;
use tracing::debug;

const METADATA_URL: &str = "http://169.254.169.254/metadata/v1.json";
const VENDOR_FILE: &str = "/sys/class/dmi/id/sys_vendor";
const IDENTIFIER: ProviderId = ProviderId::DigitalOcean;

#[derive(Deserialize, Default)]
#[serde(default)]
struct MetadataResponse {
    droplet_id: u64,
}

/// Detects droplets through the droplet metadata document or the DMI system
/// vendor.
#[derive(Debug)]
pub struct DigitalOcean {
    client: MetadataClient,
    metadata_url: String,
    vendor_file: PathBuf,
}

impl Default for DigitalOcean {
    fn default() -> Self {
        Self {
            client: MetadataClient::new(),
            metadata_url: METADATA_URL.to_string(),
            vendor_file: PathBuf::from(VENDOR_FILE),
        }
    }
}

impl DigitalOcean {
    async fn check_metadata_server(&self) -> Result<bool, ProbeError> {
        debug!(provider = %IDENTIFIER, url = %self.metadata_url, "Checking metadata server");
        let metadata: MetadataResponse = self.client.get_json(&self.metadata_url, &[]).await?;
        Ok(metadata.droplet_id > 0)
    }

    async fn check_vendor_file(&self) -> Result<bool, ProbeError> {
        let content = read_vendor_file(&self.vendor_file).await?;
        Ok(content.contains("DigitalOcean"))
    }
}

#[async_trait]
impl Provider for DigitalOcean {
    fn identifier(&self) -> ProviderId {
        IDENTIFIER
    }

    async fn identify(&self) -> bool {
        confirmed(IDENTIFIER, "metadata server", self.check_metadata_server().await)
            || confirmed(IDENTIFIER, "vendor file", self.check_vendor_file().await)
    }
}
