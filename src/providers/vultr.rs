//! Vultr detection.

use crate::detection::{confirmed, read_vendor_file, MetadataClient, ProbeError};
use crate::{Provider, ProviderId};
use async_trait::async_trait;
use serde::Deserialize;
use std::path::PathBuf;
use tracing::debug;

const METADATA_URL: &str = "http://169.254.169.254/v1.json";
const VENDOR_FILE: &str = "/sys/class/dmi/id/sys_vendor";
const IDENTIFIER: ProviderId = ProviderId::Vultr;

#[derive(Deserialize, Default)]
#[serde(default)]
struct MetadataResponse {
    instanceid: String,
}

#[derive(Debug)]
pub struct Vultr {
    client: MetadataClient,
    metadata_url: String,
    vendor_file: PathBuf,
}

impl Default for Vultr {
    fn default() -> Self {
        Self {
            client: MetadataClient::new(),
            metadata_url: METADATA_URL.to_string(),
            vendor_file: PathBuf::from(VENDOR_FILE),
        }
    }
}

impl Vultr {
    async fn check_metadata_server(&self) -> Result<bool, ProbeError> {
        debug!(provider = %IDENTIFIER, url = %self.metadata_url, "Checking metadata server");
        let metadata: MetadataResponse = self.client.get_json(&self.metadata_url, &[]).await?;
        Ok(!metadata.instanceid.is_empty())
    }

    async fn check_vendor_file(&self) -> Result<bool, ProbeError> {
        let content = read_vendor_file(&self.vendor_file).await?;
        Ok(content.contains("Vultr"))
    }
}

#[async_trait]
impl Provider for Vultr {
    fn identifier(&self) -> ProviderId {
        IDENTIFIER
    }

    async fn identify(&self) -> bool {
        confirmed(IDENTIFIER, "metadata server", self.check_metadata_server().await)
            || confirmed(IDENTIFIER, "vendor file", self.check_vendor_file().await)
    }
}
