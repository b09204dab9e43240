//! OpenStack detection, including OpenStack-based public clouds.

use crate::detection::{confirmed, read_vendor_file, MetadataClient, ProbeError};
use crate::{Provider, ProviderId};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::debug;

const METADATA_URL: &str = "http://169.254.169.254/openstack/";
const PRODUCT_NAME_FILE: &str = "/sys/class/dmi/id/product_name";
const CHASSIS_ASSET_TAG_FILE: &str = "/sys/class/dmi/id/chassis_asset_tag";
const IDENTIFIER: ProviderId = ProviderId::OpenStack;

const PRODUCT_NAMES: &[&str] = &["OpenStack Nova", "OpenStack Compute"];
const CHASSIS_ASSET_TAGS: &[&str] = &[
    "HUAWEICLOUD",
    "OpenTelekomCloud",
    "SAP CCloud VM",
    "OpenStack Nova",
    "OpenStack Compute",
];

/// Detects OpenStack instances through the OpenStack metadata root, the DMI
/// product name or the DMI chassis asset tag. File contents must match one of
/// the known values exactly, ignoring surrounding whitespace.
#[derive(Debug)]
pub struct OpenStack {
    client: MetadataClient,
    metadata_url: String,
    product_name_file: PathBuf,
    chassis_asset_tag_file: PathBuf,
}

impl Default for OpenStack {
    fn default() -> Self {
        Self {
            client: MetadataClient::new(),
            metadata_url: METADATA_URL.to_string(),
            product_name_file: PathBuf::from(PRODUCT_NAME_FILE),
            chassis_asset_tag_file: PathBuf::from(CHASSIS_ASSET_TAG_FILE),
        }
    }
}

impl OpenStack {
    async fn check_metadata_server(&self) -> Result<bool, ProbeError> {
        debug!(provider = %IDENTIFIER, url = %self.metadata_url, "Checking metadata server");
        self.client.get(&self.metadata_url, &[]).await?;
        Ok(true)
    }

    async fn check_file(path: &Path, known: &[&str]) -> Result<bool, ProbeError> {
        let content = read_vendor_file(path).await?;
        Ok(known.contains(&content.trim()))
    }
}

#[async_trait]
impl Provider for OpenStack {
    fn identifier(&self) -> ProviderId {
        IDENTIFIER
    }

    async fn identify(&self) -> bool {
        confirmed(IDENTIFIER, "metadata server", self.check_metadata_server().await)
            || confirmed(
                IDENTIFIER,
                "product name file",
                Self::check_file(&self.product_name_file, PRODUCT_NAMES).await,
            )
            || confirmed(
                IDENTIFIER,
                "chassis asset tag file",
                Self::check_file(&self.chassis_asset_tag_file, CHASSIS_ASSET_TAGS).await,
            )
    }
}
