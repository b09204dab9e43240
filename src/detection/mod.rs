//! Probe plumbing shared by the provider implementations.
//!
//! - `MetadataClient`: async HTTP access to link-local metadata endpoints
//! - `read_vendor_file`: async read of DMI/vendor identification files
//! - `confirmed`: turns a check result into evidence, logging failures

mod metadata;
mod vendor_file;

pub(crate) use metadata::{HttpClientError, MetadataClient};
pub(crate) use vendor_file::read_vendor_file;

use crate::ProviderId;
use std::path::PathBuf;
use thiserror::Error;
use tracing::debug;

/// Reasons a single check could not produce evidence.
///
/// These never leave a probe; they only end up in debug logs.
#[derive(Error, Debug)]
pub(crate) enum ProbeError {
    /// The metadata endpoint could not be queried.
    #[error("metadata request failed: {0}")]
    Http(#[from] HttpClientError),
    /// The vendor file could not be read.
    #[error("could not read {path:?}: {source}")]
    VendorFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Whether a check confirmed the provider. Errors count as "no evidence".
pub(crate) fn confirmed(provider: ProviderId, check: &str, result: Result<bool, ProbeError>) -> bool {
    match result {
        Ok(true) => {
            debug!(%provider, check, "Evidence found");
            true
        }
        Ok(false) => {
            debug!(%provider, check, "No matching evidence");
            false
        }
        Err(err) => {
            debug!(%provider, check, error = %err, "Check failed");
            false
        }
    }
}
