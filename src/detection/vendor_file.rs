//! Reads DMI/vendor identification files exposed by the firmware.

use super::ProbeError;
use std::path::Path;

/// Read a vendor file as text.
///
/// Invalid UTF-8 sequences are replaced, not rejected.
pub(crate) async fn read_vendor_file(path: &Path) -> Result<String, ProbeError> {
    let content = tokio::fs::read(path)
        .await
        .map_err(|source| ProbeError::VendorFile {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(String::from_utf8_lossy(&content).into_owned())
}
