//! The probe interface implemented once per cloud provider.

use crate::providers::{
    Akamai, Alibaba, Aws, Azure, DigitalOcean, Gcp, Oci, OpenStack, Vultr,
};
use crate::ProviderId;
use async_trait::async_trait;
use std::sync::Arc;

/// A self-contained check routine for one cloud provider.
///
/// Implementations look for provider-specific evidence (a metadata endpoint
/// answering, a DMI vendor file naming the vendor, ...) and report whether
/// any was found. They never fail: every internal error means "no evidence".
///
/// # Cancellation
///
/// [`Detector`](crate::Detector) stops a probe by dropping the future
/// returned by [`identify`](Provider::identify) at its next `.await`. An
/// implementation therefore must not hold anything across an `.await` that
/// needs explicit cleanup, and must not share mutable state with other probes.
///
/// # Example
///
/// ```rust
/// use async_trait::async_trait;
/// use cloud_detect::{Provider, ProviderId};
///
/// struct AlwaysAws;
///
/// #[async_trait]
/// impl Provider for AlwaysAws {
///     fn identifier(&self) -> ProviderId {
///         ProviderId::Aws
///     }
///
///     async fn identify(&self) -> bool {
///         true
///     }
/// }
/// ```
#[async_trait]
pub trait Provider: Send + Sync {
    /// The fixed identifier reported when this probe finds evidence.
    fn identifier(&self) -> ProviderId;

    /// Runs this provider's checks in priority order.
    ///
    /// Returns `true` as soon as one check matches.
    async fn identify(&self) -> bool;
}

/// One probe per supported provider, with production endpoints and paths.
pub fn default_providers() -> Vec<Arc<dyn Provider>> {
    vec![
        Arc::new(Akamai::default()),
        Arc::new(Alibaba::default()),
        Arc::new(Aws::default()),
        Arc::new(Azure::default()),
        Arc::new(DigitalOcean::default()),
        Arc::new(Gcp::default()),
        Arc::new(Oci::default()),
        Arc::new(OpenStack::default()),
        Arc::new(Vultr::default()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SUPPORTED_PROVIDERS;

    #[test]
    fn test_default_providers_cover_supported_list() {
        let ids: Vec<_> = default_providers().iter().map(|p| p.identifier()).collect();
        assert_eq!(ids, SUPPORTED_PROVIDERS.to_vec());
    }
}
