//! Provider identifier enum naming the supported cloud providers.

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

/// Every cloud provider that can be detected, in their canonical order.
///
/// [`ProviderId::Unknown`] is never part of this list.
pub const SUPPORTED_PROVIDERS: [ProviderId; 9] = [
    ProviderId::Akamai,
    ProviderId::Alibaba,
    ProviderId::Aws,
    ProviderId::Azure,
    ProviderId::DigitalOcean,
    ProviderId::Gcp,
    ProviderId::Oci,
    ProviderId::OpenStack,
    ProviderId::Vultr,
];

/// Identifier of a cloud infrastructure provider.
///
/// Each variant names one provider that detection knows how to recognise,
/// plus the [`Unknown`](ProviderId::Unknown) sentinel returned when no
/// provider could be confirmed. The string form is lowercase (`"aws"`,
/// `"digitalocean"`, `"unknown"`, ...), both for `Display`/`FromStr` and for
/// serde.
///
/// # Example
///
/// ```rust
/// use cloud_detect::ProviderId;
///
/// assert_eq!(ProviderId::Aws.to_string(), "aws");
/// assert_eq!("openstack".parse::<ProviderId>().unwrap(), ProviderId::OpenStack);
///
/// // The sentinel is never part of the supported list
/// assert!(ProviderId::all().all(|id| !id.is_unknown()));
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum::EnumIter,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ProviderId {
    /// Akamai Connected Cloud (formerly Linode)
    Akamai,
    /// Alibaba Cloud
    Alibaba,
    /// Amazon Web Services
    Aws,
    /// Microsoft Azure
    Azure,
    /// DigitalOcean
    DigitalOcean,
    /// Google Cloud Platform
    Gcp,
    /// Oracle Cloud Infrastructure
    Oci,
    /// OpenStack, including OpenStack-based public clouds
    OpenStack,
    /// Vultr
    Vultr,
    /// No provider could be identified.
    #[default]
    Unknown,
}

impl ProviderId {
    /// Human-readable name of the provider.
    ///
    /// # Example
    ///
    /// ```rust
    /// use cloud_detect::ProviderId;
    ///
    /// assert_eq!(ProviderId::Gcp.display_name(), "Google Cloud Platform");
    /// ```
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Akamai => "Akamai",
            Self::Alibaba => "Alibaba Cloud",
            Self::Aws => "Amazon Web Services",
            Self::Azure => "Microsoft Azure",
            Self::DigitalOcean => "DigitalOcean",
            Self::Gcp => "Google Cloud Platform",
            Self::Oci => "Oracle Cloud Infrastructure",
            Self::OpenStack => "OpenStack",
            Self::Vultr => "Vultr",
            Self::Unknown => "Unknown",
        }
    }

    /// Whether this is the "no provider identified" sentinel.
    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown)
    }

    /// Iterator over all real providers, excluding the sentinel.
    ///
    /// ```rust
    /// use cloud_detect::ProviderId;
    ///
    /// assert_eq!(ProviderId::all().count(), 9);
    /// ```
    pub fn all() -> impl Iterator<Item = Self> {
        <Self as IntoEnumIterator>::iter().filter(|id| !id.is_unknown())
    }
}
