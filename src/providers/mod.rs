//! Built-in probes, one per supported cloud provider.
//!
//! Each probe tries its checks in a fixed order (richer metadata protocols
//! first, static vendor files last) and stops at the first match. Endpoints
//! and file paths default to the production values and are only replaced in
//! tests.

mod akamai;
mod alibaba;
mod aws;
mod azure;
mod digitalocean;
mod gcp;
mod oci;
mod openstack;
mod vultr;

pub use akamai::Akamai;
pub use alibaba::Alibaba;
pub use aws::Aws;
pub use azure::Azure;
pub use digitalocean::DigitalOcean;
pub use gcp::Gcp;
pub use oci::Oci;
pub use openstack::OpenStack;
pub use vultr::Vultr;
