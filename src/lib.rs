//! # cloud-detect
//!
//! Detect which cloud provider, if any, hosts the current process.
//!
//! Detection probes every supported provider concurrently, through its
//! link-local metadata endpoint and its DMI vendor files, and returns the
//! first provider confirmed. If none is confirmed within the timeout (5
//! seconds by default), the result is [`ProviderId::Unknown`]. Detection
//! never fails and never blocks past the timeout.
//!
//! ## Features
//!
//! - `ProviderId` enum naming the supported providers
//! - `detect()` / `detect_with_options()` async functions
//! - `Detector` for running detection over a custom set of probes
//! - `blocking::detect()` for synchronous callers
//!
//! ## Example
//!
//! ```rust,no_run
//! use cloud_detect::{detect, detect_with_options, DetectOptions, ProviderId};
//!
//! #[tokio::main]
//! async fn main() {
//!     // Detect with the default 5 second timeout
//!     let provider = detect().await;
//!     println!("Running on {provider}");
//!
//!     // Detect with a shorter timeout
//!     if detect_with_options(DetectOptions::from_secs(1)).await == ProviderId::Aws {
//!         println!("Hello from EC2");
//!     }
//!
//!     // Every provider that can be detected
//!     for provider in ProviderId::all() {
//!         println!("{}: {}", provider, provider.display_name());
//!     }
//! }
//! ```

pub mod blocking;
mod detect;
mod detection;
mod options;
mod provider;
mod provider_id;
pub mod providers;

pub use detect::{detect, detect_with_options, Detector};
pub use options::{DetectOptions, DEFAULT_DETECTION_TIMEOUT};
pub use provider::{default_providers, Provider};
pub use provider_id::{ProviderId, SUPPORTED_PROVIDERS};
