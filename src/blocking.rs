//! Synchronous detection for callers without an async runtime.

use crate::{DetectOptions, Detector, ProviderId};
use tracing::error;

/// Detects the hosting provider, blocking the current thread.
///
/// Runs a [`Detector`] over every built-in provider on a private
/// multi-threaded runtime that is shut down before returning.
///
/// # Panics
///
/// Panics if called from within an async runtime, like any blocking call
/// into tokio.
///
/// # Example
///
/// ```rust,no_run
/// use cloud_detect::{blocking, DetectOptions};
///
/// let provider = blocking::detect(DetectOptions::from_secs(1));
/// println!("{provider}");
/// ```
pub fn detect(options: DetectOptions) -> ProviderId {
    detect_with(&Detector::default(), options)
}

pub(crate) fn detect_with(detector: &Detector, options: DetectOptions) -> ProviderId {
    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name("cloud-detect")
        .build()
    {
        Ok(runtime) => runtime,
        Err(err) => {
            error!(error = %err, "Could not start the detection runtime");
            return ProviderId::Unknown;
        }
    };

    let provider = runtime.block_on(detector.detect(options));
    // Abandoned probes are not waited for.
    runtime.shutdown_background();
    provider
}
