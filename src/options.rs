//! Detection options configuration.
//!
//! This module provides the [`DetectOptions`] struct for configuring
//! cloud provider detection, currently the overall detection timeout.

use std::time::Duration;

/// Default maximum time allowed for a detection call.
pub const DEFAULT_DETECTION_TIMEOUT: Duration = Duration::from_secs(5);

/// Configuration options for cloud provider detection.
///
/// # Default Behavior
///
/// The default timeout is 5 seconds. Detection always returns within the
/// timeout, even when some metadata endpoints never answer, so a shorter
/// timeout trades accuracy on slow networks for a faster answer.
///
/// A zero timeout is treated as "use the default", never as "no timeout".
///
/// # Logging
///
/// Diagnostics are emitted through `tracing`. Install a subscriber (globally
/// or with `tracing::subscriber::with_default`) to see them; without one,
/// detection is silent.
///
/// # Example
///
/// ```rust
/// use cloud_detect::DetectOptions;
/// use std::time::Duration;
///
/// // Use default options (5 second timeout)
/// let opts = DetectOptions::default();
///
/// // Use a custom timeout
/// let opts = DetectOptions::with_timeout(Duration::from_millis(1500));
///
/// // Or in whole seconds
/// let opts = DetectOptions::from_secs(1);
/// assert_eq!(opts.timeout, Duration::from_secs(1));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetectOptions {
    /// Maximum time to wait for any provider to be confirmed.
    ///
    /// Default: 5 seconds
    pub timeout: Duration,
}

impl DetectOptions {
    /// Options with the given timeout.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Options with a timeout expressed in whole seconds.
    pub fn from_secs(seconds: u64) -> Self {
        Self::with_timeout(Duration::from_secs(seconds))
    }

    /// The timeout detection will actually use.
    ///
    /// Falls back to [`DEFAULT_DETECTION_TIMEOUT`] when the configured
    /// timeout is zero.
    pub fn effective_timeout(&self) -> Duration {
        if self.timeout.is_zero() {
            DEFAULT_DETECTION_TIMEOUT
        } else {
            self.timeout
        }
    }
}

impl Default for DetectOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_DETECTION_TIMEOUT,
        }
    }
}
