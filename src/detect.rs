//! Cloud provider detection.
//!
//! [`Detector`] races one probe per registered provider against a single
//! deadline and returns the first provider confirmed, or
//! [`ProviderId::Unknown`].

use crate::provider::default_providers;
use crate::{DetectOptions, Provider, ProviderId};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::time;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn, Instrument};

/// Races a fixed set of provider probes against a deadline.
///
/// The registry is built once and never modified; each call to
/// [`detect`](Detector::detect) starts fresh and keeps no history.
///
/// # Concurrency
///
/// Every probe runs in its own tokio task, so a probe blocked on a slow
/// endpoint does not delay its siblings. All probes share one cancellation
/// token that fires when the call returns, for whatever reason. Cancellation
/// is cooperative: a probe stops at its next `.await`, and may briefly outlive
/// the call that started it.
///
/// # Example
///
/// ```rust,no_run
/// use cloud_detect::{DetectOptions, Detector};
///
/// #[tokio::main]
/// async fn main() {
///     let detector = Detector::default();
///     let provider = detector.detect(DetectOptions::from_secs(1)).await;
///     println!("Running on {provider}");
/// }
/// ```
#[derive(Clone)]
pub struct Detector {
    providers: HashMap<ProviderId, Arc<dyn Provider>>,
}

impl Detector {
    /// Creates a detector over the given probes.
    ///
    /// Probes are keyed by their [`identifier`](Provider::identifier); when
    /// two probes share an identifier, the later one replaces the earlier.
    pub fn new(providers: impl IntoIterator<Item = Arc<dyn Provider>>) -> Self {
        Self {
            providers: providers
                .into_iter()
                .map(|provider| (provider.identifier(), provider))
                .collect(),
        }
    }

    /// Identifiers of the registered probes, in no particular order.
    pub fn providers(&self) -> impl Iterator<Item = ProviderId> + '_ {
        self.providers.keys().copied()
    }

    /// Detects the provider hosting the current process.
    ///
    /// # Detection Process
    ///
    /// 1. Resolve the timeout (zero means the default)
    /// 2. Spawn one task per probe, all sharing one cancellation token
    /// 3. Return the first identifier any probe reports
    /// 4. Return `Unknown` when every probe finished without a match, or the
    ///    timeout elapsed first
    ///
    /// When several probes match, whichever reports first wins.
    ///
    /// Never fails and never waits much past the timeout.
    #[instrument(skip_all)]
    pub async fn detect(&self, options: DetectOptions) -> ProviderId {
        let timeout = options.effective_timeout();
        let cancel = CancellationToken::new();
        // Stops outstanding probes on every exit path, including when this
        // future is dropped by the caller.
        let _cancel_on_exit = cancel.clone().drop_guard();

        // Capacity 1: the first result is kept, later ones are discarded.
        let (tx, mut rx) = mpsc::channel(1);

        for (&id, provider) in &self.providers {
            debug!(provider = %id, "Starting detection routine");
            tokio::spawn(
                run_probe(Arc::clone(provider), tx.clone(), cancel.clone()).in_current_span(),
            );
        }
        // The channel closes once every probe task has finished.
        drop(tx);

        match time::timeout(timeout, rx.recv()).await {
            Ok(Some(provider)) => {
                info!(%provider, "Detected cloud service provider");
                provider
            }
            Ok(None) => {
                info!("No cloud service provider detected");
                ProviderId::Unknown
            }
            Err(_) => {
                warn!(?timeout, "Detection timed out");
                ProviderId::Unknown
            }
        }
    }
}

impl Default for Detector {
    /// A detector over every built-in provider.
    fn default() -> Self {
        Self::new(default_providers())
    }
}

impl fmt::Debug for Detector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Detector")
            .field("providers", &self.providers.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Runs a single probe until it finishes or detection is cancelled.
async fn run_probe(
    provider: Arc<dyn Provider>,
    tx: mpsc::Sender<ProviderId>,
    cancel: CancellationToken,
) {
    let id = provider.identifier();

    let found = tokio::select! {
        biased;
        _ = cancel.cancelled() => {
            debug!(provider = %id, "Detection routine cancelled");
            return;
        }
        found = provider.identify() => found,
    };

    if !found || cancel.is_cancelled() {
        return;
    }

    match tx.try_send(id) {
        Ok(()) => {}
        Err(TrySendError::Full(_)) => {
            debug!(provider = %id, "Another provider was reported first, discarding result");
        }
        Err(TrySendError::Closed(_)) => {
            debug!(provider = %id, "Detection already finished, discarding result");
        }
    }
}

/// Detects the provider hosting the current process with default options.
///
/// Builds a [`Detector`] over every built-in provider and waits at most
/// [`DEFAULT_DETECTION_TIMEOUT`](crate::DEFAULT_DETECTION_TIMEOUT).
///
/// # Example
///
/// ```rust,no_run
/// use cloud_detect::{detect, ProviderId};
///
/// #[tokio::main]
/// async fn main() {
///     match detect().await {
///         ProviderId::Unknown => println!("Not running on a known cloud"),
///         provider => println!("Running on {}", provider.display_name()),
///     }
/// }
/// ```
pub async fn detect() -> ProviderId {
    detect_with_options(DetectOptions::default()).await
}

/// Detects the provider hosting the current process with custom options.
///
/// # Example
///
/// ```rust,no_run
/// use cloud_detect::{detect_with_options, DetectOptions};
///
/// #[tokio::main]
/// async fn main() {
///     let provider = detect_with_options(DetectOptions::from_secs(1)).await;
///     println!("{provider}");
/// }
/// ```
pub async fn detect_with_options(options: DetectOptions) -> ProviderId {
    Detector::default().detect(options).await
}
