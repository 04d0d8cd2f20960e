//! Boundary with the Zipic application itself.
//!
//! Both calls are single-shot: no retries and no timeouts. Failures to even
//! start the helper process are logged and reported as "not available" or
//! "rejected".

use std::future::Future;
use std::process::Stdio;

use tokio::process::Command;
use tracing::{debug, info, warn};

/// Answers whether Zipic is installed on this host.
pub trait CapabilityGuard {
    fn is_available(&self) -> impl Future<Output = bool> + Send;
}

/// Hands a deep-link URI to the host so it reaches Zipic.
pub trait Dispatcher {
    /// `true` when the host accepted the URI for delivery. This does not
    /// wait for Zipic to finish compressing.
    fn dispatch(&self, uri: &str) -> impl Future<Output = bool> + Send;
}

/// Looks Zipic up in the Spotlight index by bundle identifier.
#[derive(Debug, Clone)]
pub struct HostCapabilityGuard {
    bundle_id: String,
}

impl HostCapabilityGuard {
    pub fn new(bundle_id: impl Into<String>) -> Self {
        Self {
            bundle_id: bundle_id.into(),
        }
    }

    fn query(&self) -> String {
        format!(
            "kMDItemCFBundleIdentifier == '{}'",
            self.bundle_id.replace('\'', "")
        )
    }
}

impl CapabilityGuard for HostCapabilityGuard {
    async fn is_available(&self) -> bool {
        if !cfg!(target_os = "macos") {
            debug!("Zipic is only available on macOS");
            return false;
        }

        let output = Command::new("mdfind")
            .arg(self.query())
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .output()
            .await;

        match output {
            Ok(output) => {
                let found = output.status.success()
                    && !String::from_utf8_lossy(&output.stdout).trim().is_empty();
                debug!(bundle_id = %self.bundle_id, found, "Checked for Zipic");
                found
            }
            Err(e) => {
                warn!(error = %e, "Failed to run mdfind");
                false
            }
        }
    }
}

/// Opens the URI with the platform opener (`open` on macOS).
#[derive(Debug, Clone, Default)]
pub struct HostDispatcher;

impl HostDispatcher {
    fn opener() -> &'static str {
        if cfg!(target_os = "macos") {
            "open"
        } else {
            "xdg-open"
        }
    }
}

impl Dispatcher for HostDispatcher {
    async fn dispatch(&self, uri: &str) -> bool {
        info!(%uri, "Dispatching request to Zipic");

        let status = Command::new(Self::opener())
            .arg(uri)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await;

        match status {
            Ok(status) if status.success() => true,
            Ok(status) => {
                warn!(%status, "Opener rejected the request");
                false
            }
            Err(e) => {
                warn!(error = %e, opener = Self::opener(), "Failed to run opener");
                false
            }
        }
    }
}
