//! Quick and advanced compression, from raw tool arguments to result text.

use serde_json::Value;
use tracing::debug;

use crate::app::{CapabilityGuard, Dispatcher};
use crate::compress::{encode, predict, validate, EncodedRequest};
use crate::error::CompressError;

/// Runs compression requests against one Zipic installation.
#[derive(Debug, Clone)]
pub struct Compressor<G, D> {
    guard: G,
    dispatcher: D,
    scheme: String,
}

impl<G: CapabilityGuard, D: Dispatcher> Compressor<G, D> {
    pub fn new(guard: G, dispatcher: D, scheme: impl Into<String>) -> Self {
        Self {
            guard,
            dispatcher,
            scheme: scheme.into(),
        }
    }

    pub fn dispatcher(&self) -> &D {
        &self.dispatcher
    }

    /// Compress `targets` with Zipic's current preset, saving beside the originals.
    pub async fn quick(&self, args: &Value) -> Result<Vec<String>, CompressError> {
        self.ensure_available().await?;

        let request = validate::quick(args)?;
        let encoded = encode::quick(&request);
        let predicted = predict::output_paths(&request.targets, None);

        self.send(&encoded).await?;
        Ok(summary(request.targets.len(), &predicted))
    }

    /// Compress with explicit level, format, size and placement options.
    pub async fn advanced(&self, args: &Value) -> Result<Vec<String>, CompressError> {
        self.ensure_available().await?;

        let request = validate::advanced(args)?;
        let encoded = encode::advanced(&request);
        let predicted = predict::output_paths(&request.targets, request.directory.as_deref());

        self.send(&encoded).await?;
        Ok(summary(request.targets.len(), &predicted))
    }

    async fn ensure_available(&self) -> Result<(), CompressError> {
        if self.guard.is_available().await {
            Ok(())
        } else {
            Err(CompressError::ApplicationUnavailable)
        }
    }

    async fn send(&self, encoded: &EncodedRequest) -> Result<(), CompressError> {
        let uri = encoded.to_uri(&self.scheme)?;
        debug!(params = encoded.pairs().len(), "Encoded Zipic request");

        if self.dispatcher.dispatch(&uri).await {
            Ok(())
        } else {
            Err(CompressError::DispatchRejected)
        }
    }
}

fn summary(count: usize, predicted: &[String]) -> Vec<String> {
    let noun = if count == 1 { "item" } else { "items" };
    let mut segments = vec![format!("Sent {} {} to Zipic for compression.", count, noun)];

    if !predicted.is_empty() {
        let listing = predicted
            .iter()
            .map(|p| format!("- {}", p))
            .collect::<Vec<_>>()
            .join("\n");
        segments.push(format!("Expected output paths:\n{}", listing));
    }

    segments
}
