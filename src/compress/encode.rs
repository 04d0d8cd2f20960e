//! Maps a validated request onto Zipic's `compress` URL parameters.
//!
//! Parameters are emitted in a fixed order so that the same request always
//! produces byte-identical URLs. Companion parameters (`location`,
//! `specified`, `addSuffix`) are derived here and cannot be set directly.

use super::{AdvancedRequest, QuickRequest};
use crate::error::CompressError;

/// Ordered key/value pairs for a `compress` URL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EncodedRequest {
    pairs: Vec<(String, String)>,
}

impl EncodedRequest {
    fn push(&mut self, key: &str, value: impl Into<String>) {
        self.pairs.push((key.to_string(), value.into()));
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    /// First value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Serialize to `scheme://compress?key=value&...`.
    pub fn to_uri(&self, scheme: &str) -> Result<String, CompressError> {
        if !is_valid_scheme(scheme) {
            return Err(CompressError::EncodingFailure(format!(
                "'{}' is not a valid URL scheme",
                scheme
            )));
        }

        let query = self
            .pairs
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");

        Ok(format!("{}://compress?{}", scheme, query))
    }
}

/// RFC 3986: ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )
fn is_valid_scheme(scheme: &str) -> bool {
    let mut chars = scheme.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

pub fn quick(request: &QuickRequest) -> EncodedRequest {
    let mut encoded = EncodedRequest::default();
    push_targets(&mut encoded, &request.targets);
    encoded
}

pub fn advanced(request: &AdvancedRequest) -> EncodedRequest {
    let mut encoded = EncodedRequest::default();
    push_targets(&mut encoded, &request.targets);

    if let Some(level) = request.level {
        encoded.push("level", level.to_string());
    }
    if let Some(format) = request.format {
        encoded.push("format", format.as_str());
    }
    if let Some(directory) = &request.directory {
        encoded.push("directory", directory.as_str());
        encoded.push("location", "custom");
        encoded.push("specified", "false");
    }
    if let Some(width) = request.width {
        encoded.push("width", width.to_string());
    }
    if let Some(height) = request.height {
        encoded.push("height", height.to_string());
    }
    if let Some(suffix) = &request.suffix {
        encoded.push("suffix", suffix.as_str());
        encoded.push("addSuffix", "true");
    }

    encoded
}

fn push_targets(encoded: &mut EncodedRequest, targets: &[String]) {
    for target in targets {
        encoded.push("target", target.as_str());
    }
}
