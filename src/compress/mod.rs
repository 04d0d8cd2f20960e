//! Request model for Zipic compression jobs.
//!
//! A request flows through three pure steps before anything leaves the
//! process: [`validate`] turns loose JSON arguments into a typed request,
//! [`encode`] maps it onto Zipic's URL parameters, and [`predict`] works out
//! where Zipic is expected to write the results.

pub mod encode;
pub mod predict;
pub mod validate;

pub use encode::EncodedRequest;

/// Name fragment Zipic inserts before the extension of every output file.
pub const COMPRESSED_SUFFIX: &str = "-compressed";

/// Compress with Zipic's current preset, writing results next to the originals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuickRequest {
    pub targets: Vec<String>,
}

/// Compress with explicit settings.
///
/// `directory` being set means "write into this directory"; `suffix` being
/// set means "append this suffix". There are no separate flags for either.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdvancedRequest {
    pub targets: Vec<String>,
    /// 1 (lightest) to 6 (strongest).
    pub level: Option<u8>,
    pub format: Option<OutputFormat>,
    pub directory: Option<String>,
    /// 0 keeps the aspect ratio on this axis.
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub suffix: Option<String>,
}

impl AdvancedRequest {
    pub fn new(targets: Vec<String>) -> Self {
        Self {
            targets,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Original,
    Jpeg,
    Webp,
    Heic,
    Avif,
    Png,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 6] = [
        OutputFormat::Original,
        OutputFormat::Jpeg,
        OutputFormat::Webp,
        OutputFormat::Heic,
        OutputFormat::Avif,
        OutputFormat::Png,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            OutputFormat::Original => "original",
            OutputFormat::Jpeg => "jpeg",
            OutputFormat::Webp => "webp",
            OutputFormat::Heic => "heic",
            OutputFormat::Avif => "avif",
            OutputFormat::Png => "png",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.as_str() == value)
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
