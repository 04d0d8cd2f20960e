use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};

use crate::app::{CapabilityGuard, Dispatcher};
use crate::handlers::Compressor;

pub const QUICK_COMPRESS: &str = "quickCompress";
pub const ADVANCED_COMPRESS: &str = "advancedCompress";

#[derive(Debug, Serialize)]
pub struct ToolInfo {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

#[derive(Debug, Serialize)]
pub struct ToolResult {
    pub content: Vec<ToolContent>,
    #[serde(rename = "isError", skip_serializing_if = "std::ops::Not::not")]
    pub is_error: bool,
}

#[derive(Debug, Serialize)]
pub struct ToolContent {
    #[serde(rename = "type")]
    pub content_type: String,
    pub text: String,
}

impl ToolContent {
    fn text(text: String) -> Self {
        Self {
            content_type: "text".to_string(),
            text,
        }
    }
}

fn targets_schema() -> Value {
    serde_json::json!({
        "type": "array",
        "items": { "type": "string" },
        "minItems": 1,
        "description": "Absolute paths of image files or directories of images to compress"
    })
}

pub fn list_tools() -> Vec<ToolInfo> {
    vec![
        ToolInfo {
            name: QUICK_COMPRESS.to_string(),
            description: "Compress images with Zipic using its current preset. Compressed files are saved next to the originals.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "targets": targets_schema()
                },
                "required": ["targets"]
            }),
        },
        ToolInfo {
            name: ADVANCED_COMPRESS.to_string(),
            description: "Compress images with Zipic using explicit quality level, output format, dimensions and output location.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "targets": targets_schema(),
                    "level": {
                        "type": "integer",
                        "minimum": 1,
                        "maximum": 6,
                        "description": "Compression level, 1 (lightest) to 6 (strongest)"
                    },
                    "format": {
                        "type": "string",
                        "enum": ["original", "jpeg", "webp", "heic", "avif", "png"],
                        "description": "Output format; 'original' keeps the source format"
                    },
                    "directory": {
                        "type": "string",
                        "description": "Absolute directory to write compressed files to. Omit to save next to the originals"
                    },
                    "width": {
                        "type": "integer",
                        "minimum": 0,
                        "description": "Target width in pixels; 0 keeps the aspect ratio"
                    },
                    "height": {
                        "type": "integer",
                        "minimum": 0,
                        "description": "Target height in pixels; 0 keeps the aspect ratio"
                    },
                    "suffix": {
                        "type": "string",
                        "description": "Suffix to append to compressed file names"
                    }
                },
                "required": ["targets"]
            }),
        },
    ]
}

pub async fn call_tool<G, D>(
    compressor: &Compressor<G, D>,
    name: &str,
    arguments: &Value,
) -> ToolResult
where
    G: CapabilityGuard,
    D: Dispatcher,
{
    let result = match name {
        QUICK_COMPRESS => compressor.quick(arguments).await.map_err(anyhow::Error::from),
        ADVANCED_COMPRESS => compressor.advanced(arguments).await.map_err(anyhow::Error::from),
        _ => Err(anyhow::anyhow!("Unknown tool: {}", name)),
    };

    match result {
        Ok(segments) => {
            info!(tool = name, "Tool call succeeded");
            ToolResult {
                content: segments.into_iter().map(ToolContent::text).collect(),
                is_error: false,
            }
        }
        Err(e) => {
            warn!(tool = name, error = %e, "Tool call failed");
            ToolResult {
                content: vec![ToolContent::text(format!("Error: {}", e))],
                is_error: true,
            }
        }
    }
}
