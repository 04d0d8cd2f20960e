//! Turns the loosely typed JSON arguments of a tool call into a typed request.
//!
//! MCP clients are not consistent about numbers: some send `4`, some send
//! `"4"`. Coercion happens here and nowhere else, so the encoder only ever
//! sees checked values.

use garde::Validate;
use serde_json::{Map, Value};

use super::{AdvancedRequest, OutputFormat, QuickRequest};
use crate::error::ValidationError;

const FORMAT_CHOICES: &str = "original, jpeg, webp, heic, avif, png";

#[derive(Debug, garde::Validate)]
struct QuickArgs {
    #[garde(length(min = 1), inner(length(min = 1)))]
    targets: Vec<String>,
}

#[derive(Debug, garde::Validate)]
struct AdvancedArgs {
    #[garde(length(min = 1), inner(length(min = 1)))]
    targets: Vec<String>,
    #[garde(range(min = 1, max = 6))]
    level: Option<i64>,
    #[garde(range(min = 0, max = 4_294_967_295))]
    width: Option<i64>,
    #[garde(range(min = 0, max = 4_294_967_295))]
    height: Option<i64>,
    #[garde(skip)]
    format: Option<OutputFormat>,
    #[garde(skip)]
    directory: Option<String>,
    #[garde(skip)]
    suffix: Option<String>,
}

/// Validate the arguments of a `quickCompress` call.
pub fn quick(args: &Value) -> Result<QuickRequest, ValidationError> {
    let args = object(args)?;
    let parsed = QuickArgs {
        targets: targets(args)?,
    };

    if let Err(report) = parsed.validate() {
        return Err(first_violation(&report, &parsed.targets));
    }

    Ok(QuickRequest {
        targets: parsed.targets,
    })
}

/// Validate the arguments of an `advancedCompress` call.
pub fn advanced(args: &Value) -> Result<AdvancedRequest, ValidationError> {
    let args = object(args)?;
    let parsed = AdvancedArgs {
        targets: targets(args)?,
        level: integer(args, "level")?,
        width: integer(args, "width")?,
        height: integer(args, "height")?,
        format: format(args)?,
        directory: text(args, "directory")?,
        suffix: text(args, "suffix")?,
    };

    if let Err(report) = parsed.validate() {
        return Err(first_violation(&report, &parsed.targets));
    }

    Ok(AdvancedRequest {
        level: narrow(parsed.level, "level", "an integer between 1 and 6")?,
        width: narrow(parsed.width, "width", "an integer of 0 or more")?,
        height: narrow(parsed.height, "height", "an integer of 0 or more")?,
        targets: parsed.targets,
        format: parsed.format,
        directory: parsed.directory,
        suffix: parsed.suffix,
    })
}

fn object(args: &Value) -> Result<&Map<String, Value>, ValidationError> {
    args.as_object().ok_or(ValidationError::BadType {
        field: "arguments",
        expected: "an object",
    })
}

/// `null` and missing are the same thing.
fn field<'a>(args: &'a Map<String, Value>, name: &str) -> Option<&'a Value> {
    args.get(name).filter(|v| !v.is_null())
}

fn targets(args: &Map<String, Value>) -> Result<Vec<String>, ValidationError> {
    let bad_type = ValidationError::BadType {
        field: "targets",
        expected: "an array of path strings",
    };

    match field(args, "targets") {
        None => Ok(Vec::new()),
        // A bare path is accepted as a single target.
        Some(Value::String(path)) => Ok(vec![path.clone()]),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| item.as_str().map(str::to_string).ok_or(bad_type.clone()))
            .collect(),
        Some(_) => Err(bad_type),
    }
}

fn integer(args: &Map<String, Value>, name: &'static str) -> Result<Option<i64>, ValidationError> {
    let bad_type = ValidationError::BadType {
        field: name,
        expected: "an integer",
    };

    match field(args, name) {
        None => Ok(None),
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().and_then(whole_number))
            .map(Some)
            .ok_or(bad_type),
        Some(Value::String(s)) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(whole_number))
                .map(Some)
                .ok_or(bad_type)
        }
        Some(_) => Err(bad_type),
    }
}

/// `4.0` counts as an integer. Values past the i64 range saturate so the
/// range rules report them as out of range.
fn whole_number(value: f64) -> Option<i64> {
    if value.is_finite() && value.fract() == 0.0 {
        Some(value as i64)
    } else {
        None
    }
}

fn text(args: &Map<String, Value>, name: &'static str) -> Result<Option<String>, ValidationError> {
    match field(args, name) {
        None => Ok(None),
        Some(Value::String(s)) if s.is_empty() => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(ValidationError::BadType {
            field: name,
            expected: "a string",
        }),
    }
}

fn format(args: &Map<String, Value>) -> Result<Option<OutputFormat>, ValidationError> {
    let Some(value) = text(args, "format")? else {
        return Ok(None);
    };

    OutputFormat::parse(&value.to_ascii_lowercase())
        .map(Some)
        .ok_or(ValidationError::InvalidChoice {
            field: "format",
            value,
            allowed: FORMAT_CHOICES,
        })
}

fn narrow<T: TryFrom<i64>>(
    value: Option<i64>,
    field: &'static str,
    expected: &'static str,
) -> Result<Option<T>, ValidationError> {
    value
        .map(|v| T::try_from(v).map_err(|_| ValidationError::OutOfRange { field, expected }))
        .transpose()
}

/// Map a garde report onto the first failing field, in declaration order.
fn first_violation(report: &garde::Report, targets: &[String]) -> ValidationError {
    let failed: Vec<String> = report
        .iter()
        .map(|(path, _)| {
            let path = path.to_string();
            path.split(['[', '.']).next().unwrap_or_default().to_string()
        })
        .collect();
    let has = |name: &str| failed.iter().any(|f| f == name);

    if has("targets") {
        return match targets.iter().position(String::is_empty) {
            Some(index) => ValidationError::BlankTarget { index },
            None => ValidationError::EmptyTargets,
        };
    }
    if has("level") {
        return ValidationError::OutOfRange {
            field: "level",
            expected: "an integer between 1 and 6",
        };
    }
    if has("width") {
        return ValidationError::OutOfRange {
            field: "width",
            expected: "an integer of 0 or more",
        };
    }
    ValidationError::OutOfRange {
        field: "height",
        expected: "an integer of 0 or more",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_quick_accepts_targets() {
        let request = quick(&json!({ "targets": ["/a/b/photo.jpg", "/a/c"] })).unwrap();
        assert_eq!(request.targets, vec!["/a/b/photo.jpg", "/a/c"]);
    }

    #[test]
    fn test_quick_accepts_bare_path() {
        let request = quick(&json!({ "targets": "/a/b/photo.jpg" })).unwrap();
        assert_eq!(request.targets, vec!["/a/b/photo.jpg"]);
    }

    #[test]
    fn test_quick_rejects_empty_targets() {
        assert_eq!(quick(&json!({ "targets": [] })), Err(ValidationError::EmptyTargets));
        assert_eq!(quick(&json!({})), Err(ValidationError::EmptyTargets));
        assert_eq!(
            quick(&json!({ "targets": null })),
            Err(ValidationError::EmptyTargets)
        );
    }

    #[test]
    fn test_quick_rejects_blank_target() {
        assert_eq!(
            quick(&json!({ "targets": ["/a.png", ""] })),
            Err(ValidationError::BlankTarget { index: 1 })
        );
    }

    #[test]
    fn test_targets_must_be_strings() {
        let err = advanced(&json!({ "targets": [1, 2] })).unwrap_err();
        assert!(matches!(err, ValidationError::BadType { field: "targets", .. }));
    }

    #[test]
    fn test_arguments_must_be_object() {
        let err = quick(&json!(["/a.png"])).unwrap_err();
        assert_eq!(err.field(), "arguments");
    }

    #[test]
    fn test_level_bounds() {
        for level in 1..=6 {
            let request = advanced(&json!({ "targets": ["/x.png"], "level": level })).unwrap();
            assert_eq!(request.level, Some(level as u8));
        }
        for level in [0, 7, 9, -1] {
            let err = advanced(&json!({ "targets": ["/x.png"], "level": level })).unwrap_err();
            assert!(
                matches!(err, ValidationError::OutOfRange { field: "level", .. }),
                "level {} should be rejected, got {:?}",
                level,
                err
            );
        }
    }

    #[test]
    fn test_negative_dimensions_rejected() {
        let err = advanced(&json!({ "targets": ["/x.png"], "width": -1 })).unwrap_err();
        assert!(matches!(err, ValidationError::OutOfRange { field: "width", .. }));

        let err = advanced(&json!({ "targets": ["/x.png"], "height": -1 })).unwrap_err();
        assert!(matches!(err, ValidationError::OutOfRange { field: "height", .. }));
    }

    #[test]
    fn test_zero_dimensions_accepted() {
        let request =
            advanced(&json!({ "targets": ["/x.png"], "width": 0, "height": 1080 })).unwrap();
        assert_eq!(request.width, Some(0));
        assert_eq!(request.height, Some(1080));
    }

    #[test]
    fn test_numeric_strings_are_coerced() {
        let request = advanced(&json!({
            "targets": ["/x.png"],
            "level": "4",
            "width": " 800 ",
        }))
        .unwrap();
        assert_eq!(request.level, Some(4));
        assert_eq!(request.width, Some(800));
    }

    #[test]
    fn test_non_numeric_is_bad_type() {
        let err = advanced(&json!({ "targets": ["/x.png"], "level": "high" })).unwrap_err();
        assert!(matches!(err, ValidationError::BadType { field: "level", .. }));

        let err = advanced(&json!({ "targets": ["/x.png"], "width": 10.5 })).unwrap_err();
        assert!(matches!(err, ValidationError::BadType { field: "width", .. }));

        let err = advanced(&json!({ "targets": ["/x.png"], "height": true })).unwrap_err();
        assert!(matches!(err, ValidationError::BadType { field: "height", .. }));
    }

    #[test]
    fn test_whole_floats_are_integers() {
        let request = advanced(&json!({
            "targets": ["/x.png"],
            "level": 4.0,
            "width": "1920.0",
            "height": 0.0,
        }))
        .unwrap();
        assert_eq!(request.level, Some(4));
        assert_eq!(request.width, Some(1920));
        assert_eq!(request.height, Some(0));
    }

    #[test]
    fn test_huge_numbers_are_out_of_range() {
        for level in [json!("99999999999999999999"), json!(1e20), json!(u64::MAX)] {
            let err = advanced(&json!({ "targets": ["/x.png"], "level": level })).unwrap_err();
            assert!(
                matches!(err, ValidationError::OutOfRange { field: "level", .. }),
                "level {} should be out of range, got {:?}",
                level,
                err
            );
        }

        let err = advanced(&json!({ "targets": ["/x.png"], "width": "-99999999999999999999" }))
            .unwrap_err();
        assert!(matches!(err, ValidationError::OutOfRange { field: "width", .. }));

        let err = advanced(&json!({ "targets": ["/x.png"], "height": 5_000_000_000u64 }))
            .unwrap_err();
        assert!(matches!(err, ValidationError::OutOfRange { field: "height", .. }));
    }

    #[test]
    fn test_non_finite_strings_are_bad_type() {
        for level in ["inf", "NaN", "4.5"] {
            let err = advanced(&json!({ "targets": ["/x.png"], "level": level })).unwrap_err();
            assert!(matches!(err, ValidationError::BadType { field: "level", .. }));
        }
    }

    #[test]
    fn test_format_choices() {
        let request = advanced(&json!({ "targets": ["/x.png"], "format": "AVIF" })).unwrap();
        assert_eq!(request.format, Some(OutputFormat::Avif));

        let err = advanced(&json!({ "targets": ["/x.png"], "format": "gif" })).unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvalidChoice {
                field: "format",
                value: "gif".to_string(),
                allowed: FORMAT_CHOICES,
            }
        );
    }

    #[test]
    fn test_empty_strings_are_absent() {
        let request = advanced(&json!({
            "targets": ["/x.png"],
            "directory": "",
            "suffix": "",
            "format": null,
        }))
        .unwrap();
        assert_eq!(request, AdvancedRequest::new(vec!["/x.png".to_string()]));
    }

    #[test]
    fn test_directory_must_be_string() {
        let err = advanced(&json!({ "targets": ["/x.png"], "directory": 42 })).unwrap_err();
        assert!(matches!(err, ValidationError::BadType { field: "directory", .. }));
    }

    #[test]
    fn test_targets_checked_before_level() {
        let err = advanced(&json!({ "targets": [], "level": 9 })).unwrap_err();
        assert_eq!(err, ValidationError::EmptyTargets);
    }

    #[test]
    fn test_full_request() {
        let request = advanced(&json!({
            "targets": ["/x/img.png"],
            "level": 3,
            "format": "webp",
            "directory": "/out",
            "width": 1920,
            "height": 0,
            "suffix": "_small",
        }))
        .unwrap();

        assert_eq!(
            request,
            AdvancedRequest {
                targets: vec!["/x/img.png".to_string()],
                level: Some(3),
                format: Some(OutputFormat::Webp),
                directory: Some("/out".to_string()),
                width: Some(1920),
                height: Some(0),
                suffix: Some("_small".to_string()),
            }
        );
    }
}
