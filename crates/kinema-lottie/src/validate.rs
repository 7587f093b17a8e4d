use serde_json::Value as Json;

use crate::document::LottieAnimation;

const MIN_FRAME_RATE: f64 = 1.0;
const MAX_FRAME_RATE: f64 = 120.0;

/// One validation failure, addressed by a JSON-pointer-style path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub path: String,
    pub message: String,
    pub keyword: String,
}

impl ValidationError {
    fn new(path: impl Into<String>, message: impl Into<String>, keyword: &str) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
            keyword: keyword.to_string(),
        }
    }
}

/// Outcome of a validation pass. Validation never fails as an operation;
/// it always reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<ValidationError>,
}

impl ValidationResult {
    fn from_errors(errors: Vec<ValidationError>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }
}

/// Validate an exported document: the structural pass, then (only if it
/// passes) the semantic bounds pass.
pub fn validate(animation: &LottieAnimation) -> ValidationResult {
    let doc = match serde_json::to_value(animation) {
        Ok(doc) => doc,
        Err(err) => {
            return ValidationResult::from_errors(vec![ValidationError::new(
                "/",
                format!("document serialization failed: {err}"),
                "serialization",
            )])
        }
    };
    validate_value(&doc)
}

/// Validate an arbitrary JSON document. The bounds pass only runs once the
/// structural pass succeeds: semantic checks assume structural validity.
pub fn validate_value(doc: &Json) -> ValidationResult {
    let structure = validate_structure(doc);
    if !structure.valid {
        tracing::debug!(errors = structure.errors.len(), "structural validation failed");
        return structure;
    }
    let bounds = validate_bounds(doc);
    if !bounds.valid {
        tracing::debug!(errors = bounds.errors.len(), "bounds validation failed");
    }
    bounds
}

/// Structural pass: required fields, primitive types, and schema-level
/// numeric ranges. All applicable failures are collected before returning.
pub fn validate_structure(doc: &Json) -> ValidationResult {
    let mut errors = Vec::new();
    let Some(root) = doc.as_object() else {
        return ValidationResult::from_errors(vec![type_error("/", "object")]);
    };

    for field in ["v", "fr", "ip", "op", "w", "h", "nm", "layers"] {
        if !root.contains_key(field) {
            errors.push(required_error("/", field));
        }
    }

    check_string(root.get("v"), "/v", &mut errors);
    check_number(root.get("fr"), "/fr", Some(MIN_FRAME_RATE), Some(MAX_FRAME_RATE), &mut errors);
    check_number(root.get("ip"), "/ip", Some(0.0), None, &mut errors);
    check_number(root.get("op"), "/op", Some(1.0), None, &mut errors);
    check_number(root.get("w"), "/w", Some(1.0), None, &mut errors);
    check_number(root.get("h"), "/h", Some(1.0), None, &mut errors);
    check_string(root.get("nm"), "/nm", &mut errors);

    match root.get("layers") {
        Some(Json::Array(layers)) => {
            for (index, layer) in layers.iter().enumerate() {
                check_layer(layer, index, &mut errors);
            }
        }
        Some(_) => errors.push(type_error("/layers", "array")),
        None => {}
    }

    ValidationResult::from_errors(errors)
}

/// Semantic bounds pass. Assumes the document already passed the
/// structural pass; all failures are collected before returning.
pub fn validate_bounds(doc: &Json) -> ValidationResult {
    let mut errors = Vec::new();
    let Some(root) = doc.as_object() else {
        return ValidationResult::from_errors(vec![type_error("/", "object")]);
    };

    let ip = field_number(root, "ip");
    let op = field_number(root, "op");
    let fr = field_number(root, "fr");

    if op <= ip {
        errors.push(ValidationError::new(
            "/op",
            "Out-point must be greater than in-point",
            "range",
        ));
    }

    if !(MIN_FRAME_RATE..=MAX_FRAME_RATE).contains(&fr) {
        errors.push(ValidationError::new(
            "/fr",
            "Frame rate must be between 1 and 120",
            "range",
        ));
    }

    if field_number(root, "w") < 1.0 || field_number(root, "h") < 1.0 {
        errors.push(ValidationError::new(
            "/w",
            "Canvas dimensions must be positive",
            "range",
        ));
    }

    if let Some(layers) = root.get("layers").and_then(Json::as_array) {
        for (index, layer) in layers.iter().enumerate() {
            let layer_op = layer.get("op").and_then(Json::as_f64).unwrap_or(0.0);
            if layer_op > op {
                let name = layer.get("nm").and_then(Json::as_str).unwrap_or("");
                errors.push(ValidationError::new(
                    format!("/layers/{index}/op"),
                    format!("Layer \"{name}\" out-point exceeds animation duration"),
                    "range",
                ));
            }
        }
    }

    ValidationResult::from_errors(errors)
}

/// Join validation errors into one newline-delimited human-readable
/// string; empty when there are no errors.
pub fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|err| format!("{}: {}", err.path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

fn check_layer(layer: &Json, index: usize, errors: &mut Vec<ValidationError>) {
    let path = format!("/layers/{index}");
    let Some(fields) = layer.as_object() else {
        errors.push(type_error(&path, "object"));
        return;
    };

    for field in ["ty", "nm", "ind", "ip", "op", "ks"] {
        if !fields.contains_key(field) {
            errors.push(required_error(&path, field));
        }
    }

    check_number(fields.get("ty"), &format!("{path}/ty"), None, None, errors);
    check_string(fields.get("nm"), &format!("{path}/nm"), errors);
    check_number(fields.get("ind"), &format!("{path}/ind"), None, None, errors);
    check_number(fields.get("ip"), &format!("{path}/ip"), None, None, errors);
    check_number(fields.get("op"), &format!("{path}/op"), None, None, errors);

    match fields.get("ks") {
        Some(Json::Object(ks)) => {
            let ks_path = format!("{path}/ks");
            for channel in ["p", "s", "r", "o", "a"] {
                match ks.get(channel) {
                    Some(Json::Object(value)) => {
                        let channel_path = format!("{ks_path}/{channel}");
                        for field in ["a", "k"] {
                            if !value.contains_key(field) {
                                errors.push(required_error(&channel_path, field));
                            }
                        }
                    }
                    Some(_) => errors.push(type_error(format!("{ks_path}/{channel}"), "object")),
                    None => errors.push(required_error(&ks_path, channel)),
                }
            }
        }
        Some(_) => errors.push(type_error(format!("{path}/ks"), "object")),
        None => {}
    }

    match fields.get("shapes") {
        Some(Json::Array(shapes)) => {
            for (shape_index, shape) in shapes.iter().enumerate() {
                let shape_path = format!("{path}/shapes/{shape_index}");
                let Some(shape_fields) = shape.as_object() else {
                    errors.push(type_error(&shape_path, "object"));
                    continue;
                };
                for field in ["ty", "nm"] {
                    if !shape_fields.contains_key(field) {
                        errors.push(required_error(&shape_path, field));
                    }
                }
                check_string(shape_fields.get("ty"), &format!("{shape_path}/ty"), errors);
                check_string(shape_fields.get("nm"), &format!("{shape_path}/nm"), errors);
            }
        }
        Some(_) => errors.push(type_error(format!("{path}/shapes"), "array")),
        None => {}
    }
}

fn required_error(path: impl Into<String>, field: &str) -> ValidationError {
    ValidationError::new(
        path,
        format!("must have required property '{field}'"),
        "required",
    )
}

fn type_error(path: impl Into<String>, expected: &str) -> ValidationError {
    ValidationError::new(path, format!("must be {expected}"), "type")
}

fn check_string(value: Option<&Json>, path: &str, errors: &mut Vec<ValidationError>) {
    if let Some(value) = value {
        if !value.is_string() {
            errors.push(type_error(path, "string"));
        }
    }
}

fn check_number(
    value: Option<&Json>,
    path: &str,
    minimum: Option<f64>,
    maximum: Option<f64>,
    errors: &mut Vec<ValidationError>,
) {
    let Some(value) = value else {
        return;
    };
    let Some(number) = value.as_f64() else {
        errors.push(type_error(path, "number"));
        return;
    };
    if let Some(min) = minimum {
        if number < min {
            errors.push(ValidationError::new(
                path,
                format!("must be >= {min}"),
                "minimum",
            ));
        }
    }
    if let Some(max) = maximum {
        if number > max {
            errors.push(ValidationError::new(
                path,
                format!("must be <= {max}"),
                "maximum",
            ));
        }
    }
}

fn field_number(root: &serde_json::Map<String, Json>, key: &str) -> f64 {
    root.get(key).and_then(Json::as_f64).unwrap_or(0.0)
}
