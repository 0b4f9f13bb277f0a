//! Request body validation for the create endpoint.
//!
//! The body is checked against a fixed shape before anything else happens:
//! four required fields, correct JSON types, and no additional properties.
//! Violations are collected into a list rather than failing on the first
//! mismatch so the caller sees every problem at once.

use serde_json::Value;

use crate::types::FieldViolation;

const ALLOWED_FIELDS: [&str; 4] = [
    "playlistDescription",
    "numberOfSongs",
    "playlistName",
    "accessToken",
];

const STRING_FIELDS: [&str; 3] = ["playlistDescription", "playlistName", "accessToken"];

/// Validates an arbitrary JSON body against the create-request shape.
///
/// Returns the list of violations; an empty list means the body is valid
/// and can be deserialized into [`crate::types::PlaylistRequest`].
pub fn validate_create_request(body: &Value) -> Vec<FieldViolation> {
    let mut violations = Vec::new();

    let Some(object) = body.as_object() else {
        violations.push(violation("body", "must be an object"));
        return violations;
    };

    for field in STRING_FIELDS {
        match object.get(field) {
            None => violations.push(violation(field, "is required")),
            Some(value) if !value.is_string() => {
                violations.push(violation(field, "must be a string"))
            }
            Some(_) => {}
        }
    }

    match object.get("numberOfSongs") {
        None => violations.push(violation("numberOfSongs", "is required")),
        Some(value) => match value.as_u64() {
            Some(n) if n >= 1 && n <= u32::MAX as u64 => {}
            _ => violations.push(violation("numberOfSongs", "must be a positive integer")),
        },
    }

    for key in object.keys() {
        if !ALLOWED_FIELDS.contains(&key.as_str()) {
            violations.push(violation(key, "is not allowed"));
        }
    }

    violations
}

fn violation(field: &str, message: &str) -> FieldViolation {
    FieldViolation {
        field: field.to_string(),
        message: message.to_string(),
    }
}
