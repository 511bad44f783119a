//! Attribute-name normalization for resource classes.

use heck::ToUpperCamelCase;

/// Names that predate the generic pascal-case rule and must be kept as is.
///
/// Each entry is `(basename, raw attribute name, normalized name)`.
pub const ATTRIBUTE_NAME_OVERRIDES: &[(&str, &str, &str)] = &[("SecurityGroup", "GroupId", "Id")];

/// Look up an override for `raw` on the resource `basename`.
#[must_use]
pub fn attribute_override(basename: &str, raw: &str) -> Option<&'static str> {
    ATTRIBUTE_NAME_OVERRIDES
        .iter()
        .find(|(b, r, _)| *b == basename && *r == raw)
        .map(|(_, _, name)| *name)
}

/// Normalize a raw `cloudformationAttribute` value for the resource `basename`.
///
/// Overrides win; otherwise the value is pascal-cased, so separators such as
/// `.` start a new capitalized word (`Endpoint.Address` -> `EndpointAddress`).
#[must_use]
pub fn normalize_attribute_name(basename: &str, raw: &str) -> String {
    match attribute_override(basename, raw) {
        Some(name) => name.to_string(),
        None => raw.to_upper_camel_case(),
    }
}
