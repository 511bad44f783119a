use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Documentation metadata attached to a reflected class or property.
///
/// Custom tags are the `@name value` lines of the original docstring,
/// stored as an explicit key-value map at load time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Docs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    /// External documentation URL (`@see`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub see: Option<String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub custom: BTreeMap<String, String>,
}

impl Docs {
    /// Value of the custom tag `tag`, matched case-sensitively.
    #[must_use]
    pub fn custom(&self, tag: &str) -> Option<&str> {
        self.custom.get(tag).map(String::as_str)
    }

    /// Returns `true` if the custom tag `tag` is declared, even with an empty value.
    #[must_use]
    pub fn has_custom(&self, tag: &str) -> bool {
        self.custom.contains_key(tag)
    }

    /// Builder helper: attach a custom tag.
    #[must_use]
    pub fn with_custom(mut self, tag: impl Into<String>, value: impl Into<String>) -> Self {
        self.custom.insert(tag.into(), value.into());
        self
    }

    /// Builder helper: set the `@see` link.
    #[must_use]
    pub fn with_see(mut self, see: impl Into<String>) -> Self {
        self.see = Some(see.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn custom_returns_declared_value() {
        let docs = Docs::default().with_custom("cloudformationResource", "AWS::S3::Bucket");
        assert_eq!(docs.custom("cloudformationResource"), Some("AWS::S3::Bucket"));
    }

    #[test]
    fn custom_absent_is_none() {
        let docs = Docs::default();
        assert_eq!(docs.custom("cloudformationResource"), None);
        assert!(!docs.has_custom("cloudformationResource"));
    }

    #[test]
    fn custom_key_is_case_sensitive() {
        let docs = Docs::default().with_custom("cloudformationResource", "AWS::S3::Bucket");
        assert_eq!(docs.custom("CloudFormationResource"), None);
        assert_eq!(docs.custom("cloudformationresource"), None);
    }

    #[test]
    fn empty_value_is_still_declared() {
        let docs = Docs::default().with_custom("cloudformationAttribute", "");
        assert!(docs.has_custom("cloudformationAttribute"));
        assert_eq!(docs.custom("cloudformationAttribute"), Some(""));
    }

    #[test]
    fn deserialize_without_optional_fields() {
        let docs: Docs = serde_json::from_str("{}").unwrap();
        assert_eq!(docs, Docs::default());
    }

    #[test]
    fn serialize_omits_empty_fields() {
        let v = serde_json::to_value(Docs::default().with_see("https://x")).unwrap();
        assert_eq!(v["see"], "https://x");
        assert!(v.get("summary").is_none());
        assert!(v.get("custom").is_none());
    }
}
