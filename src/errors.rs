use thiserror::Error;

/// Errors that can occur while loading or linting a type system.
#[derive(Error, Debug)]
pub enum LintError {
    /// Assembly manifest or configuration could not be parsed.
    #[error("parse error: {message}")]
    Parse { message: String },

    /// A class expected to be a resource has no resource tag.
    #[error("class {class} is missing the @{tag} documentation tag")]
    MissingResourceTag { class: String, tag: &'static str },

    /// A required tag is present but carries no value.
    #[error(
        "{} has an empty @{} documentation tag",
        location(.class, .property.as_deref()),
        .tag
    )]
    EmptyTag {
        class: String,
        property: Option<String>,
        tag: &'static str,
    },

    /// Assembly name not present in the type system.
    #[error("unknown assembly: {name}")]
    UnknownAssembly { name: String },

    /// Invalid lint configuration.
    #[error("config error: {message}")]
    Config { message: String },

    /// Filesystem I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML deserialization error.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}

fn location(class: &str, property: Option<&str>) -> String {
    match property {
        Some(p) => format!("property {class}.{p}"),
        None => format!("class {class}"),
    }
}

/// Convenience alias for `Result<T, LintError>`.
pub type Result<T> = std::result::Result<T, LintError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_tag_names_class() {
        let e = LintError::MissingResourceTag {
            class: "@aws-cdk/aws-s3.CfnBucket".into(),
            tag: "cloudformationResource",
        };
        assert_eq!(
            e.to_string(),
            "class @aws-cdk/aws-s3.CfnBucket is missing the @cloudformationResource documentation tag"
        );
    }

    #[test]
    fn empty_tag_names_property() {
        let e = LintError::EmptyTag {
            class: "lib.CfnQueue".into(),
            property: Some("attrArn".into()),
            tag: "cloudformationAttribute",
        };
        assert_eq!(
            e.to_string(),
            "property lib.CfnQueue.attrArn has an empty @cloudformationAttribute documentation tag"
        );
    }
}
