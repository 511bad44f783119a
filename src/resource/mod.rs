//! Resource reflection: identity derivation for generated resource classes,
//! the case-insensitive identifier index, and its cache.

pub mod attributes;
pub mod index;

use serde::Serialize;

use crate::errors::{LintError, Result};
use crate::reflect::ClassType;

pub use attributes::{attribute_override, normalize_attribute_name, ATTRIBUTE_NAME_OVERRIDES};
pub use index::{find_all, ResourceIndex, ResourceIndexCache};

/// Class-level tag carrying the resource identifier (`AWS::S3::Bucket`).
pub const RESOURCE_TAG: &str = "cloudformationResource";

/// Property-level tag carrying a raw resource attribute name.
pub const ATTRIBUTE_TAG: &str = "cloudformationAttribute";

/// Name prefix shared by every generated resource class.
pub const CFN_PREFIX: &str = "Cfn";

/// Identity of a generated resource class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceIdentity {
    /// Fully-qualified name of the class this identity was built from.
    pub fqn: String,
    /// Assembly that declares the class.
    pub assembly: String,
    /// Resource identifier as declared, e.g. `AWS::S3::Bucket`.
    pub full_name: String,
    /// First two identifier segments, e.g. `AWS::S3`.
    pub namespace: String,
    /// Class name without the `Cfn` prefix, e.g. `Bucket`.
    pub basename: String,
    /// Normalized names of the attributes declared on the class.
    pub attribute_names: Vec<String>,
    /// Link to the external documentation, empty when not declared.
    pub doc: String,
}

impl ResourceIdentity {
    /// Derive the identity of `class`.
    ///
    /// The class must carry a non-empty `@cloudformationResource` tag; callers
    /// are expected to have filtered with a resource classifier first.
    pub fn build(class: &ClassType) -> Result<Self> {
        let full_name = class
            .docs
            .custom(RESOURCE_TAG)
            .ok_or_else(|| LintError::MissingResourceTag {
                class: class.fqn.clone(),
                tag: RESOURCE_TAG,
            })?;
        if full_name.is_empty() {
            return Err(LintError::EmptyTag {
                class: class.fqn.clone(),
                property: None,
                tag: RESOURCE_TAG,
            });
        }

        let basename: String = class.name.chars().skip(CFN_PREFIX.len()).collect();

        let mut attribute_names = Vec::new();
        for property in &class.properties {
            let Some(raw) = property.docs.custom(ATTRIBUTE_TAG) else {
                continue;
            };
            if raw.is_empty() {
                return Err(LintError::EmptyTag {
                    class: class.fqn.clone(),
                    property: Some(property.name.clone()),
                    tag: ATTRIBUTE_TAG,
                });
            }
            attribute_names.push(normalize_attribute_name(&basename, raw));
        }

        Ok(Self {
            fqn: class.fqn.clone(),
            assembly: class.assembly.clone(),
            full_name: full_name.to_string(),
            namespace: namespace_of(full_name),
            basename,
            attribute_names,
            doc: class.docs.see.clone().unwrap_or_default(),
        })
    }
}

/// First two `::` segments of a resource identifier.
#[must_use]
pub fn namespace_of(full_name: &str) -> String {
    full_name.split("::").take(2).collect::<Vec<_>>().join("::")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reflect::{Docs, Property};

    fn resource_class(name: &str, full_name: &str) -> ClassType {
        ClassType::new(format!("lib.{name}"), name)
            .with_docs(Docs::default().with_custom(RESOURCE_TAG, full_name))
    }

    fn attribute(prop: &str, raw: &str) -> Property {
        Property::new(prop).with_docs(Docs::default().with_custom(ATTRIBUTE_TAG, raw))
    }

    #[test]
    fn build_derives_name_namespace_basename() {
        let r = ResourceIdentity::build(&resource_class("CfnBucket", "Aws::S3::Bucket")).unwrap();
        assert_eq!(r.full_name, "Aws::S3::Bucket");
        assert_eq!(r.namespace, "Aws::S3");
        assert_eq!(r.basename, "Bucket");
        assert_eq!(r.fqn, "lib.CfnBucket");
        assert!(r.full_name.starts_with(&r.namespace));
    }

    #[test]
    fn build_keeps_original_casing() {
        let r = ResourceIdentity::build(&resource_class("CfnBucket", "AWS::S3::Bucket")).unwrap();
        assert_eq!(r.full_name, "AWS::S3::Bucket");
        assert_eq!(r.namespace, "AWS::S3");
    }

    #[test]
    fn namespace_of_short_identifiers() {
        assert_eq!(namespace_of("Custom"), "Custom");
        assert_eq!(namespace_of("AWS::S3"), "AWS::S3");
        assert_eq!(namespace_of("AWS::EC2::Subnet::Extra"), "AWS::EC2");
    }

    #[test]
    fn doc_from_see_or_empty() {
        let mut c = resource_class("CfnBucket", "AWS::S3::Bucket");
        assert_eq!(ResourceIdentity::build(&c).unwrap().doc, "");
        c.docs = c.docs.with_see("https://docs.aws.amazon.com/s3");
        assert_eq!(
            ResourceIdentity::build(&c).unwrap().doc,
            "https://docs.aws.amazon.com/s3"
        );
    }

    #[test]
    fn security_group_group_id_becomes_id() {
        let c = resource_class("CfnSecurityGroup", "AWS::EC2::SecurityGroup")
            .with_property(attribute("attrGroupId", "GroupId"))
            .with_property(attribute("attrVpcId", "VpcId"));
        let r = ResourceIdentity::build(&c).unwrap();
        assert_eq!(r.attribute_names, ["Id", "VpcId"]);
    }

    #[test]
    fn queue_url_uses_generic_transform() {
        let c = resource_class("CfnQueue", "AWS::SQS::Queue")
            .with_property(attribute("attrQueueUrl", "QueueUrl"));
        let r = ResourceIdentity::build(&c).unwrap();
        assert_eq!(r.attribute_names, ["QueueUrl"]);
    }

    #[test]
    fn untagged_properties_skipped_in_order() {
        let c = resource_class("CfnCluster", "AWS::RDS::DBCluster")
            .with_property(attribute("attrEndpointAddress", "Endpoint.Address"))
            .with_property(Property::new("clusterName"))
            .with_property(attribute("attrArn", "Arn"));
        let r = ResourceIdentity::build(&c).unwrap();
        assert_eq!(r.attribute_names, ["EndpointAddress", "Arn"]);
    }

    #[test]
    fn missing_tag_fails_naming_class() {
        let c = ClassType::new("lib.CfnThing", "CfnThing");
        let err = ResourceIdentity::build(&c).unwrap_err();
        match &err {
            LintError::MissingResourceTag { class, .. } => assert_eq!(class, "lib.CfnThing"),
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(err.to_string().contains("lib.CfnThing"));
    }

    #[test]
    fn empty_resource_tag_fails() {
        let err = ResourceIdentity::build(&resource_class("CfnThing", "")).unwrap_err();
        assert!(
            matches!(err, LintError::EmptyTag { property: None, .. }),
            "got: {err:?}"
        );
    }

    #[test]
    fn empty_attribute_tag_fails_naming_property() {
        let c = resource_class("CfnQueue", "AWS::SQS::Queue").with_property(attribute("attrArn", ""));
        let err = ResourceIdentity::build(&c).unwrap_err();
        assert!(err.to_string().contains("lib.CfnQueue.attrArn"), "got: {err}");
    }

    #[test]
    fn basename_slices_prefix_length() {
        let r = ResourceIdentity::build(&resource_class("Cfn", "AWS::X::Y")).unwrap();
        assert_eq!(r.basename, "");
    }

    #[test]
    fn serializes_for_reporting() {
        let r = ResourceIdentity::build(&resource_class("CfnBucket", "AWS::S3::Bucket")).unwrap();
        let v = serde_json::to_value(&r).unwrap();
        assert_eq!(v["full_name"], "AWS::S3::Bucket");
        assert_eq!(v["attribute_names"], serde_json::json!([]));
    }
}
