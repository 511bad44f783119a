//! Rule: resource-class (L001)
//!
//! Every generated resource class must have a hand-written wrapper class that
//! declares the same resource identifier with `@resource`.

use crate::diagnostics::{Severity, L001};
use crate::linter::{Evaluation, ResourceContext, ResourceRule, RuleMeta};

pub struct ResourceClass;

static META: RuleMeta = RuleMeta {
    name: "resource-class",
    code: L001,
    message: "every resource must have a resource class (L2)",
    suggestion: Some("add '@resource {scope}' to its docstring"),
    default_severity: Severity::Warning,
};

impl ResourceRule for ResourceClass {
    fn meta(&self) -> &'static RuleMeta {
        &META
    }

    fn eval(&self, ctx: &ResourceContext<'_>, e: &mut Evaluation<'_>) {
        let full_name = &ctx.resource.full_name;
        // Both sides come from the same canonical tag format, so compare exactly.
        let wrapped = ctx.wrappers.iter().any(|w| &w.fullname == full_name);
        e.assert(wrapped, full_name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LintConfig;
    use crate::linter::Linter;
    use crate::reflect::{Assembly, ClassType, Docs, TypeSystem};
    use crate::resource::RESOURCE_TAG;
    use crate::wrapper::WRAPPER_TAG;

    fn system(wrapper_tag: Option<&str>) -> TypeSystem {
        let mut s3 = Assembly::new("s3").with_dependency("@aws-cdk/core").with_type(
            ClassType::new("", "CfnBucket")
                .with_base("@aws-cdk/core.CfnResource")
                .with_docs(Docs::default().with_custom(RESOURCE_TAG, "AWS::S3::Bucket")),
        );
        if let Some(tag) = wrapper_tag {
            s3 = s3.with_type(
                ClassType::new("", "Bucket").with_docs(Docs::default().with_custom(WRAPPER_TAG, tag)),
            );
        }
        TypeSystem::new()
            .with_assembly(Assembly::new("@aws-cdk/core").with_type(ClassType::new("", "CfnResource")))
            .unwrap()
            .with_assembly(s3)
            .unwrap()
    }

    fn lint(ts: &TypeSystem) -> Vec<String> {
        Linter::with_config(LintConfig::new())
            .lint_assembly(ts, "s3")
            .unwrap()
            .diagnostics
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    #[test]
    fn unwrapped_resource_message() {
        assert_eq!(
            lint(&system(None)),
            ["warning: [resource-class:AWS::S3::Bucket] every resource must have a resource class (L2), add '@resource AWS::S3::Bucket' to its docstring"]
        );
    }

    #[test]
    fn unwrapped_resource_suggests_tag() {
        let report = Linter::new().lint_assembly(&system(None), "s3").unwrap();
        assert_eq!(
            report.diagnostics[0].suggestion.as_deref(),
            Some("add '@resource AWS::S3::Bucket' to its docstring")
        );
    }

    #[test]
    fn matching_wrapper_passes() {
        assert!(lint(&system(Some("AWS::S3::Bucket"))).is_empty());
    }

    #[test]
    fn wrapper_match_is_case_sensitive() {
        assert_eq!(lint(&system(Some("aws::s3::bucket"))).len(), 1);
    }

    #[test]
    fn meta_is_warning() {
        let meta = ResourceClass.meta();
        assert_eq!(meta.name, "resource-class");
        assert_eq!(meta.default_severity, Severity::Warning);
    }
}
