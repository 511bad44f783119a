//! Recognition of classes that represent external resources.

use std::collections::HashSet;

use crate::reflect::{ClassType, Reflection};

/// Fqn of the base type every generated resource class extends.
pub const CFN_RESOURCE_BASE: &str = "@aws-cdk/core.CfnResource";

/// Predicate deciding whether a class represents an external resource.
pub trait ResourceClassifier {
    fn is_resource(&self, ts: &dyn Reflection, class: &ClassType) -> bool;
}

impl<F> ResourceClassifier for F
where
    F: Fn(&dyn Reflection, &ClassType) -> bool,
{
    fn is_resource(&self, ts: &dyn Reflection, class: &ClassType) -> bool {
        self(ts, class)
    }
}

/// Recognizes classes whose base chain reaches a marker base type.
#[derive(Debug, Clone)]
pub struct CfnResourceClassifier {
    base: String,
}

impl CfnResourceClassifier {
    #[must_use]
    pub fn new(base: impl Into<String>) -> Self {
        Self { base: base.into() }
    }

    #[must_use]
    pub fn base(&self) -> &str {
        &self.base
    }
}

impl Default for CfnResourceClassifier {
    fn default() -> Self {
        Self::new(CFN_RESOURCE_BASE)
    }
}

impl ResourceClassifier for CfnResourceClassifier {
    fn is_resource(&self, ts: &dyn Reflection, class: &ClassType) -> bool {
        let mut seen = HashSet::new();
        let mut next = class.base.as_deref();
        while let Some(fqn) = next {
            if fqn == self.base {
                return true;
            }
            // Cyclic or unresolved base chains end the walk.
            if !seen.insert(fqn) {
                return false;
            }
            next = ts.find_class(fqn).and_then(|c| c.base.as_deref());
        }
        false
    }
}
