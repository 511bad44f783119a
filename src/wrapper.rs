//! Discovery of hand-written wrapper classes for resources.

use serde::Serialize;

use crate::reflect::Reflection;

/// Custom tag a wrapper class uses to name the resource it wraps.
pub const WRAPPER_TAG: &str = "resource";

/// A hand-written class wrapping a resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Wrapper {
    /// Fqn of the wrapper class.
    pub fqn: String,
    /// Identifier of the wrapped resource, e.g. `AWS::S3::Bucket`.
    pub fullname: String,
}

/// Source of the wrapper classes declared by an assembly.
pub trait WrapperDiscovery {
    fn wrappers(&self, ts: &dyn Reflection, assembly: &str) -> Vec<Wrapper>;
}

impl<F> WrapperDiscovery for F
where
    F: Fn(&dyn Reflection, &str) -> Vec<Wrapper>,
{
    fn wrappers(&self, ts: &dyn Reflection, assembly: &str) -> Vec<Wrapper> {
        self(ts, assembly)
    }
}

/// Finds wrappers by the `@resource <identifier>` docstring tag on classes
/// declared in the assembly itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResourceTagDiscovery;

impl WrapperDiscovery for ResourceTagDiscovery {
    fn wrappers(&self, ts: &dyn Reflection, assembly: &str) -> Vec<Wrapper> {
        ts.classes()
            .filter(|c| c.assembly == assembly)
            .filter_map(|c| {
                let fullname = c.docs.custom(WRAPPER_TAG)?.trim();
                (!fullname.is_empty()).then(|| Wrapper {
                    fqn: c.fqn.clone(),
                    fullname: fullname.to_string(),
                })
            })
            .collect()
    }
}
