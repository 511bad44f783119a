//! Reflected model of a library's public API surface.
//!
//! Assemblies hold classes; classes hold own properties; both carry
//! [`Docs`] with an explicit custom-tag map. The [`Reflection`] trait is the
//! read-only view the resource index and rules consume.

pub mod docs;
pub mod loader;
pub mod model;

pub use docs::Docs;
pub use loader::{find_manifest, load_assembly, parse_assembly, resolve_manifest};
pub use model::{
    dependency_closure, Assembly, ClassType, Property, Reflection, TypeKind, TypeSystem,
    TypeSystemId,
};
