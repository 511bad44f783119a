pub mod classifier;
pub mod config;
pub mod diagnostics;
pub mod errors;
pub mod linter;
pub mod reflect;
pub mod resource;
pub mod rules;
pub mod wrapper;

// Re-export key types at crate root for convenience.
pub use classifier::{CfnResourceClassifier, ResourceClassifier};
pub use config::LintConfig;
pub use diagnostics::{Diagnostic, Severity};
pub use errors::{LintError, Result};
pub use linter::{LintReport, Linter};
pub use reflect::{Reflection, TypeSystem};
pub use resource::{find_all, ResourceIdentity, ResourceIndexCache};
pub use wrapper::{ResourceTagDiscovery, Wrapper, WrapperDiscovery};
