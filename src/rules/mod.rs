//! Built-in resource rules.

pub mod resource_class;

use crate::linter::ResourceRule;

pub use resource_class::ResourceClass;

/// Every built-in rule, in evaluation order.
#[must_use]
pub fn all_rules() -> Vec<Box<dyn ResourceRule>> {
    vec![Box::new(ResourceClass)]
}
