use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use dashmap::DashMap;
use tracing::{debug, warn};

use crate::classifier::ResourceClassifier;
use crate::errors::Result;
use crate::reflect::{dependency_closure, Reflection, TypeSystemId};
use crate::resource::{ResourceIdentity, RESOURCE_TAG};

/// Build a [`ResourceIdentity`] for every resource class visible from `assembly`.
///
/// Visible means declared in the assembly or in any assembly it transitively
/// depends on. Classes keep the type system's load order.
pub fn find_all(
    ts: &dyn Reflection,
    assembly: &str,
    classifier: &dyn ResourceClassifier,
) -> Result<Vec<ResourceIdentity>> {
    let visible = dependency_closure(ts, assembly)?;
    let mut resources = Vec::new();
    for class in ts.classes() {
        if !visible.contains(&class.assembly) || !classifier.is_resource(ts, class) {
            continue;
        }
        resources.push(ResourceIdentity::build(class)?);
    }
    debug!(assembly, count = resources.len(), "discovered resource classes");
    Ok(resources)
}

/// Lower-cased resource identifier -> fqn of the class declaring it.
#[derive(Debug, Default)]
pub struct ResourceIndex {
    by_name: HashMap<String, String>,
}

impl ResourceIndex {
    /// Scan every class of `ts` once and record the tagged ones.
    ///
    /// On duplicate identifiers the class loaded last wins.
    #[must_use]
    pub fn scan(ts: &dyn Reflection) -> Self {
        let mut by_name = HashMap::new();
        for class in ts.classes() {
            let Some(full_name) = class.docs.custom(RESOURCE_TAG) else {
                continue;
            };
            if full_name.is_empty() {
                continue;
            }
            if let Some(previous) = by_name.insert(full_name.to_lowercase(), class.fqn.clone()) {
                warn!(
                    resource = full_name,
                    previous = %previous,
                    class = %class.fqn,
                    "resource identifier declared by more than one class"
                );
            }
        }
        debug!(type_system = ?ts.id(), resources = by_name.len(), "built resource index");
        Self { by_name }
    }

    /// Fqn of the class declaring `full_name`, compared case-insensitively.
    #[must_use]
    pub fn get(&self, full_name: &str) -> Option<&str> {
        self.by_name.get(&full_name.to_lowercase()).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

/// Per-type-system cache of [`ResourceIndex`] tables.
///
/// Each type system is scanned at most once, even under concurrent first
/// queries. Entries live until [`clear`](Self::clear) or
/// [`remove`](Self::remove). Adding an assembly gives a [`TypeSystem`] a new
/// id, so an entry never outlives the contents it was built from.
///
/// [`TypeSystem`]: crate::reflect::TypeSystem
#[derive(Debug, Default)]
pub struct ResourceIndexCache {
    entries: DashMap<TypeSystemId, Arc<OnceLock<Arc<ResourceIndex>>>>,
}

impl ResourceIndexCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The index for `ts`, scanning it on first use.
    pub fn index(&self, ts: &dyn Reflection) -> Arc<ResourceIndex> {
        // Clone the cell out so the shard lock is not held during the scan.
        let cell = self.entries.entry(ts.id()).or_default().clone();
        cell.get_or_init(|| Arc::new(ResourceIndex::scan(ts))).clone()
    }

    /// Find the resource declared as `full_name` (case-insensitive).
    ///
    /// A miss is `Ok(None)`, not an error.
    pub fn find_by_name(
        &self,
        ts: &dyn Reflection,
        full_name: &str,
    ) -> Result<Option<ResourceIdentity>> {
        let index = self.index(ts);
        let Some(fqn) = index.get(full_name) else {
            return Ok(None);
        };
        match ts.find_class(fqn) {
            Some(class) => Ok(Some(ResourceIdentity::build(class)?)),
            None => Ok(None),
        }
    }

    /// Drop the cached index of one type system.
    pub fn remove(&self, id: TypeSystemId) {
        self.entries.remove(&id);
    }

    /// Drop every cached index.
    pub fn clear(&self) {
        self.entries.clear();
    }

    /// Number of type systems with a cache entry.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
