use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

use crate::errors::{LintError, Result};
use crate::reflect::docs::Docs;

/// Kind of a reflected type. Only classes take part in resource discovery.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    #[default]
    Class,
    Interface,
    Enum,
}

/// A property declared directly on a class (inherited properties are not listed).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
    pub name: String,
    #[serde(default)]
    pub docs: Docs,
}

impl Property {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            docs: Docs::default(),
        }
    }

    #[must_use]
    pub fn with_docs(mut self, docs: Docs) -> Self {
        self.docs = docs;
        self
    }
}

/// A reflected type from an assembly manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassType {
    /// Fully-qualified name, e.g. `@aws-cdk/aws-s3.CfnBucket`.
    #[serde(default)]
    pub fqn: String,
    /// Simple name, e.g. `CfnBucket`.
    pub name: String,
    #[serde(default)]
    pub kind: TypeKind,
    /// Owning assembly; filled in when the assembly joins a type system.
    #[serde(default)]
    pub assembly: String,
    /// Fully-qualified name of the base class.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base: Option<String>,
    #[serde(default)]
    pub docs: Docs,
    #[serde(default)]
    pub properties: Vec<Property>,
}

impl ClassType {
    #[must_use]
    pub fn new(fqn: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            fqn: fqn.into(),
            name: name.into(),
            kind: TypeKind::Class,
            assembly: String::new(),
            base: None,
            docs: Docs::default(),
            properties: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_base(mut self, base: impl Into<String>) -> Self {
        self.base = Some(base.into());
        self
    }

    #[must_use]
    pub fn with_docs(mut self, docs: Docs) -> Self {
        self.docs = docs;
        self
    }

    #[must_use]
    pub fn with_property(mut self, property: Property) -> Self {
        self.properties.push(property);
        self
    }

    #[must_use]
    pub fn is_class(&self) -> bool {
        self.kind == TypeKind::Class
    }
}

/// One loaded assembly: a named unit of types with declared dependencies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assembly {
    pub name: String,
    #[serde(default)]
    pub version: String,
    /// Names of assemblies this one depends on.
    #[serde(default)]
    pub dependencies: Vec<String>,
    #[serde(default)]
    pub types: Vec<ClassType>,
}

impl Assembly {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: String::new(),
            dependencies: Vec::new(),
            types: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_dependency(mut self, name: impl Into<String>) -> Self {
        self.dependencies.push(name.into());
        self
    }

    #[must_use]
    pub fn with_type(mut self, class: ClassType) -> Self {
        self.types.push(class);
        self
    }
}

/// Stable identity of a type system, used as the index cache key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeSystemId(u64);

impl TypeSystemId {
    /// Allocate a fresh process-unique id.
    #[must_use]
    pub fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// Read-only view over a loaded type system.
///
/// Implemented by [`TypeSystem`]; tests wrap it to observe scans.
pub trait Reflection {
    /// Identity used to key cached derived data.
    fn id(&self) -> TypeSystemId;

    /// Every class of every loaded assembly, in load order.
    fn classes(&self) -> Box<dyn Iterator<Item = &ClassType> + '_>;

    /// Look up a class by fully-qualified name.
    fn find_class(&self, fqn: &str) -> Option<&ClassType>;

    /// Look up a loaded assembly by name.
    fn assembly(&self, name: &str) -> Option<&Assembly>;
}

/// In-memory type system built from assembly manifests.
#[derive(Debug)]
pub struct TypeSystem {
    id: TypeSystemId,
    assemblies: Vec<Assembly>,
    // fqn -> (assembly index, type index)
    by_fqn: HashMap<String, (usize, usize)>,
}

impl TypeSystem {
    #[must_use]
    pub fn new() -> Self {
        Self {
            id: TypeSystemId::next(),
            assemblies: Vec::new(),
            by_fqn: HashMap::new(),
        }
    }

    /// Add an assembly. Types without an fqn get `<assembly>.<name>`.
    ///
    /// Fails if an assembly with the same name is already loaded, or if one
    /// of its fqns is already taken. On success the type system gets a new
    /// [`TypeSystemId`], so data cached under the old id is not reused.
    pub fn add_assembly(&mut self, mut assembly: Assembly) -> Result<()> {
        if self.assemblies.iter().any(|a| a.name == assembly.name) {
            return Err(LintError::Parse {
                message: format!("assembly '{}' loaded twice", assembly.name),
            });
        }
        let mut fqns = HashSet::new();
        for t in &mut assembly.types {
            t.assembly.clone_from(&assembly.name);
            if t.fqn.is_empty() {
                t.fqn = format!("{}.{}", assembly.name, t.name);
            }
            if self.by_fqn.contains_key(&t.fqn) || !fqns.insert(t.fqn.clone()) {
                return Err(LintError::Parse {
                    message: format!("type '{}' declared twice", t.fqn),
                });
            }
        }

        let asm_index = self.assemblies.len();
        for (type_index, t) in assembly.types.iter().enumerate() {
            self.by_fqn.insert(t.fqn.clone(), (asm_index, type_index));
        }
        self.assemblies.push(assembly);
        self.id = TypeSystemId::next();
        Ok(())
    }

    /// Builder form of [`add_assembly`](Self::add_assembly).
    pub fn with_assembly(mut self, assembly: Assembly) -> Result<Self> {
        self.add_assembly(assembly)?;
        Ok(self)
    }

    /// Loaded assemblies in load order.
    #[must_use]
    pub fn assemblies(&self) -> &[Assembly] {
        &self.assemblies
    }
}

impl Default for TypeSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Reflection for TypeSystem {
    fn id(&self) -> TypeSystemId {
        self.id
    }

    fn classes(&self) -> Box<dyn Iterator<Item = &ClassType> + '_> {
        Box::new(
            self.assemblies
                .iter()
                .flat_map(|a| a.types.iter())
                .filter(|t| t.is_class()),
        )
    }

    fn find_class(&self, fqn: &str) -> Option<&ClassType> {
        let &(a, t) = self.by_fqn.get(fqn)?;
        Some(&self.assemblies[a].types[t]).filter(|t| t.is_class())
    }

    fn assembly(&self, name: &str) -> Option<&Assembly> {
        self.assemblies.iter().find(|a| a.name == name)
    }
}

/// Names of `assembly` and every assembly it transitively depends on.
///
/// Dependencies that are not loaded are skipped.
pub fn dependency_closure(ts: &dyn Reflection, assembly: &str) -> Result<HashSet<String>> {
    let root = ts.assembly(assembly).ok_or_else(|| LintError::UnknownAssembly {
        name: assembly.to_string(),
    })?;
    let mut seen = HashSet::from([root.name.clone()]);
    let mut queue: VecDeque<&Assembly> = VecDeque::from([root]);
    while let Some(a) = queue.pop_front() {
        for dep in &a.dependencies {
            if seen.contains(dep) {
                continue;
            }
            if let Some(d) = ts.assembly(dep) {
                seen.insert(dep.clone());
                queue.push_back(d);
            }
        }
    }
    Ok(seen)
}
