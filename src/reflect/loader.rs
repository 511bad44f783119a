use std::path::{Path, PathBuf};

use tracing::debug;

use crate::errors::{LintError, Result};
use crate::reflect::model::{Assembly, TypeSystem};

/// Maximum manifest size accepted by the loader (64 MiB).
const MAX_MANIFEST_SIZE: u64 = 64 * 1024 * 1024;

/// Locate the assembly manifest in a directory (prefer `.jsii` over `assembly.json`).
#[must_use]
pub fn find_manifest(dir: &Path) -> Option<PathBuf> {
    let jsii = dir.join(".jsii");
    if jsii.is_file() {
        return Some(jsii);
    }
    let json = dir.join("assembly.json");
    if json.is_file() {
        return Some(json);
    }
    None
}

/// Resolve a manifest argument: directories resolve through [`find_manifest`].
pub fn resolve_manifest(path: &Path) -> Result<PathBuf> {
    if path.is_dir() {
        return find_manifest(path).ok_or_else(|| LintError::Parse {
            message: format!("no assembly manifest found in {}", path.display()),
        });
    }
    Ok(path.to_path_buf())
}

/// Read a file after checking it does not exceed the manifest size limit.
pub(crate) fn read_file_checked(path: &Path) -> Result<String> {
    let size = std::fs::metadata(path)?.len();
    if size > MAX_MANIFEST_SIZE {
        return Err(LintError::Parse {
            message: format!(
                "{} is too large ({size} bytes, limit {MAX_MANIFEST_SIZE})",
                path.display()
            ),
        });
    }
    Ok(std::fs::read_to_string(path)?)
}

fn is_yaml(path: &Path) -> bool {
    path.extension()
        .is_some_and(|e| e.eq_ignore_ascii_case("yaml") || e.eq_ignore_ascii_case("yml"))
}

/// Parse a manifest from text; YAML when `yaml` is set, JSON otherwise.
pub fn parse_assembly(content: &str, yaml: bool) -> Result<Assembly> {
    let assembly: Assembly = if yaml {
        serde_yaml_ng::from_str(content)?
    } else {
        serde_json::from_str(content)?
    };
    if assembly.name.trim().is_empty() {
        return Err(LintError::Parse {
            message: "assembly manifest has an empty name".to_string(),
        });
    }
    Ok(assembly)
}

/// Load one assembly manifest from a file or directory.
pub fn load_assembly(path: &Path) -> Result<Assembly> {
    let file = resolve_manifest(path)?;
    let content = read_file_checked(&file)?;
    let assembly = parse_assembly(&content, is_yaml(&file))?;
    debug!(
        assembly = %assembly.name,
        types = assembly.types.len(),
        path = %file.display(),
        "loaded assembly"
    );
    Ok(assembly)
}

impl TypeSystem {
    /// Build a type system from manifest paths, in the given order.
    pub fn load<P: AsRef<Path>>(paths: &[P]) -> Result<Self> {
        let mut ts = TypeSystem::new();
        for p in paths {
            ts.add_assembly(load_assembly(p.as_ref())?)?;
        }
        Ok(ts)
    }
}
