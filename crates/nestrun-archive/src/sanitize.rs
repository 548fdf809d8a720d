use std::path::{Component, Path, PathBuf};

use crate::error::{Error, Result};

/// Resolve an entry name to its location under `base`.
///
/// Absolute names and names that would land outside `base` are rejected.
pub fn resolve_entry_path(base: impl AsRef<Path>, entry_name: &str) -> Result<PathBuf> {
    let base = base.as_ref();
    let normalized = normalize_path(Path::new(entry_name));

    // Reject absolute paths (zip-slip protection)
    if normalized.has_root() || normalized.is_absolute() {
        return Err(Error::ZipSlip {
            entry: entry_name.to_string(),
            resolved: normalized,
        });
    }

    let resolved = normalize_path(&base.join(&normalized));

    // Ensure result doesn't escape base directory
    if !resolved.starts_with(normalize_path(base)) || resolved == normalize_path(base) {
        return Err(Error::ZipSlip {
            entry: entry_name.to_string(),
            resolved,
        });
    }

    Ok(resolved)
}

/// Normalize path separators and resolve relative components.
fn normalize_path(path: &Path) -> PathBuf {
    let mut result = PathBuf::new();

    for component in path.components() {
        match component {
            Component::ParentDir => {
                result.pop();
            }
            Component::Normal(part) => result.push(part),
            Component::RootDir => result.push(Component::RootDir.as_os_str()),
            Component::Prefix(prefix) => result.push(prefix.as_os_str()),
            Component::CurDir => {}
        }
    }

    result
}
