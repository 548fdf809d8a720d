use std::env;
use std::ffi::OsString;
use std::path::PathBuf;

/// System temporary directory.
pub fn user_temp() -> PathBuf {
    env::temp_dir()
}

/// Shared temp root for target directories.
///
/// An explicit, non-empty override wins over the system temporary directory.
pub fn temp_root(override_dir: Option<OsString>) -> PathBuf {
    override_dir
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(user_temp)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_temp_is_absolute() {
        let temp = user_temp();
        assert!(temp.is_absolute());
    }

    #[test]
    fn test_temp_root_without_override() {
        assert_eq!(temp_root(None), user_temp());
    }

    #[test]
    fn test_temp_root_with_override() {
        let root = temp_root(Some(OsString::from("/var/tmp/nestrun")));
        assert_eq!(root, PathBuf::from("/var/tmp/nestrun"));
    }

    #[test]
    fn test_temp_root_ignores_empty_override() {
        assert_eq!(temp_root(Some(OsString::new())), user_temp());
    }
}
