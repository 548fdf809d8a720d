//! Operating system family detection.

use std::env;

/// Operating system families the launcher distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OS {
    Windows,
    Macos,
    Linux,
    Unknown,
}

impl OS {
    /// Map a `std::env::consts::OS` style name to a family.
    pub fn from_name(name: &str) -> Self {
        match name {
            "windows" => OS::Windows,
            "macos" => OS::Macos,
            "linux" => OS::Linux,
            _ => OS::Unknown,
        }
    }

    /// Whether files held open by the running process cannot be deleted.
    ///
    /// On these systems an exit-time delete of extracted libraries is not
    /// reliable, so leftovers must be collected by a later run.
    pub fn locks_open_files(self) -> bool {
        matches!(self, OS::Windows)
    }
}

/// Detect the operating system this binary was built for.
pub fn detect() -> OS {
    OS::from_name(env::consts::OS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name() {
        assert_eq!(OS::from_name("windows"), OS::Windows);
        assert_eq!(OS::from_name("macos"), OS::Macos);
        assert_eq!(OS::from_name("linux"), OS::Linux);
        assert_eq!(OS::from_name("freebsd"), OS::Unknown);
    }

    #[test]
    fn test_only_windows_locks_open_files() {
        assert!(OS::Windows.locks_open_files());
        assert!(!OS::Linux.locks_open_files());
        assert!(!OS::Macos.locks_open_files());
        assert!(!OS::Unknown.locks_open_files());
    }

    #[test]
    fn test_detect_matches_target() {
        let os = detect();
        if cfg!(target_os = "windows") {
            assert_eq!(os, OS::Windows);
        } else if cfg!(target_os = "linux") {
            assert_eq!(os, OS::Linux);
        } else if cfg!(target_os = "macos") {
            assert_eq!(os, OS::Macos);
        }
    }
}
