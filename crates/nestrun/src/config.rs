//! Launcher configuration.

use std::env;
use std::ffi::OsString;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use nestrun_archive::CodeLocation;
use nestrun_platform::OS;

use crate::error::{Error, Result};

/// Archive to launch from instead of the running executable.
pub const ARCHIVE_VAR: &str = "NESTRUN_ARCHIVE";
/// Shared temp root instead of the platform temp directory.
pub const TMPDIR_VAR: &str = "NESTRUN_TMPDIR";
/// Stale directory reaping: `auto`, `always` or `never`.
pub const REAP_VAR: &str = "NESTRUN_REAP";

/// When to reap directories left behind by earlier runs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ReapPolicy {
    /// Only where open files block deletion at exit.
    #[default]
    Auto,
    Always,
    Never,
}

impl ReapPolicy {
    pub fn should_reap(self, os: OS) -> bool {
        match self {
            Self::Auto => os.locks_open_files(),
            Self::Always => true,
            Self::Never => false,
        }
    }
}

impl FromStr for ReapPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "always" => Ok(Self::Always),
            "never" => Ok(Self::Never),
            _ => Err(Error::InvalidConfig(format!(
                "{REAP_VAR}='{s}', expected one of auto, always, never"
            ))),
        }
    }
}

impl fmt::Display for ReapPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Auto => "auto",
            Self::Always => "always",
            Self::Never => "never",
        };
        f.write_str(name)
    }
}

#[derive(Clone, Debug)]
pub struct LauncherConfig {
    archive: Option<PathBuf>,
    temp_root: Option<PathBuf>,
    prefix: String,
    reap: ReapPolicy,
    handle_signals: bool,
}

impl Default for LauncherConfig {
    fn default() -> Self {
        Self {
            archive: None,
            temp_root: None,
            prefix: nestrun_fs::DEFAULT_PREFIX.to_string(),
            reap: ReapPolicy::default(),
            handle_signals: true,
        }
    }
}

impl LauncherConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read overrides from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var_os(key))
    }

    /// Read overrides through `lookup`. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<OsString>) -> Result<Self> {
        let lookup = |key: &str| lookup(key).filter(|value| !value.is_empty());
        let mut config = Self::default();

        if let Some(archive) = lookup(ARCHIVE_VAR) {
            config.archive = Some(PathBuf::from(archive));
        }
        if let Some(root) = lookup(TMPDIR_VAR) {
            config.temp_root = Some(PathBuf::from(root));
        }
        if let Some(reap) = lookup(REAP_VAR) {
            let reap = reap
                .to_str()
                .ok_or_else(|| Error::InvalidConfig(format!("{REAP_VAR} is not valid UTF-8")))?;
            config.reap = reap.parse()?;
        }

        Ok(config)
    }

    pub fn archive(mut self, path: impl Into<PathBuf>) -> Self {
        self.archive = Some(path.into());
        self
    }

    pub fn temp_root(mut self, path: impl Into<PathBuf>) -> Self {
        self.temp_root = Some(path.into());
        self
    }

    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn reap(mut self, policy: ReapPolicy) -> Self {
        self.reap = policy;
        self
    }

    /// Delete the target directory on SIGINT/SIGTERM before exiting.
    pub fn handle_signals(mut self, enabled: bool) -> Self {
        self.handle_signals = enabled;
        self
    }

    /// Where the running code lives.
    pub fn code_location(&self) -> Result<CodeLocation> {
        match &self.archive {
            Some(path) => Ok(CodeLocation::new(path)),
            None => Ok(CodeLocation::current()?),
        }
    }

    /// Parent of every target directory.
    pub fn shared_temp_root(&self) -> PathBuf {
        nestrun_platform::dir::temp_root(self.temp_root.clone().map(PathBuf::into_os_string))
    }

    pub fn dir_prefix(&self) -> &str {
        &self.prefix
    }

    pub fn reap_policy(&self) -> ReapPolicy {
        self.reap
    }

    pub fn signals_enabled(&self) -> bool {
        self.handle_signals
    }
}
