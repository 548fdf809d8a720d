//! Self-contained application launcher.
//!
//! The launcher binary carries its libraries inside its own archive. At
//! startup they are extracted to a private directory under the shared temp
//! root, a resolution context is built over them and the entry point named by
//! the descriptor's `delegatedMainClass` attribute runs with the process
//! arguments. The directory is deleted on the way out.
//!
//! # Architecture
//!
//! - `config.rs` - Environment and builder configuration
//! - `state.rs` - Per-launch state threaded through every step
//! - `cleanup.rs` - At-most-once deletion of the target directory
//! - `tray.rs` - Optional tray icon installation
//! - `invoke.rs` - Entry point resolution and dispatch
//! - `launcher.rs` - The launch sequence
//! - `daemon.rs` - Service-manager lifecycle
//!
//! # Example
//!
//! ```no_run
//! use nestrun::{Invocation, Registry};
//!
//! fn app(invocation: &Invocation) -> anyhow::Result<()> {
//!     println!("running from {}", invocation.target_dir().display());
//!     Ok(())
//! }
//!
//! fn main() -> std::process::ExitCode {
//!     nestrun::main_with(Registry::new().with_entry_point("com.example.App", app))
//! }
//! ```

use std::process::ExitCode;

use tracing::warn;

pub use cleanup::{CleanupGuard, CleanupHandle, SIGNAL_EXIT_CODE};
pub use config::{ARCHIVE_VAR, LauncherConfig, REAP_VAR, ReapPolicy, TMPDIR_VAR};
pub use daemon::Daemon;
pub use error::{Error, Result};
pub use launcher::Launcher;
pub use logging::LOG_VAR;
pub use nestrun_loader::{
    EntryPoint, Invocation, Registry, ResolutionContext, Resolver, TrayIcon, TrayIconProvider,
    current as current_context, spawn as spawn_with_context,
};
pub use state::LauncherState;
pub use tray::{NoTray, SystemTray};

mod cleanup;
mod config;
mod daemon;
mod error;
pub mod invoke;
mod launcher;
pub mod logging;
mod state;
pub mod tray;

/// Process arguments without the program name.
///
/// Arguments that are not valid Unicode are converted lossily.
pub fn args() -> Vec<String> {
    std::env::args_os()
        .skip(1)
        .map(|arg| match arg.into_string() {
            Ok(arg) => arg,
            Err(arg) => {
                warn!("argument {:?} is not valid Unicode", arg);
                arg.to_string_lossy().into_owned()
            }
        })
        .collect()
}

/// Launch with configuration from the environment and the process arguments.
///
/// Failures are reported on stderr and turn into a non-zero exit status.
pub fn main_with(registry: Registry) -> ExitCode {
    logging::init();

    let result = LauncherConfig::from_env()
        .map_err(anyhow::Error::from)
        .and_then(|config| Launcher::new(registry).with_config(config).run(args()));

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("nestrun: {e:#}");
            ExitCode::FAILURE
        }
    }
}
