//! Dispatch to the entry point named by the descriptor.

use std::sync::Arc;

use nestrun_loader::{EntryPoint, Invocation, ResolutionContext, Resolver};
use tracing::info;

use crate::error::{Error, Result};
use crate::state::LauncherState;

/// Resolve the descriptor's entry point in `context`.
pub fn resolve(state: &LauncherState, context: &ResolutionContext) -> Result<(String, Arc<dyn EntryPoint>)> {
    let name = state
        .manifest()
        .delegated_main_class()
        .ok_or_else(|| Error::MissingEntryPoint(state.archive().path().to_path_buf()))?;
    let entry = context
        .entry_point(name)
        .ok_or_else(|| Error::EntryPointNotFound(name.to_string()))?;
    Ok((name.to_string(), entry))
}

/// Run the descriptor's entry point with `args`.
///
/// The context is the thread's active context while the entry point runs.
/// Whatever the entry point returns is passed back untouched.
pub fn invoke(state: &LauncherState, context: &Arc<ResolutionContext>, args: Vec<String>) -> anyhow::Result<()> {
    let (name, entry) = resolve(state, context)?;

    let cleanup = state.cleanup_handle();
    let invocation = Invocation::new(args, Arc::clone(context), state.target_dir()).on_exit(move || {
        cleanup.run();
    });

    info!("invoking '{}' with {} argument(s)", name, invocation.args().len());
    let _active = context.enter();
    entry.run(&invocation)
}
