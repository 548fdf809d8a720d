use std::fmt;

use nestrun_loader::Registry;
use tracing::debug;

use crate::config::LauncherConfig;
use crate::invoke;
use crate::state::LauncherState;
use crate::tray::{self, NoTray, SystemTray};

/// Extract the running archive and dispatch to its entry point.
pub struct Launcher {
    config: LauncherConfig,
    registry: Registry,
    tray: Box<dyn SystemTray>,
}

impl Launcher {
    pub fn new(registry: Registry) -> Self {
        Self {
            config: LauncherConfig::default(),
            registry,
            tray: Box::new(NoTray),
        }
    }

    pub fn with_config(mut self, config: LauncherConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_tray(mut self, tray: impl SystemTray + 'static) -> Self {
        self.tray = Box::new(tray);
        self
    }

    pub fn config(&self) -> &LauncherConfig {
        &self.config
    }

    /// Run one launch with `args`, passed to the entry point as given.
    ///
    /// Startup failures downcast to [`crate::Error`]; an entry point's own
    /// error is returned as it was produced. The target directory is gone by
    /// the time this returns or unwinds.
    pub fn run<I, S>(&self, args: I) -> anyhow::Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let args: Vec<String> = args.into_iter().map(Into::into).collect();

        let mut state = LauncherState::prepare(&self.config)?;
        state.extract()?;
        let context = state.build_context(self.registry.clone());
        debug!("search path: {:?}", context.search_path());

        tray::install(
            self.tray.as_ref(),
            state.manifest().tray_icon_provider_class(),
            &context,
        )?;

        let result = invoke::invoke(&state, &context, args);
        drop(context);
        drop(state);
        result
    }
}

impl fmt::Debug for Launcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Launcher")
            .field("config", &self.config)
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}
