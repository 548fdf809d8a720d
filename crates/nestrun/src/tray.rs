//! Optional tray icon, behind the platform's tray.

use nestrun_loader::{ResolutionContext, Resolver, TrayIcon};
use tracing::{debug, info};

use crate::error::{Error, Result};

/// The platform's notification area.
pub trait SystemTray: Send + Sync {
    fn is_supported(&self) -> bool;

    fn add(&self, icon: TrayIcon) -> anyhow::Result<()>;
}

/// A platform without a tray.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoTray;

impl SystemTray for NoTray {
    fn is_supported(&self) -> bool {
        false
    }

    fn add(&self, _icon: TrayIcon) -> anyhow::Result<()> {
        Ok(())
    }
}

/// Put the provider's icon into `tray`.
///
/// Skipped when the tray is unsupported or no provider is named. Returns
/// whether an icon was added.
pub fn install(tray: &dyn SystemTray, provider: Option<&str>, context: &ResolutionContext) -> Result<bool> {
    if !tray.is_supported() {
        debug!("system tray not supported");
        return Ok(false);
    }
    let Some(name) = provider else {
        return Ok(false);
    };

    let provider = context
        .tray_provider(name)
        .ok_or_else(|| Error::TrayProviderNotFound(name.to_string()))?;
    let failed = |e: anyhow::Error| Error::TrayProvider {
        name: name.to_string(),
        source: e.into(),
    };

    let icon = provider.tray_icon(context).map_err(failed)?;
    tray.add(icon).map_err(failed)?;
    info!("tray icon installed from '{}'", name);
    Ok(true)
}
