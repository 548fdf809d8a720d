use crate::context::ResolutionContext;

/// A visual indicator handed to the platform tray.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TrayIcon {
    pub tooltip: Option<String>,
    /// Encoded image bytes, typically PNG.
    pub image: Vec<u8>,
}

impl TrayIcon {
    pub fn new(image: Vec<u8>) -> Self {
        Self { tooltip: None, image }
    }

    pub fn with_tooltip(mut self, tooltip: impl Into<String>) -> Self {
        self.tooltip = Some(tooltip.into());
        self
    }
}

/// Supplies the tray icon for an application.
///
/// Providers are resolved by name through the resolution context, and get
/// that same context to load their image resources from.
pub trait TrayIconProvider: Send + Sync {
    fn tray_icon(&self, context: &ResolutionContext) -> anyhow::Result<TrayIcon>;
}

impl<F> TrayIconProvider for F
where
    F: Fn(&ResolutionContext) -> anyhow::Result<TrayIcon> + Send + Sync,
{
    fn tray_icon(&self, context: &ResolutionContext) -> anyhow::Result<TrayIcon> {
        self(context)
    }
}
