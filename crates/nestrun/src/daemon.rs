//! Service-manager lifecycle around a [`Launcher`].

use crate::launcher::Launcher;

/// Adapts a launcher to `init`, `start`, `stop` and `destroy` calls.
///
/// `start` runs a complete launch with the arguments captured by `init` and
/// returns when the entry point does.
#[derive(Debug)]
pub struct Daemon {
    launcher: Launcher,
    args: Vec<String>,
}

impl Daemon {
    pub fn new(launcher: Launcher) -> Self {
        Self {
            launcher,
            args: Vec::new(),
        }
    }

    pub fn init<I, S>(&mut self, args: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
    }

    pub fn start(&self) -> anyhow::Result<()> {
        self.launcher.run(self.args.iter().cloned())
    }

    pub fn stop(&mut self) {}

    pub fn destroy(&mut self) {
        self.args.clear();
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }
}
