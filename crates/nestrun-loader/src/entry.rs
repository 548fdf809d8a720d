use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::context::ResolutionContext;

/// Code the launcher can dispatch to by name.
///
/// Plain functions and closures taking an [`Invocation`] are entry points.
pub trait EntryPoint: Send + Sync {
    fn run(&self, invocation: &Invocation) -> anyhow::Result<()>;
}

impl<F> EntryPoint for F
where
    F: Fn(&Invocation) -> anyhow::Result<()> + Send + Sync,
{
    fn run(&self, invocation: &Invocation) -> anyhow::Result<()> {
        self(invocation)
    }
}

type ExitHook = Box<dyn Fn() + Send + Sync>;

/// What an entry point is handed when it runs.
pub struct Invocation {
    args: Vec<String>,
    context: Arc<ResolutionContext>,
    target_dir: PathBuf,
    before_exit: Option<ExitHook>,
}

impl Invocation {
    pub fn new(args: Vec<String>, context: Arc<ResolutionContext>, target_dir: impl Into<PathBuf>) -> Self {
        Self {
            args,
            context,
            target_dir: target_dir.into(),
            before_exit: None,
        }
    }

    /// Run `hook` before [`Invocation::exit`] terminates the process.
    pub fn on_exit(mut self, hook: impl Fn() + Send + Sync + 'static) -> Self {
        self.before_exit = Some(Box::new(hook));
        self
    }

    /// The process arguments, without the program name.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn context(&self) -> &Arc<ResolutionContext> {
        &self.context
    }

    /// The private directory the nested packages were extracted to.
    pub fn target_dir(&self) -> &Path {
        &self.target_dir
    }

    /// Terminate the process with `code` after cleanup.
    pub fn exit(&self, code: i32) -> ! {
        if let Some(hook) = &self.before_exit {
            hook();
        }
        std::process::exit(code)
    }
}

impl fmt::Debug for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Invocation")
            .field("args", &self.args)
            .field("target_dir", &self.target_dir)
            .field("search_path", &self.context.search_path())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::LibraryPath;
    use crate::registry::{Baseline, Registry};

    fn count_args(invocation: &Invocation) -> anyhow::Result<()> {
        anyhow::ensure!(invocation.args().len() == 2, "expected two arguments");
        Ok(())
    }

    fn invocation(args: &[&str]) -> Invocation {
        let context = ResolutionContext::new(LibraryPath::default(), Baseline::new(Registry::new()));
        Invocation::new(
            args.iter().map(|a| a.to_string()).collect(),
            Arc::new(context),
            "/tmp/_nestrun-1",
        )
    }

    #[test]
    fn functions_are_entry_points() {
        let entry: Arc<dyn EntryPoint> = Arc::new(count_args);
        assert!(entry.run(&invocation(&["a", "b"])).is_ok());
        assert!(entry.run(&invocation(&["a"])).is_err());
    }

    #[test]
    fn closures_are_entry_points() {
        let entry = |invocation: &Invocation| -> anyhow::Result<()> {
            anyhow::ensure!(invocation.target_dir() == Path::new("/tmp/_nestrun-1"));
            Ok(())
        };
        assert!(entry.run(&invocation(&[])).is_ok());
    }

    #[test]
    fn args_pass_through_unmodified() {
        let args = ["--flag", "", "with space", "ünïcödé"];
        let invocation = invocation(&args);
        assert_eq!(invocation.args(), args.map(String::from).as_slice());
    }
}
