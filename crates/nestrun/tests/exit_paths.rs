//! Exits that never return to the launcher: `Invocation::exit` and
//! termination signals.
//!
//! Each case re-runs this test binary with a single ignored test selected, so
//! the exit happens in a child process.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::time::{Duration, Instant};

use nestrun::{Invocation, Launcher, LauncherConfig, Registry};
use tempfile::{TempDir, tempdir};
use zip::write::SimpleFileOptions;

const APP: &str = "com.example.App";
/// Set in the child to the directory shared with the parent.
const CHILD_VAR: &str = "NESTRUN_TEST_CHILD";

struct Parent {
    dir: TempDir,
}

impl Parent {
    fn new() -> Self {
        let dir = tempdir().unwrap();
        let mut writer = zip::ZipWriter::new(std::fs::File::create(dir.path().join("app.jar")).unwrap());
        for (name, data) in [
            ("META-INF/MANIFEST.MF", b"delegatedMainClass: com.example.App\n".as_slice()),
            ("lib/a.jar", b"jar".as_slice()),
        ] {
            writer.start_file(name, SimpleFileOptions::default()).unwrap();
            writer.write_all(data).unwrap();
        }
        writer.finish().unwrap();
        std::fs::create_dir(dir.path().join("tmp")).unwrap();
        Self { dir }
    }

    fn temp_root(&self) -> PathBuf {
        self.dir.path().join("tmp")
    }

    fn spawn_child(&self, test: &str) -> Child {
        Command::new(std::env::current_exe().unwrap())
            .args(["--ignored", "--exact", test, "--nocapture", "--test-threads=1"])
            .env(CHILD_VAR, self.dir.path())
            .env("NESTRUN_ARCHIVE", self.dir.path().join("app.jar"))
            .env("NESTRUN_TMPDIR", self.temp_root())
            .env("NESTRUN_REAP", "never")
            .stdout(Stdio::null())
            .spawn()
            .unwrap()
    }

    fn target_dirs(&self) -> Vec<PathBuf> {
        std::fs::read_dir(self.temp_root())
            .unwrap()
            .map(|entry| entry.unwrap().path())
            .collect()
    }
}

/// Launch from the environment the parent prepared, or `None` outside a child.
fn launch_in_child(entry: impl Fn(&Invocation, &Path) -> anyhow::Result<()> + Send + Sync + 'static) -> Option<()> {
    let shared = PathBuf::from(std::env::var_os(CHILD_VAR)?);
    let config = LauncherConfig::from_env().unwrap();
    assert!(config.signals_enabled());

    let registry = Registry::new().with_entry_point(APP, move |invocation: &Invocation| entry(invocation, &shared));
    Launcher::new(registry).with_config(config).run(Vec::<String>::new()).unwrap();
    Some(())
}

#[test]
#[ignore = "child process of invocation_exit_cleans_up_and_keeps_the_code"]
fn child_exits_through_invocation() {
    launch_in_child(|invocation, _| invocation.exit(7));
}

#[test]
fn invocation_exit_cleans_up_and_keeps_the_code() {
    let parent = Parent::new();

    let status = parent.spawn_child("child_exits_through_invocation").wait().unwrap();

    assert_eq!(status.code(), Some(7));
    assert!(parent.target_dirs().is_empty());
}

#[test]
#[ignore = "child process of termination_signal_cleans_up_and_exits_130"]
fn child_waits_for_a_signal() {
    launch_in_child(|invocation, shared| {
        let pending = shared.join("ready.tmp");
        std::fs::write(&pending, invocation.target_dir().as_os_str().as_encoded_bytes())?;
        std::fs::rename(&pending, shared.join("ready"))?;
        loop {
            std::thread::sleep(Duration::from_millis(50));
        }
    });
}

#[cfg(unix)]
#[test]
fn termination_signal_cleans_up_and_exits_130() {
    let parent = Parent::new();
    let ready = parent.dir.path().join("ready");
    let mut child = parent.spawn_child("child_waits_for_a_signal");

    let deadline = Instant::now() + Duration::from_secs(60);
    while !ready.exists() {
        if let Some(status) = child.try_wait().unwrap() {
            panic!("child exited before it was ready: {status}");
        }
        assert!(Instant::now() < deadline, "child never became ready");
        std::thread::sleep(Duration::from_millis(20));
    }
    let target = PathBuf::from(std::fs::read_to_string(&ready).unwrap());
    assert!(target.exists());

    let killed = Command::new("kill")
        .args(["-TERM", &child.id().to_string()])
        .status()
        .unwrap();
    assert!(killed.success());
    let status = child.wait().unwrap();

    assert_eq!(status.code(), Some(nestrun::SIGNAL_EXIT_CODE));
    assert!(!target.exists());
    assert!(parent.target_dirs().is_empty());
}
