use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use nestrun_loader::{
    ArchiveIndex, Baseline, Invocation, LibraryPath, Registry, ResolutionContext, Resolver, TrayIcon,
};
use tempfile::tempdir;
use zip::write::SimpleFileOptions;

fn write_zip(path: &Path, entries: &[(&str, &str)]) {
    let mut writer = zip::ZipWriter::new(File::create(path).unwrap());
    for (name, data) in entries {
        writer.start_file(*name, SimpleFileOptions::default()).unwrap();
        writer.write_all(data.as_bytes()).unwrap();
    }
    writer.finish().unwrap();
}

fn app(invocation: &Invocation) -> anyhow::Result<()> {
    let greeting = invocation.context().read_resource("greeting.txt")?;
    anyhow::ensure!(greeting == b"from library", "unexpected greeting");
    Ok(())
}

fn tray(context: &ResolutionContext) -> anyhow::Result<TrayIcon> {
    Ok(TrayIcon::new(context.read_resource("icon.png")?).with_tooltip("app"))
}

#[test]
fn local_libraries_shadow_outer_archive() {
    let dir = tempdir().unwrap();
    let outer = dir.path().join("app.jar");
    let library = dir.path().join("lib").join("a.jar");
    std::fs::create_dir_all(library.parent().unwrap()).unwrap();
    write_zip(&outer, &[("greeting.txt", "from outer"), ("icon.png", "outer icon")]);
    write_zip(&library, &[("greeting.txt", "from library")]);

    let registry = Registry::new()
        .with_entry_point("com.example.App", app)
        .with_tray_provider("com.example.Tray", tray);
    let baseline = Baseline::new(registry).with_archive(ArchiveIndex::open(&outer).unwrap());
    let context = Arc::new(ResolutionContext::new(LibraryPath::new([&library]), baseline));

    assert_eq!(context.search_path(), &[library.clone()]);
    assert_eq!(context.read_resource("greeting.txt").unwrap(), b"from library");
    assert_eq!(context.read_resource("icon.png").unwrap(), b"outer icon");

    let entry = context.entry_point("com.example.App").unwrap();
    let invocation = Invocation::new(vec![], Arc::clone(&context), dir.path());
    entry.run(&invocation).unwrap();

    let icon = context
        .tray_provider("com.example.Tray")
        .unwrap()
        .tray_icon(&context)
        .unwrap();
    assert_eq!(icon.image, b"outer icon");
    assert_eq!(icon.tooltip.as_deref(), Some("app"));
}

#[test]
fn unknown_names_do_not_resolve() {
    let context = ResolutionContext::new(LibraryPath::default(), Baseline::new(Registry::new()));

    assert!(context.entry_point("com.example.Missing").is_none());
    assert!(context.tray_provider("com.example.Missing").is_none());
    assert!(context.search_path().is_empty());
}
