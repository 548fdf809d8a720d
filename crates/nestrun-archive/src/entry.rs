use std::fmt;
use std::io::Read;

/// Extensions of platform-native shared objects.
pub const NATIVE_LIBRARY_EXTENSIONS: &[&str] = &["so", "sl", "dylib", "dll", "lib"];

/// What an archive entry is, judged by its name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntryKind {
    /// Nested library, placed on the resolution search path.
    Library,
    /// Nested web-style bundle.
    WebBundle,
    /// Platform-native shared object.
    NativeLibrary,
    /// Everything else; never extracted.
    Other,
}

impl EntryKind {
    /// Whether entries of this kind are written to the target directory.
    pub fn is_extracted(self) -> bool {
        !matches!(self, Self::Other)
    }

    pub fn is_library(self) -> bool {
        matches!(self, Self::Library)
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Library => "library",
            Self::WebBundle => "web bundle",
            Self::NativeLibrary => "native library",
            Self::Other => "other",
        };
        f.write_str(name)
    }
}

/// Classify an archive entry name. Extension matching ignores case.
pub fn classify(name: &str) -> EntryKind {
    if name.ends_with('/') {
        return EntryKind::Other;
    }

    let lower = name.to_ascii_lowercase();
    if lower.ends_with(".jar") || lower.ends_with(".zip") {
        EntryKind::Library
    } else if lower.ends_with(".war") {
        EntryKind::WebBundle
    } else if is_native_library(&lower) {
        EntryKind::NativeLibrary
    } else {
        EntryKind::Other
    }
}

fn is_native_library(name: &str) -> bool {
    let file_name = name.rsplit(|c: char| c == '/' || c == '\\').next().unwrap_or(name);
    match file_name.rfind('.') {
        // a leading dot marks a hidden file, not an extension
        Some(pos) if pos > 0 => NATIVE_LIBRARY_EXTENSIONS.contains(&&file_name[pos + 1..]),
        _ => false,
    }
}

/// An entry read from the archive but not yet written.
pub struct ArchiveEntry<'a> {
    pub name: String,
    pub kind: EntryKind,
    pub size: u64,
    pub reader: Box<dyn Read + 'a>,
}

impl<'a> ArchiveEntry<'a> {
    pub fn new(name: impl Into<String>, size: u64, reader: Box<dyn Read + 'a>) -> Self {
        let name = name.into();
        let kind = classify(&name);
        Self {
            name,
            kind,
            size,
            reader,
        }
    }
}

impl fmt::Debug for ArchiveEntry<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArchiveEntry")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("size", &self.size)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn libraries() {
        assert_eq!(classify("lib/a.jar"), EntryKind::Library);
        assert_eq!(classify("lib/A.JAR"), EntryKind::Library);
        assert_eq!(classify("deps/bundle.Zip"), EntryKind::Library);
        assert_eq!(classify(".jar"), EntryKind::Library);
    }

    #[test]
    fn web_bundles() {
        assert_eq!(classify("lib/b.war"), EntryKind::WebBundle);
        assert_eq!(classify("lib/B.WAR"), EntryKind::WebBundle);
    }

    #[test]
    fn native_libraries() {
        for ext in NATIVE_LIBRARY_EXTENSIONS {
            assert_eq!(classify(&format!("native/c.{ext}")), EntryKind::NativeLibrary);
        }
        assert_eq!(classify("native/C.DLL"), EntryKind::NativeLibrary);
        assert_eq!(classify("libfoo.dylib"), EntryKind::NativeLibrary);
    }

    #[test]
    fn dot_first_or_missing_is_not_native() {
        assert_eq!(classify(".so"), EntryKind::Other);
        assert_eq!(classify("native/.dll"), EntryKind::Other);
        assert_eq!(classify("so"), EntryKind::Other);
        assert_eq!(classify("native/lib"), EntryKind::Other);
    }

    #[test]
    fn everything_else_is_other() {
        assert_eq!(classify("META-INF/MANIFEST.MF"), EntryKind::Other);
        assert_eq!(classify("com/example/App.class"), EntryKind::Other);
        assert_eq!(classify("libfoo.so.1"), EntryKind::Other);
        assert_eq!(classify("lib/nested.jar/"), EntryKind::Other);
        assert_eq!(classify("lib/"), EntryKind::Other);
    }

    #[test]
    fn extracted_kinds() {
        assert!(EntryKind::Library.is_extracted());
        assert!(EntryKind::WebBundle.is_extracted());
        assert!(EntryKind::NativeLibrary.is_extracted());
        assert!(!EntryKind::Other.is_extracted());
        assert!(EntryKind::Library.is_library());
        assert!(!EntryKind::NativeLibrary.is_library());
    }

    #[test]
    fn entry_classifies_on_construction() {
        let entry = ArchiveEntry::new("lib/a.jar", 3, Box::new(Cursor::new(b"abc".to_vec())));
        assert_eq!(entry.kind, EntryKind::Library);
        assert_eq!(entry.size, 3);
    }
}
