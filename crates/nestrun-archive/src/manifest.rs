//! Archive descriptor.
//!
//! The descriptor lives at [`MANIFEST_PATH`] and uses manifest syntax:
//! `Key: Value` lines ended by CRLF, LF or a bare CR, continuation lines
//! starting with a single space, and a main section that ends at the first
//! blank line. Only the main section is read.

/// Location of the descriptor inside the archive.
pub const MANIFEST_PATH: &str = "META-INF/MANIFEST.MF";

/// Required attribute naming the entry point to dispatch to.
pub const DELEGATED_MAIN_CLASS: &str = "delegatedMainClass";

/// Optional attribute naming the tray icon provider.
pub const TRAY_ICON_PROVIDER_CLASS: &str = "tray-icon-provider-class";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Manifest {
    attributes: Vec<(String, String)>,
}

impl Manifest {
    pub fn parse(text: &str) -> Self {
        let mut attributes: Vec<(String, String)> = Vec::new();

        for line in lines(text) {
            if line.is_empty() {
                break;
            }

            if let Some(continued) = line.strip_prefix(' ') {
                if let Some((_, value)) = attributes.last_mut() {
                    value.push_str(continued);
                }
                continue;
            }

            if let Some((key, value)) = line.split_once(':') {
                let value = value.strip_prefix(' ').unwrap_or(value);
                attributes.push((key.to_string(), value.to_string()));
            }
        }

        Self { attributes }
    }

    /// Main-section attribute by exact key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// The entry point name; `None` when absent or blank. A present value is
    /// returned as written, surrounding whitespace included.
    pub fn delegated_main_class(&self) -> Option<&str> {
        non_blank(self.get(DELEGATED_MAIN_CLASS))
    }

    /// The tray icon provider name; `None` when absent or blank.
    pub fn tray_icon_provider_class(&self) -> Option<&str> {
        non_blank(self.get(TRAY_ICON_PROVIDER_CLASS))
    }

    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}

fn lines(text: &str) -> impl Iterator<Item = &str> {
    text.split("\r\n").flat_map(|chunk| chunk.split(['\r', '\n']))
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
