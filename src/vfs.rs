use serde::{Deserialize, Serialize};
use std::{fmt, path::Path};

/// A namespaced, `/`-delimited identifier for an asset inside the game's virtual file system.
///
/// Formed as `<virtual root>/<path relative to the scanned directory>`. The separator is
/// always `/`, whatever the host uses, so manifests generated on different machines agree.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VirtualPath(String);
impl VirtualPath {
    /// Joins `relative` onto `virtual_root`.
    ///
    /// Returns `None` if any component of `relative` is not valid unicode.
    pub fn from_relative(virtual_root: &str, relative: &Path) -> Option<Self> {
        let mut segments = Vec::new();

        for component in relative.components() {
            segments.push(component.as_os_str().to_str()?);
        }

        // backslashes survive `components()` on unix hosts
        let joined = segments.join("/").replace('\\', "/");

        Some(Self(format!("{}/{}", virtual_root, joined)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
impl fmt::Display for VirtualPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
impl AsRef<str> for VirtualPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
