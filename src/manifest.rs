use crate::{
    errors::{FileOperation, IoError},
    transactions::{Active, RollbackOperation, Transaction},
    vfs::VirtualPath,
};
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum ManifestError {
    #[error("I/O error within manifest domain")]
    #[diagnostic(code(patchgen::manifest::io))]
    Io(#[from] IoError),

    #[error("unable to serialize manifest")]
    #[diagnostic(code(patchgen::manifest::serialize))]
    Serialize(#[from] serde_json::Error),
}

/// A patch manifest as read by the mod installer.
///
/// Field order is the serialization order. Everything but `devOnly` and `conflictsWith` is left
/// empty for the patch author to fill in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    pub name: String,
    pub description: String,
    pub version: String,
    /// Ids of the mods this patch reconciles.
    pub patches: Vec<String>,
    pub dev_only: bool,
    pub conflicts_with: Vec<VirtualPath>,
    pub download: String,
}
impl Manifest {
    /// Wraps the collected paths as-is; order and duplicates are preserved.
    pub fn new(conflicts_with: Vec<VirtualPath>, dev_only: bool) -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            version: String::new(),
            patches: Vec::new(),
            dev_only,
            conflicts_with,
            download: String::new(),
        }
    }

    /// Renders the manifest as tab-indented JSON.
    pub fn to_json(&self) -> Result<Vec<u8>, ManifestError> {
        let mut buffer = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"\t");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);

        self.serialize(&mut serializer)?;

        Ok(buffer)
    }

    /// Writes the manifest to `path`, replacing any existing file.
    ///
    /// The contents go to a sibling staging file first, registered on `trx`, which is renamed
    /// over `path` only once fully written. A failed write leaves a previous manifest untouched
    /// and the staging file is removed when the transaction is dropped.
    ///
    /// # Errors
    ///
    /// Returns a [`ManifestError`] if serialization fails or the file cannot be created or written.
    pub fn write_to(&self, trx: &mut Transaction<Active>, path: &Path) -> Result<(), ManifestError> {
        let contents = self.to_json()?;

        let staging = staging_path(path);

        let mut file = File::create(&staging)
            .map_err(|error| IoError::new(FileOperation::Write, staging.clone(), error))?;

        trx.add_operation(RollbackOperation::RemoveFile(staging.clone()));

        file.write_all(&contents)
            .and_then(|()| file.sync_all())
            .map_err(|error| IoError::new(FileOperation::Write, staging.clone(), error))?;

        drop(file);

        fs::rename(&staging, path)
            .map_err(|error| IoError::new(FileOperation::Rename, path.into(), error))?;

        Ok(())
    }
}

/// `dir/P000.json` -> `dir/.P000.json.tmp`
fn staging_path(path: &Path) -> PathBuf {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_default();

    path.with_file_name(format!(".{}.tmp", file_name))
}
