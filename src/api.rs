use crate::{
    collector::{self, collect_virtual_paths},
    config::{self, Config},
    manifest::{self, Manifest},
    prompt,
    transactions::{Active, Transaction},
};
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum PatchgenError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Collect(#[from] collector::CollectError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] config::ConfigError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Manifest(#[from] manifest::ManifestError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Prompt(#[from] prompt::PromptError),
}

/// How a run ended, when it did not fail.
#[derive(Debug, PartialEq)]
pub enum Outcome {
    /// The manifest was written to `path` with `entries` conflict paths.
    Written { path: PathBuf, entries: usize },
    /// The user did not pick a folder; nothing was written.
    NoInputSelected,
}

/// Scans `root` and builds the manifest for it without touching the disk otherwise.
///
/// # Errors
///
/// Returns a [`PatchgenError`] if `root` is not a directory or any part of it cannot be read.
pub fn collect_manifest(root: &Path, config: &Config) -> Result<Manifest, PatchgenError> {
    let paths = collect_virtual_paths(root, config)?;

    log::debug!(
        "collected {} asset paths under {}",
        paths.len(),
        root.display()
    );

    Ok(Manifest::new(paths, config.dev_only))
}

/// Generates a manifest for `input` (or a prompted folder when `None`) and writes it to `output`.
///
/// # Errors
///
/// Returns a [`PatchgenError`] if:
///
/// - The prompt cannot be shown.
/// - The input folder or one of its subfolders cannot be read.
/// - The manifest cannot be written; a partially written file is removed.
pub fn run(input: Option<PathBuf>, config: &Config, output: &Path) -> Result<Outcome, PatchgenError> {
    let root = match input {
        Some(root) => root,
        None => match prompt::select_input_folder(config)? {
            Some(root) => root,
            None => return Ok(Outcome::NoInputSelected),
        },
    };

    log::debug!("using config: {:?}", config);

    let manifest = collect_manifest(&root, config)?;

    let mut trx = Transaction::<Active>::new();

    manifest.write_to(&mut trx, output)?;

    trx.commit();

    Ok(Outcome::Written {
        path: output.to_path_buf(),
        entries: manifest.conflicts_with.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn writes_manifest_for_given_folder() {
        let input = tempfile::tempdir().unwrap();
        fs::create_dir_all(input.path().join("Maps")).unwrap();
        fs::write(input.path().join("Maps").join("Arena.umap"), b"").unwrap();
        fs::write(input.path().join("notes.txt"), b"").unwrap();
        let out = tempfile::tempdir().unwrap();
        let output = out.path().join("P000.json");

        let outcome = run(
            Some(input.path().to_path_buf()),
            &Config::default(),
            &output,
        )
        .unwrap();

        assert_eq!(
            outcome,
            Outcome::Written {
                path: output.clone(),
                entries: 1
            }
        );
        let written: Manifest = serde_json::from_slice(&fs::read(&output).unwrap()).unwrap();
        assert_eq!(written.conflicts_with[0].as_str(), "Absolver/Maps/Arena.umap");
    }

    #[test]
    fn unreadable_input_writes_nothing() {
        let out = tempfile::tempdir().unwrap();
        let output = out.path().join("P000.json");

        let result = run(
            Some(out.path().join("does-not-exist")),
            &Config::default(),
            &output,
        );

        assert!(matches!(result, Err(PatchgenError::Collect(_))));
        assert!(!output.exists());
    }

    #[test]
    fn manifest_honours_dev_only() {
        let input = tempfile::tempdir().unwrap();
        let config = Config {
            dev_only: true,
            ..Config::default()
        };

        let manifest = collect_manifest(input.path(), &config).unwrap();

        assert!(manifest.dev_only);
        assert!(manifest.conflicts_with.is_empty());
    }
}
