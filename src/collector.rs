use crate::{config::Config, vfs::VirtualPath};
use miette::Diagnostic;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::{DirEntry, WalkDir};

#[derive(Debug, Error, Diagnostic)]
pub enum CollectError {
    #[error("input folder '{path}' is not a readable directory")]
    #[diagnostic(
        code(patchgen::collect::not_a_directory),
        help("Select an existing folder containing the patch's asset files")
    )]
    NotADirectory { path: PathBuf },

    #[error("unable to read '{path}' while scanning for assets")]
    #[diagnostic(
        code(patchgen::collect::walk),
        help("Check the folder permissions; no manifest was written")
    )]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("unable to strip prefix from directory")]
    #[diagnostic(code(patchgen::collect::strip_prefix))]
    StripPrefix {
        path: PathBuf,
        dir: PathBuf,
        #[source]
        source: std::path::StripPrefixError,
    },

    #[error("path '{}' is not valid unicode", path.display())]
    #[diagnostic(
        code(patchgen::collect::non_unicode_path),
        help("Rename the file so that it can be written into the manifest")
    )]
    NonUnicodePath { path: PathBuf },
}

/// Regular files, plus symlinks that resolve to regular files.
fn is_file(entry: &DirEntry) -> bool {
    entry.file_type().is_file() || (entry.path_is_symlink() && entry.path().is_file())
}

/// Lowercase-insensitive check of the text after the last `.` of the file name.
fn has_allowed_extension(path: &Path, config: &Config) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| config.allows_extension(ext))
        .unwrap_or(false)
}

/// Recursively walks `root` and maps every file with an allowed extension to a [`VirtualPath`].
///
/// Siblings are visited in file name order, so the result is stable for an unchanged tree.
/// Directories and non-matching files contribute nothing.
///
/// # Errors
///
/// Any unreadable entry aborts the whole walk; a partial list is never returned.
pub fn collect_virtual_paths(root: &Path, config: &Config) -> Result<Vec<VirtualPath>, CollectError> {
    if !root.is_dir() {
        return Err(CollectError::NotADirectory {
            path: root.to_path_buf(),
        });
    }

    let mut paths = Vec::new();

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = match entry {
            Ok(e) => e,
            Err(error) => {
                let path = error.path().unwrap_or(root).to_path_buf();

                Err(CollectError::Walk {
                    path,
                    source: error,
                })?
            }
        };

        if !is_file(&entry) {
            continue;
        }

        let full_path = entry.path();

        if !has_allowed_extension(full_path, config) {
            log::debug!("skipping {}", full_path.display());
            continue;
        }

        let relative = match full_path.strip_prefix(root) {
            Ok(r) => r,
            Err(error) => Err(CollectError::StripPrefix {
                path: full_path.to_path_buf(),
                dir: root.to_path_buf(),
                source: error,
            })?,
        };

        let virtual_path = VirtualPath::from_relative(&config.virtual_root, relative).ok_or_else(
            || CollectError::NonUnicodePath {
                path: full_path.to_path_buf(),
            },
        )?;

        log::debug!("{} -> {}", full_path.display(), virtual_path);

        paths.push(virtual_path);
    }

    Ok(paths)
}
