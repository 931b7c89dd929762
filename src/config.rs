use crate::errors::{FileOperation, IoError};
use indexmap::IndexSet;
use miette::Diagnostic;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error;

/// Namespace every collected asset path is rooted at.
pub const DEFAULT_VIRTUAL_ROOT: &str = "Absolver";
/// Asset extensions a patch can ship, compared case-insensitively and without the leading dot.
pub const DEFAULT_ALLOWED_EXTENSIONS: [&str; 2] = ["umap", "uasset"];
/// Value written to the manifest's `devOnly` field.
pub const DEFAULT_DEV_ONLY: bool = false;
/// Manifest file name, relative to the current working directory.
pub const DEFAULT_OUTPUT_FILE: &str = "P000.json";

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("I/O error within config domain")]
    #[diagnostic(code(patchgen::config::io))]
    Io(#[from] IoError),

    #[error("Unable to parse toml file at '{path}': {source}")]
    #[diagnostic(code(patchgen::config::parse_toml), help("Review toml file"))]
    ParseToml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid value for '{key}': {reason}")]
    #[diagnostic(
        code(patchgen::config::invalid_value),
        help("virtual_root and every entry of allowed_extensions must be non-empty")
    )]
    InvalidValue { key: &'static str, reason: String },
}

/// On-disk shape of a config file, every key optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    virtual_root: Option<String>,
    allowed_extensions: Option<Vec<String>>,
    dev_only: Option<bool>,
    output_file: Option<PathBuf>,
}

/// Settings shared by the collector, the manifest builder and the writer.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub virtual_root: String,
    pub allowed_extensions: IndexSet<String>,
    pub dev_only: bool,
    pub output_file: PathBuf,
}
impl Default for Config {
    fn default() -> Self {
        Self {
            virtual_root: DEFAULT_VIRTUAL_ROOT.to_string(),
            allowed_extensions: DEFAULT_ALLOWED_EXTENSIONS
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
            dev_only: DEFAULT_DEV_ONLY,
            output_file: PathBuf::from(DEFAULT_OUTPUT_FILE),
        }
    }
}
impl Config {
    /// Builds a config with the given namespace and extensions, everything else defaulted.
    pub fn new<I, S>(virtual_root: &str, extensions: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Ok(Self {
            virtual_root: normalize_virtual_root(virtual_root)?,
            allowed_extensions: normalize_extensions(extensions)?,
            ..Self::default()
        })
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        let content = fs::read_to_string(path)
            .map_err(|error| IoError::new(FileOperation::Read, path.to_path_buf(), error))?;

        Self::from_toml_str(&content).map_err(|error| match error {
            ConfigError::ParseToml { source, .. } => ConfigError::ParseToml {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })
    }

    fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let parsed: ConfigFile =
            toml::from_str(content).map_err(|error| ConfigError::ParseToml {
                path: PathBuf::new(),
                source: error,
            })?;

        let mut config = Self::default();

        if let Some(root) = parsed.virtual_root {
            config.virtual_root = normalize_virtual_root(&root)?;
        }
        if let Some(extensions) = parsed.allowed_extensions {
            config.allowed_extensions = normalize_extensions(extensions)?;
        }
        if let Some(dev_only) = parsed.dev_only {
            config.dev_only = dev_only;
        }
        if let Some(output_file) = parsed.output_file {
            config.output_file = output_file;
        }

        Ok(config)
    }

    /// Case-insensitive membership test for a bare extension (no leading dot).
    pub fn allows_extension(&self, extension: &str) -> bool {
        self.allowed_extensions
            .contains(extension.to_lowercase().as_str())
    }
}

fn normalize_virtual_root(root: &str) -> Result<String, ConfigError> {
    let normalized = root.trim().replace('\\', "/");
    let trimmed = normalized.trim_end_matches('/');

    if trimmed.is_empty() {
        return Err(ConfigError::InvalidValue {
            key: "virtual_root",
            reason: format!("'{}' is empty once trailing slashes are removed", root),
        });
    }

    Ok(trimmed.to_string())
}

fn normalize_extensions<I, S>(extensions: I) -> Result<IndexSet<String>, ConfigError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut normalized = IndexSet::new();

    for extension in extensions {
        let raw = extension.as_ref();
        let ext = raw.trim().trim_start_matches('.').to_lowercase();

        if ext.is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "allowed_extensions",
                reason: format!("'{}' is not an extension", raw),
            });
        }

        normalized.insert(ext);
    }

    Ok(normalized)
}
