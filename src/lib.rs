//! Builds patch manifests: the list of game asset paths a patch ships, so an installer can warn
//! about patches that overwrite the same files.
pub mod api;
pub mod collector;
pub mod config;
pub mod errors;
pub mod manifest;
pub mod prompt;
pub mod transactions;
pub mod vfs;

pub use api::{collect_manifest, run, Outcome, PatchgenError};
pub use config::Config;
pub use manifest::Manifest;
pub use vfs::VirtualPath;
