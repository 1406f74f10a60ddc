//! Typed errors for component key construction

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while turning a resolved file into a component key.
///
/// These signal a broken matcher/builder pairing rather than bad input:
/// the matcher always builds resolved paths under the module's base directory.
#[derive(Debug, Error)]
pub enum KeyError {
    /// The module's base directory does not occur in the resolved path
    #[error("base directory {base_dir} not found in resolved path {resolved:?}")]
    BaseDirNotInPath { base_dir: String, resolved: PathBuf },

    /// The resolved path is the base directory itself
    #[error("resolved path {resolved:?} has no component below {base_dir}")]
    EmptyRelativePath { base_dir: String, resolved: PathBuf },
}
