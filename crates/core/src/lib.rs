//! prkey Core - component keys for pull request files
//!
//! Given the files changed in a review and the modules of a multi-module
//! build, this crate works out which module owns each file and derives the
//! `group:artifact:branch:relativePath` key an analysis service uses for it:
//! - Nearest-module matching with on-disk verification
//! - Component key construction
//! - A one-to-one key ↔ path index for mapping findings back to the review

pub mod changes;
pub mod config;
pub mod error;
pub mod filter;
pub mod finding;
pub mod index;
pub mod key;
pub mod matcher;
pub mod module;
pub mod observer;

pub use changes::{load_changed_files, ChangeStatus, ChangedFile, GitChanges};
pub use config::PrkeyConfig;
pub use error::KeyError;
pub use filter::FileFilter;
pub use finding::{
    attach_findings, load_findings, AttachedFinding, Finding, FindingSummary, Severity,
};
pub use index::{ComponentIndex, IndexBuilder, IndexEntry, IndexSummary, RejectedEntry};
pub use key::{build_key, ComponentKey, KeyParts};
pub use matcher::{
    find_module, longest_common_substring, FileProbe, FsProbe, ModuleMatch, PathMatcher,
};
pub use module::{load_modules, Module};
pub use observer::{DuplicateKind, IndexEvent, IndexObserver, NullObserver, TracingObserver};

/// prkey version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
