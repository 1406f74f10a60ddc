//! Events emitted while building a component index
//!
//! Index construction reports what it does through an injected observer
//! instead of logging directly, so callers choose the sink.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::key::ComponentKey;
use crate::module::Module;

/// Why an insertion was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicateKind {
    /// Another path already owns this key
    Key,
    /// This path already has a key
    Path,
}

/// Something that happened to one changed file during index construction
#[derive(Debug)]
pub enum IndexEvent<'a> {
    Considered {
        path: &'a str,
    },
    Filtered {
        path: &'a str,
    },
    CandidateAbsent {
        path: &'a str,
        module: &'a Module,
        candidate: &'a Path,
    },
    Matched {
        path: &'a str,
        module: &'a Module,
        key: &'a ComponentKey,
    },
    Unmatched {
        path: &'a str,
    },
    DuplicateRejected {
        path: &'a str,
        key: &'a ComponentKey,
        kind: DuplicateKind,
    },
}

/// Receives index construction events. Must tolerate calls from several threads.
pub trait IndexObserver: Send + Sync {
    fn on_event(&self, event: &IndexEvent<'_>);
}

/// Discards every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NullObserver;

impl IndexObserver for NullObserver {
    fn on_event(&self, _event: &IndexEvent<'_>) {}
}

/// Forwards events to `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl IndexObserver for TracingObserver {
    fn on_event(&self, event: &IndexEvent<'_>) {
        match event {
            IndexEvent::Considered { path } => {
                tracing::debug!(path, "considering file");
            }
            IndexEvent::Filtered { path } => {
                tracing::debug!(path, "file excluded by filter");
            }
            IndexEvent::CandidateAbsent {
                path,
                module,
                candidate,
            } => {
                tracing::debug!(
                    path,
                    module = %module.coordinates(),
                    candidate = %candidate.display(),
                    "match rejected: file absent"
                );
            }
            IndexEvent::Matched { path, module, key } => {
                tracing::debug!(path, module = %module.coordinates(), key = %key, "match found");
            }
            IndexEvent::Unmatched { path } => {
                tracing::debug!(path, "no owning module");
            }
            IndexEvent::DuplicateRejected { path, key, kind } => {
                tracing::warn!(path, key = %key, ?kind, "duplicate entry rejected");
            }
        }
    }
}
