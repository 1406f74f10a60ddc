//! One-to-one index between component keys and changed-file paths
//!
//! Built once per run by driving the matcher and key builder over every
//! changed file, then only read. Two maps are kept in sync: key → path and
//! path → key.
//!
//! Duplicate policy: the first insertion wins. A later file whose key is
//! already taken, or a path that already has a key, is refused, reported to
//! the observer, and recorded in [`ComponentIndex::rejected`].

use indexmap::IndexMap;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::KeyError;
use crate::filter::FileFilter;
use crate::key::{build_key, ComponentKey};
use crate::matcher::{FileProbe, FsProbe, PathMatcher};
use crate::module::Module;
use crate::observer::{DuplicateKind, IndexEvent, IndexObserver, NullObserver};

/// An insertion refused by the duplicate policy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectedEntry {
    pub path: String,
    pub key: ComponentKey,
    pub kind: DuplicateKind,
    /// Path already holding the key (duplicate key) or the key the path
    /// already has (duplicate path)
    pub existing: String,
}

/// Bijective key ↔ path map
#[derive(Debug, Clone, Default)]
pub struct ComponentIndex {
    branch: String,
    by_key: IndexMap<ComponentKey, String>,
    by_path: HashMap<String, ComponentKey>,
    rejected: Vec<RejectedEntry>,
}

/// Outcome of matching one changed file
enum Resolution {
    Filtered,
    Unmatched,
    Keyed(ComponentKey),
}

/// Configures and runs index construction
pub struct IndexBuilder {
    branch: String,
    modules: Vec<Module>,
    filter: FileFilter,
    probe: Box<dyn FileProbe>,
    observer: Box<dyn IndexObserver>,
}

impl IndexBuilder {
    /// `modules` is taken as a snapshot; its order breaks score ties
    pub fn new(branch: impl Into<String>, modules: Vec<Module>) -> Self {
        Self {
            branch: branch.into(),
            modules,
            filter: FileFilter::accept_all(),
            probe: Box::new(FsProbe),
            observer: Box::new(NullObserver),
        }
    }

    pub fn filter(mut self, filter: FileFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn probe(mut self, probe: impl FileProbe + 'static) -> Self {
        self.probe = Box::new(probe);
        self
    }

    pub fn observer(mut self, observer: impl IndexObserver + 'static) -> Self {
        self.observer = Box::new(observer);
        self
    }

    /// Match every file in order and insert the results
    pub fn build<P: AsRef<str>>(&self, files: &[P]) -> Result<ComponentIndex, KeyError> {
        let mut index = ComponentIndex::empty(&self.branch);
        for file in files {
            let path = file.as_ref();
            let resolution = self.resolve(path)?;
            self.merge(&mut index, path, resolution);
        }
        Ok(index)
    }

    /// Match files in parallel, then insert sequentially in input order.
    ///
    /// Produces the same index as [`IndexBuilder::build`].
    pub fn build_parallel<P: AsRef<str> + Sync>(
        &self,
        files: &[P],
    ) -> Result<ComponentIndex, KeyError> {
        let resolutions = files
            .par_iter()
            .map(|f| self.resolve(f.as_ref()))
            .collect::<Result<Vec<_>, KeyError>>()?;

        let mut index = ComponentIndex::empty(&self.branch);
        for (file, resolution) in files.iter().zip(resolutions) {
            self.merge(&mut index, file.as_ref(), resolution);
        }
        Ok(index)
    }

    fn resolve(&self, path: &str) -> Result<Resolution, KeyError> {
        let observer = self.observer.as_ref();
        observer.on_event(&IndexEvent::Considered { path });

        if !self.filter.accepts(path) {
            observer.on_event(&IndexEvent::Filtered { path });
            return Ok(Resolution::Filtered);
        }

        let matcher = PathMatcher::new(&self.modules, self.probe.as_ref()).with_observer(observer);
        let Some(found) = matcher.find(path) else {
            observer.on_event(&IndexEvent::Unmatched { path });
            return Ok(Resolution::Unmatched);
        };

        let key = build_key(found.module, &found.resolved, &self.branch)?;
        observer.on_event(&IndexEvent::Matched {
            path,
            module: found.module,
            key: &key,
        });
        Ok(Resolution::Keyed(key))
    }

    fn merge(&self, index: &mut ComponentIndex, path: &str, resolution: Resolution) {
        let Resolution::Keyed(key) = resolution else {
            return;
        };

        if let Err(rejected) = index.insert(key, path.to_string()) {
            self.observer.on_event(&IndexEvent::DuplicateRejected {
                path,
                key: &rejected.key,
                kind: rejected.kind,
            });
            index.rejected.push(rejected);
        }
    }
}

impl ComponentIndex {
    /// Build with the real filesystem, no filter and no event sink
    pub fn build<P: AsRef<str>>(
        branch: &str,
        modules: &[Module],
        files: &[P],
    ) -> Result<Self, KeyError> {
        IndexBuilder::new(branch, modules.to_vec()).build(files)
    }

    fn empty(branch: &str) -> Self {
        Self {
            branch: branch.to_string(),
            ..Default::default()
        }
    }

    /// Insert a pair unless either side is already mapped
    fn insert(&mut self, key: ComponentKey, path: String) -> Result<(), RejectedEntry> {
        if let Some(existing) = self.by_key.get(&key) {
            return Err(RejectedEntry {
                path,
                key,
                kind: DuplicateKind::Key,
                existing: existing.clone(),
            });
        }
        if let Some(existing) = self.by_path.get(&path) {
            return Err(RejectedEntry {
                existing: existing.to_string(),
                path,
                key,
                kind: DuplicateKind::Path,
            });
        }

        self.by_path.insert(path.clone(), key.clone());
        self.by_key.insert(key, path);
        Ok(())
    }

    pub fn branch(&self) -> &str {
        &self.branch
    }

    pub fn key_for_path(&self, path: &str) -> Option<&ComponentKey> {
        self.by_path.get(path)
    }

    pub fn path_for_key(&self, key: &str) -> Option<&str> {
        self.by_key.get(key).map(String::as_str)
    }

    /// Keys in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &ComponentKey> {
        self.by_key.keys()
    }

    /// Paths in insertion order
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.by_key.values().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ComponentKey, &str)> {
        self.by_key.iter().map(|(k, p)| (k, p.as_str()))
    }

    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }

    /// Insertions refused by the duplicate policy, in the order they happened
    pub fn rejected(&self) -> &[RejectedEntry] {
        &self.rejected
    }

    pub fn summary(&self) -> IndexSummary {
        IndexSummary {
            branch: self.branch.clone(),
            count: self.len(),
            entries: self
                .iter()
                .map(|(key, path)| IndexEntry {
                    key: key.clone(),
                    path: path.to_string(),
                })
                .collect(),
            rejected: self.rejected.clone(),
        }
    }
}

/// Serializable snapshot of an index
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexSummary {
    pub branch: String,
    pub count: usize,
    pub entries: Vec<IndexEntry>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rejected: Vec<RejectedEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexEntry {
    pub key: ComponentKey,
    pub path: String,
}
