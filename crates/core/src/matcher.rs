//! Nearest-module resolution for changed-file paths
//!
//! Change-set paths carry no module membership. Each module is scored by the
//! longest common substring between the raw path and the module's base
//! directory; the leading `score` characters of the path are taken to be the
//! part already covered by the base directory, and the rest is appended to
//! the base directory and checked on disk.
//!
//! The character drop is a heuristic. When the common substring does not sit
//! on a directory boundary the resolved path is wrong and usually fails the
//! existence check; nothing here realigns it.

use std::path::{Path, PathBuf};

use crate::module::Module;
use crate::observer::{IndexEvent, IndexObserver, NullObserver};

/// Existence check used to verify a candidate path
pub trait FileProbe: Send + Sync {
    fn exists(&self, path: &Path) -> bool;
}

/// Checks the real filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct FsProbe;

impl FileProbe for FsProbe {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

/// The module that owns a changed path, and the file it resolved to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleMatch<'a> {
    pub module: &'a Module,
    pub resolved: PathBuf,
    pub score: usize,
}

/// Resolves changed paths against an ordered module list
pub struct PathMatcher<'a> {
    modules: &'a [Module],
    probe: &'a dyn FileProbe,
    observer: &'a dyn IndexObserver,
}

impl<'a> PathMatcher<'a> {
    pub fn new(modules: &'a [Module], probe: &'a dyn FileProbe) -> Self {
        Self {
            modules,
            probe,
            observer: &NullObserver,
        }
    }

    pub fn with_observer(mut self, observer: &'a dyn IndexObserver) -> Self {
        self.observer = observer;
        self
    }

    /// Find the best-scoring module whose candidate file exists.
    ///
    /// Modules are visited once, in order. A module replaces the current
    /// best only when its score is strictly greater and its candidate file
    /// exists, so earlier modules win ties.
    pub fn find(&self, path: &str) -> Option<ModuleMatch<'a>> {
        if path.is_empty() {
            return None;
        }

        let mut best: Option<ModuleMatch<'a>> = None;

        for module in self.modules {
            let base = module.normalized_base_dir();
            let score = longest_common_substring(path, &base);

            if best.as_ref().is_some_and(|b| score <= b.score) {
                continue;
            }

            let remainder = drop_chars(path, score).trim_start_matches('/');
            if remainder.is_empty() {
                // Would resolve to the base directory itself
                continue;
            }

            let candidate = module.base_dir.join(remainder);
            if self.probe.exists(&candidate) {
                best = Some(ModuleMatch {
                    module,
                    resolved: candidate,
                    score,
                });
            } else {
                self.observer.on_event(&IndexEvent::CandidateAbsent {
                    path,
                    module,
                    candidate: &candidate,
                });
            }
        }

        best
    }
}

/// Resolve `path` against `modules` using the real filesystem
pub fn find_module<'a>(path: &str, modules: &'a [Module]) -> Option<ModuleMatch<'a>> {
    PathMatcher::new(modules, &FsProbe).find(path)
}

/// Length of the longest contiguous run of characters shared by `a` and `b`.
///
/// Case-sensitive. Uses a single rolling row of the classic DP table.
pub fn longest_common_substring(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    // row[j + 1] = length of the common run ending at a[i], b[j]
    let mut row = vec![0usize; b.len() + 1];
    let mut max_len = 0;

    for ca in &a {
        // Walk backwards so row[j] still holds the previous row's value
        for j in (0..b.len()).rev() {
            if *ca == b[j] {
                row[j + 1] = row[j] + 1;
                max_len = max_len.max(row[j + 1]);
            } else {
                row[j + 1] = 0;
            }
        }
    }

    max_len
}

fn drop_chars(s: &str, n: usize) -> &str {
    match s.char_indices().nth(n) {
        Some((idx, _)) => &s[idx..],
        None => "",
    }
}
