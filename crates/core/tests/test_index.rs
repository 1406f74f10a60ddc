//! Tests for the key ↔ path index

use prkey_core::{
    ChangedFile, ComponentIndex, DuplicateKind, FileFilter, IndexBuilder, IndexEvent,
    IndexObserver, Module,
};
use std::path::Path;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

fn touch(root: &Path, rel: &str) {
    let full = root.join(rel);
    std::fs::create_dir_all(full.parent().unwrap()).unwrap();
    std::fs::write(&full, "x").unwrap();
}

/// Collects event names for assertions
#[derive(Clone, Default)]
struct Recorder(Arc<Mutex<Vec<String>>>);

impl IndexObserver for Recorder {
    fn on_event(&self, event: &IndexEvent<'_>) {
        let line = match event {
            IndexEvent::Considered { path } => format!("considered {}", path),
            IndexEvent::Filtered { path } => format!("filtered {}", path),
            IndexEvent::CandidateAbsent { path, .. } => format!("absent {}", path),
            IndexEvent::Matched { path, key, .. } => format!("matched {} {}", path, key),
            IndexEvent::Unmatched { path } => format!("unmatched {}", path),
            IndexEvent::DuplicateRejected { path, kind, .. } => {
                format!("duplicate {} {:?}", path, kind)
            }
        };
        self.0.lock().unwrap().push(line);
    }
}

impl Recorder {
    fn events(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }
}

/// Aggregator module plus one child, laid out as a tree
fn tree_project() -> (TempDir, Vec<Module>) {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().join("tree-project");
    let child = root.join("app-hazelcast");
    touch(&root, "pom.xml");
    touch(&child, "src/main/java/com/example/Foo.java");
    touch(&child, "src/main/java/com/example/impl/Serializer.java");

    let modules = vec![
        Module::new("com.example", "app-root", &root),
        Module::new("com.example", "app-hazelcast", &child),
    ];
    (tmp, modules)
}

const FOO: &str = "/app-hazelcast/src/main/java/com/example/Foo.java";
const SERIALIZER: &str = "/app-hazelcast/src/main/java/com/example/impl/Serializer.java";
const FOO_TEST: &str = "/app-hazelcast/src/test/java/com/example/FooTest.java";

#[test]
fn test_concrete_scenario() {
    let (_tmp, modules) = tree_project();
    let files = vec![FOO, SERIALIZER, FOO_TEST];

    let index = ComponentIndex::build("hazelcast", &modules, &files).unwrap();

    assert_eq!(
        index.key_for_path(FOO).unwrap().as_str(),
        "com.example:app-hazelcast:hazelcast:src/main/java/com/example/Foo.java"
    );
    assert_eq!(
        index.key_for_path(SERIALIZER).unwrap().as_str(),
        "com.example:app-hazelcast:hazelcast:src/main/java/com/example/impl/Serializer.java"
    );
    assert!(index.key_for_path(FOO_TEST).is_none());
    assert_eq!(
        index.path_for_key("com.example:app-hazelcast:hazelcast:src/main/java/com/example/Foo.java"),
        Some(FOO)
    );
}

#[test]
fn test_count_is_verified_files_only() {
    let (_tmp, modules) = tree_project();
    let files = vec![FOO, FOO_TEST, "", "/nowhere/Missing.java", SERIALIZER];

    let index = ComponentIndex::build("b", &modules, &files).unwrap();
    assert_eq!(index.len(), 2);
    assert_eq!(index.paths().collect::<Vec<_>>(), vec![FOO, SERIALIZER]);
    assert!(index.rejected().is_empty());
}

#[test]
fn test_round_trip_both_directions() {
    let (_tmp, modules) = tree_project();
    let index = ComponentIndex::build("b", &modules, &[FOO, SERIALIZER]).unwrap();

    for key in index.keys() {
        let path = index.path_for_key(key.as_str()).unwrap();
        assert_eq!(index.key_for_path(path), Some(key));
    }
    for path in index.paths() {
        let key = index.key_for_path(path).unwrap();
        assert_eq!(index.path_for_key(key.as_str()), Some(path));
    }
}

#[test]
fn test_duplicate_key_keeps_first_insertion() {
    let tmp = TempDir::new().unwrap();
    let base = tmp.path().join("app");
    touch(&base, "src/A.java");
    let modules = vec![Module::new("g", "app", &base)];

    // Both spellings resolve to app/src/A.java
    let recorder = Recorder::default();
    let index = IndexBuilder::new("main", modules)
        .observer(recorder.clone())
        .build(&["/app/src/A.java", "app/src/A.java"])
        .unwrap();

    assert_eq!(index.len(), 1);
    assert_eq!(index.path_for_key("g:app:main:src/A.java"), Some("/app/src/A.java"));
    assert!(index.key_for_path("app/src/A.java").is_none());

    let rejected = index.rejected();
    assert_eq!(rejected.len(), 1);
    assert_eq!(rejected[0].path, "app/src/A.java");
    assert_eq!(rejected[0].kind, DuplicateKind::Key);
    assert_eq!(rejected[0].existing, "/app/src/A.java");

    assert!(recorder
        .events()
        .contains(&"duplicate app/src/A.java Key".to_string()));
}

#[test]
fn test_repeated_path_is_rejected_once() {
    let (_tmp, modules) = tree_project();
    let index = ComponentIndex::build("b", &modules, &[FOO, FOO]).unwrap();

    assert_eq!(index.len(), 1);
    assert_eq!(index.rejected().len(), 1);
}

#[test]
fn test_filter_excludes_before_matching() {
    let (tmp, modules) = tree_project();
    touch(&tmp.path().join("tree-project/app-hazelcast"), "pom.xml");

    let recorder = Recorder::default();
    let filter = FileFilter::new(&[".java".to_string()], &[]).unwrap();
    let index = IndexBuilder::new("b", modules)
        .filter(filter)
        .observer(recorder.clone())
        .build(&[FOO, "/app-hazelcast/pom.xml"])
        .unwrap();

    assert_eq!(index.len(), 1);
    assert!(index.key_for_path("/app-hazelcast/pom.xml").is_none());

    let events = recorder.events();
    assert!(events.contains(&"filtered /app-hazelcast/pom.xml".to_string()));
    assert!(!events.iter().any(|e| e.starts_with("matched /app-hazelcast/pom.xml")));
}

#[test]
fn test_without_filter_non_source_files_are_indexed() {
    let (tmp, modules) = tree_project();
    touch(&tmp.path().join("tree-project/app-hazelcast"), "pom.xml");

    let index = ComponentIndex::build("b", &modules, &["/app-hazelcast/pom.xml"]).unwrap();
    assert_eq!(
        index.key_for_path("/app-hazelcast/pom.xml").unwrap().as_str(),
        "com.example:app-hazelcast:b:pom.xml"
    );
}

#[test]
fn test_events_for_unmatched_file() {
    let (_tmp, modules) = tree_project();
    let recorder = Recorder::default();
    let index = IndexBuilder::new("b", modules)
        .observer(recorder.clone())
        .build(&[FOO_TEST])
        .unwrap();

    assert!(index.is_empty());
    let events = recorder.events();
    assert_eq!(events.first().unwrap(), &format!("considered {}", FOO_TEST));
    assert!(events.contains(&format!("absent {}", FOO_TEST)));
    assert_eq!(events.last().unwrap(), &format!("unmatched {}", FOO_TEST));
}

#[test]
fn test_parallel_build_matches_sequential() {
    let (_tmp, modules) = tree_project();
    let files: Vec<ChangedFile> = [FOO, FOO_TEST, SERIALIZER, FOO]
        .iter()
        .map(|f| ChangedFile::new(*f))
        .collect();

    let builder = IndexBuilder::new("b", modules);
    let sequential = builder.build(&files).unwrap();
    let parallel = builder.build_parallel(&files).unwrap();

    assert_eq!(
        sequential.iter().collect::<Vec<_>>(),
        parallel.iter().collect::<Vec<_>>()
    );
    assert_eq!(sequential.rejected(), parallel.rejected());
}

#[test]
fn test_summary_serializes_entries() {
    let (_tmp, modules) = tree_project();
    let index = ComponentIndex::build("b", &modules, &[FOO]).unwrap();

    let json = serde_json::to_value(index.summary()).unwrap();
    assert_eq!(json["branch"], "b");
    assert_eq!(json["count"], 1);
    assert_eq!(json["entries"][0]["path"], FOO);
    assert!(json.get("rejected").is_none());
}
