//! Tests for nearest-module matching

use prkey_core::{find_module, FileProbe, Module, PathMatcher};
use std::path::Path;
use tempfile::TempDir;

fn touch(root: &Path, rel: &str) {
    let full = root.join(rel);
    std::fs::create_dir_all(full.parent().unwrap()).unwrap();
    std::fs::write(&full, "class X {}").unwrap();
}

/// Reports every path as present
struct AlwaysExists;

impl FileProbe for AlwaysExists {
    fn exists(&self, _path: &Path) -> bool {
        true
    }
}

#[test]
fn test_single_module_match() {
    let tmp = TempDir::new().unwrap();
    let base = tmp.path().join("app-core");
    touch(&base, "src/main/java/com/example/Foo.java");

    let modules = vec![Module::new("com.example", "app-core", &base)];
    let found = find_module("/app-core/src/main/java/com/example/Foo.java", &modules).unwrap();

    assert_eq!(found.module.artifact_id, "app-core");
    assert_eq!(found.score, "/app-core".len());
    assert_eq!(
        found.resolved,
        base.join("src/main/java/com/example/Foo.java")
    );
}

#[test]
fn test_flat_project_picks_sibling_module() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().join("querydsl").join("querydsl-root");
    let hazelcast = tmp.path().join("querydsl").join("querydsl-hazelcast");
    std::fs::create_dir_all(&root).unwrap();
    touch(
        &hazelcast,
        "src/main/java/com/mysema/query/hazelcast/AbstractIMapQuery.java",
    );

    let modules = vec![
        Module::new("com.mysema.querydsl", "querydsl-root", &root),
        Module::new("com.mysema.querydsl", "querydsl-hazelcast", &hazelcast),
    ];

    let found = find_module(
        "/querydsl-hazelcast/src/main/java/com/mysema/query/hazelcast/AbstractIMapQuery.java",
        &modules,
    )
    .unwrap();
    assert_eq!(found.module.artifact_id, "querydsl-hazelcast");
}

#[test]
fn test_deepest_module_wins_over_aggregator() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().join("proj");
    let child = root.join("core");
    touch(&child, "src/A.java");

    let modules = vec![
        Module::new("g", "proj", &root),
        Module::new("g", "core", &child),
    ];

    // The aggregator also resolves to an existing file, but scores lower
    let found = find_module("/proj/core/src/A.java", &modules).unwrap();
    assert_eq!(found.module.artifact_id, "core");
    assert_eq!(found.resolved, child.join("src/A.java"));
}

#[test]
fn test_deepest_module_wins_regardless_of_order() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().join("proj");
    let child = root.join("core");
    touch(&child, "src/A.java");

    let modules = vec![
        Module::new("g", "core", &child),
        Module::new("g", "proj", &root),
    ];

    let found = find_module("/proj/core/src/A.java", &modules).unwrap();
    assert_eq!(found.module.artifact_id, "core");
}

#[test]
fn test_tie_goes_to_first_module() {
    let tmp = TempDir::new().unwrap();
    let a = tmp.path().join("a").join("mod");
    let b = tmp.path().join("b").join("mod");
    touch(&a, "src/X.java");
    touch(&b, "src/X.java");

    let modules = vec![Module::new("g", "first", &a), Module::new("g", "second", &b)];
    let found = find_module("/mod/src/X.java", &modules).unwrap();
    assert_eq!(found.module.artifact_id, "first");

    let reversed = vec![Module::new("g", "second", &b), Module::new("g", "first", &a)];
    let found = find_module("/mod/src/X.java", &reversed).unwrap();
    assert_eq!(found.module.artifact_id, "second");
}

#[test]
fn test_missing_file_is_not_a_match() {
    let tmp = TempDir::new().unwrap();
    let base = tmp.path().join("app-hazelcast");
    touch(&base, "src/main/java/com/example/Foo.java");

    let modules = vec![Module::new("com.example", "app-hazelcast", &base)];
    assert!(find_module(
        "/app-hazelcast/src/test/java/com/example/FooTest.java",
        &modules
    )
    .is_none());
}

#[test]
fn test_higher_score_without_file_is_not_accepted() {
    let tmp = TempDir::new().unwrap();
    let proj = tmp.path().join("proj");
    let stale = tmp.path().join("other").join("proj").join("core");
    touch(&proj, "core/src/B.java");
    std::fs::create_dir_all(&stale).unwrap();

    // The stale module scores higher ("/proj/core") but has no src/B.java
    for modules in [
        vec![Module::new("g", "proj", &proj), Module::new("g", "stale", &stale)],
        vec![Module::new("g", "stale", &stale), Module::new("g", "proj", &proj)],
    ] {
        let found = find_module("/proj/core/src/B.java", &modules).unwrap();
        assert_eq!(found.module.artifact_id, "proj");
        assert_eq!(found.resolved, proj.join("core/src/B.java"));
    }
}

#[test]
fn test_empty_path_is_no_match() {
    let modules = vec![Module::new("g", "a", "/repo/a")];
    let matcher = PathMatcher::new(&modules, &AlwaysExists);
    assert!(matcher.find("").is_none());
}

#[test]
fn test_no_modules_is_no_match() {
    let matcher = PathMatcher::new(&[], &AlwaysExists);
    assert!(matcher.find("/a/src/A.java").is_none());
}

#[test]
fn test_overlap_covering_whole_path_is_no_match() {
    let modules = vec![Module::new("g", "app", "/repo/app")];
    let matcher = PathMatcher::new(&modules, &AlwaysExists);
    assert!(matcher.find("/app").is_none());
    assert!(matcher.find("/app/").is_none());
}

#[test]
fn test_misaligned_overlap_is_kept_as_is() {
    // "/app" is shared, so four characters are dropped even though the
    // path's directory is "app-extra"
    let modules = vec![Module::new("g", "app", "/repo/app")];
    let matcher = PathMatcher::new(&modules, &AlwaysExists);

    let found = matcher.find("/app-extra/src/A.java").unwrap();
    assert_eq!(found.score, 4);
    assert_eq!(found.resolved, Path::new("/repo/app").join("-extra/src/A.java"));
}

#[test]
fn test_zero_score_module_can_match() {
    let modules = vec![Module::new("g", "zzz", "/zzz")];
    let matcher = PathMatcher::new(&modules, &AlwaysExists);

    let found = matcher.find("abc").unwrap();
    assert_eq!(found.score, 0);
    assert_eq!(found.resolved, Path::new("/zzz").join("abc"));
}

#[test]
fn test_backslash_base_dir_is_normalized_for_scoring() {
    let modules = vec![
        Module::new("g", "short", "/x"),
        Module::new("g", "win", r"C:\work\app-core"),
    ];
    let matcher = PathMatcher::new(&modules, &AlwaysExists);

    let found = matcher.find("/work/app-core/src/A.java").unwrap();
    assert_eq!(found.module.artifact_id, "win");
    assert_eq!(found.score, "/work/app-core".len());
}
