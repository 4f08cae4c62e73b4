//! Integration tests for dirstream
//!
//! All tests run against real directories created with tempfile, so
//! entry order is whatever the OS yields; assertions sort where the
//! listing order itself is not under test.

use dirstream::{DirLister, ListError, ListRequest, NamePattern};
use std::path::Path;
use std::sync::{Arc, Mutex};

fn touch(dir: &Path, name: &str) {
    std::fs::write(dir.join(name), b"").unwrap();
}

fn sorted(mut names: Vec<String>) -> Vec<String> {
    names.sort();
    names
}

#[tokio::test]
async fn test_collects_all_files_and_fires_handler_in_order() {
    let dir = tempfile::tempdir().unwrap();
    for name in ["one.txt", "two.txt", "three.txt", "four.txt"] {
        touch(dir.path(), name);
    }

    let seen = Arc::new(Mutex::new(Vec::new()));
    let seen_in_handler = Arc::clone(&seen);

    let summary = DirLister::new(ListRequest::files(dir.path()))
        .on_entry(move |name| seen_in_handler.lock().unwrap().push(name.to_string()))
        .run()
        .await
        .unwrap();

    assert!(summary.completed);
    assert_eq!(summary.entries.len(), 4);

    // Handler fired once per entry, in the same order as the result.
    assert_eq!(*seen.lock().unwrap(), summary.entries);

    assert_eq!(
        sorted(summary.entries),
        vec!["four.txt", "one.txt", "three.txt", "two.txt"]
    );
}

#[tokio::test]
async fn test_empty_directory_is_empty_success() {
    let dir = tempfile::tempdir().unwrap();

    let calls = Arc::new(Mutex::new(0usize));
    let calls_in_handler = Arc::clone(&calls);

    let summary = DirLister::new(ListRequest::files(dir.path()))
        .on_entry(move |_| *calls_in_handler.lock().unwrap() += 1)
        .run()
        .await
        .unwrap();

    assert!(summary.completed);
    assert!(summary.entries.is_empty());
    assert_eq!(*calls.lock().unwrap(), 0);
}

#[tokio::test]
async fn test_nonexistent_directory_fails_instead_of_empty_result() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("does-not-exist");

    let err = DirLister::new(ListRequest::files(&missing))
        .run()
        .await
        .unwrap_err();

    assert!(matches!(err, ListError::NotFound { .. }));
    assert!(err.is_access_failure());
}

#[tokio::test]
async fn test_file_path_is_not_a_directory() {
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path(), "plain-file");

    let err = DirLister::new(ListRequest::files(dir.path().join("plain-file")))
        .run()
        .await
        .unwrap_err();

    assert!(err.is_access_failure());
}

#[tokio::test]
async fn test_cancel_before_start_yields_partial_result() {
    let dir = tempfile::tempdir().unwrap();
    for i in 0..64 {
        touch(dir.path(), &format!("file-{i:03}"));
    }

    let lister = DirLister::new(ListRequest::files(dir.path()));
    lister.cancel_flag().cancel();

    let summary = lister.run().await.unwrap();

    // Flag was set before the loop started waiting: nothing collected,
    // and the summary is marked partial, not failed.
    assert!(!summary.completed);
    assert!(summary.entries.len() <= 64);
}

#[tokio::test]
async fn test_pattern_filters_names() {
    let dir = tempfile::tempdir().unwrap();
    for name in ["a.txt", "b.log", "c.txt"] {
        touch(dir.path(), name);
    }

    let request =
        ListRequest::files(dir.path()).with_pattern(NamePattern::new("*.txt").unwrap());
    let summary = DirLister::new(request).run().await.unwrap();

    assert!(summary.completed);
    assert_eq!(sorted(summary.entries), vec!["a.txt", "c.txt"]);
}

#[tokio::test]
async fn test_pattern_filters_with_cancellation_in_play() {
    let dir = tempfile::tempdir().unwrap();
    for name in ["a.txt", "b.log", "c.txt"] {
        touch(dir.path(), name);
    }

    let request =
        ListRequest::files(dir.path()).with_pattern(NamePattern::new("*.txt").unwrap());
    let lister = DirLister::new(request);
    let cancel = lister.cancel_flag();

    let summary = lister.run().await.unwrap();
    cancel.cancel();

    assert!(summary.completed);
    assert_eq!(sorted(summary.entries), vec!["a.txt", "c.txt"]);
}

#[tokio::test]
async fn test_cancel_after_natural_completion_is_a_noop() {
    let dir = tempfile::tempdir().unwrap();
    for name in ["x", "y", "z"] {
        touch(dir.path(), name);
    }

    let baseline = DirLister::new(ListRequest::files(dir.path()))
        .run()
        .await
        .unwrap();

    let lister = DirLister::new(ListRequest::files(dir.path()));
    let cancel = lister.cancel_flag();
    let summary = lister.run().await.unwrap();

    // Cancelling a finished listing must not fault, repeatedly.
    cancel.cancel();
    cancel.cancel();

    assert!(summary.completed);
    assert_eq!(sorted(summary.entries), sorted(baseline.entries));
}

#[tokio::test]
async fn test_directories_mode_excludes_files_and_vice_versa() {
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path(), "a-file");
    std::fs::create_dir(dir.path().join("a-subdir")).unwrap();
    std::fs::create_dir(dir.path().join("b-subdir")).unwrap();

    let dirs = DirLister::new(ListRequest::directories(dir.path()))
        .run()
        .await
        .unwrap();
    assert_eq!(sorted(dirs.entries), vec!["a-subdir", "b-subdir"]);

    let files = DirLister::new(ListRequest::files(dir.path()))
        .run()
        .await
        .unwrap();
    assert_eq!(files.entries, vec!["a-file"]);
}

#[tokio::test]
async fn test_spawn_returns_before_completion() {
    let dir = tempfile::tempdir().unwrap();
    for i in 0..16 {
        touch(dir.path(), &format!("f{i}"));
    }

    // spawn must hand back a handle without waiting for the listing
    let handle = DirLister::new(ListRequest::files(dir.path())).spawn();

    let summary = handle.join().await.unwrap();
    assert!(summary.completed);
    assert_eq!(summary.entries.len(), 16);
}

#[tokio::test]
async fn test_concurrent_listings_are_independent() {
    let left = tempfile::tempdir().unwrap();
    let right = tempfile::tempdir().unwrap();
    touch(left.path(), "left-only");
    touch(right.path(), "right-only");

    let left_handle = DirLister::new(ListRequest::files(left.path())).spawn();
    let right_handle = DirLister::new(ListRequest::files(right.path())).spawn();

    let left_summary = left_handle.join().await.unwrap();
    let right_summary = right_handle.join().await.unwrap();

    assert_eq!(left_summary.entries, vec!["left-only"]);
    assert_eq!(right_summary.entries, vec!["right-only"]);
}

#[tokio::test]
async fn test_handler_panic_surfaces_to_caller() {
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path(), "trigger");

    let err = DirLister::new(ListRequest::files(dir.path()))
        .on_entry(|name| panic!("handler refused {name}"))
        .run()
        .await
        .unwrap_err();

    assert!(matches!(err, ListError::HandlerPanic));
}
