//! Aggregator tests

use super::*;
use tempfile::TempDir;

async fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    tokio::fs::write(&path, content).await.unwrap();
    path
}

fn as_text(output: Vec<u8>) -> String {
    String::from_utf8(output).unwrap()
}

#[tokio::test]
async fn merges_methods_for_one_type_across_files() {
    let dir = TempDir::new().unwrap();
    let a = write_file(
        &dir,
        "a.go",
        r#"
package sample

type T struct{}

func (t T) Bar() string { return "" }
"#,
    )
    .await;
    let b = write_file(
        &dir,
        "b.go",
        r#"
package sample

func (t *T) Baz() string { return "" }
"#,
    )
    .await;

    let output = merge_files(&[a, b], &MergeOptions::default()).await.unwrap();
    let text = as_text(output);

    assert!(text.contains("package sample"));
    assert_eq!(text.matches("type TInterface interface {").count(), 1);
    assert!(text.contains("Bar() string"));
    assert!(text.contains("Baz() string"));
}

#[tokio::test]
async fn duplicate_method_across_files_emitted_once() {
    let dir = TempDir::new().unwrap();
    let a = write_file(
        &dir,
        "a.go",
        r#"
package sample

type T struct{}

// First copy.
func (t T) Bar() string { return "" }
"#,
    )
    .await;
    let b = write_file(
        &dir,
        "b.go",
        r#"
package sample

// Second copy, different docs.
func (t *T) Bar() string { return "" }
"#,
    )
    .await;

    let output = merge_files(&[a, b], &MergeOptions::default()).await.unwrap();
    let text = as_text(output);

    assert_eq!(text.matches("Bar() string").count(), 1);
    // First occurrence's documentation wins.
    assert!(text.contains("// First copy."));
    assert!(!text.contains("// Second copy"));
}

#[tokio::test]
async fn empty_file_list_yields_empty_output() {
    let output = merge_files(&[], &MergeOptions::default()).await.unwrap();
    assert!(output.is_empty());
}

#[tokio::test]
async fn files_without_methods_skipped_silently() {
    let dir = TempDir::new().unwrap();
    let a = write_file(
        &dir,
        "a.go",
        r#"
package alpha

import "fmt"

type T struct{}

func Free() { fmt.Println() }
"#,
    )
    .await;

    let output = merge_files(&[a.clone()], &MergeOptions::default())
        .await
        .unwrap();
    assert!(output.is_empty());

    // A methodless file contributes neither package name nor imports.
    let b = write_file(
        &dir,
        "b.go",
        r#"
package beta

type U struct{}

func (u U) Foo() {}
"#,
    )
    .await;

    let output = merge_files(&[a, b], &MergeOptions::default()).await.unwrap();
    let text = as_text(output);
    assert!(text.contains("package beta"));
    assert!(!text.contains("fmt"));
}

#[tokio::test]
async fn package_taken_from_first_contributing_file() {
    let dir = TempDir::new().unwrap();
    let a = write_file(
        &dir,
        "a.go",
        "package first\n\ntype T struct{}\n\nfunc (t T) Foo() {}\n",
    )
    .await;
    let b = write_file(
        &dir,
        "b.go",
        "package second\n\ntype U struct{}\n\nfunc (u U) Bar() {}\n",
    )
    .await;

    let options = MergeOptions {
        // The override is accepted but ignored.
        package: Some("override".to_string()),
        ..Default::default()
    };
    let text = as_text(merge_files(&[a, b], &options).await.unwrap());
    assert!(text.contains("package first"));
    assert!(!text.contains("override"));
}

#[tokio::test]
async fn unreadable_file_aborts_the_run() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing.go");

    let err = merge_files(&[missing.clone()], &MergeOptions::default())
        .await
        .unwrap_err();
    match err {
        Error::FileRead { path, .. } => assert_eq!(path, missing),
        other => panic!("expected FileRead, got {other:?}"),
    }
}

#[tokio::test]
async fn malformed_file_aborts_with_parse_error() {
    let dir = TempDir::new().unwrap();
    let a = write_file(&dir, "ok.go", "package p\n\ntype T struct{}\n\nfunc (t T) Foo() {}\n").await;
    let bad = write_file(&dir, "bad.go", "package p\n\nfunc ((( {}\n").await;

    let err = merge_files(&[a, bad.clone()], &MergeOptions::default())
        .await
        .unwrap_err();
    match err {
        Error::Parse { path, message } => {
            assert_eq!(path, bad);
            assert!(message.contains("syntax error"));
        }
        other => panic!("expected Parse, got {other:?}"),
    }
}

#[tokio::test]
async fn interface_docs_combine_comment_and_type_docs() {
    let dir = TempDir::new().unwrap();
    let a = write_file(
        &dir,
        "a.go",
        r#"
package sample

// T is a sample type.
type T struct{}

// Foo does X.
func (t *T) Foo(x int) (int, error) { return x, nil }
"#,
    )
    .await;

    let options = MergeOptions {
        iface_comment: "TInterface documents T.".to_string(),
        copy_type_docs: true,
        ..Default::default()
    };
    let text = as_text(merge_files(&[a], &options).await.unwrap());

    assert!(text.contains("// TInterface documents T."));
    assert!(text.contains("// T is a sample type."));
    assert!(text.contains("// Foo does X."));
    assert!(text.contains("Foo(x int) (int, error)"));
}

#[tokio::test]
async fn custom_suffix_names_the_interfaces() {
    let dir = TempDir::new().unwrap();
    let a = write_file(
        &dir,
        "a.go",
        "package p\n\ntype Store struct{}\n\nfunc (s *Store) Get(k string) string { return k }\n",
    )
    .await;

    let options = MergeOptions {
        suffix: "API".to_string(),
        ..Default::default()
    };
    let text = as_text(merge_files(&[a], &options).await.unwrap());
    assert!(text.contains("type StoreAPI interface {"));
}

#[tokio::test]
async fn type_blocks_follow_discovery_order() {
    let dir = TempDir::new().unwrap();
    let a = write_file(
        &dir,
        "a.go",
        r#"
package p

type B struct{}
type A struct{}

func (b B) One() {}

func (a A) Two() {}
"#,
    )
    .await;

    let text = as_text(merge_files(&[a], &MergeOptions::default()).await.unwrap());
    let b_at = text.find("type BInterface").unwrap();
    let a_at = text.find("type AInterface").unwrap();
    assert!(b_at < a_at, "blocks must keep discovery order");
}
