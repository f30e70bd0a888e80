use std::fs;

use tempfile::TempDir;

use arbor_core::{PatternSpec, RenderOptions, ScanOptions, SortMode};
use arbor_render::{render_path, render_path_async, render_tree, render_tree_async};
use arbor_scan::scan;

fn create_test_tree() -> TempDir {
    let temp = TempDir::new().unwrap();
    let root = temp.path();

    fs::create_dir(root.join("dir1")).unwrap();
    fs::create_dir(root.join("dir2")).unwrap();
    fs::create_dir(root.join("dir1/subdir")).unwrap();

    fs::write(root.join("file1.txt"), "hello").unwrap();
    fs::write(root.join("dir1/file2.txt"), "world world world").unwrap();
    fs::write(root.join("dir1/subdir/file3.txt"), "test").unwrap();
    fs::write(root.join("dir2/file4.log"), "another file here").unwrap();

    temp
}

fn sorted_options() -> RenderOptions {
    RenderOptions::builder()
        .sorted(SortMode::Alphabetical)
        .build()
        .unwrap()
}

fn root_name(temp: &TempDir) -> String {
    temp.path()
        .file_name()
        .unwrap()
        .to_string_lossy()
        .into_owned()
}

fn expected_full_diagram(temp: &TempDir) -> String {
    format!(
        "{}\n \
         ├─> dir1\n \
         │   ├── file2.txt\n \
         │   └─> subdir\n \
         │       └── file3.txt\n \
         ├─> dir2\n \
         │   └── file4.log\n \
         └── file1.txt",
        root_name(temp)
    )
}

#[test]
fn test_render_path_full_diagram() {
    let temp = create_test_tree();
    let out = render_path(temp.path(), sorted_options()).unwrap().unwrap();
    assert_eq!(out, expected_full_diagram(&temp));
}

#[tokio::test]
async fn test_render_path_async_matches_sync() {
    let temp = create_test_tree();
    let sync_out = render_path(temp.path(), sorted_options()).unwrap().unwrap();
    let async_out = render_path_async(temp.path(), sorted_options())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(sync_out, async_out);
}

#[test]
fn test_render_tree_matches_render_path() {
    let temp = create_test_tree();
    let scan_options = ScanOptions::builder()
        .sorted(SortMode::Alphabetical)
        .build()
        .unwrap();
    let tree = scan(temp.path(), scan_options).unwrap().unwrap();

    let from_tree = render_tree(&tree, sorted_options());
    let from_path = render_path(temp.path(), sorted_options()).unwrap().unwrap();
    assert_eq!(from_tree, from_path);
}

#[test]
fn test_round_trip_names_every_kept_node_once() {
    let temp = create_test_tree();
    let scan_options = ScanOptions::builder()
        .sorted(SortMode::Alphabetical)
        .size_in_bytes(false)
        .size_label(false)
        .hash(false)
        .build()
        .unwrap();
    let tree = scan(temp.path(), scan_options).unwrap().unwrap();
    let out = render_tree(&tree, sorted_options());

    for name in [
        "dir1", "dir2", "subdir", "file1.txt", "file2.txt", "file3.txt", "file4.log",
    ] {
        assert_eq!(out.matches(name).count(), 1, "{name} rendered once");
    }
}

#[tokio::test]
async fn test_render_tree_async_matches_sync() {
    let temp = create_test_tree();
    let scan_options = ScanOptions::builder()
        .sorted(SortMode::Alphabetical)
        .build()
        .unwrap();
    let tree = scan(temp.path(), scan_options).unwrap().unwrap();

    let sync_out = render_tree(&tree, sorted_options());
    let async_out = render_tree_async(&tree, sorted_options()).await;
    assert_eq!(sync_out, async_out);
}

#[test]
fn test_depth_limits_the_diagram() {
    let temp = create_test_tree();
    let options = RenderOptions::builder()
        .depth(1u32)
        .sorted(SortMode::Alphabetical)
        .build()
        .unwrap();
    let out = render_path(temp.path(), options).unwrap().unwrap();
    assert_eq!(
        out,
        format!(
            "{}\n ├─> dir1\n ├─> dir2\n └── file1.txt",
            root_name(&temp)
        )
    );

    let options = RenderOptions::builder().depth(0u32).build().unwrap();
    let out = render_path(temp.path(), options).unwrap().unwrap();
    assert_eq!(out, root_name(&temp));
}

#[test]
fn test_exclude_prunes_subtrees() {
    let temp = create_test_tree();
    let options = RenderOptions::builder()
        .exclude(vec![PatternSpec::from("/dir2")])
        .sorted(SortMode::Alphabetical)
        .build()
        .unwrap();
    let out = render_path(temp.path(), options).unwrap().unwrap();
    assert!(!out.contains("dir2"));
    assert!(!out.contains("file4.log"));
    assert!(out.contains("file1.txt"));
}

#[test]
fn test_extension_filter_hides_files_not_dirs() {
    let temp = create_test_tree();
    let options = RenderOptions::builder()
        .extensions(vec!["txt".to_string()])
        .sorted(SortMode::Alphabetical)
        .build()
        .unwrap();
    let out = render_path(temp.path(), options).unwrap().unwrap();
    assert!(!out.contains("file4.log"));
    // Its parent directory still renders.
    assert!(out.contains("dir2"));
}

#[test]
fn test_hidden_toggle() {
    let temp = create_test_tree();
    fs::write(temp.path().join(".env"), "SECRET=1").unwrap();

    let out = render_path(temp.path(), sorted_options()).unwrap().unwrap();
    assert!(out.contains(".env"));

    let options = RenderOptions::builder()
        .show_hidden(false)
        .sorted(SortMode::Alphabetical)
        .build()
        .unwrap();
    let out = render_path(temp.path(), options).unwrap().unwrap();
    assert!(!out.contains(".env"));
}

#[test]
fn test_last_sibling_glyphs() {
    let temp = create_test_tree();
    let out = render_path(temp.path(), sorted_options()).unwrap().unwrap();
    // file1.txt sorts last at the top level.
    assert!(out.contains("\n └── file1.txt"));
    assert!(out.contains("\n ├─> dir1"));
}

#[test]
fn test_unreadable_root_tolerated_to_none() {
    let missing = std::path::Path::new("/definitely/not/a/real/path");

    let result = render_path(missing, RenderOptions::default()).unwrap();
    assert!(result.is_none());

    let options = RenderOptions::builder().skip_errors(false).build().unwrap();
    assert!(render_path(missing, options).is_err());
}

#[tokio::test]
async fn test_async_unreadable_root() {
    let missing = std::path::Path::new("/definitely/not/a/real/path");

    let result = render_path_async(missing, RenderOptions::default())
        .await
        .unwrap();
    assert!(result.is_none());

    let options = RenderOptions::builder().skip_errors(false).build().unwrap();
    assert!(render_path_async(missing, options).await.is_err());
}

#[test]
fn test_file_root_renders_name_only() {
    let temp = create_test_tree();
    let out = render_path(temp.path().join("file1.txt"), RenderOptions::default())
        .unwrap()
        .unwrap();
    assert_eq!(out, "file1.txt");
}

#[cfg(unix)]
mod symlinks {
    use super::*;
    use std::os::unix::fs::symlink;

    #[test]
    fn test_symlink_connector_and_follow() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        fs::create_dir(root.join("real")).unwrap();
        fs::write(root.join("real/data.txt"), "payload").unwrap();
        symlink(root.join("real"), root.join("zlink")).unwrap();

        let out = render_path(root, sorted_options()).unwrap().unwrap();
        assert_eq!(
            out,
            format!(
                "{}\n ├─> real\n │   └── data.txt\n └>>zlink",
                root_name(&temp)
            )
        );

        let options = RenderOptions::builder()
            .follow_links(true)
            .sorted(SortMode::Alphabetical)
            .build()
            .unwrap();
        let out = render_path(root, options).unwrap().unwrap();
        assert!(out.contains("└>>zlink\n     └── data.txt"));
    }

    #[test]
    fn test_symlinks_suppressed() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        fs::write(root.join("a.txt"), "a").unwrap();
        symlink(root.join("a.txt"), root.join("b.link")).unwrap();

        let options = RenderOptions::builder()
            .symbolic_links(false)
            .sorted(SortMode::Alphabetical)
            .build()
            .unwrap();
        let out = render_path(root, options).unwrap().unwrap();
        assert!(!out.contains("b.link"));
        assert!(out.contains("└── a.txt"));
    }
}
