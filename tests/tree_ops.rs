use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use rand::{thread_rng, Rng};
use tempfile::tempdir;
use walkdir::WalkDir;

use treepack::tree::{copy_tree, move_tree};
use treepack::TreeError;

fn create_test_files(dir: &Path, n: usize, sz: usize) {
    fs::create_dir_all(dir).unwrap();
    let mut rng = thread_rng();
    for i in 0..n {
        let p = dir.join(format!("f{}.dat", i));
        let mut f = File::create(&p).unwrap();
        let mut buf = vec![0u8; sz];
        rng.fill(&mut buf[..]);
        f.write_all(&buf).unwrap();
    }
}

/// Every path under `root` relative to it, directories marked with a
/// trailing slash, sorted.
fn tree_shape(root: &Path) -> Vec<String> {
    let mut shape = Vec::new();
    for entry in WalkDir::new(root).min_depth(1) {
        let entry = entry.unwrap();
        let rel = entry.path().strip_prefix(root).unwrap();
        let mut name = rel.to_string_lossy().replace('\\', "/");
        if entry.file_type().is_dir() {
            name.push('/');
        }
        shape.push(name);
    }
    shape.sort();
    shape
}

fn trees_equal(a: &Path, b: &Path) {
    assert_eq!(tree_shape(a), tree_shape(b));
    for entry in WalkDir::new(a).min_depth(1) {
        let entry = entry.unwrap();
        if entry.file_type().is_file() {
            let rel = entry.path().strip_prefix(a).unwrap();
            assert_eq!(
                fs::read(entry.path()).unwrap(),
                fs::read(b.join(rel)).unwrap(),
                "content mismatch for {}",
                rel.display()
            );
        }
    }
}

#[test]
fn copy_tree_replicates_the_basic_shape() {
    // {a/, a/f1.txt="hi", b.txt="world"}
    let src = tempdir().unwrap();
    fs::create_dir(src.path().join("a")).unwrap();
    fs::write(src.path().join("a/f1.txt"), b"hi").unwrap();
    fs::write(src.path().join("b.txt"), b"world").unwrap();

    let dst = tempdir().unwrap();
    let dest = dst.path().join("out");
    copy_tree(src.path(), &dest).unwrap();

    assert!(dest.join("a").is_dir());
    assert_eq!(fs::read(dest.join("a/f1.txt")).unwrap(), b"hi");
    assert_eq!(fs::read(dest.join("b.txt")).unwrap(), b"world");
    trees_equal(src.path(), &dest);
}

#[test]
fn copy_tree_handles_nested_random_content() {
    let src = tempdir().unwrap();
    create_test_files(&src.path().join("x/y"), 4, 2048);
    create_test_files(&src.path().join("x"), 2, 512);
    fs::create_dir(src.path().join("empty")).unwrap();

    let dst = tempdir().unwrap();
    let dest = dst.path().join("copy");
    copy_tree(src.path(), &dest).unwrap();

    trees_equal(src.path(), &dest);
    // Empty containers are replicated even though no leaf forces them.
    assert!(dest.join("empty").is_dir());
}

#[test]
fn copy_tree_missing_source_fails() {
    let dst = tempdir().unwrap();
    let err = copy_tree(Path::new("/no/such/tree"), &dst.path().join("out")).unwrap_err();
    assert!(matches!(err, TreeError::NotFound(_)));
}

#[cfg(unix)]
#[test]
fn copy_tree_surfaces_a_leaf_error() {
    let src = tempdir().unwrap();
    // A dangling symlink makes the leaf copy fail deterministically.
    std::os::unix::fs::symlink(src.path().join("missing-target"), src.path().join("broken"))
        .unwrap();

    let dst = tempdir().unwrap();
    let err = copy_tree(src.path(), &dst.path().join("out")).unwrap_err();
    assert!(matches!(err, TreeError::NotFound(_)));
}

#[test]
fn move_tree_renames_when_possible() {
    let root = tempdir().unwrap();
    let src = root.path().join("src");
    create_test_files(&src, 3, 256);
    let dest = root.path().join("dst");

    move_tree(&src, &dest).unwrap();

    assert!(!src.exists());
    assert_eq!(fs::read_dir(&dest).unwrap().count(), 3);
}

#[test]
fn move_tree_falls_back_to_per_file_moves() {
    let root = tempdir().unwrap();
    let src = root.path().join("src");
    fs::create_dir_all(src.join("nested")).unwrap();
    fs::write(src.join("top.txt"), b"t").unwrap();
    fs::write(src.join("nested/leaf.txt"), b"l").unwrap();

    // A non-empty destination directory makes the whole-tree rename fail.
    let dest = root.path().join("dst");
    fs::create_dir(&dest).unwrap();
    fs::write(dest.join("keep.txt"), b"k").unwrap();

    move_tree(&src, &dest).unwrap();

    assert!(!src.exists());
    assert_eq!(fs::read(dest.join("top.txt")).unwrap(), b"t");
    assert_eq!(fs::read(dest.join("nested/leaf.txt")).unwrap(), b"l");
    assert_eq!(fs::read(dest.join("keep.txt")).unwrap(), b"k");
}
