use dirhash::scanner::{digest_bytes, digest_file, HashAlgorithm, TraversalOptions};
use dirhash::tree::digest_tree;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

/// root/
///   a.txt        "alpha"
///   src/
///     main.rs    "fn main() {}"
///     lib/
///       util.rs  "pub fn util() {}"
///   docs/
///     readme.md  "# docs"
fn build_tree(root: &Path) {
    fs::write(root.join("a.txt"), "alpha").unwrap();
    fs::create_dir_all(root.join("src").join("lib")).unwrap();
    fs::write(root.join("src").join("main.rs"), "fn main() {}").unwrap();
    fs::write(root.join("src").join("lib").join("util.rs"), "pub fn util() {}").unwrap();
    fs::create_dir(root.join("docs")).unwrap();
    fs::write(root.join("docs").join("readme.md"), "# docs").unwrap();
}

#[test]
fn test_concrete_scenario() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.txt"), "hello").unwrap();
    fs::create_dir(dir.path().join("b")).unwrap();
    fs::write(dir.path().join("b").join("c.txt"), "world").unwrap();

    let options = TraversalOptions::default();
    let b = digest_tree(&dir.path().join("b"), &options).unwrap();
    let hello = digest_bytes(b"hello", HashAlgorithm::Md5);
    let expected = digest_bytes(format!("a.txt:{hello}b:{b}").as_bytes(), HashAlgorithm::Md5);

    let first = digest_tree(dir.path(), &options).unwrap();
    let second = digest_tree(dir.path(), &options).unwrap();
    assert_eq!(first, expected);
    assert_eq!(second, expected);
}

#[test]
fn test_determinism_across_runs() {
    let dir = tempdir().unwrap();
    build_tree(dir.path());

    for algorithm in HashAlgorithm::ALL {
        let options = TraversalOptions::default().with_algorithm(algorithm);
        let digests: Vec<_> = (0..5)
            .map(|_| digest_tree(dir.path(), &options).unwrap())
            .collect();
        assert!(digests.windows(2).all(|w| w[0] == w[1]), "{algorithm}");
    }
}

#[test]
fn test_creation_order_does_not_matter() {
    let forward = tempdir().unwrap();
    let backward = tempdir().unwrap();
    let names: Vec<String> = (0..20).map(|i| format!("file_{i:02}.txt")).collect();

    for name in &names {
        fs::write(forward.path().join(name), name).unwrap();
    }
    for name in names.iter().rev() {
        fs::write(backward.path().join(name), name).unwrap();
    }

    let options = TraversalOptions::default();
    assert_eq!(
        digest_tree(forward.path(), &options).unwrap(),
        digest_tree(backward.path(), &options).unwrap()
    );
}

#[test]
fn test_identical_trees_in_different_locations_match() {
    let one = tempdir().unwrap();
    let two = tempdir().unwrap();
    build_tree(one.path());
    build_tree(two.path());

    let options = TraversalOptions::default().with_algorithm(HashAlgorithm::Blake3);
    assert_eq!(
        digest_tree(one.path(), &options).unwrap(),
        digest_tree(two.path(), &options).unwrap()
    );
}

#[test]
fn test_one_byte_change_propagates_to_every_ancestor() {
    let dir = tempdir().unwrap();
    build_tree(dir.path());
    let options = TraversalOptions::default();

    let util = dir.path().join("src").join("lib").join("util.rs");
    let file_before = digest_file(&util, options.algorithm).unwrap();
    let lib_before = digest_tree(&dir.path().join("src").join("lib"), &options).unwrap();
    let src_before = digest_tree(&dir.path().join("src"), &options).unwrap();
    let root_before = digest_tree(dir.path(), &options).unwrap();
    let docs_before = digest_tree(&dir.path().join("docs"), &options).unwrap();

    fs::write(&util, "pub fn utim() {}").unwrap();

    assert_ne!(digest_file(&util, options.algorithm).unwrap(), file_before);
    assert_ne!(digest_tree(&dir.path().join("src").join("lib"), &options).unwrap(), lib_before);
    assert_ne!(digest_tree(&dir.path().join("src"), &options).unwrap(), src_before);
    assert_ne!(digest_tree(dir.path(), &options).unwrap(), root_before);
    assert_eq!(digest_tree(&dir.path().join("docs"), &options).unwrap(), docs_before);
}

#[test]
fn test_renaming_a_file_changes_digest() {
    let dir = tempdir().unwrap();
    build_tree(dir.path());
    let options = TraversalOptions::default();
    let before = digest_tree(dir.path(), &options).unwrap();

    fs::rename(dir.path().join("a.txt"), dir.path().join("b.txt")).unwrap();

    assert_ne!(digest_tree(dir.path(), &options).unwrap(), before);
}

#[test]
fn test_extension_allow_list_excludes_other_files() {
    let dir = tempdir().unwrap();
    build_tree(dir.path());
    let options = TraversalOptions::default().with_extensions(["rs"]);
    let before = digest_tree(dir.path(), &options).unwrap();

    fs::write(dir.path().join("a.txt"), "changed").unwrap();
    fs::write(dir.path().join("docs").join("readme.md"), "changed").unwrap();
    fs::write(dir.path().join("new.json"), "{}").unwrap();
    assert_eq!(digest_tree(dir.path(), &options).unwrap(), before);

    fs::write(dir.path().join("src").join("main.rs"), "fn main() { }").unwrap();
    assert_ne!(digest_tree(dir.path(), &options).unwrap(), before);
}

#[test]
fn test_extension_allow_list_case_insensitive() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("UPPER.RS"), "x").unwrap();

    let options = TraversalOptions::default().with_extensions([".rs"]);
    let digest = digest_tree(dir.path(), &options).unwrap();

    assert_ne!(digest, digest_bytes(b"", HashAlgorithm::Md5));
}

#[test]
fn test_ignored_directories_never_contribute() {
    let dir = tempdir().unwrap();
    build_tree(dir.path());
    let options = TraversalOptions::default();
    let before = digest_tree(dir.path(), &options).unwrap();

    for ignored in ["node_modules", "NODE_MODULES", ".git", ".Git"] {
        let path = dir.path().join("src").join(ignored);
        fs::create_dir_all(path.join("deep")).unwrap();
        fs::write(path.join("deep").join("pkg.js"), "module.exports = 1").unwrap();
    }

    assert_eq!(digest_tree(dir.path(), &options).unwrap(), before);
}

#[test]
fn test_custom_ignore_dirs_replace_defaults() {
    let dir = tempdir().unwrap();
    build_tree(dir.path());
    fs::create_dir(dir.path().join("node_modules")).unwrap();
    fs::write(dir.path().join("node_modules").join("x.js"), "x").unwrap();

    let defaults = digest_tree(dir.path(), &TraversalOptions::default()).unwrap();
    let custom = digest_tree(
        dir.path(),
        &TraversalOptions::default().with_ignore_dirs(["Docs"]),
    )
    .unwrap();

    assert_ne!(defaults, custom);

    fs::write(dir.path().join("docs").join("readme.md"), "changed").unwrap();
    assert_eq!(
        digest_tree(
            dir.path(),
            &TraversalOptions::default().with_ignore_dirs(["Docs"])
        )
        .unwrap(),
        custom
    );
}

#[test]
fn test_exclusion_pattern_drops_files_and_directories() {
    let dir = tempdir().unwrap();
    build_tree(dir.path());
    let options = TraversalOptions::default()
        .with_ignore_files(r"^\.DS_Store$|^docs$")
        .unwrap();
    let before = digest_tree(dir.path(), &options).unwrap();

    fs::write(dir.path().join(".DS_Store"), "finder junk").unwrap();
    fs::write(dir.path().join("docs").join("readme.md"), "changed").unwrap();

    assert_eq!(digest_tree(dir.path(), &options).unwrap(), before);
}

#[test]
fn test_empty_subdirectory_contributes_its_name() {
    let dir = tempdir().unwrap();
    build_tree(dir.path());
    let options = TraversalOptions::default();
    let before = digest_tree(dir.path(), &options).unwrap();

    fs::create_dir(dir.path().join("empty")).unwrap();

    let after = digest_tree(dir.path(), &options).unwrap();
    assert_ne!(after, before);
}

#[test]
fn test_io_threads_do_not_change_digest() {
    let dir = tempdir().unwrap();
    build_tree(dir.path());

    let base = digest_tree(dir.path(), &TraversalOptions::default()).unwrap();
    for threads in [1, 2, 8] {
        let options = TraversalOptions::default().with_io_threads(threads);
        assert_eq!(digest_tree(dir.path(), &options).unwrap(), base);
    }
}
