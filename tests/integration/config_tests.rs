use dirhash::config::HashConfig;
use dirhash::scanner::HashAlgorithm;
use dirhash::tree::digest_tree;
use figment::providers::Serialized;
use std::fs;
use tempfile::tempdir;

#[test]
fn test_config_load_defaults() {
    // Use figment directly without Env to avoid interference from other tests
    let figment = figment::Figment::from(Serialized::defaults(HashConfig::default()));
    let config: HashConfig = figment.extract().unwrap();

    assert_eq!(config, HashConfig::default());
    assert_eq!(config.algorithm, HashAlgorithm::Md5);
    assert_eq!(config.ignore_dirs, vec!["node_modules", ".git"]);
    assert!(config.follow_symlinks);
}

#[test]
fn test_config_load_from_env() {
    std::env::set_var("DIRHASH_TEST_ALGORITHM", "sha512");
    std::env::set_var("DIRHASH_TEST_IO_THREADS", "6");
    std::env::set_var("DIRHASH_TEST_EXT", "[rs, toml]");

    use figment::{providers::Env, Figment};
    let figment = Figment::from(Serialized::defaults(HashConfig::default()))
        .merge(Env::prefixed("DIRHASH_TEST_").split("__"));
    let config: HashConfig = figment.extract().unwrap();

    assert_eq!(config.algorithm, HashAlgorithm::Sha512);
    assert_eq!(config.io_threads, Some(6));
    assert_eq!(config.ext, vec!["rs", "toml"]);

    std::env::remove_var("DIRHASH_TEST_ALGORITHM");
    std::env::remove_var("DIRHASH_TEST_IO_THREADS");
    std::env::remove_var("DIRHASH_TEST_EXT");
}

#[test]
fn test_config_load_from_toml() {
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("dirhash.toml");

    let toml_content = r#"
algorithm = "SHA-256"
ext = ["rs", ".toml"]
ignore_dirs = ["target"]
ignore_files = '^\.DS_Store$'
follow_symlinks = false
io_threads = 2
"#;
    fs::write(&config_path, toml_content).unwrap();

    let config = HashConfig::load_from(&config_path).unwrap();

    assert_eq!(config.algorithm, HashAlgorithm::Sha256);
    assert_eq!(config.ext, vec!["rs", ".toml"]);
    assert_eq!(config.ignore_dirs, vec!["target"]);
    assert_eq!(config.ignore_files.as_deref(), Some(r"^\.DS_Store$"));
    assert!(!config.follow_symlinks);
    assert_eq!(config.io_threads, Some(2));

    let options = config.to_options().unwrap();
    assert!(options.is_excluded_name(".DS_Store"));
    assert!(options.is_ignored_dir("TARGET"));
    assert!(!options.is_ignored_dir("node_modules"));
}

#[test]
fn test_config_partial_toml_keeps_defaults() {
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("dirhash.toml");
    fs::write(&config_path, "algorithm = \"blake3\"\n").unwrap();

    let config = HashConfig::load_from(&config_path).unwrap();

    assert_eq!(config.algorithm, HashAlgorithm::Blake3);
    assert_eq!(config.ignore_dirs, HashConfig::default().ignore_dirs);
    assert!(config.ext.is_empty());
}

#[test]
fn test_config_unknown_algorithm_rejected() {
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("dirhash.toml");
    fs::write(&config_path, "algorithm = \"whirlpool\"\n").unwrap();

    let err = HashConfig::load_from(&config_path).unwrap_err();
    assert!(format!("{err:#}").contains("whirlpool"));
}

#[test]
fn test_config_invalid_toml() {
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("dirhash.toml");
    fs::write(&config_path, "algorithm = [unterminated").unwrap();

    assert!(HashConfig::load_from(&config_path).is_err());
}

#[test]
fn test_config_missing_file() {
    let temp_dir = tempdir().unwrap();
    let result = HashConfig::load_from(&temp_dir.path().join("absent.toml"));
    assert!(result.is_err());
}

#[test]
fn test_config_save_toml() {
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("nested").join("dirhash.toml");

    let config = HashConfig {
        algorithm: HashAlgorithm::Sha1,
        ext: vec!["md".to_string()],
        ..Default::default()
    };
    config.save_to(&config_path).unwrap();

    let saved_content = fs::read_to_string(&config_path).unwrap();
    assert!(saved_content.contains("algorithm = \"sha1\""));
    assert!(saved_content.contains("\"md\""));
    assert_eq!(HashConfig::load_from(&config_path).unwrap(), config);
}

#[test]
fn test_config_drives_tree_digest() {
    let tree = tempdir().unwrap();
    fs::write(tree.path().join("keep.rs"), "fn keep() {}").unwrap();
    fs::write(tree.path().join("drop.txt"), "drop").unwrap();

    let config = HashConfig {
        ext: vec!["rs".to_string()],
        algorithm: HashAlgorithm::Sha256,
        ..Default::default()
    };
    let digest = digest_tree(tree.path(), &config.to_options().unwrap()).unwrap();

    fs::write(tree.path().join("drop.txt"), "changed").unwrap();
    assert_eq!(
        digest_tree(tree.path(), &config.to_options().unwrap()).unwrap(),
        digest
    );
    assert_eq!(digest.as_str().len(), 64);
}
