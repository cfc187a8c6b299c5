// Copyright (c) Contributors to the zap project.
// SPDX-License-Identifier: Apache-2.0

use rstest::rstest;
use tempfile::TempDir;

use super::*;

fn touch(root: &Path, rel: &str) {
    let path = root.join(rel);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, "").unwrap();
}

fn canonical(tmp: &TempDir) -> PathBuf {
    dunce::canonicalize(tmp.path()).unwrap()
}

#[rstest]
fn test_discover_groups_by_directory() {
    let tmp = TempDir::new().unwrap();
    touch(tmp.path(), "src/main.rs");
    touch(tmp.path(), "src/lib.rs");
    touch(tmp.path(), "src/cmd/run.rs");
    touch(tmp.path(), "README.md");

    let packages = discover_packages(tmp.path(), &Config::default()).expect("Should discover");
    let root = canonical(&tmp);

    assert_eq!(
        packages,
        vec![
            Package {
                dir: root.join("src"),
                source_files: vec![root.join("src/lib.rs"), root.join("src/main.rs")],
            },
            Package {
                dir: root.join("src/cmd"),
                source_files: vec![root.join("src/cmd/run.rs")],
            },
        ]
    );
}

#[rstest]
#[case::target("target/debug/build.rs")]
#[case::git(".git/hooks/x.rs")]
#[case::hidden(".cache/x.rs")]
#[case::testdata("src/testdata/fixture.rs")]
#[case::configured("vendor/dep/lib.rs")]
fn test_discover_skips_directories(#[case] rel: &str) {
    let tmp = TempDir::new().unwrap();
    touch(tmp.path(), "src/main.rs");
    touch(tmp.path(), rel);

    let config = Config {
        skip_dirs: vec!["vendor".to_string()],
        ..Default::default()
    };
    let packages = discover_packages(tmp.path(), &config).expect("Should discover");

    assert_eq!(packages.len(), 1);
    assert_eq!(packages[0].dir, canonical(&tmp).join("src"));
}

#[rstest]
fn test_discover_skips_generated_output() {
    let tmp = TempDir::new().unwrap();
    touch(tmp.path(), "src/main.rs");
    touch(tmp.path(), "src/zap_embed.rs");

    let packages = discover_packages(tmp.path(), &Config::default()).expect("Should discover");
    assert_eq!(packages[0].source_files.len(), 1);
    assert!(packages[0].source_files[0].ends_with("main.rs"));
}

#[rstest]
fn test_discover_missing_root() {
    let tmp = TempDir::new().unwrap();
    let result = discover_packages(tmp.path().join("nope"), &Config::default());
    assert!(matches!(result, Err(crate::Error::NotFoundAtPath(_))));
}
