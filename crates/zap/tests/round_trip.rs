// Copyright (c) Contributors to the zap project.
// SPDX-License-Identifier: Apache-2.0

//! Generated modules rebuild the directories they were generated from.
//!
//! The generated `registry()` body is straight-line code, so instead of
//! compiling it these tests replay its statements against the `zapped` API.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use rstest::{fixture, rstest};
use syn::{Expr, Lit, Pat, Stmt};
use tempfile::TempDir;
use zap::{Config, GenerateOptions};
use zapped::{Directory, EmbeddedDirectory, Registry};

#[fixture]
fn tmpdir() -> TempDir {
    tempfile::Builder::new()
        .prefix("zap-test-")
        .tempdir()
        .expect("Failed to create dir for test")
}

#[derive(Default)]
struct Replay {
    building: HashMap<String, EmbeddedDirectory>,
    done: HashMap<String, Arc<EmbeddedDirectory>>,
    registry: Registry,
}

fn ident_of(expr: &Expr) -> String {
    match expr {
        Expr::Path(path) => path.path.segments.last().unwrap().ident.to_string(),
        Expr::Reference(reference) => ident_of(&reference.expr),
        other => panic!("Expected a path, got: {other:?}"),
    }
}

fn last_segments(expr: &Expr) -> Vec<String> {
    match expr {
        Expr::Call(call) => last_segments(&call.func),
        Expr::Path(path) => path
            .path
            .segments
            .iter()
            .map(|s| s.ident.to_string())
            .collect(),
        other => panic!("Expected a call, got: {other:?}"),
    }
}

fn str_arg(expr: &Expr) -> String {
    match expr {
        Expr::Lit(lit) => match &lit.lit {
            Lit::Str(s) => s.value(),
            other => panic!("Expected a string literal, got: {other:?}"),
        },
        other => panic!("Expected a literal, got: {other:?}"),
    }
}

impl Replay {
    fn run(source: &str) -> Registry {
        let file = syn::parse_file(source).expect("Generated source should parse");
        let body = file
            .items
            .iter()
            .find_map(|item| match item {
                syn::Item::Fn(f) if f.sig.ident == "registry" => Some(&f.block.stmts),
                _ => None,
            })
            .expect("registry() should be generated");

        let mut replay = Replay::default();
        for stmt in body {
            replay.statement(stmt);
        }
        replay.registry
    }

    fn statement(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Local(local) => {
                let Pat::Ident(pat) = &local.pat else {
                    panic!("Unexpected binding: {local:?}");
                };
                let name = pat.ident.to_string();
                let init = &local.init.as_ref().expect("initialized").expr;
                let callee = last_segments(init);
                match callee.iter().map(String::as_str).collect::<Vec<_>>().as_slice() {
                    [.., "Registry", "new"] => {}
                    [.., "EmbeddedDirectory", "new"] => {
                        self.building.insert(name, EmbeddedDirectory::new());
                    }
                    [.., "Arc", "new"] => {
                        let dir = self.building.remove(&name).expect("built before frozen");
                        self.done.insert(name, Arc::new(dir));
                    }
                    other => panic!("Unexpected constructor: {other:?}"),
                }
            }
            Stmt::Expr(Expr::MethodCall(call), Some(_)) => {
                let target = ident_of(&call.receiver);
                let args = call.args.iter().collect::<Vec<_>>();
                let name = str_arg(args[0]);
                match call.method.to_string().as_str() {
                    "insert_file" => {
                        let Expr::Lit(lit) = args[1] else {
                            panic!("Expected file contents");
                        };
                        let Lit::ByteStr(bytes) = &lit.lit else {
                            panic!("Expected a byte string");
                        };
                        self.building
                            .get_mut(&target)
                            .expect("directory under construction")
                            .insert_file(name, bytes.value());
                    }
                    "insert_directory" => {
                        let Expr::Call(clone) = args[1] else {
                            panic!("Expected Arc::clone");
                        };
                        let child = Arc::clone(&self.done[&ident_of(&clone.args[0])]);
                        self.building
                            .get_mut(&target)
                            .expect("directory under construction")
                            .insert_directory(name, child);
                    }
                    "insert" => {
                        let Expr::Call(clone) = args[1] else {
                            panic!("Expected Arc::clone");
                        };
                        let root = Arc::clone(&self.done[&ident_of(&clone.args[0])]);
                        self.registry.insert(name, root);
                    }
                    other => panic!("Unexpected method: {other}"),
                }
            }
            Stmt::Expr(Expr::Path(_), None) => {}
            other => panic!("Unexpected statement: {other:?}"),
        }
    }
}

/// Assert that `dir` holds exactly what is on disk at `path`.
fn assert_matches_disk(dir: &Directory, path: &Path) {
    let mut files = BTreeSet::new();
    let mut directories = BTreeSet::new();
    for entry in fs::read_dir(path).unwrap() {
        let entry = entry.unwrap();
        let name = entry.file_name().into_string().unwrap();
        if entry.file_type().unwrap().is_dir() {
            directories.insert(name);
        } else {
            files.insert(name);
        }
    }

    assert_eq!(dir.files().into_iter().collect::<BTreeSet<_>>(), files);
    assert_eq!(
        dir.directories().into_iter().collect::<BTreeSet<_>>(),
        directories
    );
    for name in files {
        assert_eq!(
            dir.file(&name).unwrap().bytes(),
            fs::read(path.join(&name)).unwrap().as_slice(),
            "{name} differs"
        );
    }
    for name in directories {
        assert_matches_disk(&dir.directory(&name).unwrap(), &path.join(name));
    }
}

fn options() -> GenerateOptions {
    GenerateOptions {
        runtime_crate: "zapped".to_string(),
        development_mode: false,
        source_root: PathBuf::from("/"),
    }
}

#[rstest]
fn test_round_trip_scenario(tmpdir: TempDir) {
    let root = tmpdir.path().join("root");
    fs::create_dir_all(root.join("sub")).unwrap();
    fs::write(root.join("a.txt"), "hello").unwrap();
    fs::write(root.join("sub/b.txt"), "world").unwrap();

    let (trees, errors) = zap::collect([&root], &BTreeSet::new());
    assert!(errors.is_empty());
    assert_eq!(trees.len(), 2);

    let keys = BTreeMap::from([("ROOT".to_string(), root.clone())]);
    let source = zap::generate(&trees, &keys, &options()).unwrap();
    let registry = Replay::run(&source);

    let dir = registry.get("ROOT").unwrap();
    assert_eq!(dir.file("a.txt").unwrap().bytes(), b"hello");
    assert_eq!(
        dir.directory("sub").unwrap().file("b.txt").unwrap().bytes(),
        b"world"
    );
    assert!(registry.get("OTHER").unwrap_err().is_not_found());
}

#[rstest]
fn test_round_trip_project(tmpdir: TempDir) {
    let root = dunce::canonicalize(tmpdir.path()).unwrap();
    fs::create_dir_all(root.join("src/web/static/css")).unwrap();
    fs::create_dir_all(root.join("src/web/static/img/icons")).unwrap();
    fs::create_dir_all(root.join("sql")).unwrap();
    fs::write(
        root.join("src/main.rs"),
        r#"use zapped as z;

mod zap_embed;

fn main() {
    z::install(zap_embed::provider()).unwrap();
    let sql = z::resource("SQL", "../sql");
    let site = z::resource("STATIC", "web/static/");
}
"#,
    )
    .unwrap();
    fs::write(
        root.join("src/web/mod.rs"),
        "pub fn css() -> zapped::Directory {\n    zapped::resource(\"CSS\", \"static/css\").unwrap()\n}\n",
    )
    .unwrap();
    fs::write(root.join("src/web/static/index.html"), "<h1>\"hi\"</h1>\n").unwrap();
    fs::write(root.join("src/web/static/css/site.css"), "body { margin: 0 }").unwrap();
    fs::write(root.join("src/web/static/img/icons/logo.bin"), [0u8, 159, 146, 150, 255]).unwrap();
    fs::write(root.join("sql/init.sql"), "CREATE TABLE t (id INT);\n").unwrap();

    let config = Config::default();
    let packages = zap::discover_packages(&root, &config).unwrap();
    let generated = zap::build(&packages, &config, &root, false).expect("Should build");

    // STATIC and CSS share the css directory.
    assert_eq!(generated.trees, 5);
    let registry = Replay::run(&generated.source);
    assert_eq!(
        registry.keys().collect::<Vec<_>>(),
        vec!["CSS", "SQL", "STATIC"]
    );
    assert_matches_disk(&registry.get("SQL").unwrap(), &root.join("sql"));
    assert_matches_disk(&registry.get("STATIC").unwrap(), &root.join("src/web/static"));
    assert_matches_disk(&registry.get("CSS").unwrap(), &root.join("src/web/static/css"));

    let regenerated = zap::build(&packages, &config, &root, false).unwrap();
    assert_eq!(generated.source, regenerated.source);
}
