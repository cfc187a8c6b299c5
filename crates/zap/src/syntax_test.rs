// Copyright (c) Contributors to the zap project.
// SPDX-License-Identifier: Apache-2.0

use rstest::rstest;

use super::*;

fn nodes(src: &str) -> Vec<SyntaxNode> {
    let file = syn::parse_file(src).expect("Test source should parse");
    let mut nodes = Vec::new();
    walk_file(&file, &mut nodes);
    nodes
}

fn pos(line: usize, column: usize) -> Position {
    Position { line, column }
}

fn idents(nodes: &[SyntaxNode]) -> Vec<&str> {
    nodes
        .iter()
        .filter_map(|n| match n {
            SyntaxNode::Ident { name, .. } => Some(name.as_str()),
            _ => None,
        })
        .collect()
}

#[rstest]
fn test_call_is_flattened_in_document_order() {
    let src = "fn main() {\n    zapped::resource(\"A\", \"scripts/\");\n}\n";

    assert_eq!(
        nodes(src),
        vec![
            SyntaxNode::Other { position: pos(2, 5) },
            SyntaxNode::Ident {
                name: "zapped".to_string(),
                position: pos(2, 5),
            },
            SyntaxNode::Ident {
                name: "resource".to_string(),
                position: pos(2, 13),
            },
            SyntaxNode::Literal {
                kind: LitKind::Str,
                value: Some("A".to_string()),
                position: pos(2, 22),
            },
            SyntaxNode::Literal {
                kind: LitKind::Str,
                value: Some("scripts/".to_string()),
                position: pos(2, 27),
            },
        ]
    );
}

#[rstest]
#[case::escaped(r#"fn f() { x("a\tb"); }"#, "a\tb")]
#[case::raw(r##"fn f() { x(r#"a"b"#); }"##, "a\"b")]
fn test_string_literals_are_unescaped(#[case] src: &str, #[case] expected: &str) {
    let values: Vec<_> = nodes(src)
        .into_iter()
        .filter_map(|n| match n {
            SyntaxNode::Literal { value, .. } => value,
            _ => None,
        })
        .collect();
    assert_eq!(values, vec![expected.to_string()]);
}

#[rstest]
#[case::int("fn f() { x(1); }", LitKind::Int)]
#[case::float("fn f() { x(1.5); }", LitKind::Float)]
#[case::bool("fn f() { x(true); }", LitKind::Bool)]
#[case::char("fn f() { x('c'); }", LitKind::Char)]
#[case::byte_str(r#"fn f() { x(b"c"); }"#, LitKind::ByteStr)]
fn test_literal_kinds(#[case] src: &str, #[case] expected: LitKind) {
    let kinds: Vec<_> = nodes(src)
        .into_iter()
        .filter_map(|n| match n {
            SyntaxNode::Literal { kind, value, .. } => {
                assert!(value.is_none());
                Some(kind)
            }
            _ => None,
        })
        .collect();
    assert_eq!(kinds, vec![expected]);
}

#[rstest]
fn test_type_and_use_paths_are_not_nodes() {
    let src = r#"
use zapped::Directory;

fn f(d: zapped::Directory) -> zapped::Result<()> {
    let _x: zapped::File;
    Ok(())
}
"#;
    assert_eq!(idents(&nodes(src)), vec!["Ok"]);
}

#[rstest]
fn test_macro_arguments_are_walked() {
    let src = r#"
fn f() {
    assert!(zapped::resource("A", "b").is_ok());
    let v = vec![zapped::resource("C", "d")];
}
"#;
    assert_eq!(
        idents(&nodes(src)),
        vec!["zapped", "resource", "zapped", "resource"]
    );
}

#[rstest]
fn test_opaque_macro_bodies_are_skipped() {
    let src = r#"
macro_rules! m { ($e:expr) => { zapped::resource("A", $e) }; }
fn f() {
    let v = vec![0u8; 4];
}
"#;
    assert!(idents(&nodes(src)).is_empty());
}
