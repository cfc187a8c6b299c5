// Copyright (c) Contributors to the zap project.
// SPDX-License-Identifier: Apache-2.0

use rstest::rstest;

use super::*;

fn scan(file: &str, line: usize, column: usize, kind: ScanErrorKind) -> Error {
    Error::Scan(ScanDiagnostic {
        file: PathBuf::from(file),
        line,
        column,
        kind,
    })
}

#[rstest]
#[case(ScanErrorKind::UnknownCall, "main.rs:1:1: expected resource() but was something else")]
#[case(ScanErrorKind::BadArgumentType, "main.rs:1:1: calls to resource() require string literals")]
fn test_scan_diagnostic_message(#[case] kind: ScanErrorKind, #[case] expected: &str) {
    assert_eq!(scan("main.rs", 1, 1, kind).to_string(), expected);
}

#[rstest]
fn test_empty_errors_are_ok() {
    let errors = Errors::new();
    assert!(errors.is_empty());
    assert_eq!(errors.into_result(7).unwrap(), 7);
}

#[rstest]
fn test_single_error_is_not_wrapped() {
    let mut errors = Errors::new();
    errors.push(scan("a.rs", 2, 3, ScanErrorKind::UnknownCall));

    match errors.into_result(()) {
        Err(Error::Scan(diag)) => assert_eq!(diag.line, 2),
        other => panic!("Expected Scan error, got: {other:?}"),
    }
}

#[rstest]
fn test_aggregate_joins_messages() {
    let mut errors = Errors::new();
    errors.push(scan("a.rs", 1, 1, ScanErrorKind::UnknownCall));
    errors.push(scan("a.rs", 2, 5, ScanErrorKind::BadArgumentType));

    let err = errors.into_result(()).unwrap_err();
    assert_eq!(
        err.to_string(),
        "a.rs:1:1: expected resource() but was something else\n\
         a.rs:2:5: calls to resource() require string literals"
    );
}

#[rstest]
fn test_push_flattens_aggregates() {
    let mut inner = Errors::new();
    inner.push(scan("a.rs", 1, 1, ScanErrorKind::UnknownCall));
    inner.push(scan("b.rs", 1, 1, ScanErrorKind::UnknownCall));

    let mut outer = Errors::new();
    outer.push(inner.into_error().unwrap());
    outer.push(scan("c.rs", 1, 1, ScanErrorKind::UnknownCall));
    assert_eq!(outer.len(), 3);
}

#[rstest]
fn test_sort_orders_by_location() {
    let mut errors = Errors::from(vec![
        scan("b.rs", 1, 1, ScanErrorKind::UnknownCall),
        scan("a.rs", 9, 1, ScanErrorKind::UnknownCall),
        scan("a.rs", 2, 7, ScanErrorKind::UnknownCall),
        scan("a.rs", 2, 3, ScanErrorKind::BadArgumentType),
    ]);
    errors.sort();

    let order: Vec<_> = errors
        .iter()
        .map(|e| {
            let (file, line, column) = e.location();
            (file.unwrap().display().to_string(), line, column)
        })
        .collect();
    assert_eq!(
        order,
        vec![
            ("a.rs".to_string(), 2, 3),
            ("a.rs".to_string(), 2, 7),
            ("a.rs".to_string(), 9, 1),
            ("b.rs".to_string(), 1, 1),
        ]
    );
}
