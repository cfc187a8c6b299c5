// Copyright (c) Contributors to the zap project.
// SPDX-License-Identifier: Apache-2.0

//! Call-site scanner.
//!
//! A small state machine over the [`SyntaxNode`] stream of one file that
//! recognises `<alias>::resource("key", "path")`:
//!
//! ```text
//! Idle --alias--> ExpectingCallName --resource--> ExpectingKey --"key"--> ExpectingPath --"path"--> Idle
//! ```
//!
//! Both arguments must be string literals. Anything else in an argument
//! position is reported and the machine returns to `Idle`, so one bad call
//! never hides the ones after it.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::resource::{CallSite, Resource};
use crate::source::{ImportAlias, SourceFile};
use crate::syntax::{walk_file, LitKind, Position, SyntaxNode, SyntaxVisitor};
use crate::{ScanDiagnostic, ScanErrorKind, ENTRY_POINT, RUNTIME_ITEMS};

#[cfg(test)]
#[path = "./scanner_test.rs"]
mod scanner_test;

/// Result of scanning one file.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ScanOutput {
    /// In source order. A call whose path argument was bad keeps its key
    /// with an empty path, see [`Resource::is_partial`].
    pub calls: Vec<CallSite>,
    pub diagnostics: Vec<ScanDiagnostic>,
}

impl ScanOutput {
    pub fn resources(&self) -> Vec<Resource> {
        self.calls.iter().map(|c| c.resource.clone()).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Idle,
    ExpectingCallName,
    ExpectingKey,
    ExpectingPath,
}

/// The state machine. Feed it nodes through [`SyntaxVisitor`] and take the
/// output with [`CallScanner::finish`].
#[derive(Debug)]
pub struct CallScanner {
    file: PathBuf,
    aliases: BTreeSet<ImportAlias>,
    state: State,
    output: ScanOutput,
}

impl CallScanner {
    pub fn new(file: impl Into<PathBuf>, aliases: BTreeSet<ImportAlias>) -> Self {
        Self {
            file: file.into(),
            aliases,
            state: State::Idle,
            output: ScanOutput::default(),
        }
    }

    pub fn finish(self) -> ScanOutput {
        self.output
    }

    fn report(&mut self, position: Position, kind: ScanErrorKind) {
        self.output.diagnostics.push(ScanDiagnostic {
            file: self.file.clone(),
            line: position.line,
            column: position.column,
            kind,
        });
    }

    fn on_ident(&mut self, name: &str, position: Position) -> State {
        match self.state {
            State::Idle => self
                .aliases
                .iter()
                .find_map(|alias| match alias {
                    ImportAlias::Named(prefix) if prefix == name => Some(State::ExpectingCallName),
                    ImportAlias::Bare(entry) if entry == name => Some(State::ExpectingKey),
                    _ => None,
                })
                .unwrap_or(State::Idle),
            State::ExpectingCallName => {
                if name == ENTRY_POINT {
                    return State::ExpectingKey;
                }
                if !RUNTIME_ITEMS.contains(&name) {
                    self.report(position, ScanErrorKind::UnknownCall);
                }
                State::Idle
            }
            State::ExpectingKey | State::ExpectingPath => {
                self.report(position, ScanErrorKind::BadArgumentType);
                State::Idle
            }
        }
    }

    fn on_literal(&mut self, kind: LitKind, value: Option<String>, position: Position) -> State {
        let expecting = self.state;
        if !matches!(expecting, State::ExpectingKey | State::ExpectingPath) {
            return State::Idle;
        }

        let value = match (kind, value) {
            (LitKind::Str, Some(value)) => value,
            _ => {
                self.report(position, ScanErrorKind::BadArgumentType);
                return State::Idle;
            }
        };

        match expecting {
            State::ExpectingKey => {
                self.output.calls.push(CallSite {
                    resource: Resource::new(value, PathBuf::new()),
                    file: self.file.clone(),
                    position,
                });
                State::ExpectingPath
            }
            _ => {
                if let Some(call) = self.output.calls.last_mut() {
                    // An empty path names the calling file's directory.
                    call.resource.path = match value.as_str() {
                        "" => PathBuf::from("."),
                        _ => PathBuf::from(value),
                    };
                }
                State::Idle
            }
        }
    }

    fn on_other(&mut self, position: Position) -> State {
        if matches!(self.state, State::ExpectingKey | State::ExpectingPath) {
            self.report(position, ScanErrorKind::BadArgumentType);
        }
        State::Idle
    }
}

impl SyntaxVisitor for CallScanner {
    fn visit_node(&mut self, node: SyntaxNode) {
        self.state = match node {
            SyntaxNode::Ident { name, position } => self.on_ident(&name, position),
            SyntaxNode::Literal {
                kind,
                value,
                position,
            } => self.on_literal(kind, value, position),
            SyntaxNode::Other { position } => self.on_other(position),
        };
    }
}

/// Extract every call to the entry point in `source`.
pub fn scan(source: &SourceFile) -> ScanOutput {
    scan_syntax(&source.path, &source.syntax, &source.aliases)
}

/// Like [`scan`], for callers that parsed the file themselves.
pub fn scan_syntax(
    path: &Path,
    syntax: &syn::File,
    aliases: &BTreeSet<ImportAlias>,
) -> ScanOutput {
    let mut scanner = CallScanner::new(path, aliases.clone());
    walk_file(syntax, &mut scanner);
    let output = scanner.finish();

    tracing::debug!(
        file = ?path,
        calls = output.calls.len(),
        diagnostics = output.diagnostics.len(),
        "scanned file"
    );
    output
}
