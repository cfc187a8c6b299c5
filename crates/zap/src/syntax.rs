// Copyright (c) Contributors to the zap project.
// SPDX-License-Identifier: Apache-2.0

//! Flattened, document-order view of a parsed Rust file.
//!
//! The call-site scanner only cares about three things: identifiers in
//! expression paths, literals, and "anything else". [`walk_file`] reduces a
//! `syn` tree to that stream so the scanner never touches `syn` types.

use syn::punctuated::Punctuated;
use syn::spanned::Spanned;
use syn::visit::{self, Visit};
use syn::{Expr, Lit, Token};

#[cfg(test)]
#[path = "./syntax_test.rs"]
mod syntax_test;

/// 1-based source position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    fn of(span: proc_macro2::Span) -> Self {
        let start = span.start();
        Self {
            line: start.line,
            column: start.column + 1,
        }
    }
}

/// Kind of a literal token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LitKind {
    Str,
    ByteStr,
    CStr,
    Byte,
    Char,
    Int,
    Float,
    Bool,
    Other,
}

/// One node of the flattened stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyntaxNode {
    /// A segment of an expression path, e.g. `zapped` and `resource` in
    /// `zapped::resource`.
    Ident { name: String, position: Position },
    /// A literal. `value` holds the unescaped contents of string literals.
    Literal {
        kind: LitKind,
        value: Option<String>,
        position: Position,
    },
    /// Any other expression.
    Other { position: Position },
}

impl SyntaxNode {
    pub fn position(&self) -> Position {
        match self {
            Self::Ident { position, .. }
            | Self::Literal { position, .. }
            | Self::Other { position } => *position,
        }
    }
}

/// Receives nodes in document order.
pub trait SyntaxVisitor {
    fn visit_node(&mut self, node: SyntaxNode);
}

impl SyntaxVisitor for Vec<SyntaxNode> {
    fn visit_node(&mut self, node: SyntaxNode) {
        self.push(node);
    }
}

/// Feed every expression-level node of `file` to `visitor`.
pub fn walk_file<V: SyntaxVisitor + ?Sized>(file: &syn::File, visitor: &mut V) {
    let mut walker = Walker { visitor };
    walker.visit_file(file);
}

struct Walker<'v, V: ?Sized> {
    visitor: &'v mut V,
}

impl<V: SyntaxVisitor + ?Sized> Walker<'_, V> {
    fn emit(&mut self, node: SyntaxNode) {
        self.visitor.visit_node(node);
    }

    fn emit_path(&mut self, path: &syn::Path) {
        for segment in &path.segments {
            self.emit(SyntaxNode::Ident {
                name: segment.ident.to_string(),
                position: Position::of(segment.ident.span()),
            });
        }
    }

    fn emit_lit(&mut self, lit: &Lit) {
        let (kind, value) = match lit {
            Lit::Str(s) => (LitKind::Str, Some(s.value())),
            Lit::ByteStr(_) => (LitKind::ByteStr, None),
            Lit::CStr(_) => (LitKind::CStr, None),
            Lit::Byte(_) => (LitKind::Byte, None),
            Lit::Char(_) => (LitKind::Char, None),
            Lit::Int(_) => (LitKind::Int, None),
            Lit::Float(_) => (LitKind::Float, None),
            Lit::Bool(_) => (LitKind::Bool, None),
            _ => (LitKind::Other, None),
        };
        self.emit(SyntaxNode::Literal {
            kind,
            value,
            position: Position::of(lit.span()),
        });
    }
}

impl<'ast, V: SyntaxVisitor + ?Sized> Visit<'ast> for Walker<'_, V> {
    fn visit_expr(&mut self, expr: &'ast Expr) {
        match expr {
            Expr::Path(path) if path.qself.is_none() => self.emit_path(&path.path),
            Expr::Lit(lit) => self.emit_lit(&lit.lit),
            _ => {
                self.emit(SyntaxNode::Other {
                    position: Position::of(expr.span()),
                });
                visit::visit_expr(self, expr);
            }
        }
    }

    fn visit_stmt_macro(&mut self, stmt: &'ast syn::StmtMacro) {
        self.emit(SyntaxNode::Other {
            position: Position::of(stmt.mac.path.span()),
        });
        visit::visit_stmt_macro(self, stmt);
    }

    fn visit_macro(&mut self, mac: &'ast syn::Macro) {
        // Walk bodies that look like argument lists; anything else is opaque.
        match mac.parse_body_with(Punctuated::<Expr, Token![,]>::parse_terminated) {
            Ok(args) => {
                for arg in &args {
                    Visit::visit_expr(self, arg);
                }
            }
            Err(_) => {
                tracing::trace!(
                    line = Position::of(mac.path.span()).line,
                    "macro body is not an expression list, skipping"
                );
            }
        }
    }
}
