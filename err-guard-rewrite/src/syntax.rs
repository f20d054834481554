//! The slice of the `syn` tree the rewrite pass cares about.
//!
//! Everything else in a body is carried through untouched.

use proc_macro2::Span;
use syn::{Block, Expr, ExprClosure, ImplItemFn, ItemFn, Local, Pat, Stmt, TraitItemFn};

/// A declaration whose body can be replaced.
pub trait Declaration {
    /// Name recorded in traced frames.
    fn name(&self) -> String;

    /// The block body, if the declaration has one.
    fn body(&self) -> Option<&Block>;

    /// The body of a declaration written as a bare expression, such as
    /// `|id| async move { .. }`.
    fn tail(&self) -> Option<&Expr> {
        None
    }
}

impl Declaration for ItemFn {
    fn name(&self) -> String {
        self.sig.ident.to_string()
    }

    fn body(&self) -> Option<&Block> {
        Some(&self.block)
    }
}

impl Declaration for ImplItemFn {
    fn name(&self) -> String {
        self.sig.ident.to_string()
    }

    fn body(&self) -> Option<&Block> {
        Some(&self.block)
    }
}

impl Declaration for TraitItemFn {
    fn name(&self) -> String {
        self.sig.ident.to_string()
    }

    fn body(&self) -> Option<&Block> {
        self.default.as_ref()
    }
}

impl Declaration for ExprClosure {
    fn name(&self) -> String {
        "{closure}".to_string()
    }

    fn body(&self) -> Option<&Block> {
        match &*self.body {
            Expr::Block(expr) => Some(&expr.block),
            _ => None,
        }
    }

    fn tail(&self) -> Option<&Expr> {
        match &*self.body {
            Expr::Block(_) => None,
            other => Some(other),
        }
    }
}

/// `let PAT = INIT else { .. };`
#[derive(Debug, Clone, Copy)]
pub struct GuardStmt<'a> {
    pub pattern: &'a Pat,
    pub initializer: &'a Expr,
    pub else_body: &'a Block,
    pub local: &'a Local,
}

impl<'a> GuardStmt<'a> {
    pub fn from_stmt(stmt: &'a Stmt) -> Option<Self> {
        match stmt {
            Stmt::Local(local) => Self::from_local(local),
            _ => None,
        }
    }

    /// `None` for a `let` without initializer or without `else`.
    pub fn from_local(local: &'a Local) -> Option<Self> {
        let init = local.init.as_ref()?;
        let (_, diverge) = init.diverge.as_ref()?;
        let Expr::Block(else_expr) = &**diverge else {
            return None;
        };
        Some(Self {
            pattern: &local.pat,
            initializer: &init.expr,
            else_body: &else_expr.block,
            local,
        })
    }

    pub fn span(&self) -> Span {
        self.local.let_token.span
    }
}

/// Whether `pat` matches every value of its type without looking at it.
///
/// Conservative: bindings, `_`, `..`, tuples, references, parentheses and
/// type ascriptions over those. Everything else (`Some(v)`, literals, struct
/// patterns) counts as refutable.
pub fn is_irrefutable(pat: &Pat) -> bool {
    match pat {
        Pat::Ident(ident) => ident.subpat.is_none(),
        Pat::Wild(_) | Pat::Rest(_) => true,
        Pat::Tuple(tuple) => tuple.elems.iter().all(is_irrefutable),
        Pat::Paren(paren) => is_irrefutable(&paren.pat),
        Pat::Reference(reference) => is_irrefutable(&reference.pat),
        Pat::Type(typed) => is_irrefutable(&typed.pat),
        _ => false,
    }
}

/// Look through invisible groups and parentheses.
pub(crate) fn peel(expr: &Expr) -> &Expr {
    match expr {
        Expr::Group(group) => peel(&group.expr),
        Expr::Paren(paren) => peel(&paren.expr),
        other => other,
    }
}

pub(crate) fn is_call(expr: &Expr) -> bool {
    matches!(peel(expr), Expr::Call(_) | Expr::MethodCall(_))
}
