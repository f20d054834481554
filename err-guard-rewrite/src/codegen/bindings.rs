//! Else-body prelude and guard reconstruction.
//!
//! The prelude binds only what the body mentions:
//!
//! | Name | Binding | When |
//! |------|---------|------|
//! | `err` | `let err = slot.take();` | any of the names below is used |
//! | `dyn_err` | `let dyn_err = err.as_dyn_error();` | `dyn_err` used |
//! | `err_caller` | `let err_caller = err.caller();` | traced, `err_caller` used |
//!
//! A refutable pattern can fail on a successful capture, which leaves the slot
//! empty, so its `err` is read with `take_or_unmatched()` instead.

use syn::visit::{self, Visit};
use syn::{parse_quote, Block, Expr, ExprPath, Ident, Item, Local, Macro, Pat, PatType, Stmt};

use crate::detection::references_ident;
use crate::matcher::classify_expr;
use crate::syntax::GuardStmt;

pub const ERR: &str = "err";
pub const DYN_ERR: &str = "dyn_err";
pub const ERR_CALLER: &str = "err_caller";

/// Which error views an else body refers to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ErrorUsage {
    pub err: bool,
    pub dyn_err: bool,
    pub err_caller: bool,
}

impl ErrorUsage {
    /// Scan an else body.
    ///
    /// Else bodies of nested guards that will be expanded are skipped since
    /// they get their own `err`. Nested items are skipped too.
    pub fn scan(body: &Block, unwrap_method: &str) -> Self {
        let mut scanner = UsageScanner {
            usage: Self::default(),
            unwrap_method,
        };
        scanner.visit_block(body);
        scanner.usage
    }

    pub fn needs_err(&self, traced: bool) -> bool {
        self.err || self.dyn_err || (traced && self.err_caller)
    }

    fn mark(&mut self, name: &str) {
        match name {
            ERR => self.err = true,
            DYN_ERR => self.dyn_err = true,
            ERR_CALLER => self.err_caller = true,
            _ => {}
        }
    }
}

struct UsageScanner<'m> {
    usage: ErrorUsage,
    unwrap_method: &'m str,
}

impl<'ast, 'm> Visit<'ast> for UsageScanner<'m> {
    fn visit_expr_path(&mut self, expr: &'ast ExprPath) {
        if expr.qself.is_none() {
            if let Some(ident) = expr.path.get_ident() {
                self.usage.mark(&ident.to_string());
            }
        }
        visit::visit_expr_path(self, expr);
    }

    fn visit_macro(&mut self, mac: &'ast Macro) {
        for name in [ERR, DYN_ERR, ERR_CALLER] {
            if references_ident(&mac.tokens, name) {
                self.usage.mark(name);
            }
        }
    }

    fn visit_local(&mut self, local: &'ast Local) {
        let Some(guard) = GuardStmt::from_local(local) else {
            return visit::visit_local(self, local);
        };
        if !classify_expr(guard.initializer, self.unwrap_method).is_match() {
            return visit::visit_local(self, local);
        }
        self.visit_pat(guard.pattern);
        self.visit_expr(guard.initializer);
    }

    fn visit_item(&mut self, _: &'ast Item) {}
}

/// Statements placed at the top of a rebuilt else body.
pub fn error_bindings(slot: &Ident, usage: &ErrorUsage, traced: bool, refutable: bool) -> Vec<Stmt> {
    let mut prelude = Vec::new();
    if !usage.needs_err(traced) {
        return prelude;
    }
    if refutable {
        prelude.push(parse_quote! { let err = #slot.take_or_unmatched(); });
    } else {
        prelude.push(parse_quote! { let err = #slot.take(); });
    }
    if usage.dyn_err {
        prelude.push(parse_quote! { let dyn_err = err.as_dyn_error(); });
    }
    if traced && usage.err_caller {
        prelude.push(parse_quote! { let err_caller = err.caller(); });
    }
    prelude
}

/// `let PAT = INIT else { BODY };` to `let Some(PAT) = chain else { prelude; BODY };`
pub fn rebuild_guard(guard: &GuardStmt<'_>, chain: Expr, prelude: Vec<Stmt>) -> Stmt {
    let mut local = guard.local.clone();
    local.pat = wrap_some(&local.pat);
    if let Some(init) = &mut local.init {
        *init.expr = chain;
        if let Some((_, diverge)) = &mut init.diverge {
            if let Expr::Block(else_block) = &mut **diverge {
                let body = std::mem::replace(&mut else_block.block.stmts, prelude);
                else_block.block.stmts.extend(body);
            }
        }
    }
    Stmt::Local(local)
}

/// `x` to `Some(x)`; `x: T` to `Some(x): Option<T>`.
fn wrap_some(pat: &Pat) -> Pat {
    match pat {
        Pat::Type(typed) => {
            let inner = &typed.pat;
            let ty = &typed.ty;
            Pat::Type(PatType {
                attrs: typed.attrs.clone(),
                pat: Box::new(parse_quote!(::core::option::Option::Some(#inner))),
                colon_token: typed.colon_token,
                ty: Box::new(parse_quote!(::core::option::Option<#ty>)),
            })
        }
        other => parse_quote!(::core::option::Option::Some(#other)),
    }
}
