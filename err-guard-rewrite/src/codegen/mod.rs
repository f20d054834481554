//! Code generation for matched guards.
//!
//! A matched guard becomes up to two adjacent statements:
//!
//! ```text
//! let mut ___err_1 = ::err_guard::Slot::new();
//! let Some(x) = <capture chain> else { let err = ___err_1.take(); BODY };
//! ```
//!
//! The shape of the capture chain depends on [`ExpansionStyle`]:
//!
//! - [`full`] - `create_result(|| Ok(expr?)).extract_or_fail(&mut slot)`
//! - [`simple`] - `expr >> &mut slot`
//!
//! The else-body prelude is shared by both styles, see [`bindings`].

pub mod bindings;
pub mod full;
pub mod simple;

use quote::format_ident;
use syn::{parse_quote, Expr, Ident, Stmt};

use crate::matcher::Classification;
use crate::options::{ExpansionStyle, Options};
use crate::syntax::{is_irrefutable, GuardStmt};

pub use bindings::ErrorUsage;

/// The variable a failed capture is stored in.
#[derive(Debug, Clone)]
pub struct ErrorSlot {
    pub name: Ident,
    /// Set once the declaration has been emitted into the output list.
    pub declared: bool,
}

impl ErrorSlot {
    /// `___err_<n>`
    pub fn numbered(n: usize) -> Self {
        Self {
            name: format_ident!("___err_{}", n),
            declared: false,
        }
    }

    /// `let mut ___err_N = <rt>::Slot::new();`
    ///
    /// Simple-style traced slots carry the function name so the `>>`
    /// operator can stamp frames.
    pub fn declaration(&mut self, options: &Options, function: &str) -> Stmt {
        self.declared = true;
        let name = &self.name;
        let rt = &options.runtime;
        if options.traced && options.style == ExpansionStyle::Simple {
            parse_quote! { let mut #name = #rt::Slot::traced(#function); }
        } else {
            parse_quote! { let mut #name = #rt::Slot::new(); }
        }
    }
}

/// Everything generation needs about one guard.
pub struct GuardContext<'a, 'g> {
    pub guard: &'a GuardStmt<'g>,
    pub usage: &'a ErrorUsage,
    pub options: &'a Options,
    /// Name recorded in traced frames.
    pub function: &'a str,
}

/// Generate the replacement statements for one guard.
///
/// Full style emits the slot declaration followed by the rebuilt guard.
/// Simple style emits only the guard; the shared declaration is placed at
/// the top of the scope by the driver. `NoMatch` returns the guard as is.
pub fn generate(class: &Classification<'_>, slot: &mut ErrorSlot, ctx: &GuardContext<'_, '_>) -> Vec<Stmt> {
    let Some(fallible) = class.fallible() else {
        return vec![Stmt::Local(ctx.guard.local.clone())];
    };
    let refutable = !is_irrefutable(ctx.guard.pattern);
    let prelude = bindings::error_bindings(&slot.name, ctx.usage, ctx.options.traced, refutable);

    match ctx.options.style {
        ExpansionStyle::Full => {
            let chain = full::capture_chain(fallible, class.is_async(), &slot.name, ctx);
            let declaration = slot.declaration(ctx.options, ctx.function);
            vec![declaration, bindings::rebuild_guard(ctx.guard, chain, prelude)]
        }
        ExpansionStyle::Simple => {
            let chain = simple::capture_chain(fallible, &slot.name);
            vec![bindings::rebuild_guard(ctx.guard, chain, prelude)]
        }
    }
}

/// Parenthesize `expr` unless it binds at least as tightly as a postfix operator.
pub(crate) fn operand(expr: &Expr) -> Expr {
    match expr {
        Expr::Call(_)
        | Expr::MethodCall(_)
        | Expr::Await(_)
        | Expr::Path(_)
        | Expr::Paren(_)
        | Expr::Field(_)
        | Expr::Index(_)
        | Expr::Macro(_)
        | Expr::Try(_)
        | Expr::Lit(_) => expr.clone(),
        other => parse_quote!((#other)),
    }
}
