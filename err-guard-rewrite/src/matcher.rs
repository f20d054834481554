//! Guard initializer classification.
//!
//! Shapes, first match wins:
//!
//! | Initializer | Classification |
//! |-------------|----------------|
//! | `expr?` | `DirectCall`, sync |
//! | `expr.await?` | `DirectCall`, async |
//! | `call().get()` | `UnwrapCall`, sync |
//! | `call().await.get()` | `UnwrapCall`, async |
//!
//! The outermost `?` decides: `f().await.get()?` is a `DirectCall`.

use syn::Expr;

use crate::detection::contains_await;
use crate::options::Options;
use crate::syntax::{is_call, peel, GuardStmt};

/// What a guard initializer looks like.
#[derive(Debug, Clone, Copy)]
pub enum Classification<'a> {
    /// `expr?`; `expr` is the operand of the `?`.
    DirectCall { expr: &'a Expr, is_async: bool },
    /// `base.<unwrap>()`; `base` produces the `Result`.
    UnwrapCall { base: &'a Expr, is_async: bool },
    NoMatch,
}

impl<'a> Classification<'a> {
    pub fn is_match(&self) -> bool {
        !matches!(self, Classification::NoMatch)
    }

    pub fn is_async(&self) -> bool {
        match self {
            Classification::DirectCall { is_async, .. }
            | Classification::UnwrapCall { is_async, .. } => *is_async,
            Classification::NoMatch => false,
        }
    }

    /// The `Result`-producing expression, `.await` included.
    pub fn fallible(&self) -> Option<&'a Expr> {
        match self {
            Classification::DirectCall { expr, .. } => Some(expr),
            Classification::UnwrapCall { base, .. } => Some(base),
            Classification::NoMatch => None,
        }
    }

    pub fn kind(&self) -> &'static str {
        match (self, self.is_async()) {
            (Classification::DirectCall { .. }, false) => "direct",
            (Classification::DirectCall { .. }, true) => "direct-async",
            (Classification::UnwrapCall { .. }, false) => "unwrap",
            (Classification::UnwrapCall { .. }, true) => "unwrap-async",
            (Classification::NoMatch, _) => "none",
        }
    }
}

pub fn classify<'a>(guard: &GuardStmt<'a>, options: &Options) -> Classification<'a> {
    classify_expr(guard.initializer, &options.unwrap_method)
}

pub fn classify_expr<'a>(init: &'a Expr, unwrap_method: &str) -> Classification<'a> {
    match peel(init) {
        Expr::Try(try_expr) => Classification::DirectCall {
            expr: &try_expr.expr,
            is_async: contains_await(&try_expr.expr),
        },
        Expr::MethodCall(call)
            if call.method == unwrap_method && call.args.is_empty() && call.turbofish.is_none() =>
        {
            match peel(&call.receiver) {
                Expr::Await(awaited) if is_call(&awaited.base) => Classification::UnwrapCall {
                    base: &call.receiver,
                    is_async: true,
                },
                receiver if is_call(receiver) => Classification::UnwrapCall {
                    base: &call.receiver,
                    is_async: contains_await(&call.receiver),
                },
                _ => Classification::NoMatch,
            }
        }
        _ => Classification::NoMatch,
    }
}
