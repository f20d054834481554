//! Tree rewriter.
//!
//! Every block is a scope. Scopes are rewritten bottom-up: nested blocks,
//! closures, async blocks and nested functions first, then the guards of the
//! scope itself, in source order. One counter numbers slots across the whole
//! expansion, so inner guards get smaller numbers and no two slots share a
//! name. Macro invocations are left alone.

use syn::visit_mut::{self, VisitMut};
use syn::{Block, Expr, ImplItemFn, ItemFn, Stmt, TraitItemFn};
use tracing::{debug, trace};

use crate::codegen::{self, ErrorSlot, ErrorUsage, GuardContext};
use crate::matcher::classify;
use crate::options::{ExpansionStyle, Options};
use crate::render::render_stmts;
use crate::syntax::{Declaration, GuardStmt};

/// Fallback frame name when no enclosing function is known.
const ANONYMOUS: &str = "{unknown}";

/// State of one expansion.
pub struct RewriteContext<'o> {
    options: &'o Options,
    counter: usize,
    functions: Vec<String>,
}

impl<'o> RewriteContext<'o> {
    pub fn new(options: &'o Options, function: impl Into<String>) -> Self {
        Self {
            options,
            counter: 0,
            functions: vec![function.into()],
        }
    }

    /// Number of slots handed out so far.
    pub fn slots_used(&self) -> usize {
        self.counter
    }

    /// Rewrite a copy of `block`.
    pub fn rewrite_block(&mut self, block: &Block) -> Block {
        let mut block = block.clone();
        self.visit_block_mut(&mut block);
        block
    }

    /// Rewrite a copy of `expr`.
    pub fn rewrite_expr(&mut self, expr: &Expr) -> Expr {
        let mut expr = expr.clone();
        self.visit_expr_mut(&mut expr);
        expr
    }

    fn next_slot(&mut self) -> ErrorSlot {
        self.counter += 1;
        ErrorSlot::numbered(self.counter)
    }

    fn function(&self) -> &str {
        self.functions.last().map(String::as_str).unwrap_or(ANONYMOUS)
    }

    fn rewrite_scope(&mut self, block: &mut Block, usages: Vec<Option<ErrorUsage>>) {
        let stmts = std::mem::take(&mut block.stmts);
        let mut out = Vec::with_capacity(stmts.len() + 1);
        let mut shared: Option<ErrorSlot> = None;

        for (stmt, usage) in stmts.into_iter().zip(usages) {
            let expanded = match (usage, GuardStmt::from_stmt(&stmt)) {
                (Some(usage), Some(guard)) => self.expand_guard(&guard, &usage, &mut shared),
                _ => None,
            };
            match expanded {
                Some(replacement) => out.extend(replacement),
                None => out.push(stmt),
            }
        }

        if let Some(mut slot) = shared {
            let declaration = slot.declaration(self.options, self.function());
            out.insert(0, declaration);
        }
        block.stmts = out;
    }

    fn expand_guard(
        &mut self,
        guard: &GuardStmt<'_>,
        usage: &ErrorUsage,
        shared: &mut Option<ErrorSlot>,
    ) -> Option<Vec<Stmt>> {
        let class = classify(guard, self.options);
        if !class.is_match() {
            trace!("guard initializer does not match, left as is");
            return None;
        }

        let mut slot = match self.options.style {
            ExpansionStyle::Full => self.next_slot(),
            ExpansionStyle::Simple => shared.get_or_insert_with(|| self.next_slot()).clone(),
        };
        debug!(slot = %slot.name, kind = class.kind(), "expanding guard");

        let ctx = GuardContext {
            guard,
            usage,
            options: self.options,
            function: self.function(),
        };
        Some(codegen::generate(&class, &mut slot, &ctx))
    }

    fn with_function<F: FnOnce(&mut Self)>(&mut self, name: String, f: F) {
        self.functions.push(name);
        f(self);
        self.functions.pop();
    }
}

impl VisitMut for RewriteContext<'_> {
    fn visit_block_mut(&mut self, block: &mut Block) {
        // usages are read before nested guards are rewritten
        let usages: Vec<Option<ErrorUsage>> = block
            .stmts
            .iter()
            .map(|stmt| {
                GuardStmt::from_stmt(stmt)
                    .map(|guard| ErrorUsage::scan(guard.else_body, &self.options.unwrap_method))
            })
            .collect();
        visit_mut::visit_block_mut(self, block);
        self.rewrite_scope(block, usages);
    }

    fn visit_item_fn_mut(&mut self, item: &mut ItemFn) {
        self.with_function(item.name(), |this| visit_mut::visit_item_fn_mut(this, item));
    }

    fn visit_impl_item_fn_mut(&mut self, item: &mut ImplItemFn) {
        self.with_function(item.name(), |this| visit_mut::visit_impl_item_fn_mut(this, item));
    }

    fn visit_trait_item_fn_mut(&mut self, item: &mut TraitItemFn) {
        self.with_function(item.name(), |this| visit_mut::visit_trait_item_fn_mut(this, item));
    }
}

/// Rewrite the body of `decl`.
///
/// Returns the replacement statement list, or an empty list when the
/// declaration has no body. An expression body comes back as a single tail
/// expression statement.
#[tracing::instrument(
    level = "debug",
    skip_all,
    fields(function = %decl.name(), style = options.style.as_str(), traced = options.traced)
)]
pub fn expand_body<D: Declaration + ?Sized>(decl: &D, options: &Options) -> Vec<Stmt> {
    let mut context = RewriteContext::new(options, decl.name());
    let stmts = match (decl.body(), decl.tail()) {
        (Some(body), _) => context.rewrite_block(body).stmts,
        (None, Some(tail)) => vec![Stmt::Expr(context.rewrite_expr(tail), None)],
        (None, None) => {
            trace!("declaration has no body");
            return Vec::new();
        }
    };
    debug!(slots = context.slots_used(), "expansion finished");
    if tracing::enabled!(tracing::Level::TRACE) {
        trace!(expansion = %render_stmts(&stmts), "expanded body");
    }
    stmts
}

/// [`expand_body`] applied to a free function, signature kept.
pub fn expand_item_fn(item: &ItemFn, options: &Options) -> ItemFn {
    let mut item = item.clone();
    item.block.stmts = expand_body(&item, options);
    item
}
