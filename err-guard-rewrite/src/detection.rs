//! Detection utilities for guard analysis.
//!
//! Token-level scans for names inside macro arguments (which `syn` leaves
//! unparsed), plus a tree walk for `.await`.

use proc_macro2::{TokenStream, TokenTree};
use syn::visit::{self, Visit};
use syn::{Expr, ExprAsync, ExprAwait, ExprClosure, Item};

/// Check if a token stream mentions `name`, descending into groups.
///
/// Inline format captures in string literals (`"{err}"`, `"{err:?}"`) count.
pub fn references_ident(tokens: &TokenStream, name: &str) -> bool {
    tokens.clone().into_iter().any(|token| match token {
        TokenTree::Ident(ident) => ident == name,
        TokenTree::Group(group) => references_ident(&group.stream(), name),
        TokenTree::Literal(lit) => captures_in_format(&lit.to_string(), name),
        TokenTree::Punct(_) => false,
    })
}

/// `{name}` or `{name:..}` inside a string literal; `{{` is an escape.
fn captures_in_format(literal: &str, name: &str) -> bool {
    let Some(mut rest) = string_contents(literal) else {
        return false;
    };
    while let Some(open) = rest.find('{') {
        rest = &rest[open + 1..];
        if let Some(escaped) = rest.strip_prefix('{') {
            rest = escaped;
            continue;
        }
        let end = rest.find(|c| c == '}' || c == ':').unwrap_or(rest.len());
        if rest[..end].trim() == name {
            return true;
        }
        rest = &rest[end..];
    }
    false
}

/// Contents of `"..."` or `r#"..."#`. Byte and C strings are not format strings.
fn string_contents(literal: &str) -> Option<&str> {
    let (quoted, hashes) = match literal.strip_prefix('r') {
        Some(raw) => {
            let unhashed = raw.trim_start_matches('#');
            (unhashed, raw.len() - unhashed.len())
        }
        None => (literal, 0),
    };
    quoted
        .strip_prefix('"')?
        .strip_suffix(&"#".repeat(hashes)[..])?
        .strip_suffix('"')
}

/// Check if an expression awaits anything outside nested closures, async
/// blocks and items (those suspend on their own).
pub fn contains_await(expr: &Expr) -> bool {
    let mut finder = AwaitFinder { found: false };
    finder.visit_expr(expr);
    finder.found
}

struct AwaitFinder {
    found: bool,
}

impl<'ast> Visit<'ast> for AwaitFinder {
    fn visit_expr_await(&mut self, _: &'ast ExprAwait) {
        self.found = true;
    }

    fn visit_expr(&mut self, expr: &'ast Expr) {
        if !self.found {
            visit::visit_expr(self, expr);
        }
    }

    fn visit_expr_closure(&mut self, _: &'ast ExprClosure) {}
    fn visit_expr_async(&mut self, _: &'ast ExprAsync) {}
    fn visit_item(&mut self, _: &'ast Item) {}
}
