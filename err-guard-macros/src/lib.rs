//! Attribute macros for the err-guard crate.
//!
//! Each attribute rewrites the body of the function it annotates with
//! `err_guard_rewrite::expand_body`; they differ only in default options:
//!
//! - `#[err]` - untraced, full style
//! - `#[err_traced]` - traced, full style
//! - `#[err_simple]` - untraced, `>>` style
//!
//! All three accept the same arguments, see the `err-guard` crate docs.

use err_guard_rewrite::{ExpansionStyle, Options};
use proc_macro::TokenStream;

mod args;
mod expand;

/// Expand `let x = call()? else { .. };` guards with an `err` binding.
#[proc_macro_attribute]
pub fn err(args: TokenStream, item: TokenStream) -> TokenStream {
    expand::expand(args.into(), item.into(), Options::untraced())
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}

/// Like `#[err]`, and captured errors carry file, function and line.
#[proc_macro_attribute]
pub fn err_traced(args: TokenStream, item: TokenStream) -> TokenStream {
    expand::expand(args.into(), item.into(), Options::traced())
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}

/// Like `#[err]`, with the flat `expr >> &mut slot` expansion.
#[proc_macro_attribute]
pub fn err_simple(args: TokenStream, item: TokenStream) -> TokenStream {
    let base = Options::untraced().with_style(ExpansionStyle::Simple);
    expand::expand(args.into(), item.into(), base)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
