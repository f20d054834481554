//! Attribute target handling.

use err_guard_rewrite::{expand_body, Options};
use proc_macro2::TokenStream;
use quote::ToTokens;
use syn::{ItemFn, Result, TraitItemFn};

use crate::args::AttrArgs;

/// Parse the arguments, rewrite the annotated function, re-emit it.
///
/// Free functions, inherent and trait-impl methods all parse as `ItemFn`.
/// A trait method without a default body is returned unchanged.
pub fn expand(args: TokenStream, item: TokenStream, base: Options) -> Result<TokenStream> {
    let args: AttrArgs = syn::parse2(args)?;
    let options = args.apply(base);

    match syn::parse2::<ItemFn>(item.clone()) {
        Ok(mut function) => {
            function.block.stmts = expand_body(&function, &options);
            Ok(function.into_token_stream())
        }
        Err(not_a_fn) => match syn::parse2::<TraitItemFn>(item) {
            Ok(mut method) => {
                if method.default.is_some() {
                    let stmts = expand_body(&method, &options);
                    if let Some(body) = &mut method.default {
                        body.stmts = stmts;
                    }
                }
                Ok(method.into_token_stream())
            }
            Err(_) => Err(syn::Error::new(
                not_a_fn.span(),
                "#[err] applies to functions and methods",
            )),
        },
    }
}
