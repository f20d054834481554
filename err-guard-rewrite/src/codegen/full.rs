//! Full-style capture chain.
//!
//! | Mode | Chain |
//! |------|-------|
//! | sync | `create_result(\|\| Ok(expr?)).extract_or_fail(&mut slot)` |
//! | sync, traced | `create_result_traced("f", \|\| Ok(expr?)).extract_or_fail_traced(&mut slot, "f")` |
//! | async | `create_result_async(async { Ok(expr?) }).await.extract_or_fail(&mut slot)` |
//! | async, traced | `create_result_async_traced("f", async { Ok(expr?) }).await.extract_or_fail_traced(&mut slot, "f")` |
//!
//! `expr` keeps its `.await` in the async forms.

use syn::{parse_quote_spanned, Expr, Ident};

use super::{operand, GuardContext};

pub fn capture_chain(fallible: &Expr, is_async: bool, slot: &Ident, ctx: &GuardContext<'_, '_>) -> Expr {
    let rt = &ctx.options.runtime;
    let function = ctx.function;
    let span = ctx.guard.span();
    let value = operand(fallible);

    let created: Expr = match (is_async, ctx.options.traced) {
        (false, false) => parse_quote_spanned! {span=>
            #rt::create_result(|| ::core::result::Result::Ok(#value?))
        },
        (false, true) => parse_quote_spanned! {span=>
            #rt::create_result_traced(#function, || ::core::result::Result::Ok(#value?))
        },
        // async blocks don't pick up the error type from the helper's bound
        (true, false) => parse_quote_spanned! {span=>
            #rt::create_result_async(async {
                ::core::result::Result::<_, #rt::Error>::Ok(#value?)
            })
            .await
        },
        (true, true) => parse_quote_spanned! {span=>
            #rt::create_result_async_traced(#function, async {
                ::core::result::Result::<_, #rt::Error>::Ok(#value?)
            })
            .await
        },
    };

    if ctx.options.traced {
        parse_quote_spanned! {span=> #created.extract_or_fail_traced(&mut #slot, #function) }
    } else {
        parse_quote_spanned! {span=> #created.extract_or_fail(&mut #slot) }
    }
}
