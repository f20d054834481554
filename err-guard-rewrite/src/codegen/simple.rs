//! Simple-style capture: `expr >> &mut slot`.
//!
//! The runtime's `Shr<&mut Slot>` impl for `Result` returns `Some(value)` or
//! stores the error and returns `None`. A traced slot stamps the frame itself.

use syn::{parse_quote, Expr, Ident};

use super::operand;

pub fn capture_chain(fallible: &Expr, slot: &Ident) -> Expr {
    let value = operand(fallible);
    parse_quote!(#value >> &mut #slot)
}
