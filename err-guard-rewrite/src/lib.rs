//! Rewrite engine behind the `err-guard` attribute macros.
//!
//! Expands guards whose initializer is fallible into explicit error capture:
//!
//! ```text
//! let res = my_throwing_func(12)? else { return Err(err); };
//! ```
//!
//! becomes
//!
//! ```text
//! let mut ___err_1 = ::err_guard::Slot::new();
//! let Some(res) = ::err_guard::create_result(|| Ok(my_throwing_func(12)?))
//!     .extract_or_fail(&mut ___err_1)
//! else {
//!     let err = ___err_1.take();
//!     return Err(err);
//! };
//! ```
//!
//! The pass is purely syntactic. Guards that don't match one of the
//! recognized shapes (see [`matcher`]) are left untouched, so it never fails.
//!
//! | Module | Role |
//! |--------|------|
//! | [`syntax`] | guard and declaration views over `syn` |
//! | [`matcher`] | classify guard initializers |
//! | [`codegen`] | build slot declarations and rebuilt guards |
//! | [`driver`] | walk scopes bottom-up, number slots |
//! | [`options`] | traced / style / naming policy |
//! | [`render`] | pretty-print an expansion |

pub mod codegen;
pub mod detection;
pub mod driver;
pub mod matcher;
pub mod options;
pub mod render;
pub mod syntax;

pub use driver::{expand_body, expand_item_fn, RewriteContext};
pub use matcher::{classify, Classification};
pub use options::{ExpansionStyle, Options};
pub use render::{expand_to_string, render_stmts};
pub use syntax::{Declaration, GuardStmt};
