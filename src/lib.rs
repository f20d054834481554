//! err-guard - `let x = call()? else { .. }` with the error in hand
//!
//! # Overview
//!
//! A plain `let ... else` can't see why its initializer failed. The attribute
//! macros of this crate rewrite guards whose initializer is fallible so the
//! failure is captured and bound as `err` inside the `else` body.
//!
//! # Quick Start
//!
//! ```
//! use err_guard::{err, Error};
//!
//! #[err]
//! fn port(text: &str) -> Result<u16, Error> {
//!     let port = text.parse::<u16>()? else {
//!         return Err(err);
//!     };
//!     Ok(port)
//! }
//!
//! assert_eq!(port("8080").unwrap(), 8080);
//! assert!(port("http").unwrap_err().is::<std::num::ParseIntError>());
//! ```
//!
//! # Attributes
//!
//! | Attribute | Description |
//! |-----------|-------------|
//! | `#[err]` | Capture errors, bind `err` |
//! | `#[err_traced]` | Also record file, function and line |
//! | `#[err_simple]` | Flat `expr >> &mut slot` expansion |
//!
//! ## Arguments
//!
//! | Argument | Description |
//! |----------|-------------|
//! | `traced` | Same as `#[err_traced]` |
//! | `simple` / `full` | Pick the expansion style |
//! | `unwrap = "name"` | Accessor marking a `Result` call (default `get`) |
//! | `crate = "path"` | Path to this crate if renamed |
//!
//! # Recognized Guards
//!
//! | Initializer | Notes |
//! |-------------|-------|
//! | `call()?` | Any `?` expression |
//! | `call().await?` | Captured in an `async` block |
//! | `call().get()` | Call returning a `Result`, marked by the accessor |
//! | `call().await.get()` | Async form of the above |
//!
//! Anything else is left as written.
//!
//! # Else-body Bindings
//!
//! | Name | Type | Bound when |
//! |------|------|------------|
//! | `err` | [`Error`] | used |
//! | `dyn_err` | `&dyn std::error::Error` | used |
//! | `err_caller` | `Option<&Caller>` | used, traced only |

mod create;
mod error;
mod ext;
mod slot;

// ============================================================
// Re-exports
// ============================================================

pub use create::{
    create_result, create_result_async, create_result_async_traced, create_result_traced, Captured,
};
pub use error::{Caller, Chain, Error, FRAME_LIMIT};
pub use ext::ResultExt;
pub use slot::{Slot, UNMATCHED};

pub use err_guard_macros::{err, err_simple, err_traced};

// ============================================================
// Type aliases
// ============================================================

/// Result type alias.
///
/// - `Result<T>` = `core::result::Result<T, Error>`
/// - `Result<T, E>` = plain `core::result::Result<T, E>`
pub type Result<T, E = Error> = core::result::Result<T, E>;
