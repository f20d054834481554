//! The error slot a failed guard writes into.

use core::ops::Shr;

use crate::error::{Caller, Error};

/// Message of the error [`Slot::take_or_unmatched`] returns for an empty slot.
pub const UNMATCHED: &str = "guard pattern did not match";

/// Holds the error of the guard that just failed.
///
/// Generated code declares one per guard (or one per scope with
/// `#[err_simple]`) and reads it back with [`Slot::take`] at the top of the
/// guard's `else` body.
#[derive(Debug, Default)]
pub struct Slot {
    error: Option<Error>,
    function: Option<&'static str>,
}

impl Slot {
    #[inline]
    pub const fn new() -> Self {
        Self {
            error: None,
            function: None,
        }
    }

    /// A slot whose `>>` stamps a frame attributed to `function`.
    #[inline]
    pub const fn traced(function: &'static str) -> Self {
        Self {
            error: None,
            function: Some(function),
        }
    }

    /// Take the stored error.
    ///
    /// # Panics
    ///
    /// If the slot is empty. A guard's `else` body only runs after its capture
    /// filled the slot, unless the pattern is refutable and did not match;
    /// see [`Slot::take_or_unmatched`].
    #[track_caller]
    pub fn take(&mut self) -> Error {
        match self.error.take() {
            Some(error) => error,
            None => panic!("err-guard: guard failed without a captured error (refutable pattern?)"),
        }
    }

    /// Take the stored error, or a "pattern did not match" error when the
    /// capture succeeded and the guard still failed.
    ///
    /// Generated code reads the slot with this for refutable patterns such as
    /// `let Some(v) = find(key)? else { .. }`.
    #[inline]
    pub fn take_or_unmatched(&mut self) -> Error {
        self.error
            .take()
            .unwrap_or_else(|| Error::msg(UNMATCHED))
    }

    /// Take the stored error, if any.
    #[inline]
    pub fn try_take(&mut self) -> Option<Error> {
        self.error.take()
    }

    #[inline]
    pub fn is_filled(&self) -> bool {
        self.error.is_some()
    }

    /// Store `error`, replacing any previous one.
    #[inline]
    pub fn fill(&mut self, error: Error) {
        self.error = Some(error);
    }

    /// Function name given to [`Slot::traced`].
    #[inline]
    pub fn function(&self) -> Option<&'static str> {
        self.function
    }
}

/// `result >> &mut slot`: `Some(value)`, or `None` with the error stored.
///
/// A traced slot stamps a frame for the location of the `>>`.
impl<'a, T, E: Into<Error>> Shr<&'a mut Slot> for Result<T, E> {
    type Output = Option<T>;

    #[track_caller]
    fn shr(self, slot: &'a mut Slot) -> Option<T> {
        match self {
            Ok(value) => Some(value),
            Err(e) => {
                let mut error = e.into();
                if let Some(function) = slot.function {
                    error.push_frame(Caller::here(function));
                }
                slot.fill(error);
                None
            }
        }
    }
}
