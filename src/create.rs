//! Capture helpers called by the generated code.
//!
//! | Guard | Helper |
//! |-------|--------|
//! | sync | [`create_result`] |
//! | sync, traced | [`create_result_traced`] |
//! | async | [`create_result_async`] |
//! | async, traced | [`create_result_async_traced`] |
//!
//! Each returns a [`Captured`], which the guard turns into an `Option` with
//! [`Captured::extract_or_fail`] so the error lands in the guard's [`Slot`].

use core::future::Future;

use crate::error::{Caller, Error};
use crate::slot::Slot;

/// Outcome of a captured call.
#[must_use = "a captured result does nothing unless extracted"]
#[derive(Debug)]
pub struct Captured<T>(Result<T, Error>);

impl<T> Captured<T> {
    /// `Some(value)`, or `None` with the error stored in `slot`.
    #[inline]
    pub fn extract_or_fail(self, slot: &mut Slot) -> Option<T> {
        match self.0 {
            Ok(value) => Some(value),
            Err(error) => {
                slot.fill(error);
                None
            }
        }
    }

    /// Like [`extract_or_fail`](Self::extract_or_fail), stamping a frame for
    /// the caller if the error has none yet.
    #[track_caller]
    pub fn extract_or_fail_traced(self, slot: &mut Slot, function: &'static str) -> Option<T> {
        match self.0 {
            Ok(value) => Some(value),
            Err(mut error) => {
                if error.frames().is_empty() {
                    error.push_frame(Caller::here(function));
                }
                slot.fill(error);
                None
            }
        }
    }

    #[inline]
    pub fn into_result(self) -> Result<T, Error> {
        self.0
    }
}

impl<T> From<Captured<T>> for Result<T, Error> {
    fn from(captured: Captured<T>) -> Self {
        captured.0
    }
}

/// Run `body` and capture its result.
#[inline]
pub fn create_result<T, F>(body: F) -> Captured<T>
where
    F: FnOnce() -> Result<T, Error>,
{
    Captured(body())
}

/// Run `body`; an error gets a frame for the caller, attributed to `function`.
#[track_caller]
pub fn create_result_traced<T, F>(function: &'static str, body: F) -> Captured<T>
where
    F: FnOnce() -> Result<T, Error>,
{
    let caller = Caller::here(function);
    Captured(body().map_err(|e| e.frame(caller)))
}

/// Await `future` and capture its result.
pub async fn create_result_async<T, Fut>(future: Fut) -> Captured<T>
where
    Fut: Future<Output = Result<T, Error>>,
{
    Captured(future.await)
}

/// Await `future`; an error gets a frame for the caller.
///
/// The location is taken when the helper is called, not when it is awaited.
#[track_caller]
pub fn create_result_async_traced<T, Fut>(
    function: &'static str,
    future: Fut,
) -> impl Future<Output = Captured<T>>
where
    Fut: Future<Output = Result<T, Error>>,
{
    let caller = Caller::here(function);
    async move { Captured(future.await.map_err(|e| e.frame(caller))) }
}
