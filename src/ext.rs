//! Extension trait for Result types.

use crate::error::{Caller, Error};
use crate::slot::Slot;

/// Conveniences for results headed into a guard or out of one.
pub trait ResultExt<T> {
    /// Convert the error and stamp a frame for the caller.
    fn traced(self, function: &'static str) -> Result<T, Error>;

    /// The method form of `result >> &mut slot`.
    fn or_fill(self, slot: &mut Slot) -> Option<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for Result<T, E> {
    #[track_caller]
    fn traced(self, function: &'static str) -> Result<T, Error> {
        let caller = Caller::here(function);
        self.map_err(|e| e.into().frame(caller))
    }

    #[track_caller]
    fn or_fill(self, slot: &mut Slot) -> Option<T> {
        self >> slot
    }
}
