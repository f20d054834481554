//! Captured error type and trace frames.

use core::fmt;
use std::error::Error as StdError;

use smallvec::SmallVec;

// ============================================================
// Caller
// ============================================================

/// Where an error was captured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Caller {
    pub file: &'static str,
    pub function: &'static str,
    pub line: u32,
    pub column: u32,
}

impl Caller {
    /// The location of the (tracked) caller, attributed to `function`.
    #[track_caller]
    #[inline]
    pub fn here(function: &'static str) -> Self {
        let loc = core::panic::Location::caller();
        Self {
            file: loc.file(),
            function,
            line: loc.line(),
            column: loc.column(),
        }
    }
}

impl fmt::Display for Caller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{} in {}", self.file, self.line, self.column, self.function)
    }
}

// ============================================================
// Error
// ============================================================

/// Frames beyond this depth are dropped.
pub const FRAME_LIMIT: usize = 32;

/// Inline storage for the common case of a handful of frames.
type Frames = SmallVec<[Caller; 4]>;

/// A captured error: any `std::error::Error` plus the frames it passed.
///
/// `Error` does not implement `std::error::Error` itself. That keeps the
/// blanket `From<E: std::error::Error>` impl coherent, so `?` converts any
/// error into it.
///
/// ```
/// use err_guard::Error;
///
/// let err = Error::from(std::fmt::Error);
/// assert!(err.downcast_ref::<std::fmt::Error>().is_some());
/// assert!(err.frames().is_empty());
/// ```
pub struct Error {
    inner: Box<dyn StdError + Send + Sync + 'static>,
    frames: Frames,
}

impl Error {
    /// Wrap any error.
    #[inline]
    pub fn new<E: StdError + Send + Sync + 'static>(e: E) -> Self {
        Self::from_box(Box::new(e))
    }

    /// Wrap an already boxed error.
    #[inline]
    pub fn from_box(inner: Box<dyn StdError + Send + Sync + 'static>) -> Self {
        Self {
            inner,
            frames: Frames::new(),
        }
    }

    /// An error carrying only a message.
    pub fn msg(message: impl Into<String>) -> Self {
        Self::new(MessageError(message.into()))
    }

    /// Convert an `anyhow::Error`, keeping its chain as the source chain.
    #[cfg(feature = "anyhow")]
    pub fn from_anyhow(e: anyhow::Error) -> Self {
        Self::from_box(e.into())
    }

    /// Try to view the inner error as `T`.
    #[inline]
    pub fn downcast_ref<T: StdError + 'static>(&self) -> Option<&T> {
        self.inner.downcast_ref::<T>()
    }

    /// Try to take the inner error as `T`; frames are discarded on success.
    pub fn downcast<T: StdError + 'static>(self) -> Result<T, Self> {
        let Self { inner, frames } = self;
        match inner.downcast::<T>() {
            Ok(e) => Ok(*e),
            Err(inner) => Err(Self { inner, frames }),
        }
    }

    /// Check the inner error's type.
    #[inline]
    pub fn is<T: StdError + 'static>(&self) -> bool {
        self.inner.is::<T>()
    }

    /// The inner error as a plain trait object.
    #[inline]
    pub fn as_dyn_error(&self) -> &(dyn StdError + 'static) {
        self.inner.as_ref()
    }

    /// The inner error.
    pub fn into_inner(self) -> Box<dyn StdError + Send + Sync + 'static> {
        self.inner
    }

    /// Walk the inner error and its `source()` chain, outermost first.
    pub fn chain(&self) -> Chain<'_> {
        Chain {
            next: Some(self.as_dyn_error()),
        }
    }

    /// The innermost error of the source chain.
    pub fn root(&self) -> &(dyn StdError + 'static) {
        let mut root = self.as_dyn_error();
        while let Some(source) = root.source() {
            root = source;
        }
        root
    }

    /// Trace frames, oldest first.
    #[inline]
    pub fn frames(&self) -> &[Caller] {
        &self.frames
    }

    /// The first frame recorded, where the error was originally captured.
    #[inline]
    pub fn caller(&self) -> Option<&Caller> {
        self.frames.first()
    }

    /// Append a frame.
    pub fn frame(mut self, caller: Caller) -> Self {
        self.push_frame(caller);
        self
    }

    /// Append a frame for the tracked caller.
    #[track_caller]
    pub fn here(self, function: &'static str) -> Self {
        self.frame(Caller::here(function))
    }

    pub(crate) fn push_frame(&mut self, caller: Caller) {
        if self.frames.len() < FRAME_LIMIT {
            self.frames.push(caller);
        }
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Error")
            .field("inner", &self.inner)
            .field("frames", &self.frames.as_slice())
            .finish()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.inner)?;

        if !self.frames.is_empty() {
            write!(f, "\n\nTrace (most recent last):")?;
            for caller in &self.frames {
                write!(f, "\n  {}", caller)?;
            }
        }
        Ok(())
    }
}

// From impl for Error - enables ? inside capturing closures
// This doesn't conflict with From<T> for T because Error doesn't implement Error
impl<E: StdError + Send + Sync + 'static> From<E> for Error {
    fn from(e: E) -> Self {
        Error::new(e)
    }
}

impl From<Error> for Box<dyn StdError + Send + Sync + 'static> {
    fn from(e: Error) -> Self {
        e.inner
    }
}

impl AsRef<dyn StdError + Send + Sync> for Error {
    fn as_ref(&self) -> &(dyn StdError + Send + Sync + 'static) {
        self.inner.as_ref()
    }
}

// ============================================================
// Chain
// ============================================================

/// Iterator over an error and its sources.
pub struct Chain<'a> {
    next: Option<&'a (dyn StdError + 'static)>,
}

impl<'a> Iterator for Chain<'a> {
    type Item = &'a (dyn StdError + 'static);

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.source();
        Some(current)
    }
}

// ============================================================
// MessageError helper
// ============================================================

#[derive(Debug)]
struct MessageError(String);

impl fmt::Display for MessageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl StdError for MessageError {}

// ============================================================
// Serde support
// ============================================================

#[cfg(feature = "serde")]
mod serde_impl {
    use super::*;
    use serde::ser::SerializeStruct;
    use serde::{Serialize, Serializer};

    // message + trace; the inner error itself is not serializable
    impl Serialize for Error {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let mut state = serializer.serialize_struct("Error", 2)?;
            state.serialize_field("message", &self.inner.to_string())?;
            state.serialize_field("trace", self.frames())?;
            state.end()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Outer(std::io::Error);

    impl fmt::Display for Outer {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("outer failed")
        }
    }

    impl StdError for Outer {
        fn source(&self) -> Option<&(dyn StdError + 'static)> {
            Some(&self.0)
        }
    }

    fn outer() -> Error {
        Error::new(Outer(std::io::Error::new(std::io::ErrorKind::NotFound, "missing")))
    }

    #[test]
    fn test_question_mark_converts() {
        fn parse() -> Result<u32, Error> {
            Ok("x".parse::<u32>()?)
        }
        let err = parse().unwrap_err();
        assert!(err.is::<std::num::ParseIntError>());
    }

    #[test]
    fn test_chain_and_root() {
        let err = outer();
        let messages: Vec<String> = err.chain().map(|e| e.to_string()).collect();
        assert_eq!(messages, ["outer failed", "missing"]);
        assert_eq!(err.root().to_string(), "missing");
    }

    #[test]
    fn test_downcast_keeps_error_on_mismatch() {
        let err = outer().here("test");
        let err = err.downcast::<std::fmt::Error>().unwrap_err();
        assert_eq!(err.frames().len(), 1);
        assert!(err.downcast::<Outer>().is_ok());
    }

    #[test]
    fn test_frames_and_display() {
        let err = Error::msg("boom").here("load").here("run");
        assert_eq!(err.frames().len(), 2);
        assert_eq!(err.caller().map(|c| c.function), Some("load"));

        let text = err.to_string();
        assert!(text.starts_with("boom\n\nTrace (most recent last):\n  "));
        assert!(text.contains("in load"));
        assert!(text.ends_with("in run"));
    }

    #[test]
    fn test_display_without_frames_is_message() {
        assert_eq!(Error::msg("boom").to_string(), "boom");
    }

    #[test]
    fn test_frame_limit() {
        let mut err = Error::msg("deep");
        for _ in 0..FRAME_LIMIT + 5 {
            err = err.here("f");
        }
        assert_eq!(err.frames().len(), FRAME_LIMIT);
    }

    #[test]
    fn test_caller_here_points_at_call_site() {
        let line = line!() + 1;
        let caller = Caller::here("t");
        assert_eq!(caller.line, line);
        assert!(caller.file.ends_with("error.rs"));
    }
}
