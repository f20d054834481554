//! Expansion policy.
//!
//! Two independent axes pick the generated shape:
//!
//! - `traced` - whether captured errors get a call-site frame (file, function, line)
//! - `style` - nested capture chain (`Full`) or the flat `>>` operator form (`Simple`)
//!
//! The remaining fields name things the generated code refers to.

use syn::{parse_quote, Path};

/// Accessor that marks an already-`Result` call as a guard initializer.
pub const DEFAULT_UNWRAP_METHOD: &str = "get";

/// Shape of the generated guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExpansionStyle {
    /// `create_result(|| ..).extract_or_fail(&mut slot)`, one slot per guard.
    #[default]
    Full,
    /// `expr >> &mut slot`, one slot shared by every guard of a scope.
    Simple,
}

impl ExpansionStyle {
    pub fn as_str(self) -> &'static str {
        match self {
            ExpansionStyle::Full => "full",
            ExpansionStyle::Simple => "simple",
        }
    }
}

/// Options for one expansion.
#[derive(Debug, Clone)]
pub struct Options {
    /// Record caller metadata on captured errors.
    pub traced: bool,
    pub style: ExpansionStyle,
    /// Zero-argument method recognized as "unwrap this Result or fail".
    pub unwrap_method: String,
    /// Path of the runtime crate the generated code calls into.
    pub runtime: Path,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            traced: false,
            style: ExpansionStyle::Full,
            unwrap_method: DEFAULT_UNWRAP_METHOD.to_string(),
            runtime: parse_quote!(::err_guard),
        }
    }
}

impl Options {
    /// Options behind `#[err]`.
    pub fn untraced() -> Self {
        Self::default()
    }

    /// Options behind `#[err_traced]`.
    pub fn traced() -> Self {
        Self {
            traced: true,
            ..Self::default()
        }
    }

    pub fn with_traced(mut self, traced: bool) -> Self {
        self.traced = traced;
        self
    }

    pub fn with_style(mut self, style: ExpansionStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_unwrap_method(mut self, name: impl Into<String>) -> Self {
        self.unwrap_method = name.into();
        self
    }

    pub fn with_runtime(mut self, runtime: Path) -> Self {
        self.runtime = runtime;
        self
    }

    pub fn is_simple(&self) -> bool {
        self.style == ExpansionStyle::Simple
    }
}
