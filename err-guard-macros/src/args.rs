//! Attribute argument parsing.
//!
//! `#[err(traced, simple, unwrap = "value", crate = "my_rt")]`, all optional,
//! comma separated, each at most once.

use err_guard_rewrite::{ExpansionStyle, Options};
use syn::ext::IdentExt;
use syn::parse::{Parse, ParseStream};
use syn::punctuated::Punctuated;
use syn::{Ident, LitStr, Path, Result, Token};

/// One `key` or `key = "value"` entry.
enum Arg {
    Traced(Ident),
    Style(Ident, ExpansionStyle),
    Unwrap(Ident, LitStr),
    Crate(Ident, LitStr),
}

impl Arg {
    fn key(&self) -> &Ident {
        match self {
            Arg::Traced(key) | Arg::Style(key, _) | Arg::Unwrap(key, _) | Arg::Crate(key, _) => key,
        }
    }

    /// Duplicate detection groups `simple` and `full`.
    fn slot(&self) -> &'static str {
        match self {
            Arg::Traced(_) => "traced",
            Arg::Style(..) => "style",
            Arg::Unwrap(..) => "unwrap",
            Arg::Crate(..) => "crate",
        }
    }
}

impl Parse for Arg {
    fn parse(input: ParseStream) -> Result<Self> {
        // `crate` is a keyword
        let key = input.call(Ident::parse_any)?;
        match key.to_string().as_str() {
            "traced" => Ok(Arg::Traced(key)),
            "simple" => Ok(Arg::Style(key, ExpansionStyle::Simple)),
            "full" => Ok(Arg::Style(key, ExpansionStyle::Full)),
            "unwrap" => {
                input.parse::<Token![=]>()?;
                let value: LitStr = input.parse()?;
                if syn::parse_str::<Ident>(&value.value()).is_err() {
                    return Err(syn::Error::new(
                        value.span(),
                        "`unwrap` takes a method name: `unwrap = \"get\"`",
                    ));
                }
                Ok(Arg::Unwrap(key, value))
            }
            "crate" => {
                input.parse::<Token![=]>()?;
                Ok(Arg::Crate(key, input.parse()?))
            }
            other => Err(syn::Error::new(
                key.span(),
                format!(
                    "unknown argument `{}`; expected one of `traced`, `simple`, `full`, `unwrap = \"..\"`, `crate = \"..\"`",
                    other
                ),
            )),
        }
    }
}

/// Parsed attribute arguments.
#[derive(Default)]
pub struct AttrArgs {
    pub traced: bool,
    pub style: Option<ExpansionStyle>,
    pub unwrap_method: Option<String>,
    pub runtime: Option<Path>,
}

impl Parse for AttrArgs {
    fn parse(input: ParseStream) -> Result<Self> {
        let entries = Punctuated::<Arg, Token![,]>::parse_terminated(input)?;
        let mut args = AttrArgs::default();
        let mut seen: Vec<&'static str> = Vec::new();

        for entry in entries {
            if seen.contains(&entry.slot()) {
                return Err(syn::Error::new(
                    entry.key().span(),
                    format!("`{}` given more than once", entry.slot()),
                ));
            }
            seen.push(entry.slot());

            match entry {
                Arg::Traced(_) => args.traced = true,
                Arg::Style(_, style) => args.style = Some(style),
                Arg::Unwrap(_, value) => args.unwrap_method = Some(value.value()),
                Arg::Crate(_, value) => args.runtime = Some(value.parse()?),
            }
        }
        Ok(args)
    }
}

impl AttrArgs {
    /// Layer the arguments over the attribute's base options.
    pub fn apply(self, base: Options) -> Options {
        let mut options = base;
        if self.traced {
            options = options.with_traced(true);
        }
        if let Some(style) = self.style {
            options = options.with_style(style);
        }
        if let Some(method) = self.unwrap_method {
            options = options.with_unwrap_method(method);
        }
        if let Some(runtime) = self.runtime {
            options = options.with_runtime(runtime);
        }
        options
    }
}
