//! Debug rendering of an expansion with `prettyplease`.

use syn::{parse_quote, File, Stmt};

use crate::driver::expand_body;
use crate::options::Options;
use crate::syntax::Declaration;

const INDENT: &str = "    ";

/// Pretty-print a statement list as it would appear inside a function body.
pub fn render_stmts(stmts: &[Stmt]) -> String {
    let file: File = parse_quote! {
        fn __expansion() {
            #(#stmts)*
        }
    };
    let printed = prettyplease::unparse(&file);

    let mut lines: Vec<&str> = printed.lines().collect();
    // drop the wrapper's signature and closing brace
    if lines.len() >= 2 {
        lines.remove(0);
        lines.pop();
    } else {
        return String::new();
    }

    let mut rendered = String::with_capacity(printed.len());
    for line in lines {
        rendered.push_str(line.strip_prefix(INDENT).unwrap_or(line));
        rendered.push('\n');
    }
    rendered
}

/// Expand `decl` and render the result.
pub fn expand_to_string<D: Declaration + ?Sized>(decl: &D, options: &Options) -> String {
    render_stmts(&expand_body(decl, options))
}
