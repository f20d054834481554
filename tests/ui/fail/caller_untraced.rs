//! Error: `err_caller` is only bound in traced expansions

use err_guard::err;

#[err]
fn failed_here(text: &str) -> bool {
    let _port = text.parse::<u16>()? else {
        return err_caller.is_some();
    };
    false
}

fn main() {
    failed_here("80");
}
