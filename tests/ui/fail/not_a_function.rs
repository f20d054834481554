//! Error: #[err] on something that is not a function

use err_guard::err;

#[err]
struct Config {
    port: u16,
}

fn main() {}
