//! Error: unknown attribute argument

use err_guard::err;

#[err(verbose)]
fn port(text: &str) -> Result<u16, err_guard::Error> {
    let port = text.parse::<u16>()? else {
        return Err(err);
    };
    Ok(port)
}

fn main() {}
