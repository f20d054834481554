use err_guard as rt;

#[rt::err(crate = "rt")]
fn port(text: &str) -> rt::Result<u16> {
    let port = text.parse::<u16>()? else {
        return Err(err);
    };
    Ok(port)
}

fn main() {
    assert_eq!(port("80").unwrap(), 80);
}
