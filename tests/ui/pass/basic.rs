use err_guard::{err, Result};

#[err]
fn parse(text: &str) -> Result<u32> {
    let n = text.trim().parse::<u32>()? else {
        return Err(err);
    };
    Ok(n)
}

fn main() {
    assert_eq!(parse(" 12 ").unwrap(), 12);
    assert!(parse("x").is_err());
}
