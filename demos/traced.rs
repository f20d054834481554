use err_guard::{err_traced, Result};
use std::num::ParseIntError;

fn parse_port(text: &str) -> std::result::Result<u16, ParseIntError> {
    text.trim().parse()
}

#[err_traced]
fn port(line: &str) -> Result<u16> {
    let port = parse_port(line)? else {
        return Err(err);
    };
    Ok(port)
}

#[err_traced]
fn listen(config: &str) -> Result<String> {
    let number = port(config)? else {
        if let Some(caller) = err_caller {
            eprintln!("first failure at {}", caller);
        }
        return Err(err);
    };
    Ok(format!("0.0.0.0:{}", number))
}

fn main() {
    println!("{}", listen("8080").unwrap());

    // two frames: `port`, then `listen`
    let err = listen("eighty").unwrap_err();
    println!("{}", err);
    for frame in err.frames() {
        println!("  {} @ line {}", frame.function, frame.line);
    }
}
