use err_guard::{err, Result};
use err_guard_rewrite::{expand_to_string, Options};
use std::io;

fn read_config(path: &str) -> std::result::Result<String, io::Error> {
    match path {
        "app.toml" => Ok("port = 8080".to_string()),
        _ => Err(io::Error::new(io::ErrorKind::NotFound, format!("{} not found", path))),
    }
}

// Pattern 1: bind the error and propagate it
#[err]
fn load(path: &str) -> Result<String> {
    let text = read_config(path)? else {
        return Err(err);
    };
    Ok(text)
}

// Pattern 2: recover without touching the error
#[err]
fn load_or_default(path: &str) -> String {
    let text = read_config(path)? else {
        return String::from("port = 80");
    };
    text
}

// Pattern 3: inspect the error through the trait object view
#[err]
fn describe(path: &str) -> String {
    let _text = read_config(path)? else {
        let kind = dyn_err
            .downcast_ref::<io::Error>()
            .map(|e| format!("{:?}", e.kind()))
            .unwrap_or_default();
        return format!("{} ({})", err, kind);
    };
    "ok".to_string()
}

fn main() {
    println!("load(app.toml)      = {:?}", load("app.toml").ok());
    println!("load(missing.toml)  = {}", load("missing.toml").unwrap_err());
    println!("load_or_default     = {}", load_or_default("missing.toml"));
    println!("describe            = {}", describe("missing.toml"));

    let item: syn::ItemFn = syn::parse_quote! {
        fn load(path: &str) -> Result<String> {
            let text = read_config(path)? else {
                return Err(err);
            };
            Ok(text)
        }
    };
    println!("\n#[err] expands `load` to:\n\n{}", expand_to_string(&item, &Options::untraced()));
}
