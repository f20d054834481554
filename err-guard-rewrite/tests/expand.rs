//! Expansion tests through the public API.

use err_guard_rewrite::{expand_body, expand_to_string, ExpansionStyle, Options};
use proc_macro2::TokenStream;
use quote::quote;
use syn::{parse_quote, Block, ExprClosure, ImplItemFn, ItemFn, TraitItemFn};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn tokens_of(stmts: &[syn::Stmt]) -> String {
    quote!(#(#stmts)*).to_string()
}

fn expected(tokens: TokenStream) -> String {
    let block: Block = parse_quote!({ #tokens });
    tokens_of(&block.stmts)
}

fn expand(item: &ItemFn, options: &Options) -> String {
    init_tracing();
    tokens_of(&expand_body(item, options))
}

#[test]
fn test_untraced_direct_call() {
    let item: ItemFn = parse_quote! {
        fn run() -> Result<u32, Error> {
            let res = my_throwing_func(12)? else {
                return Err(err);
            };
            Ok(res)
        }
    };
    assert_eq!(
        expand(&item, &Options::untraced()),
        expected(quote! {
            let mut ___err_1 = ::err_guard::Slot::new();
            let ::core::option::Option::Some(res) = ::err_guard::create_result(|| ::core::result::Result::Ok(my_throwing_func(12)?))
                .extract_or_fail(&mut ___err_1)
            else {
                let err = ___err_1.take();
                return Err(err);
            };
            Ok(res)
        })
    );
}

#[test]
fn test_traced_direct_call_with_views() {
    let item: ItemFn = parse_quote! {
        fn run() -> Result<u32, Error> {
            let res = load()? else {
                log(dyn_err, err_caller);
                return Err(err);
            };
            Ok(res)
        }
    };
    assert_eq!(
        expand(&item, &Options::traced()),
        expected(quote! {
            let mut ___err_1 = ::err_guard::Slot::new();
            let ::core::option::Option::Some(res) = ::err_guard::create_result_traced("run", || ::core::result::Result::Ok(load()?))
                .extract_or_fail_traced(&mut ___err_1, "run")
            else {
                let err = ___err_1.take();
                let dyn_err = err.as_dyn_error();
                let err_caller = err.caller();
                log(dyn_err, err_caller);
                return Err(err);
            };
            Ok(res)
        })
    );
}

#[test]
fn test_async_unwrap_call() {
    let item: ItemFn = parse_quote! {
        async fn run() -> Result<u32, Error> {
            let res = fetch(1).await.get() else {
                return Ok(0);
            };
            Ok(res)
        }
    };
    assert_eq!(
        expand(&item, &Options::untraced()),
        expected(quote! {
            let mut ___err_1 = ::err_guard::Slot::new();
            let ::core::option::Option::Some(res) = ::err_guard::create_result_async(async {
                ::core::result::Result::<_, ::err_guard::Error>::Ok(fetch(1).await?)
            })
            .await
            .extract_or_fail(&mut ___err_1)
            else {
                return Ok(0);
            };
            Ok(res)
        })
    );
}

#[test]
fn test_outermost_try_is_direct_async() {
    let item: ItemFn = parse_quote! {
        async fn run() {
            let res = fetch().await.get()? else { return; };
        }
    };
    let out = expand(&item, &Options::untraced());
    assert!(out.contains("create_result_async"));
    assert!(out.contains("Ok (fetch () . await . get () ?)"));
}

#[test]
fn test_non_matching_statements_are_identical() {
    let item: ItemFn = parse_quote! {
        fn run() -> u32 {
            let x = 5;
            let Some(y) = lookup(x) else { return 0; };
            let z = compute(y).unwrap();
            x + y + z
        }
    };
    let original = tokens_of(&item.block.stmts);
    assert_eq!(expand(&item, &Options::untraced()), original);
    assert_eq!(expand(&item, &Options::traced()), original);
}

#[test]
fn test_closure_argument_is_expanded_first() {
    let item: ItemFn = parse_quote! {
        fn run() -> Result<u32, Error> {
            let total = sum(items.iter().map(|item| {
                let v = parse(item)? else { return 0; };
                v
            }))? else {
                return Err(err);
            };
            Ok(total)
        }
    };
    let out = expand(&item, &Options::untraced());
    let inner = out.find("let mut ___err_1").expect("inner slot");
    let outer = out.find("let mut ___err_2").expect("outer slot");
    assert!(outer < inner, "inner guard lives inside the outer capture");
    assert!(out.contains("Ok (sum (items . iter () . map (| item | { let mut ___err_1"));
}

#[test]
fn test_slot_names_unique_across_scopes() {
    let item: ItemFn = parse_quote! {
        fn run() -> Result<(), Error> {
            let a = one()? else { return Err(err); };
            for i in 0..3 {
                let b = two(i)? else { continue; };
            }
            match mode {
                Mode::A => {
                    let c = three()? else { return Err(err); };
                }
                Mode::B => {}
            }
            let handler = async move {
                let d = four().await? else { return; };
            };
            Ok(())
        }
    };
    let out = expand(&item, &Options::untraced());
    for n in 1..=4 {
        assert_eq!(out.matches(&format!("let mut ___err_{} ", n)).count(), 1);
    }
    assert!(!out.contains("___err_5"));
}

#[test]
fn test_return_with_closure_argument() {
    let item: ItemFn = parse_quote! {
        fn run() -> u32 {
            return apply(|| {
                let v = load()? else { return 0; };
                v
            });
        }
    };
    let out = expand(&item, &Options::untraced());
    assert!(out.contains("return apply (|| { let mut ___err_1"));
}

#[test]
fn test_simple_style() {
    let item: ItemFn = parse_quote! {
        fn run() -> Result<u32, Error> {
            let a = one()? else { return Err(err); };
            let b = two().await? else { return Err(err); };
            Ok(a + b)
        }
    };
    let options = Options::traced().with_style(ExpansionStyle::Simple);
    assert_eq!(
        expand(&item, &options),
        expected(quote! {
            let mut ___err_1 = ::err_guard::Slot::traced("run");
            let ::core::option::Option::Some(a) = one() >> &mut ___err_1 else {
                let err = ___err_1.take();
                return Err(err);
            };
            let ::core::option::Option::Some(b) = two().await >> &mut ___err_1 else {
                let err = ___err_1.take();
                return Err(err);
            };
            Ok(a + b)
        })
    );
}

#[test]
fn test_custom_unwrap_method() {
    let item: ItemFn = parse_quote! {
        fn run() {
            let a = load().value() else { return; };
            let b = load().get() else { return; };
        }
    };
    let out = expand(&item, &Options::untraced().with_unwrap_method("value"));
    assert_eq!(out.matches("let mut ___err_").count(), 1);
    assert!(out.contains("let b = load () . get () else"));
}

#[test]
fn test_bodiless_declaration_is_empty() {
    let item: TraitItemFn = parse_quote!(fn load(&self) -> Result<u32, Error>;);
    assert!(expand_body(&item, &Options::untraced()).is_empty());
}

#[test]
fn test_expression_closure_keeps_its_body() {
    init_tracing();
    let closure: ExprClosure = parse_quote!(|x| load(x));
    assert_eq!(
        tokens_of(&expand_body(&closure, &Options::untraced())),
        "load (x)"
    );

    let closure: ExprClosure = parse_quote!(|id| async move {
        let x = fetch(id).await? else { return 0; };
        x
    });
    let stmts = expand_body(&closure, &Options::untraced());
    assert_eq!(stmts.len(), 1);
    assert!(matches!(&stmts[0], syn::Stmt::Expr(syn::Expr::Async(_), None)));
    assert_eq!(
        tokens_of(&stmts),
        tokens_of(&[syn::Stmt::Expr(
            parse_quote!(async move {
                let mut ___err_1 = ::err_guard::Slot::new();
                let ::core::option::Option::Some(x) = ::err_guard::create_result_async(async {
                    ::core::result::Result::<_, ::err_guard::Error>::Ok(fetch(id).await?)
                })
                .await
                .extract_or_fail(&mut ___err_1)
                else {
                    return 0;
                };
                x
            }),
            None,
        )])
    );
}

#[test]
fn test_refutable_pattern_falls_back_when_unmatched() {
    let item: ItemFn = parse_quote! {
        fn run(key: &str) -> Result<u32, Error> {
            let Some(value) = find(key)? else { return Err(err); };
            let plain = find(key)? else { return Err(err); };
            Ok(value)
        }
    };
    let out = expand(&item, &Options::untraced());
    assert!(out.contains(
        "let :: core :: option :: Option :: Some (Some (value)) = :: err_guard :: create_result"
    ));
    assert!(out.contains("let err = ___err_1 . take_or_unmatched () ;"));
    assert!(out.contains("let err = ___err_2 . take () ;"));
}

#[test]
fn test_method_and_closure_declarations() {
    let method: ImplItemFn = parse_quote! {
        pub fn new(path: &str) -> Result<Self, Error> {
            let text = read(path)? else { return Err(err); };
            Ok(Self { text })
        }
    };
    let out = tokens_of(&expand_body(&method, &Options::traced()));
    assert!(out.contains("create_result_traced (\"new\""));

    let closure: ExprClosure = parse_quote!(|| {
        let v = load()? else { return None; };
        Some(v)
    });
    let out = tokens_of(&expand_body(&closure, &Options::traced()));
    assert!(out.contains("create_result_traced (\"{closure}\""));
}

#[test]
fn test_expand_to_string_is_pretty() {
    let item: ItemFn = parse_quote! {
        fn run() -> Result<u32, Error> {
            let res = my_throwing_func(12)? else { return Err(err); };
            Ok(res)
        }
    };
    let rendered = expand_to_string(&item, &Options::untraced());
    assert!(rendered.starts_with("let mut ___err_1 = ::err_guard::Slot::new();\n"));
    assert!(rendered.contains("let err = ___err_1.take();"));
    assert!(rendered.ends_with("Ok(res)\n"));
}
