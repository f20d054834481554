use err_guard::err;

#[err]
fn plain(values: &[u32]) -> Option<u32> {
    let Some(first) = values.first() else {
        return None;
    };
    let doubled = first * 2;
    Some(doubled)
}

fn main() {
    assert_eq!(plain(&[4]), Some(8));
    assert_eq!(plain(&[]), None);
}
