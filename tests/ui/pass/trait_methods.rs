use err_guard::{err_traced, Result};

trait Source {
    #[err_traced]
    fn read(&self) -> Result<String>;

    #[err_traced]
    fn read_len(&self) -> Result<usize> {
        let text = self.read()? else {
            return Err(err);
        };
        Ok(text.len())
    }
}

struct Fixed;

impl Source for Fixed {
    fn read(&self) -> Result<String> {
        Ok("abc".to_string())
    }
}

fn main() {
    assert_eq!(Fixed.read_len().unwrap(), 3);
}
