use crate::core::compiler::tokenize;
use crate::core::error::CoreError;

/// `line:col  kind` for every token, EOF included.
pub fn render(formula: &str) -> Result<String, CoreError> {
    let tokens = tokenize(formula)?;
    Ok(tokens
        .iter()
        .map(|t| format!("{}:{}  {}\n", t.line, t.col, t.kind))
        .collect())
}

pub fn main(formula: &str, pretty: bool) -> anyhow::Result<i32> {
    match render(formula) {
        Ok(out) => {
            print!("{}", out);
            Ok(0)
        }
        Err(err) => {
            super::integrate::report_formula_error(formula, &err, pretty);
            Ok(2)
        }
    }
}
