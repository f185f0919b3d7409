use crate::core::compiler::Compiler;
use crate::core::error::CoreError;

/// Fully parenthesized parse tree; names are not checked.
pub fn render(formula: &str) -> Result<String, CoreError> {
    Ok(Compiler::new().parse(formula)?.to_string())
}

pub fn main(formula: &str, pretty: bool) -> anyhow::Result<i32> {
    match render(formula) {
        Ok(out) => {
            println!("{}", out);
            Ok(0)
        }
        Err(err) => {
            super::integrate::report_formula_error(formula, &err, pretty);
            Ok(2)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shows_grouping() {
        insta::assert_snapshot!(render("-x**2 + sin(x)/2").unwrap(), @"((-(x ** 2)) + (sin(x) / 2))");
        insta::assert_snapshot!(render("2**-1*3").unwrap(), @"((2 ** (-1)) * 3)");
    }

    #[test]
    fn unknown_names_still_parse() {
        assert_eq!(render("y + 1").unwrap(), "(y + 1)");
    }
}
