use colored::Colorize;
use serde::Serialize;

use crate::config::Config;
use crate::core::compiler::{Compiler, Formula};
use crate::core::diagnostics;
use crate::core::error::CoreError;
use crate::core::quadrature::{self, Interval, Rule};
use crate::core::symbols;
use crate::shell::format_value;

#[derive(Debug, Serialize)]
pub struct RuleResult {
    pub rule: Rule,
    /// `null` in JSON when the result is not finite.
    pub value: f64,
    pub display: String,
}

#[derive(Debug, Serialize)]
pub struct Report {
    pub formula: String,
    pub variable: String,
    pub a: f64,
    pub b: f64,
    pub n: usize,
    pub results: Vec<RuleResult>,
}

impl Report {
    pub fn to_text(&self) -> String {
        self.results
            .iter()
            .map(|r| format!("{}: {}\n", r.rule.label(), r.display))
            .collect()
    }
}

/// Validates inputs, compiles and integrates with every requested rule.
/// Without `n` the configured `default_n` is used.
pub fn compute(
    formula: &str,
    a: f64,
    b: f64,
    n: Option<i64>,
    rules: &[Rule],
    cfg: &Config,
) -> Result<Report, CoreError> {
    let interval = Interval::new(a, b)?;
    let n = match n {
        Some(n) => n,
        None => i64::try_from(cfg.default_n).map_err(|_| CoreError::input_range("default_n is too large"))?,
    };
    let n = quadrature::subdivisions(n)?;
    let f: Formula = Compiler::with_variable(&cfg.variable).compile(formula)?;
    let mut results = Vec::with_capacity(rules.len());
    for &rule in rules {
        let value = quadrature::integrate(|x| f.eval(x), interval.a, interval.b, n, rule)?;
        results.push(RuleResult { rule, value, display: format_value(value, cfg.precision) });
    }
    Ok(Report {
        formula: formula.to_string(),
        variable: f.variable().to_string(),
        a: interval.a,
        b: interval.b,
        n,
        results,
    })
}

/// Writes a formula error to stderr, pretty or plain, plus the vocabulary hint.
pub fn report_formula_error(formula: &str, err: &CoreError, pretty: bool) {
    if pretty {
        eprint!("{}", diagnostics::render_core_error(formula, err));
    } else {
        eprintln!("{} {}", "error:".bright_red().bold(), err);
    }
    if err.is_formula_error() {
        eprintln!("{} {}", "available:".bright_blue(), symbols::joined_names());
    }
}

/// Returns the process exit code: 0 on success, 2 on bad input.
#[allow(clippy::too_many_arguments)]
pub fn main(
    formula: &str,
    a: f64,
    b: f64,
    n: Option<i64>,
    rules: &[Rule],
    json: bool,
    pretty: bool,
    cfg: &Config,
) -> anyhow::Result<i32> {
    match compute(formula, a, b, n, rules, cfg) {
        Ok(report) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{}", report.to_text());
            }
            Ok(0)
        }
        Err(err) => {
            report_formula_error(formula, &err, pretty);
            Ok(2)
        }
    }
}
