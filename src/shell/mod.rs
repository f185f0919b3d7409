//! Interactive integration shell: one formula/interval/count per round,
//! both rules reported, until the user quits or input ends.

use colored::Colorize;
use std::io::{self, BufRead, Write};

use crate::config::Config;
use crate::core::compiler::{Compiler, Formula};
use crate::core::error::CoreError;
use crate::core::quadrature::{self, Interval, Rule};
use crate::core::symbols;
use crate::debug_log;

#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Eof,
}

pub struct Session<R, W> {
    input: R,
    out: W,
    cfg: Config,
    compiler: Compiler,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(input: R, out: W, cfg: Config) -> Self {
        let compiler = Compiler::with_variable(&cfg.variable);
        Self { input, out, cfg, compiler }
    }

    pub fn into_output(self) -> W {
        self.out
    }

    pub fn run(&mut self) -> anyhow::Result<()> {
        loop {
            if self.round()? == Flow::Eof {
                break;
            }
            self.separator()?;
            let Some(answer) = self.prompt("Press q to quit or any other key to continue: ")? else {
                break;
            };
            if answer.eq_ignore_ascii_case("q") {
                break;
            }
            self.separator()?;
        }
        Ok(())
    }

    /// One calculation round. Input problems end the round, never the session.
    fn round(&mut self) -> io::Result<Flow> {
        let var = self.compiler.variable().to_string();
        let Some(formula) = self.prompt(&format!("Enter a formula in terms of {}: ", var))? else {
            return Ok(Flow::Eof);
        };
        let mut numbers = [0.0f64; 2];
        for (slot, label) in numbers.iter_mut().zip(["a", "b"]) {
            let Some(text) = self.prompt(&format!("Enter {}: ", label))? else {
                return Ok(Flow::Eof);
            };
            match text.trim().parse::<f64>() {
                Ok(v) => *slot = v,
                Err(_) => {
                    self.invalid_input()?;
                    return Ok(Flow::Continue);
                }
            }
        }
        let Some(text) = self.prompt("Enter n: ")? else {
            return Ok(Flow::Eof);
        };
        let Ok(n) = text.trim().parse::<i64>() else {
            self.invalid_input()?;
            return Ok(Flow::Continue);
        };
        writeln!(self.out)?;

        let [a, b] = numbers;
        let checked = Interval::new(a, b).and_then(|iv| Ok((iv, quadrature::subdivisions(n)?)));
        let (interval, n) = match checked {
            Ok(v) => v,
            Err(CoreError::InputRange(msg)) => {
                writeln!(self.out, "{}", msg.yellow())?;
                return Ok(Flow::Continue);
            }
            Err(other) => {
                writeln!(self.out, "{}", other.to_string().red())?;
                return Ok(Flow::Continue);
            }
        };

        let f = match self.compiler.compile(&formula) {
            Ok(f) => f,
            Err(CoreError::UndefinedName { name, .. }) => {
                debug_log!("[shell] undefined name '{}'", name);
                writeln!(self.out, "{}", format!("Invalid variable in formula, you can only use {}", var).red())?;
                return Ok(Flow::Continue);
            }
            Err(err) => {
                debug_log!("[shell] {}", err);
                self.invalid_input()?;
                return Ok(Flow::Continue);
            }
        };

        self.report(&f, interval, n)?;
        Ok(Flow::Continue)
    }

    fn report(&mut self, f: &Formula, interval: Interval, n: usize) -> io::Result<()> {
        for rule in Rule::ALL {
            match quadrature::integrate(|x| f.eval(x), interval.a, interval.b, n, rule) {
                Ok(v) => writeln!(self.out, "{}: {}", rule.label(), format_value(v, self.cfg.precision))?,
                Err(err) => writeln!(self.out, "{}: {}", rule.label(), err.to_string().red())?,
            }
        }
        Ok(())
    }

    fn invalid_input(&mut self) -> io::Result<()> {
        writeln!(self.out, "{}", "Invalid input for function or interval".red())?;
        writeln!(self.out, "Available functions:")?;
        writeln!(self.out, "{}", symbols::joined_names())
    }

    fn separator(&mut self) -> io::Result<()> {
        writeln!(self.out, "{}", "-".repeat(self.cfg.separator_width))
    }

    /// Prints `msg`, reads one line without its terminator; `None` at end of input.
    fn prompt(&mut self, msg: &str) -> io::Result<Option<String>> {
        write!(self.out, "{}", msg)?;
        self.out.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.out)?;
            return Ok(None);
        }
        let trimmed = line.strip_suffix('\n').unwrap_or(&line);
        let trimmed = trimmed.strip_suffix('\r').unwrap_or(trimmed);
        Ok(Some(trimmed.to_string()))
    }
}

/// Shortest round-trip form spelled like a numpy float repr (`2.0`, `1e+16`,
/// `1e-05`, `inf`, `nan`), or fixed digits when a precision is configured.
pub fn format_value(v: f64, precision: Option<usize>) -> String {
    if v.is_nan() {
        return "nan".to_string();
    }
    match precision {
        Some(p) if v.is_finite() => format!("{:.*}", p, v),
        _ => signed_exponent(format!("{:?}", v)),
    }
}

// `1e16` -> `1e+16`, `1e-5` -> `1e-05`
fn signed_exponent(repr: String) -> String {
    match repr.split_once('e') {
        Some((mantissa, exp)) => {
            let (sign, digits) = match exp.strip_prefix('-') {
                Some(d) => ('-', d),
                None => ('+', exp),
            };
            format!("{}e{}{:0>2}", mantissa, sign, digits)
        }
        None => repr,
    }
}

/// Runs the shell on the process's stdin/stdout.
pub fn start(cfg: Config) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut session = Session::new(stdin.lock(), stdout.lock(), cfg);
    session.run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run(input: &str) -> String {
        colored::control::set_override(false);
        let mut session = Session::new(Cursor::new(input.as_bytes().to_vec()), Vec::new(), Config::default());
        session.run().unwrap();
        String::from_utf8(session.into_output()).unwrap()
    }

    #[test]
    fn format_value_shapes() {
        assert_eq!(format_value(2.0, None), "2.0");
        assert_eq!(format_value(f64::INFINITY, None), "inf");
        assert_eq!(format_value(f64::NAN, None), "nan");
        assert_eq!(format_value(f64::NAN, Some(3)), "nan");
        assert_eq!(format_value(1.0 / 3.0, Some(4)), "0.3333");
        assert_eq!(format_value(f64::NEG_INFINITY, Some(4)), "-inf");
    }

    #[test]
    fn format_value_exponents_carry_sign_and_two_digits() {
        assert_eq!(format_value(1e16, None), "1e+16");
        assert_eq!(format_value(-2.5e300, None), "-2.5e+300");
        assert_eq!(format_value(1e-5, None), "1e-05");
        assert_eq!(format_value(1.5e-7, None), "1.5e-07");
        assert_eq!(format_value(0.0001, None), "0.0001");
        assert_eq!(format_value(9999999999999998.0, None), "9999999999999998.0");
    }

    #[test]
    fn huge_count_ends_only_the_round() {
        let out = run("x\n0\n1\n1099511627776\nc\nx\n0\n2\n2\nq\n");
        assert!(out.contains("n must be at most 100000000\n"), "{out}");
        assert_eq!(out.matches("Midpoint rule:").count(), 1);
        assert!(out.contains("Midpoint rule: 2.0\n"), "{out}");
    }

    #[test]
    fn round_prints_both_rules_then_quits() {
        let out = run("x\n0\n2\n4\nq\n");
        assert!(out.contains("Midpoint rule: 2.0\n"), "{out}");
        assert!(out.contains("Trapezoidal rule: 2.0\n"), "{out}");
        let mid = out.find("Midpoint rule").unwrap();
        let trap = out.find("Trapezoidal rule").unwrap();
        assert!(mid < trap);
        assert_eq!(out.matches(&"-".repeat(80)).count(), 1);
    }

    #[test]
    fn end_of_input_stops_cleanly() {
        let out = run("x\n0\n");
        assert!(out.contains("Enter b: "));
        assert!(!out.contains("Enter n: "));
    }

    #[test]
    fn bad_number_skips_remaining_prompts() {
        let out = run("x\nabc\nq\n");
        assert!(out.contains("Invalid input for function or interval\nAvailable functions:\n"));
        assert!(!out.contains("Enter b: "));
    }

    #[test]
    fn fractional_count_is_invalid_input() {
        let out = run("x\n0\n1\n2.5\nq\n");
        assert!(out.contains("Invalid input for function or interval"));
    }

    #[test]
    fn range_errors_end_round_only() {
        let out = run("x\n2\n1\n4\nc\nx\n0\n1\n0\nq\n");
        assert!(out.contains("a must be less than or equal to b"));
        assert!(out.contains("n must be positive"));
        assert!(!out.contains("Midpoint rule"));
        assert_eq!(out.matches("Enter a formula").count(), 2);
    }

    #[test]
    fn any_other_key_continues() {
        let out = run("x\n0\n1\n1\nQQ\n1\n0\n1\n1\nQ\n");
        assert_eq!(out.matches("Midpoint rule:").count(), 2);
        assert_eq!(out.matches(&"-".repeat(80)).count(), 3);
    }
}
