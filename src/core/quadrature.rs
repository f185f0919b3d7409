//! Composite quadrature over evenly spaced grids.
//!
//! Both rules split `[a, b]` into `n` subintervals of width `h = (b - a) / n`.
//! The trapezoidal rule samples the `n + 1` grid points (endpoints exact),
//! the midpoint rule samples the `n` subinterval centres.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::core::error::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Rule {
    Trapezoidal,
    Midpoint,
}

impl Rule {
    /// Reporting order used by the shell.
    pub const ALL: [Rule; 2] = [Rule::Midpoint, Rule::Trapezoidal];

    pub fn name(self) -> &'static str {
        match self {
            Rule::Trapezoidal => "trapezoidal",
            Rule::Midpoint => "midpoint",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Rule::Trapezoidal => "Trapezoidal rule",
            Rule::Midpoint => "Midpoint rule",
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Rule {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "trapezoidal" => Ok(Rule::Trapezoidal),
            "midpoint" => Ok(Rule::Midpoint),
            other => Err(CoreError::unsupported_rule(other)),
        }
    }
}

/// Closed interval `[a, b]` with finite endpoints and `a <= b`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Interval {
    pub a: f64,
    pub b: f64,
}

impl Interval {
    pub fn new(a: f64, b: f64) -> Result<Self, CoreError> {
        if !a.is_finite() || !b.is_finite() {
            return Err(CoreError::input_range("a and b must be finite numbers"));
        }
        if a > b {
            return Err(CoreError::input_range("a must be less than or equal to b"));
        }
        Ok(Interval { a, b })
    }

    pub fn width(&self) -> f64 {
        self.b - self.a
    }

    pub fn is_degenerate(&self) -> bool {
        self.a == self.b
    }
}

/// Largest subdivision count accepted from user input.
pub const MAX_SUBDIVISIONS: usize = 100_000_000;

/// Validates a user-supplied subdivision count.
pub fn subdivisions(n: i64) -> Result<usize, CoreError> {
    if n <= 0 {
        return Err(CoreError::input_range("n must be positive"));
    }
    match usize::try_from(n) {
        Ok(n) if n <= MAX_SUBDIVISIONS => Ok(n),
        _ => Err(CoreError::InputRange(format!("n must be at most {}", MAX_SUBDIVISIONS))),
    }
}

/// `num` evenly spaced points from `start` to `stop`, computed on demand.
#[derive(Debug, Clone, Copy)]
struct Grid {
    start: f64,
    stop: f64,
    step: f64,
    num: usize,
}

impl Grid {
    fn new(start: f64, stop: f64, num: usize) -> Self {
        let step = if num > 1 { (stop - start) / (num - 1) as f64 } else { 0.0 };
        Grid { start, stop, step, num }
    }

    /// Point `i` is `start + i * step`, never a running sum; the last point is exactly `stop`.
    fn point(&self, i: usize) -> f64 {
        if self.num > 1 && i == self.num - 1 {
            self.stop
        } else {
            self.start + i as f64 * self.step
        }
    }
}

/// `num` evenly spaced points from `start` to `stop` inclusive.
///
/// Same points the rules sample. A single point is `start`.
pub fn linspace(start: f64, stop: f64, num: usize) -> Vec<f64> {
    let grid = Grid::new(start, stop, num);
    (0..num).map(|i| grid.point(i)).collect()
}

const BLOCK: usize = 8;

/// Sums with pairwise (cascade) summation to limit rounding growth.
pub fn pairwise_sum(values: &[f64]) -> f64 {
    pairwise_sum_by(0, values.len(), &|i| values[i])
}

/// Pairwise sum of `term(i)` for `i` in `lo..hi` without materializing the terms.
fn pairwise_sum_by<T: Fn(usize) -> f64>(lo: usize, hi: usize, term: &T) -> f64 {
    if hi - lo <= BLOCK {
        return (lo..hi).fold(0.0, |acc, i| acc + term(i));
    }
    let mid = lo + (hi - lo) / 2;
    pairwise_sum_by(lo, mid, term) + pairwise_sum_by(mid, hi, term)
}

pub fn integrate<F>(f: F, a: f64, b: f64, n: usize, rule: Rule) -> Result<f64, CoreError>
where
    F: Fn(f64) -> f64,
{
    let interval = Interval::new(a, b)?;
    if n == 0 {
        return Err(CoreError::input_range("n must be positive"));
    }
    if interval.is_degenerate() {
        // h == 0; skip sampling so a non-finite f(a) cannot turn 0 into NaN.
        return Ok(0.0);
    }
    let result = match rule {
        Rule::Trapezoidal => trapezoidal_rule(&f, interval, n),
        Rule::Midpoint => midpoint_rule(&f, interval, n),
    };
    debug_log!("[quad] {} on [{}, {}] n={} -> {}", rule, a, b, n, result);
    Ok(result)
}

/// Like [`integrate`], selecting the rule by name.
pub fn integrate_named<F>(f: F, a: f64, b: f64, n: usize, rule: &str) -> Result<f64, CoreError>
where
    F: Fn(f64) -> f64,
{
    integrate(f, a, b, n, rule.parse()?)
}

fn trapezoidal_rule<F: Fn(f64) -> f64>(f: &F, interval: Interval, n: usize) -> f64 {
    let h = interval.width() / n as f64;
    let grid = Grid::new(interval.a, interval.b, n + 1);
    let inner = pairwise_sum_by(1, n, &|i| f(grid.point(i)));
    h * (0.5 * (f(grid.point(0)) + f(grid.point(n))) + inner)
}

fn midpoint_rule<F: Fn(f64) -> f64>(f: &F, interval: Interval, n: usize) -> f64 {
    let h = interval.width() / n as f64;
    let grid = Grid::new(interval.a + h / 2.0, interval.b - h / 2.0, n);
    h * pairwise_sum_by(0, n, &|i| f(grid.point(i)))
}
