//! Fixed vocabulary of named constants and functions a formula may use.
use serde::Serialize;

#[derive(Debug, Clone, Copy)]
pub enum Symbol {
    Constant(f64),
    Unary(fn(f64) -> f64),
    Binary(fn(f64, f64) -> f64),
}

impl Symbol {
    /// Number of call arguments, `None` for constants.
    pub fn arity(&self) -> Option<usize> {
        match self {
            Symbol::Constant(_) => None,
            Symbol::Unary(_) => Some(1),
            Symbol::Binary(_) => Some(2),
        }
    }

    pub fn kind(&self) -> SymbolKind {
        match self {
            Symbol::Constant(_) => SymbolKind::Constant,
            Symbol::Unary(_) | Symbol::Binary(_) => SymbolKind::Function,
        }
    }
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SymbolKind {
    Constant,
    Function,
}

#[derive(Debug, Serialize, Clone)]
pub struct SymbolInfo {
    pub name: &'static str,
    pub kind: SymbolKind,
    pub arity: Option<usize>,
}

// Listing order is the order users see in "Available functions".
static TABLE: &[(&str, Symbol)] = &[
    ("cos", Symbol::Unary(f64::cos)),
    ("sin", Symbol::Unary(f64::sin)),
    ("tan", Symbol::Unary(f64::tan)),
    ("sqrt", Symbol::Unary(f64::sqrt)),
    ("log", Symbol::Unary(f64::ln)),
    ("log10", Symbol::Unary(f64::log10)),
    ("exp", Symbol::Unary(f64::exp)),
    ("pow", Symbol::Binary(f64::powf)),
    ("asin", Symbol::Unary(f64::asin)),
    ("acos", Symbol::Unary(f64::acos)),
    ("atan", Symbol::Unary(f64::atan)),
    ("atan2", Symbol::Binary(f64::atan2)),
    ("ceil", Symbol::Unary(f64::ceil)),
    ("floor", Symbol::Unary(f64::floor)),
    ("fabs", Symbol::Unary(f64::abs)),
    ("gcd", Symbol::Binary(gcd)),
    ("pi", Symbol::Constant(std::f64::consts::PI)),
    ("e", Symbol::Constant(std::f64::consts::E)),
];

pub fn lookup(name: &str) -> Option<Symbol> {
    entry(name).map(|(_, s)| s)
}

/// Table entry with its `'static` name.
pub fn entry(name: &str) -> Option<(&'static str, Symbol)> {
    TABLE.iter().find(|(n, _)| *n == name).copied()
}

pub fn names() -> impl Iterator<Item = &'static str> {
    TABLE.iter().map(|(n, _)| *n)
}

/// Comma-joined names, as printed after an invalid formula.
pub fn joined_names() -> String {
    names().collect::<Vec<_>>().join(", ")
}

pub fn collect_symbols() -> Vec<SymbolInfo> {
    TABLE
        .iter()
        .map(|&(name, sym)| SymbolInfo { name, kind: sym.kind(), arity: sym.arity() })
        .collect()
}

/// Greatest common divisor over the integer parts of its arguments.
///
/// Both inputs are truncated toward zero; a non-finite input yields NaN.
/// The result is non-negative and `gcd(0, 0) == 0`.
pub fn gcd(a: f64, b: f64) -> f64 {
    if !a.is_finite() || !b.is_finite() {
        return f64::NAN;
    }
    let (mut a, mut b) = (a.trunc().abs(), b.trunc().abs());
    while b != 0.0 {
        let r = a % b;
        a = b;
        b = r;
    }
    a
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_lists_every_name_in_order() {
        assert_eq!(
            joined_names(),
            "cos, sin, tan, sqrt, log, log10, exp, pow, asin, acos, atan, atan2, ceil, floor, fabs, gcd, pi, e"
        );
    }

    #[test]
    fn lookup_resolves_kinds() {
        assert!(matches!(lookup("pi"), Some(Symbol::Constant(v)) if v == std::f64::consts::PI));
        assert_eq!(lookup("atan2").and_then(|s| s.arity()), Some(2));
        assert_eq!(lookup("log").and_then(|s| s.arity()), Some(1));
        assert!(lookup("np").is_none());
        assert!(lookup("x").is_none());
    }

    #[test]
    fn log_is_natural() {
        let Some(Symbol::Unary(log)) = lookup("log") else { panic!("log missing") };
        assert!((log(std::f64::consts::E) - 1.0).abs() < 1e-15);
        assert!(log(-1.0).is_nan());
        assert_eq!(log(0.0), f64::NEG_INFINITY);
    }

    #[test]
    fn gcd_truncates_and_normalizes_sign() {
        assert_eq!(gcd(12.0, 18.0), 6.0);
        assert_eq!(gcd(12.9, 18.2), 6.0);
        assert_eq!(gcd(-4.0, 6.0), 2.0);
        assert_eq!(gcd(0.0, 0.0), 0.0);
        assert_eq!(gcd(0.0, 7.0), 7.0);
        assert_eq!(gcd(0.5, 3.0), 3.0);
        assert!(gcd(f64::INFINITY, 2.0).is_nan());
        assert!(gcd(f64::NAN, 2.0).is_nan());
    }

    #[test]
    fn collect_symbols_reports_arity() {
        let infos = collect_symbols();
        assert_eq!(infos.len(), 18);
        let e = infos.iter().find(|i| i.name == "e").unwrap();
        assert_eq!(e.kind, SymbolKind::Constant);
        assert_eq!(e.arity, None);
    }
}
