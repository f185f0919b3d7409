use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::core::quadrature::Rule;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum RuleChoice {
    Midpoint,
    Trapezoidal,
    #[default]
    Both,
}

impl RuleChoice {
    /// Rules to run, in reporting order.
    pub fn rules(self) -> Vec<Rule> {
        match self {
            RuleChoice::Midpoint => vec![Rule::Midpoint],
            RuleChoice::Trapezoidal => vec![Rule::Trapezoidal],
            RuleChoice::Both => Rule::ALL.to_vec(),
        }
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "quadcalc",
    about = "Numerical definite integrals of one-variable formulas (midpoint + trapezoidal)",
    version,
    propagate_version = true,
    disable_help_subcommand = true
)]
pub struct QuadCli {
    /// Global: pretty diagnostics for formula errors
    #[arg(long = "pretty-errors", action = ArgAction::SetTrue, global = true)]
    pub pretty_errors: bool,

    /// Global: digits after the decimal point in results (overrides config)
    #[arg(long = "precision", value_name = "DIGITS", global = true)]
    pub precision: Option<usize>,

    /// Global: path to config (TOML); default: ~/.quadcalc/config.toml
    #[arg(long = "config", value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub cmd: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Integrate a formula once and exit
    ///
    /// Examples:
    ///   quadcalc integrate "sin(x)" --from 0 --to 3.14159 -n 1000
    ///   quadcalc integrate "x**2" --from -1 --to 1 --rule midpoint --json
    Integrate {
        /// Formula in terms of the configured variable (default x)
        #[arg(value_name = "FORMULA", allow_hyphen_values = true)]
        formula: String,

        /// Lower bound a
        #[arg(long = "from", short = 'a', value_name = "A", allow_negative_numbers = true)]
        from: f64,

        /// Upper bound b
        #[arg(long = "to", short = 'b', value_name = "B", allow_negative_numbers = true)]
        to: f64,

        /// Number of subintervals (default from config, else 1000)
        #[arg(short = 'n', long = "subdivisions", value_name = "N", allow_negative_numbers = true)]
        n: Option<i64>,

        /// Which rule(s) to report
        #[arg(long = "rule", value_enum, default_value_t = RuleChoice::Both)]
        rule: RuleChoice,

        /// Print results as JSON
        #[arg(long = "json", action = ArgAction::SetTrue)]
        json: bool,
    },

    /// List the functions and constants formulas may use
    Functions,

    /// Dump formula tokens (debug)
    Tokens {
        #[arg(value_name = "FORMULA", allow_hyphen_values = true)]
        formula: String,
    },

    /// Dump the parsed formula, fully parenthesized (debug)
    Ast {
        #[arg(value_name = "FORMULA", allow_hyphen_values = true)]
        formula: String,
    },

    /// Start the interactive shell (also the default with no subcommand)
    Shell,
}
