/// quadcalc main: one-shot subcommands, interactive shell by default.
use clap::Parser; // trait import enables QuadCli::parse()

use quadcalc::cli::{Command, QuadCli};
use quadcalc::commands;
use quadcalc::config::{resolve_config_path, Config};
use quadcalc::shell;

fn set_console_title() {
    use crossterm::{execute, terminal::SetTitle};
    let _ = execute!(std::io::stdout(), SetTitle("quadcalc"));
}

fn exit_on_failure(code: i32) {
    if code != 0 {
        std::process::exit(code);
    }
}

fn main() -> anyhow::Result<()> {
    let args = QuadCli::parse();

    let cfg_path = resolve_config_path(&args.config);
    let mut cfg = Config::load(cfg_path.as_deref())?;
    if args.precision.is_some() {
        cfg.precision = args.precision;
    }

    match args.cmd {
        None | Some(Command::Shell) => {
            set_console_title();
            shell::start(cfg)
        }
        Some(Command::Integrate { formula, from, to, n, rule, json }) => {
            let code = commands::integrate::main(
                &formula,
                from,
                to,
                n,
                &rule.rules(),
                json,
                args.pretty_errors,
                &cfg,
            )?;
            exit_on_failure(code);
            Ok(())
        }
        Some(Command::Functions) => commands::functions::main(),
        Some(Command::Tokens { formula }) => {
            exit_on_failure(commands::tokens::main(&formula, args.pretty_errors)?);
            Ok(())
        }
        Some(Command::Ast { formula }) => {
            exit_on_failure(commands::ast::main(&formula, args.pretty_errors)?);
            Ok(())
        }
    }
}
