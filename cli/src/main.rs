// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use clap::{Arg, ArgAction, ArgMatches, Command};
use eyre::{eyre, Result, WrapErr};
use std::fs::File;
use std::io::{stdin, BufReader};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use decicalc::config::{self, parse_digits, Config};
use decicalc::{repl, runner::Runner};
use decicalc_core::{AngleMode, IntegralMode};

fn command() -> Command {
    Command::new("Decicalc")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Decicalc Contributors")
        .about("Decimal calculator with integrals, sums and products")
        .arg(
            Arg::new("EXPR")
                .help("Evaluate a list of expressions. If no arguments are provided, an interactive session will start.")
                .num_args(..)
                .required(false),
        )
        .arg(
            Arg::new("file")
                .short('f')
                .long("file")
                .help("Reads expressions from a file, or stdin when given `-`"),
        )
        .arg(
            Arg::new("config-path")
                .long("config-path")
                .help("Prints a path to the config file, then exits")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .num_args(1)
                .long("config")
                .action(ArgAction::Set)
                .help("Set path to config.toml"),
        )
        .arg(
            Arg::new("degrees")
                .short('d')
                .long("degrees")
                .help("Evaluate trigonometric functions in degrees")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("integral")
                .long("integral")
                .value_name("RULE")
                .help("Quadrature rule: rectangle, midpoint, trapezoid, simpson or simpson38"),
        )
        .arg(
            Arg::new("digits")
                .long("digits")
                .value_name("N")
                .help("Significant digits shown for results"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Log more, repeat for even more")
                .action(ArgAction::Count),
        )
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,decicalc={0},decicalc_core={0}", level)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Applies the per-run overrides from the command line.
fn apply_overrides(config: &mut Config, matches: &ArgMatches) -> Result<()> {
    if matches.get_flag("degrees") {
        config.session.angle_mode = AngleMode::Degrees;
    }
    if let Some(rule) = matches.get_one::<String>("integral") {
        config.session.integral_mode = rule
            .parse::<IntegralMode>()
            .map_err(|err| eyre!(err))
            .wrap_err(format!("Unknown integration rule `{}`", rule))?;
    }
    if let Some(digits) = matches.get_one::<String>("digits") {
        config.display.digits = parse_digits(digits)
            .map_err(|err| eyre!(err))
            .wrap_err(format!("Digit count `{}` is not between 1 and 32", digits))?;
    }
    Ok(())
}

fn main() -> Result<ExitCode> {
    let matches = command().get_matches();

    color_eyre::install()?;
    init_logging(matches.get_count("verbose"));
    let mut config = config::read_config(matches.get_one::<String>("config").map(|s| &**s))?;
    apply_overrides(&mut config, &matches)?;

    if matches.get_flag("config-path") {
        println!("{}", config::config_toml_path()?.display());
        Ok(ExitCode::SUCCESS)
    } else if let Some(filename) = matches.get_one::<String>("file") {
        let failed = match &filename[..] {
            "-" => {
                let stdin_handle = stdin();
                repl::noninteractive(stdin_handle.lock(), &config, false)?
            }
            _ => {
                let file = File::open(&filename)
                    .wrap_err(format!("Failed to open input file `{filename}`"))?;
                repl::noninteractive(BufReader::new(file), &config, false)?
            }
        };
        Ok(if failed {
            ExitCode::FAILURE
        } else {
            ExitCode::SUCCESS
        })
    } else if let Some(exprs) = matches.get_many::<String>("EXPR") {
        let mut runner = Runner::new(config);
        let mut exit_code = ExitCode::SUCCESS;
        for expr in exprs {
            println!("{}", runner.echo(expr));
            let (output, failed) = runner.execute(expr);
            if let Some(output) = output {
                println!("{}", output);
            }
            if failed {
                exit_code = ExitCode::FAILURE;
            }
        }
        Ok(exit_code)
    } else {
        repl::interactive(config).map(|_| ExitCode::SUCCESS)
    }
}
