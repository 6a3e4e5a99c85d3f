// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::config::{history_path, Config};
use crate::runner::Runner;
use crate::CalcHelper;
use eyre::Result;
use rustyline::{config::Configurer, error::ReadlineError, CompletionType, Editor};
use std::io::{BufRead, ErrorKind};

/// Evaluates every line of `f` in one session, printing each reply.
/// Returns whether any line failed.
pub fn noninteractive<T: BufRead>(mut f: T, config: &Config, show_prompt: bool) -> Result<bool> {
    use std::io::{stdout, Write};

    let mut runner = Runner::new(config.clone());
    let mut any_failed = false;
    let mut line = String::new();
    loop {
        if show_prompt {
            print!("{}", config.calc.prompt);
        }
        stdout().flush()?;
        // A final line without a newline is still evaluated; nothing
        // read at all means end of input.
        match f.read_line(&mut line) {
            Ok(0) => return Ok(any_failed),
            Ok(_) => (),
            // The undecodable line is consumed, so reading can go on.
            Err(err) if err.kind() == ErrorKind::InvalidData => {
                println!("{}", runner.error_line("Line is not valid UTF-8."));
                any_failed = true;
                line.clear();
                continue;
            }
            Err(err) => return Err(eyre::eyre!(err).wrap_err("Failed to read input line")),
        }
        let (output, failed) = runner.execute(&line);
        if let Some(output) = output {
            println!("{}", output);
        }
        any_failed |= failed;
        line.clear();
    }
}

pub const HELP_TEXT: &str = "Type an expression to evaluate it, for example `2sin(pi/4)^2`.
Functions: sin cos tan sec csc cot, arc- and hyperbolic forms, exp ln abs sqrt,
  integral(f,lo,hi) sum(f,lo,hi) product(f,lo,hi) rand(n) rand().
Registers: ans mem fans fmem. Constants: pi e.
Commands: :mode rad|deg, :integral <rule>, :divisions <n>, :sto, :fsto <f>,
  :fans <f>, :digits <n>, :notation scientific|engineering, :show.
To quit, type `quit` or press Ctrl+D.";

pub fn interactive(config: Config) -> Result<()> {
    let mut runner = Runner::new(config.clone());
    let mut rl = Editor::<CalcHelper>::new();
    let helper = CalcHelper::new(config.clone());
    rl.set_helper(Some(helper));
    rl.set_completion_type(CompletionType::List);

    let hpath = history_path();
    if let Some(ref path) = hpath {
        match rl.load_history(path) {
            // Ignore file not found errors.
            Err(ReadlineError::Io(ref err)) if err.kind() == ErrorKind::NotFound => (),
            Err(err) => eprintln!("Loading history failed: {}", err),
            Ok(()) => (),
        };
    }

    let save_history = |rl: &mut Editor<CalcHelper>| {
        if let Some(ref path) = hpath {
            if let Some(parent) = path.parent() {
                // ignore error - if this fails, saving will as well.
                let _ = std::fs::create_dir_all(parent);
            }
            rl.save_history(path).unwrap_or_else(|e| {
                eprintln!("Saving history failed: {}", e);
            });
        }
    };

    loop {
        let readline = rl.readline(&config.calc.prompt);
        match readline {
            Ok(ref line) if line.trim() == "help" => {
                println!("{}", HELP_TEXT);
            }
            Ok(ref line) if matches!(line.trim(), "quit" | ":q" | "exit") => {
                save_history(&mut rl);
                break;
            }
            Ok(line) => {
                rl.add_history_entry(&line);
                if let (Some(output), _) = runner.execute(&line) {
                    println!("{}", output);
                }
            }
            Err(ReadlineError::Interrupted) => {}
            Err(ReadlineError::Eof) => {
                save_history(&mut rl);
                break;
            }
            Err(err) => {
                println!("{:?}", eyre::eyre!(err).wrap_err("Readline"));
                break;
            }
        }
    }

    Ok(())
}
