// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::num::NonZeroU32;

use decicalc_core::{preprocess, AngleMode, Decimal, ErrorKind, IntegralMode, Session};
use tracing::debug;

use crate::config::{parse_digits, Config, Display, Notation};
use crate::fmt::{format_error, format_value, to_ansi_string, FmtToken, Span};

/// Names of the `:` commands, for completion.
pub const COMMANDS: &[&str] = &[
    ":mode",
    ":integral",
    ":divisions",
    ":sto",
    ":fsto",
    ":fans",
    ":digits",
    ":notation",
    ":show",
];

/// What one line of input produced.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Value(Decimal),
    Error(ErrorKind),
    /// Settings or registers, as name and rendered value.
    Settings(Vec<(&'static str, String)>),
    /// Nothing to print, e.g. for a blank line.
    Empty,
}

impl Reply {
    pub fn is_error(&self) -> bool {
        matches!(self, Reply::Error(_))
    }
}

/// Drives one session on behalf of a front end: evaluates expressions,
/// applies `:` commands, and formats replies for the terminal.
pub struct Runner {
    session: Session,
    display: Display,
    config: Config,
}

impl Runner {
    pub fn new(config: Config) -> Runner {
        Runner {
            session: config.new_session(),
            display: config.display,
            config,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn display(&self) -> &Display {
        &self.display
    }

    /// Handles one line and returns what it produced.
    pub fn reply(&mut self, line: &str) -> Reply {
        let line = line.trim();
        if line.is_empty() {
            return Reply::Empty;
        }
        if let Some(command) = line.strip_prefix(':') {
            let (name, argument) = match command.find(char::is_whitespace) {
                Some(pos) => (&command[..pos], command[pos..].trim()),
                None => (command, ""),
            };
            return match self.command(name, argument) {
                Ok(reply) => reply,
                Err(err) => Reply::Error(err),
            };
        }
        match self.session.evaluate(&preprocess(line)) {
            Ok(value) => Reply::Value(value),
            Err(err) => Reply::Error(err),
        }
    }

    fn command(&mut self, name: &str, argument: &str) -> Result<Reply, ErrorKind> {
        debug!(command = name, argument, "command");
        let reply = match name {
            "mode" => {
                let mode = argument.parse::<AngleMode>()?;
                self.session.set_angle_mode(mode);
                Reply::Settings(vec![("angle_mode", mode.to_string())])
            }
            "integral" => {
                let mode = argument.parse::<IntegralMode>()?;
                self.session.set_integral_mode(mode);
                Reply::Settings(vec![("integral_mode", mode.to_string())])
            }
            "divisions" => {
                let divisions = argument
                    .parse::<NonZeroU32>()
                    .map_err(|_| ErrorKind::InvalidMode)?;
                self.session.set_divisions(divisions);
                Reply::Settings(vec![("divisions", divisions.to_string())])
            }
            "sto" => {
                let answer = self.session.answer().clone();
                let shown = format_value(&answer, &self.display);
                self.session.set_memory(answer);
                Reply::Settings(vec![("mem", shown)])
            }
            "fsto" | "fans" => {
                if argument.is_empty() {
                    return Err(ErrorKind::MissingArg);
                }
                let function = preprocess(argument);
                let shown = quoted(&function);
                if name == "fsto" {
                    self.session.set_function_memory(function);
                    Reply::Settings(vec![("fmem", shown)])
                } else {
                    self.session.set_function_answer(function);
                    Reply::Settings(vec![("fans", shown)])
                }
            }
            "digits" => {
                self.display.digits = parse_digits(argument)?;
                Reply::Settings(vec![("digits", self.display.digits.to_string())])
            }
            "notation" => {
                self.display.notation = argument.parse::<Notation>()?;
                Reply::Settings(vec![("notation", self.display.notation.to_string())])
            }
            "show" => Reply::Settings(self.settings()),
            _ => return Err(ErrorKind::FunctionUndef),
        };
        Ok(reply)
    }

    fn settings(&self) -> Vec<(&'static str, String)> {
        let session = &self.session;
        vec![
            ("angle_mode", session.angle_mode().to_string()),
            ("integral_mode", session.integral_mode().to_string()),
            ("divisions", session.divisions().to_string()),
            ("digits", self.display.digits.to_string()),
            ("notation", self.display.notation.to_string()),
            ("ans", format_value(session.answer(), &self.display)),
            ("mem", format_value(session.memory(), &self.display)),
            ("fans", quoted(session.function_answer())),
            ("fmem", quoted(session.function_memory())),
        ]
    }

    /// Turns a reply into styled text. Returns `None` when there is
    /// nothing to print.
    pub fn format(&self, reply: &Reply) -> Option<String> {
        let spans: Vec<Span> = match reply {
            Reply::Value(value) => vec![(FmtToken::Result, format_value(value, &self.display))],
            Reply::Error(err) => vec![(FmtToken::Error, format_error(err))],
            Reply::Settings(settings) => {
                let mut spans = vec![];
                for (i, (name, value)) in settings.iter().enumerate() {
                    if i > 0 {
                        spans.push((FmtToken::Plain, "\n".to_owned()));
                    }
                    spans.push((FmtToken::PropName, (*name).to_owned()));
                    spans.push((FmtToken::Plain, " = ".to_owned()));
                    spans.push((FmtToken::Plain, value.clone()));
                }
                spans
            }
            Reply::Empty => return None,
        };
        Some(to_ansi_string(&self.config, &spans))
    }

    /// An error line for a problem outside evaluation.
    pub fn error_line(&self, message: &str) -> String {
        to_ansi_string(&self.config, &[(FmtToken::Error, format!("Error. {}", message))])
    }

    /// The `> input` line echoed before a result.
    pub fn echo(&self, input: &str) -> String {
        to_ansi_string(
            &self.config,
            &[
                (FmtToken::Plain, "> ".to_owned()),
                (FmtToken::UserInput, input.to_owned()),
            ],
        )
    }

    /// Handles one line and formats the reply, flagging failures.
    pub fn execute(&mut self, line: &str) -> (Option<String>, bool) {
        let reply = self.reply(line);
        (self.format(&reply), reply.is_error())
    }
}

fn quoted(text: &str) -> String {
    format!("\"{}\"", text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn runner() -> Runner {
        let mut config = Config::default();
        config.colors.enabled = Some(false);
        Runner::new(config)
    }

    #[test]
    fn echo_uses_input_style() {
        assert_eq!(runner().echo("2 + 2"), "> 2 + 2");
        let mut config = Config::default();
        config.colors.enabled = Some(true);
        let echo = Runner::new(config).echo("2 + 2");
        assert!(echo.starts_with("> "), "{:?}", echo);
        assert!(echo.contains("\x1b[1m2 + 2"), "{:?}", echo);
        assert_eq!(
            runner().error_line("Line is not valid UTF-8."),
            "Error. Line is not valid UTF-8."
        );
    }

    fn run(runner: &mut Runner, line: &str) -> String {
        runner.execute(line).0.unwrap_or_default()
    }

    #[test]
    fn evaluates_and_keeps_answer() {
        let mut runner = runner();
        assert_eq!(run(&mut runner, "1/3"), "0.333333");
        assert_eq!(run(&mut runner, "6*7"), "42");
        assert_eq!(run(&mut runner, "ans+1"), "43");
        assert_eq!(run(&mut runner, "ans/0"), "Error. Division by 0.");
        assert_eq!(runner.session().answer().to_string(), "43");
    }

    #[test]
    fn blank_lines_print_nothing() {
        let mut runner = runner();
        assert_eq!(runner.execute("   "), (None, false));
    }

    #[test]
    fn mode_commands() {
        let mut runner = runner();
        assert_eq!(run(&mut runner, ":mode deg"), "angle_mode = degrees");
        assert_eq!(run(&mut runner, "sin(30)"), "0.5");
        assert_eq!(run(&mut runner, ":mode grad"), "Error. Invalid mode.");
        assert_eq!(runner.session().angle_mode(), AngleMode::Degrees);
        assert_eq!(run(&mut runner, ":integral trap"), "integral_mode = trapezoid");
        assert_eq!(run(&mut runner, ":divisions 10"), "divisions = 10");
        assert_eq!(run(&mut runner, ":divisions 0"), "Error. Invalid mode.");
        assert_eq!(runner.session().divisions().get(), 10);
        assert_eq!(run(&mut runner, ":bogus"), "Error. Function undefined.");
    }

    #[test]
    fn register_commands() {
        let mut runner = runner();
        run(&mut runner, "2.5");
        assert_eq!(run(&mut runner, ":sto"), "mem = 2.5");
        assert_eq!(run(&mut runner, ":fsto 2x"), "fmem = \"2*x\"");
        assert_eq!(run(&mut runner, ":fans x + 1"), "fans = \"x+1\"");
        assert_eq!(run(&mut runner, ":fsto"), "Error. Missing argument.");
        assert_eq!(run(&mut runner, "mem*4"), "10");
        assert_eq!(run(&mut runner, "sum(fmem,1,3)"), "12");
        assert_eq!(run(&mut runner, "product(fans,1,3)"), "24");
    }

    #[test]
    fn display_commands() {
        let mut runner = runner();
        assert_eq!(run(&mut runner, ":digits 3"), "digits = 3");
        assert_eq!(run(&mut runner, "123456"), "1.23E+5");
        assert_eq!(run(&mut runner, ":notation eng"), "notation = engineering");
        assert_eq!(run(&mut runner, "ans"), "123E+3");
        assert_eq!(run(&mut runner, ":digits 40"), "Error. Invalid mode.");
        assert_eq!(runner.display().digits, 3);
    }

    #[test]
    fn show_lists_everything() {
        let mut runner = runner();
        run(&mut runner, "7");
        assert_eq!(
            run(&mut runner, ":show"),
            "angle_mode = radians\n\
             integral_mode = simpson38\n\
             divisions = 1000\n\
             digits = 6\n\
             notation = scientific\n\
             ans = 7\n\
             mem = 0\n\
             fans = \"\"\n\
             fmem = \"\""
        );
    }
}
