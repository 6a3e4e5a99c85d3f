// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use nu_ansi_term::{AnsiString, AnsiStrings};

use decicalc_core::{Decimal, ErrorKind};

use crate::config::{Config, Display, Notation, Theme};

/// What a piece of output text is, for styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FmtToken {
    Plain,
    /// A computed value.
    Result,
    Error,
    /// Text echoed back from the user.
    UserInput,
    /// A setting or register name in `:show` output.
    PropName,
}

/// A run of output text and how to style it.
pub type Span = (FmtToken, String);

/// Rounds a value to the configured significant digits and renders it
/// in the configured notation.
pub fn format_value(value: &Decimal, display: &Display) -> String {
    let rounded = value.round(display.digits());
    match display.notation {
        Notation::Scientific => rounded.to_scientific_string(),
        Notation::Engineering => rounded.to_engineering_string(),
    }
}

pub fn format_error(err: &ErrorKind) -> String {
    format!("Error. {}", err)
}

fn to_ansi<'a>(theme: &Theme, spans: &'a [Span]) -> Vec<AnsiString<'a>> {
    spans
        .iter()
        .map(|(token, text)| theme.get_style(*token).paint(&text[..]))
        .collect()
}

pub(crate) fn to_ansi_string(config: &Config, spans: &[Span]) -> String {
    let strings = to_ansi(config.get_theme(), spans);
    let strings = AnsiStrings(&strings);
    format!("{}", strings)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn display(digits: u64, notation: Notation) -> Display {
        Display { digits, notation }
    }

    #[test]
    fn rounding_for_display() {
        let third = "0.33333333333333333333333333333333".parse().unwrap();
        assert_eq!(
            format_value(&third, &display(6, Notation::Scientific)),
            "0.333333"
        );
        let big = "123456789".parse().unwrap();
        assert_eq!(
            format_value(&big, &display(3, Notation::Scientific)),
            "1.23E+8"
        );
        assert_eq!(
            format_value(&big, &display(3, Notation::Engineering)),
            "123E+6"
        );
        let exact = "42".parse().unwrap();
        assert_eq!(format_value(&exact, &display(6, Notation::Scientific)), "42");
    }

    #[test]
    fn error_lines() {
        assert_eq!(format_error(&ErrorKind::DivisionByZero), "Error. Division by 0.");
        assert_eq!(format_error(&ErrorKind::InvalidMode), "Error. Invalid mode.");
    }

    #[test]
    fn plain_when_colors_disabled() {
        let mut config = Config::default();
        config.colors.enabled = Some(false);
        let spans = vec![
            (FmtToken::PropName, "ans".to_owned()),
            (FmtToken::Plain, " = ".to_owned()),
            (FmtToken::Result, "3".to_owned()),
        ];
        assert_eq!(to_ansi_string(&config, &spans), "ans = 3");
    }

    #[test]
    fn styled_when_colors_enabled() {
        let mut config = Config::default();
        config.colors.enabled = Some(true);
        let spans = vec![(FmtToken::Error, "Error. Overflow.".to_owned())];
        assert_eq!(
            to_ansi_string(&config, &spans),
            "\x1b[31mError. Overflow.\x1b[0m"
        );
    }
}
