// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::error::ErrorKind;
use crate::parsing::text::preprocess;
use crate::runtime::Session;
use crate::types::Decimal;

/// Evaluates already preprocessed text and stores the result in the
/// answer register when it succeeds. A failure leaves the session
/// untouched.
pub fn evaluate(session: &mut Session, text: &str) -> Result<Decimal, ErrorKind> {
    session.evaluate(text)
}

/// Helper function that preprocesses a line of user input, evaluates
/// it, and updates the answer register used by `ans`.
pub fn eval(session: &mut Session, line: &str) -> Result<Decimal, ErrorKind> {
    evaluate(session, &preprocess(line))
}

/// A version of eval() that converts results and errors into plain-text
/// strings, with results rounded to `digits` significant digits.
pub fn one_line(session: &mut Session, line: &str, digits: u64) -> Result<String, String> {
    eval(session, line)
        .map(|value| value.round(digits).to_scientific_string())
        .map_err(|err| format!("Error. {}", err))
}

/// Returns `env!("CARGO_PKG_VERSION")`, a string in `x.y.z` format.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
