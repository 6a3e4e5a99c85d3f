// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use displaydoc::Display;
use serde_derive::{Deserialize, Serialize};
use thiserror::Error;

/// The reason an evaluation failed.
///
/// Each failure carries exactly one kind, raised where it is detected
/// and passed up unchanged through every enclosing sub-expression.
#[derive(Error, Display, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ErrorKind {
    /// Division by 0.
    DivisionByZero,
    /// Tangent undefined.
    TanUndef,
    /// Secant undefined.
    SecUndef,
    /// Cosecant undefined.
    CscUndef,
    /// Cotangent undefined.
    CotUndef,
    /// Ln undefined.
    LnUndef,
    /// Arcsin undefined.
    ArcsinUndef,
    /// Arccos undefined.
    ArccosUndef,
    /// Arcsec undefined.
    ArcsecUndef,
    /// Arccsc undefined.
    ArccscUndef,
    /// Csch undefined.
    CschUndef,
    /// Coth undefined.
    CothUndef,
    /// Arccosh undefined.
    ArccoshUndef,
    /// Arctanh undefined.
    ArctanhUndef,
    /// Arcsech undefined.
    ArcsechUndef,
    /// Arccsch undefined.
    ArccschUndef,
    /// Arccoth undefined.
    ArccothUndef,
    /// Negative number to non-integral power.
    NonIntegralPowerNegativeArg,
    /// Function undefined.
    FunctionUndef,
    /// Missing argument.
    MissingArg,
    /// Bracket mismatch.
    BracketMismatch,
    /// Invalid mode.
    InvalidMode,
    /// Invalid integral arguments.
    InvalidIntegralParameters,
    /// Invalid sum arguments.
    InvalidSumParameters,
    /// Invalid product arguments.
    InvalidProductParameters,
    /// Invalid rand argument.
    InvalidRandParameters,
    /// Rand argument too big.
    RandArgumentTooBig,
    /// Overflow.
    Overflow,
}

/// Invalid decimal literal `{0}`
#[derive(Error, Display, Debug, Clone, PartialEq, Eq)]
pub struct ParseDecimalError(pub(crate) String);

#[cfg(test)]
mod tests {
    use super::ErrorKind;

    #[test]
    fn messages() {
        assert_eq!(ErrorKind::DivisionByZero.to_string(), "Division by 0.");
        assert_eq!(
            ErrorKind::NonIntegralPowerNegativeArg.to_string(),
            "Negative number to non-integral power."
        );
        assert_eq!(ErrorKind::Overflow.to_string(), "Overflow.");
    }
}
