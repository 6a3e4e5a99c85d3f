// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;

use serde_derive::{Deserialize, Serialize};
use tracing::debug;

use super::eval::Evaluator;
use super::substitute::{expand_registers, FunctionText};
use crate::error::ErrorKind;
use crate::types::Decimal;

/// Unit used by the trigonometric functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AngleMode {
    Radians,
    Degrees,
}

impl AngleMode {
    pub fn name(&self) -> &'static str {
        match *self {
            AngleMode::Radians => "radians",
            AngleMode::Degrees => "degrees",
        }
    }
}

impl Default for AngleMode {
    fn default() -> Self {
        AngleMode::Radians
    }
}

impl FromStr for AngleMode {
    type Err = ErrorKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match &s.trim().to_ascii_lowercase()[..] {
            "radians" | "rad" => Ok(AngleMode::Radians),
            "degrees" | "deg" => Ok(AngleMode::Degrees),
            _ => Err(ErrorKind::InvalidMode),
        }
    }
}

impl fmt::Display for AngleMode {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.write_str(self.name())
    }
}

/// Quadrature rule used by `integral(`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntegralMode {
    /// Right endpoint of each of N panels.
    Rectangle,
    /// Centre of each of N panels.
    Midpoint,
    /// N panels, endpoints weighted 1 and interior points 2.
    Trapezoid,
    /// Simpson's 1/3 rule over 2N panels.
    Simpson,
    /// Simpson's 3/8 rule over 3N panels.
    Simpson38,
}

impl IntegralMode {
    pub const ALL: [IntegralMode; 5] = [
        IntegralMode::Rectangle,
        IntegralMode::Midpoint,
        IntegralMode::Trapezoid,
        IntegralMode::Simpson,
        IntegralMode::Simpson38,
    ];

    pub fn name(&self) -> &'static str {
        match *self {
            IntegralMode::Rectangle => "rectangle",
            IntegralMode::Midpoint => "midpoint",
            IntegralMode::Trapezoid => "trapezoid",
            IntegralMode::Simpson => "simpson",
            IntegralMode::Simpson38 => "simpson38",
        }
    }
}

impl Default for IntegralMode {
    fn default() -> Self {
        IntegralMode::Simpson38
    }
}

impl FromStr for IntegralMode {
    type Err = ErrorKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mode = match &s.trim().to_ascii_lowercase()[..] {
            "rectangle" | "rect" => IntegralMode::Rectangle,
            "midpoint" | "mid" => IntegralMode::Midpoint,
            "trapezoid" | "trap" => IntegralMode::Trapezoid,
            "simpson" | "simpson13" | "simpson-1/3" => IntegralMode::Simpson,
            "simpson38" | "simpson-3/8" => IntegralMode::Simpson38,
            _ => return Err(ErrorKind::InvalidMode),
        };
        Ok(mode)
    }
}

impl fmt::Display for IntegralMode {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.write_str(self.name())
    }
}

/// Modes and registers of one calculator.
///
/// A session belongs to whoever drives the calculator. Evaluation only
/// reads it, except for [`Session::evaluate`], which stores a successful
/// result in the answer register. Concurrent callers need a session
/// each, or their own locking.
#[derive(Debug, Clone)]
pub struct Session {
    angle_mode: AngleMode,
    integral_mode: IntegralMode,
    divisions: NonZeroU32,
    answer: Decimal,
    function_answer: String,
    memory: Decimal,
    function_memory: String,
}

impl Default for Session {
    fn default() -> Self {
        Session::new()
    }
}

impl Session {
    /// Number of panels the quadrature rules start from.
    pub const DEFAULT_DIVISIONS: u32 = 1000;

    /// Radians, Simpson's 3/8 rule over 1000 divisions, and zeroed
    /// registers.
    pub fn new() -> Session {
        Session {
            angle_mode: AngleMode::default(),
            integral_mode: IntegralMode::default(),
            divisions: NonZeroU32::new(Session::DEFAULT_DIVISIONS).unwrap_or(NonZeroU32::MIN),
            answer: Decimal::zero(),
            function_answer: String::new(),
            memory: Decimal::zero(),
            function_memory: String::new(),
        }
    }

    pub fn angle_mode(&self) -> AngleMode {
        self.angle_mode
    }

    pub fn set_angle_mode(&mut self, mode: AngleMode) {
        debug!(mode = mode.name(), "angle mode changed");
        self.angle_mode = mode;
    }

    pub fn integral_mode(&self) -> IntegralMode {
        self.integral_mode
    }

    pub fn set_integral_mode(&mut self, mode: IntegralMode) {
        debug!(mode = mode.name(), "integral mode changed");
        self.integral_mode = mode;
    }

    /// Base panel count for the quadrature rules. Simpson's rules use
    /// twice and three times as many panels.
    pub fn divisions(&self) -> NonZeroU32 {
        self.divisions
    }

    pub fn set_divisions(&mut self, divisions: NonZeroU32) {
        debug!(divisions = divisions.get(), "divisions changed");
        self.divisions = divisions;
    }

    /// Value of `ans`.
    pub fn answer(&self) -> &Decimal {
        &self.answer
    }

    pub fn set_answer(&mut self, answer: Decimal) {
        self.answer = answer;
    }

    /// Text substituted for `fans` inside aggregate functions.
    pub fn function_answer(&self) -> &str {
        &self.function_answer
    }

    pub fn set_function_answer(&mut self, function: impl Into<String>) {
        self.function_answer = function.into();
    }

    /// Value of `mem`.
    pub fn memory(&self) -> &Decimal {
        &self.memory
    }

    pub fn set_memory(&mut self, memory: Decimal) {
        self.memory = memory;
    }

    /// Text substituted for `fmem` inside aggregate functions.
    pub fn function_memory(&self) -> &str {
        &self.function_memory
    }

    pub fn set_function_memory(&mut self, function: impl Into<String>) {
        self.function_memory = function.into();
    }

    /// Evaluates `text` without touching any register.
    ///
    /// `text` is used as given; raw user input should go through
    /// [`preprocess`](crate::parsing::text::preprocess) first.
    pub fn compute(&self, text: &str) -> Result<Decimal, ErrorKind> {
        Evaluator::new(self).eval(text)
    }

    /// Evaluates `text` and stores the result as `ans` if it succeeds.
    /// A failure leaves the session as it was.
    pub fn evaluate(&mut self, text: &str) -> Result<Decimal, ErrorKind> {
        let value = self.compute(text)?;
        self.answer = value.clone();
        Ok(value)
    }

    /// Evaluates a function of `x` at one point, after expanding the
    /// function registers. Plotting front ends sample curves with this.
    pub fn evaluate_at(&self, function: &str, x: &Decimal) -> Result<Decimal, ErrorKind> {
        let function = FunctionText::parse(&expand_registers(function, self));
        self.compute(&function.render(x))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let session = Session::new();
        assert_eq!(session.angle_mode(), AngleMode::Radians);
        assert_eq!(session.integral_mode(), IntegralMode::Simpson38);
        assert_eq!(session.divisions().get(), 1000);
        assert_eq!(*session.answer(), Decimal::zero());
        assert_eq!(session.function_answer(), "");
        assert_eq!(*session.memory(), Decimal::zero());
        assert_eq!(session.function_memory(), "");
    }

    #[test]
    fn mode_names() {
        assert_eq!("deg".parse::<AngleMode>(), Ok(AngleMode::Degrees));
        assert_eq!("Radians".parse::<AngleMode>(), Ok(AngleMode::Radians));
        assert_eq!("gradians".parse::<AngleMode>(), Err(ErrorKind::InvalidMode));
        for mode in IntegralMode::ALL.iter() {
            assert_eq!(mode.name().parse::<IntegralMode>(), Ok(*mode));
        }
        assert_eq!("boole".parse::<IntegralMode>(), Err(ErrorKind::InvalidMode));
    }

    #[test]
    fn failed_evaluation_keeps_answer() {
        let mut session = Session::new();
        assert_eq!(session.evaluate("2*3"), Ok(Decimal::from(6i64)));
        assert_eq!(session.evaluate("1/0"), Err(ErrorKind::DivisionByZero));
        assert_eq!(*session.answer(), Decimal::from(6i64));
        assert_eq!(session.compute("ans+1"), Ok(Decimal::from(7i64)));
        assert_eq!(*session.answer(), Decimal::from(6i64));
    }

    #[test]
    fn sample_points() {
        let mut session = Session::new();
        session.set_function_memory("x^2");
        let at = session.evaluate_at("fmem+1", &Decimal::from(3i64));
        assert_eq!(at, Ok(Decimal::from(10i64)));
    }
}
