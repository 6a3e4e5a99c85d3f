// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::convert::TryFrom;

use tracing::trace;

use super::aggregate;
use super::session::{AngleMode, Session};
use crate::error::ErrorKind;
use crate::math::{self, consts, MathResult};
use crate::parsing::text::{
    brackets_balanced, is_all_brackets, is_exponent_sign, is_numeric_literal, normalize_case,
    strip_matched_wrapping,
};
use crate::types::Decimal;

const PI_TEXT: &str = "\u{03C0}";

pub(crate) type EvalResult = Result<Decimal, ErrorKind>;

/// A named function of one argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Function {
    Sin,
    Cos,
    Tan,
    Sec,
    Csc,
    Cot,
    Exp,
    Ln,
    Abs,
    Arcsin,
    Arccos,
    Arctan,
    Arcsec,
    Arccsc,
    Arccot,
    Sinh,
    Cosh,
    Tanh,
    Sech,
    Csch,
    Coth,
    Arcsinh,
    Arccosh,
    Arctanh,
    Arcsech,
    Arccsch,
    Arccoth,
    Sqrt,
}

impl Function {
    pub fn name(&self) -> &'static str {
        match *self {
            Function::Sin => "sin",
            Function::Cos => "cos",
            Function::Tan => "tan",
            Function::Sec => "sec",
            Function::Csc => "csc",
            Function::Cot => "cot",
            Function::Exp => "exp",
            Function::Ln => "ln",
            Function::Abs => "abs",
            Function::Arcsin => "arcsin",
            Function::Arccos => "arccos",
            Function::Arctan => "arctan",
            Function::Arcsec => "arcsec",
            Function::Arccsc => "arccsc",
            Function::Arccot => "arccot",
            Function::Sinh => "sinh",
            Function::Cosh => "cosh",
            Function::Tanh => "tanh",
            Function::Sech => "sech",
            Function::Csch => "csch",
            Function::Coth => "coth",
            Function::Arcsinh => "arcsinh",
            Function::Arccosh => "arccosh",
            Function::Arctanh => "arctanh",
            Function::Arcsech => "arcsech",
            Function::Arccsch => "arccsch",
            Function::Arccoth => "arccoth",
            Function::Sqrt => "sqrt",
        }
    }

    /// Applies the function, reading and returning angles in `mode`.
    pub fn apply(&self, x: &Decimal, mode: AngleMode) -> MathResult {
        let degrees = mode == AngleMode::Degrees;
        match *self {
            Function::Sin if degrees => Ok(math::sin_deg(x)),
            Function::Sin => Ok(math::sin(x)),
            Function::Cos if degrees => Ok(math::cos_deg(x)),
            Function::Cos => Ok(math::cos(x)),
            Function::Tan if degrees => math::tan_deg(x),
            Function::Tan => math::tan(x),
            Function::Sec if degrees => math::sec_deg(x),
            Function::Sec => math::sec(x),
            Function::Csc if degrees => math::csc_deg(x),
            Function::Csc => math::csc(x),
            Function::Cot if degrees => math::cot_deg(x),
            Function::Cot => math::cot(x),
            Function::Arcsin if degrees => math::arcsin_deg(x),
            Function::Arcsin => math::arcsin(x),
            Function::Arccos if degrees => math::arccos_deg(x),
            Function::Arccos => math::arccos(x),
            Function::Arctan if degrees => Ok(math::arctan_deg(x)),
            Function::Arctan => Ok(math::arctan(x)),
            Function::Arcsec if degrees => math::arcsec_deg(x),
            Function::Arcsec => math::arcsec(x),
            Function::Arccsc if degrees => math::arccsc_deg(x),
            Function::Arccsc => math::arccsc(x),
            Function::Arccot if degrees => Ok(math::arccot_deg(x)),
            Function::Arccot => Ok(math::arccot(x)),
            Function::Exp => math::exp(x),
            Function::Ln => math::ln(x),
            Function::Abs => Ok(x.abs()),
            Function::Sqrt => math::sqrt(x),
            Function::Sinh => math::sinh(x),
            Function::Cosh => math::cosh(x),
            Function::Tanh => math::tanh(x),
            Function::Sech => math::sech(x),
            Function::Csch => math::csch(x),
            Function::Coth => math::coth(x),
            Function::Arcsinh => math::arcsinh(x),
            Function::Arccosh => math::arccosh(x),
            Function::Arctanh => math::arctanh(x),
            Function::Arcsech => math::arcsech(x),
            Function::Arccsch => math::arccsch(x),
            Function::Arccoth => math::arccoth(x),
        }
    }
}

/// What a name prefix dispatches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Unary(Function),
    Integral,
    Sum,
    Product,
    Rand,
}

/// Name prefixes, opening bracket included, in the order they are
/// tried.
pub const OPERATIONS: &[(&str, Operation)] = &[
    ("sin(", Operation::Unary(Function::Sin)),
    ("cos(", Operation::Unary(Function::Cos)),
    ("tan(", Operation::Unary(Function::Tan)),
    ("sec(", Operation::Unary(Function::Sec)),
    ("csc(", Operation::Unary(Function::Csc)),
    ("cot(", Operation::Unary(Function::Cot)),
    ("exp(", Operation::Unary(Function::Exp)),
    ("ln(", Operation::Unary(Function::Ln)),
    ("abs(", Operation::Unary(Function::Abs)),
    ("arcsin(", Operation::Unary(Function::Arcsin)),
    ("arccos(", Operation::Unary(Function::Arccos)),
    ("arctan(", Operation::Unary(Function::Arctan)),
    ("arcsec(", Operation::Unary(Function::Arcsec)),
    ("arccsc(", Operation::Unary(Function::Arccsc)),
    ("arccot(", Operation::Unary(Function::Arccot)),
    ("sinh(", Operation::Unary(Function::Sinh)),
    ("cosh(", Operation::Unary(Function::Cosh)),
    ("tanh(", Operation::Unary(Function::Tanh)),
    ("sech(", Operation::Unary(Function::Sech)),
    ("csch(", Operation::Unary(Function::Csch)),
    ("coth(", Operation::Unary(Function::Coth)),
    ("arcsinh(", Operation::Unary(Function::Arcsinh)),
    ("arccosh(", Operation::Unary(Function::Arccosh)),
    ("arctanh(", Operation::Unary(Function::Arctanh)),
    ("arcsech(", Operation::Unary(Function::Arcsech)),
    ("arccsch(", Operation::Unary(Function::Arccsch)),
    ("arccoth(", Operation::Unary(Function::Arccoth)),
    ("\u{221A}(", Operation::Unary(Function::Sqrt)),
    ("sqrt(", Operation::Unary(Function::Sqrt)),
    ("\u{222B}(", Operation::Integral),
    ("integral(", Operation::Integral),
    ("\u{03A3}(", Operation::Sum),
    ("sum(", Operation::Sum),
    ("\u{03A0}(", Operation::Product),
    ("product(", Operation::Product),
    ("rand(", Operation::Rand),
];

#[derive(Clone, Copy)]
enum Scan {
    Leftmost,
    Rightmost,
}

/// Finds `op` at bracket depth zero. Signs that belong to exponent
/// notation are passed over when `skip_exponents` is set.
fn find_top_level(chars: &[char], op: char, scan: Scan, skip_exponents: bool) -> Option<usize> {
    let matches = |pos: usize| {
        chars[pos] == op && !(skip_exponents && is_exponent_sign(chars, pos))
    };
    let mut depth = 0i64;
    match scan {
        Scan::Leftmost => {
            for (pos, &c) in chars.iter().enumerate() {
                match c {
                    '(' => depth += 1,
                    ')' => depth -= 1,
                    _ if depth == 0 && matches(pos) => return Some(pos),
                    _ => (),
                }
            }
        }
        Scan::Rightmost => {
            for (pos, &c) in chars.iter().enumerate().rev() {
                match c {
                    ')' => depth += 1,
                    '(' => depth -= 1,
                    _ if depth == 0 && matches(pos) => return Some(pos),
                    _ => (),
                }
            }
        }
    }
    None
}

fn collect(chars: &[char]) -> String {
    chars.iter().collect()
}

/// Splits around the operator at `pos`, failing when either side is
/// empty.
fn split_at(chars: &[char], pos: usize) -> Result<(String, String), ErrorKind> {
    if pos == 0 || pos + 1 >= chars.len() {
        return Err(ErrorKind::MissingArg);
    }
    Ok((collect(&chars[..pos]), collect(&chars[pos + 1..])))
}

/// Recursive text-splitting evaluator over one session.
pub(crate) struct Evaluator<'a> {
    session: &'a Session,
}

impl<'a> Evaluator<'a> {
    pub(crate) fn new(session: &'a Session) -> Evaluator<'a> {
        Evaluator { session }
    }

    pub(crate) fn session(&self) -> &Session {
        self.session
    }

    pub(crate) fn eval(&self, text: &str) -> EvalResult {
        if is_all_brackets(text) {
            return Err(ErrorKind::MissingArg);
        }
        if !brackets_balanced(text) {
            return Err(ErrorKind::BracketMismatch);
        }
        let text = strip_matched_wrapping(text);
        let chars: Vec<char> = text.chars().collect();

        if !is_numeric_literal(text) {
            if let Some(pos) = find_top_level(&chars, '+', Scan::Leftmost, true) {
                trace!(text, operator = "+", pos, "split");
                let (left, right) = split_at(&chars, pos)?;
                let left = self.eval(&left)?;
                return Ok(left + self.eval(&right)?);
            }
            if let Some(pos) = find_top_level(&chars, '-', Scan::Rightmost, true) {
                trace!(text, operator = "-", pos, "split");
                return self.difference(&chars, pos);
            }
        }
        if let Some(pos) = find_top_level(&chars, '*', Scan::Leftmost, false) {
            trace!(text, operator = "*", pos, "split");
            let (left, right) = split_at(&chars, pos)?;
            let left = self.eval(&left)?;
            return Ok(&left * &self.eval(&right)?);
        }
        if let Some(pos) = find_top_level(&chars, '/', Scan::Rightmost, false) {
            trace!(text, operator = "/", pos, "split");
            let (left, right) = split_at(&chars, pos)?;
            let divisor = self.eval(&right)?;
            if divisor.is_zero() {
                return Err(ErrorKind::DivisionByZero);
            }
            return self.eval(&left)?.checked_div(&divisor).ok_or(ErrorKind::DivisionByZero);
        }
        if let Some(pos) = find_top_level(&chars, '^', Scan::Rightmost, false) {
            trace!(text, operator = "^", pos, "split");
            let (left, right) = split_at(&chars, pos)?;
            let base = self.eval(&left)?;
            let exponent = self.eval(&right)?;
            return power(&base, &exponent);
        }
        if let Some(pos) = find_top_level(&chars, '%', Scan::Rightmost, false) {
            trace!(text, operator = "%", pos, "split");
            let (left, right) = split_at(&chars, pos)?;
            let divisor = self.eval(&right)?;
            if divisor.is_zero() {
                return Err(ErrorKind::DivisionByZero);
            }
            return self.eval(&left)?.checked_rem(&divisor).ok_or(ErrorKind::Overflow);
        }
        self.named(text)
    }

    fn difference(&self, chars: &[char], pos: usize) -> EvalResult {
        if pos == 0 && chars.len() > 1 {
            return Ok(-self.eval(&collect(&chars[1..]))?);
        }
        let (left, right) = split_at(chars, pos)?;
        let left = self.eval(&left)?;
        Ok(left - self.eval(&right)?)
    }

    /// Dispatches on a function name prefix, falling back to constants,
    /// registers and literals.
    fn named(&self, text: &str) -> EvalResult {
        let lowered = normalize_case(text);
        let found = OPERATIONS
            .iter()
            .find(|(prefix, _)| lowered.starts_with(*prefix));
        let (prefix, operation) = match found {
            Some(&(prefix, operation)) => (prefix, operation),
            None => return self.base(&lowered),
        };
        let chars: Vec<char> = lowered.chars().collect();
        let prefix_len = prefix.chars().count();

        match operation {
            Operation::Unary(function) => {
                if chars.len() < prefix_len + 2 {
                    return Err(ErrorKind::MissingArg);
                }
                let argument = self.eval(&collect(&chars[prefix_len - 1..]))?;
                function.apply(&argument, self.session.angle_mode())
            }
            Operation::Rand => aggregate::rand(self, &chars),
            kind => {
                if chars.len() < prefix_len + 6 {
                    return Err(ErrorKind::MissingArg);
                }
                let invalid = match kind {
                    Operation::Integral => ErrorKind::InvalidIntegralParameters,
                    Operation::Sum => ErrorKind::InvalidSumParameters,
                    _ => ErrorKind::InvalidProductParameters,
                };
                let args = aggregate::Arguments::parse(&chars, prefix_len, invalid)?;
                match kind {
                    Operation::Integral => aggregate::integral(self, &args),
                    Operation::Sum => aggregate::sum(self, &args),
                    _ => aggregate::product(self, &args),
                }
            }
        }
    }

    fn base(&self, lowered: &str) -> EvalResult {
        let lowered = strip_matched_wrapping(lowered);
        match lowered {
            "ans" => Ok(self.session.answer().clone()),
            "mem" => Ok(self.session.memory().clone()),
            "e" => Ok((*consts::E).clone()),
            "pi" | PI_TEXT => Ok((*consts::PI).clone()),
            _ => lowered.parse().map_err(|_| ErrorKind::FunctionUndef),
        }
    }
}

/// `base ^ exponent` with the evaluator's checks: integral exponents
/// use exact repeated squaring, everything else goes through the
/// kernel.
fn power(base: &Decimal, exponent: &Decimal) -> EvalResult {
    if base.is_zero() && exponent.is_negative() {
        return Err(ErrorKind::DivisionByZero);
    }
    if base.is_negative() && exponent.has_fraction() {
        return Err(ErrorKind::NonIntegralPowerNegativeArg);
    }
    let small = exponent
        .to_i64()
        .filter(|n| exponent.is_integer() && i32::try_from(*n).is_ok());
    match small.and_then(|n| base.powi(n)) {
        Some(value) => Ok(value),
        None => math::pow(base, exponent),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(text: &str) -> Vec<char> {
        text.chars().collect()
    }

    fn eval(text: &str) -> EvalResult {
        Session::new().compute(text)
    }

    fn d(value: &str) -> Decimal {
        value.parse().unwrap()
    }

    #[test]
    fn top_level_scan() {
        let text = chars("(1+2)+3+4");
        assert_eq!(find_top_level(&text, '+', Scan::Leftmost, true), Some(5));
        assert_eq!(find_top_level(&text, '+', Scan::Rightmost, true), Some(7));
        assert_eq!(find_top_level(&chars("1e-3"), '-', Scan::Rightmost, true), None);
        assert_eq!(find_top_level(&chars("2-1e-3"), '-', Scan::Rightmost, true), Some(1));
        assert_eq!(find_top_level(&chars("(1*2)"), '*', Scan::Leftmost, false), None);
    }

    #[test]
    fn tiers() {
        assert_eq!(eval("2+3*4"), Ok(d("14")));
        assert_eq!(eval("5-3-2"), Ok(d("0")));
        assert_eq!(eval("5+3-2"), Ok(d("6")));
        assert_eq!(eval("2^3^2"), Ok(d("64")));
        assert_eq!(eval("8/4/2"), Ok(d("1")));
        assert_eq!(eval("7%4"), Ok(d("3")));
        assert_eq!(eval("-7%4"), Ok(d("-3")));
        assert_eq!(eval("-(2+3)"), Ok(d("-5")));
        assert_eq!(eval("1e-3*2"), Ok(d("0.002")));
        assert_eq!(eval("2^(-1)"), Ok(d("0.5")));
        assert_eq!(eval("2^-1"), Err(ErrorKind::MissingArg));
        assert_eq!(eval("(-8)^(1/3)"), Err(ErrorKind::NonIntegralPowerNegativeArg));
    }

    #[test]
    fn missing_operands() {
        assert_eq!(eval("1+"), Err(ErrorKind::MissingArg));
        assert_eq!(eval("+(1)"), Err(ErrorKind::MissingArg));
        assert_eq!(eval("+1"), Ok(d("1")));
        assert_eq!(eval("-"), Err(ErrorKind::MissingArg));
        assert_eq!(eval("2-"), Err(ErrorKind::MissingArg));
        assert_eq!(eval("*2"), Err(ErrorKind::MissingArg));
        assert_eq!(eval("2/"), Err(ErrorKind::MissingArg));
        assert_eq!(eval("()"), Err(ErrorKind::MissingArg));
        assert_eq!(eval(""), Err(ErrorKind::MissingArg));
        assert_eq!(eval("sin("), Err(ErrorKind::BracketMismatch));
        assert_eq!(eval("sin()"), Err(ErrorKind::MissingArg));
    }

    #[test]
    fn divisor_first() {
        assert_eq!(eval("ln(0)/0"), Err(ErrorKind::DivisionByZero));
        assert_eq!(eval("1/ln(0)"), Err(ErrorKind::LnUndef));
        assert_eq!(eval("ln(0)%0"), Err(ErrorKind::DivisionByZero));
        assert_eq!(eval("0^(-1)"), Err(ErrorKind::DivisionByZero));
    }

    #[test]
    fn names_and_constants() {
        assert_eq!(eval("SIN(0)"), Ok(d("0")));
        assert_eq!(eval("abs(-2.5)"), Ok(d("2.5")));
        assert_eq!(eval("PI"), Ok((*consts::PI).clone()));
        assert_eq!(eval("\u{03C0}"), Ok((*consts::PI).clone()));
        assert_eq!(eval("e"), Ok((*consts::E).clone()));
        assert_eq!(eval("(ans)"), Ok(d("0")));
        assert_eq!(eval("foo"), Err(ErrorKind::FunctionUndef));
        assert_eq!(eval("log(2)"), Err(ErrorKind::FunctionUndef));
        assert_eq!(eval("\u{221A}(16)").map(|v| v.round(20)), Ok(d("4")));
    }

    #[test]
    fn degree_mode() {
        let mut session = Session::new();
        session.set_angle_mode(AngleMode::Degrees);
        assert_eq!(session.compute("arccot(0)"), Ok(d("90")));
        let half = session.compute("sin(30)").unwrap();
        assert!((half - d("0.5")).abs() < d("1e-28"));
    }
}
