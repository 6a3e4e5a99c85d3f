// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Operators that take a function of `x` and bounds instead of two
//! operands: `integral(`, `sum(`, `product(`, plus `rand(`.

use num::BigInt;
use rand::{thread_rng, Rng};
use tracing::debug;

use super::eval::{EvalResult, Evaluator};
use super::session::IntegralMode;
use super::substitute::{expand_registers, FunctionText};
use crate::error::ErrorKind;
use crate::types::{Decimal, INTEGRAL_PRECISION, PRECISION};

/// The three comma-separated arguments of an aggregate call.
#[derive(Debug, PartialEq)]
pub(crate) struct Arguments {
    /// First argument, wrapped in brackets.
    pub(crate) function: String,
    pub(crate) lower: String,
    pub(crate) upper: String,
}

impl Arguments {
    /// Splits `chars`, a whole call whose name and opening bracket take
    /// `prefix_len` characters, at its two top-level commas.
    pub(crate) fn parse(
        chars: &[char],
        prefix_len: usize,
        invalid: ErrorKind,
    ) -> Result<Arguments, ErrorKind> {
        let mut commas = Vec::with_capacity(2);
        let mut depth = 0i64;
        for (pos, &c) in chars.iter().enumerate().skip(prefix_len) {
            match c {
                '(' => depth += 1,
                ')' => depth -= 1,
                ',' if depth == 0 => {
                    if commas.len() == 2 {
                        return Err(invalid);
                    }
                    commas.push(pos);
                }
                _ => (),
            }
        }
        let (first, second) = match commas[..] {
            [first, second] => (first, second),
            _ => return Err(invalid),
        };
        let upper = chars.get(second + 1..chars.len() - 1).ok_or(invalid)?;

        let mut function = String::from("(");
        function.extend(&chars[prefix_len..first]);
        function.push(')');
        Ok(Arguments {
            function,
            lower: chars[first + 1..second].iter().collect(),
            upper: upper.iter().collect(),
        })
    }
}

/// The function argument with registers expanded, ready to sample.
fn prepare(evaluator: &Evaluator<'_>, args: &Arguments) -> FunctionText {
    FunctionText::parse(&expand_registers(&args.function, evaluator.session()))
}

/// Weight of sample `i` out of `0..=panels` in a composite rule whose
/// interior weights cycle through `cycle`.
fn weight(i: u64, panels: u64, cycle: &[u64]) -> u64 {
    if i == 0 || i == panels {
        1
    } else {
        cycle[(i % cycle.len() as u64) as usize]
    }
}

/// Definite integral by the session's quadrature rule.
pub(crate) fn integral(evaluator: &Evaluator<'_>, args: &Arguments) -> EvalResult {
    let lower = evaluator.eval(&args.lower)?;
    let upper = evaluator.eval(&args.upper)?;
    let function = prepare(evaluator, args);
    let sample = |x: &Decimal| evaluator.eval(&function.render(x));

    let session = evaluator.session();
    let divisions = u64::from(session.divisions().get());
    let mode = session.integral_mode();
    debug!(
        mode = mode.name(),
        divisions,
        lower = %lower,
        upper = %upper,
        "integral"
    );

    let width = &upper - &lower;
    match mode {
        IntegralMode::Rectangle | IntegralMode::Midpoint => {
            let dx = width.div_int(divisions);
            let mut x = if mode == IntegralMode::Rectangle {
                &lower + &dx
            } else {
                &lower + &dx.div_int(2)
            };
            let mut sum = Decimal::zero();
            for _ in 0..divisions {
                sum = sum + sample(&x)?;
                x = x + &dx;
            }
            Ok(&sum * &dx)
        }
        IntegralMode::Trapezoid => {
            let dx = width.div_int(divisions);
            let sum = weighted_sum(&sample, lower, &dx, divisions, &[2])?;
            Ok(&sum * &dx.div_int(2))
        }
        IntegralMode::Simpson => {
            let panels = 2 * divisions;
            let dx = width.div_int(panels);
            let sum = weighted_sum(&sample, lower, &dx, panels, &[2, 4])?;
            Ok(&sum * &dx.div_int(3))
        }
        IntegralMode::Simpson38 => {
            let panels = 3 * divisions;
            let dx = width.div_int(panels);
            let sum = weighted_sum(&sample, lower, &dx, panels, &[2, 3, 3])?;
            Ok(&sum * &(&dx * &Decimal::from(3i64)).div_int(8))
        }
    }
}

/// Samples `panels + 1` evenly spaced points from `lower`, weighting the
/// ends by 1 and the interior by `cycle`.
fn weighted_sum<F>(
    sample: &F,
    lower: Decimal,
    dx: &Decimal,
    panels: u64,
    cycle: &[u64],
) -> EvalResult
where
    F: Fn(&Decimal) -> EvalResult,
{
    let mut x = lower;
    let mut sum = Decimal::zero();
    for i in 0..=panels {
        let value = sample(&x)?;
        sum = match weight(i, panels, cycle) {
            1 => sum + value,
            w => sum + &value * &Decimal::from(w),
        };
        x = x + dx;
    }
    Ok(sum)
}

/// Evaluates both bounds and checks they are ordered integers.
fn integer_bounds(
    evaluator: &Evaluator<'_>,
    args: &Arguments,
    invalid: ErrorKind,
) -> Result<(i64, i64), ErrorKind> {
    let lower = evaluator.eval(&args.lower)?;
    let upper = evaluator.eval(&args.upper)?;
    let lower = lower.to_rounded_i64().ok_or(invalid)?;
    let upper = upper.to_rounded_i64().ok_or(invalid)?;
    if lower > upper {
        return Err(invalid);
    }
    Ok((lower, upper))
}

pub(crate) fn sum(evaluator: &Evaluator<'_>, args: &Arguments) -> EvalResult {
    let (lower, upper) = integer_bounds(evaluator, args, ErrorKind::InvalidSumParameters)?;
    let function = prepare(evaluator, args);
    debug!(lower, upper, "sum");
    let mut total = Decimal::zero();
    for k in lower..=upper {
        total = total + evaluator.eval(&function.render(&Decimal::from(k)))?;
    }
    Ok(total)
}

pub(crate) fn product(evaluator: &Evaluator<'_>, args: &Arguments) -> EvalResult {
    let (lower, upper) = integer_bounds(evaluator, args, ErrorKind::InvalidProductParameters)?;
    let function = prepare(evaluator, args);
    debug!(lower, upper, "product");
    let mut total = Decimal::one();
    for k in lower..=upper {
        total = &total * &evaluator.eval(&function.render(&Decimal::from(k)))?;
    }
    Ok(total)
}

/// `rand()` samples `[0, 1)`, `rand(n)` an integer in `[0, n)`.
///
/// `chars` is the whole call, `rand(` included.
pub(crate) fn rand(evaluator: &Evaluator<'_>, chars: &[char]) -> EvalResult {
    const PREFIX_LEN: usize = 5;
    let mut rng = thread_rng();

    if chars.len() < PREFIX_LEN + 1 {
        return Err(ErrorKind::InvalidRandParameters);
    }
    if chars.len() == PREFIX_LEN + 1 {
        if chars[PREFIX_LEN] != ')' {
            return Err(ErrorKind::InvalidRandParameters);
        }
        let digits = 10u128.pow(PRECISION as u32);
        let mantissa = rng.gen_range(0..digits);
        return Ok(Decimal::new(BigInt::from(mantissa), PRECISION as i64));
    }

    let argument: String = chars[PREFIX_LEN - 1..].iter().collect();
    let bound = evaluator.eval(&argument)?.round(INTEGRAL_PRECISION);
    if !bound.is_integer() || !bound.is_positive() {
        return Err(ErrorKind::InvalidRandParameters);
    }
    let bound = bound
        .to_i64()
        .filter(|n| *n <= i64::from(i32::MAX))
        .ok_or(ErrorKind::RandArgumentTooBig)?;
    debug!(bound, "rand");
    Ok(Decimal::from(rng.gen_range(0..bound)))
}
