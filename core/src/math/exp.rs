// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::consts::{flush_to_zero, CONVERGENCE, E, LN_LOWER, LN_UPPER};
use super::MathResult;
use crate::error::ErrorKind;
use crate::types::{Decimal, INTEGRAL_PRECISION};

/// Natural exponential.
///
/// The integral part of `|x|` is taken out as a power of e, leaving a
/// remainder in `(0, 1]` for the Taylor series. Negative arguments
/// invert the result.
pub fn exp(x: &Decimal) -> MathResult {
    let negative = x.is_negative();
    let mut reduced = x.abs();

    let whole = reduced
        .to_i64()
        .filter(|whole| *whole <= i64::from(i32::MAX))
        .map(|whole| {
            if whole > 0 && reduced.is_integer() {
                whole - 1
            } else {
                whole
            }
        });
    let scale = whole.and_then(|whole| E.powi(whole));
    let (whole, scale) = match (whole, scale) {
        (Some(whole), Some(scale)) => (whole, scale),
        // Far below the convergence threshold.
        _ if negative => return Ok(Decimal::zero()),
        _ => return Err(ErrorKind::Overflow),
    };
    reduced = reduced - Decimal::from(whole);

    let mut term = Decimal::one();
    let mut sum = Decimal::one();
    let mut i = 1;
    loop {
        term = &term * &reduced.div_int(i);
        sum = &sum + &term;
        i += 1;
        if term.abs() < *CONVERGENCE {
            break;
        }
    }

    let mut result = &scale * &sum;
    if negative {
        result = Decimal::one().div_nonzero(&result);
    }
    Ok(flush_to_zero(result))
}

/// Natural logarithm, defined for positive `x`.
///
/// The argument is divided or multiplied by e until it sits close to 1,
/// then the series for `ln(1 + u)` runs on the remainder. Every step by
/// e adds or removes one from the result.
pub fn ln(x: &Decimal) -> MathResult {
    if !x.is_positive() {
        return Err(ErrorKind::LnUndef);
    }
    if x.is_one() {
        return Ok(Decimal::zero());
    }

    let mut reduced = x.clone();
    let mut count = 0i64;
    while reduced > *LN_UPPER {
        reduced = reduced.div_nonzero(&E);
        count += 1;
    }
    while reduced < *LN_LOWER {
        reduced = &reduced * &*E;
        count -= 1;
    }

    let u = reduced - Decimal::one();
    let negated = -&u;
    let mut numerator = u.clone();
    let mut sum = u;
    let mut i = 2;
    loop {
        numerator = &numerator * &negated;
        let term = numerator.div_int(i);
        sum = &sum + &term;
        i += 1;
        if term.abs() < *CONVERGENCE {
            break;
        }
    }

    Ok(flush_to_zero(sum + Decimal::from(count)))
}

/// `base` raised to `exponent`, through `exp(exponent * ln(base))`.
///
/// Negative bases only accept integral exponents, with the sign of the
/// result following the exponent's parity.
pub fn pow(base: &Decimal, exponent: &Decimal) -> MathResult {
    if exponent.is_zero() {
        return Ok(Decimal::one());
    }
    if base.is_positive() {
        return exp(&(exponent * &ln(base)?));
    }
    if base.is_zero() {
        return if exponent.is_positive() {
            Ok(Decimal::zero())
        } else {
            Err(ErrorKind::DivisionByZero)
        };
    }
    if exponent.has_fraction() {
        return Err(ErrorKind::NonIntegralPowerNegativeArg);
    }

    let magnitude = exp(&(exponent * &ln(&base.abs())?))?;
    let odd = exponent
        .round(INTEGRAL_PRECISION)
        .checked_rem(&Decimal::from(2i64))
        .map_or(false, |rem| !rem.is_zero());
    if odd {
        Ok(-magnitude)
    } else {
        Ok(magnitude)
    }
}

pub fn sqrt(x: &Decimal) -> MathResult {
    if x.is_negative() {
        return Err(ErrorKind::NonIntegralPowerNegativeArg);
    }
    if x.is_zero() {
        return Ok(Decimal::zero());
    }
    let half = Decimal::from_digits("5", 1);
    exp(&(&half * &ln(x)?))
}
