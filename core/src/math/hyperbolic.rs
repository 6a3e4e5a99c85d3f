// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::{divide, exp, ln, sqrt, MathResult};
use crate::error::ErrorKind;
use crate::types::Decimal;

/// `e^x` and `e^-x`.
fn exponentials(x: &Decimal) -> Result<(Decimal, Decimal), ErrorKind> {
    let positive = exp(x)?;
    let negative = divide(&Decimal::one(), &positive)?;
    Ok((positive, negative))
}

pub fn sinh(x: &Decimal) -> MathResult {
    let (positive, negative) = exponentials(x)?;
    Ok((positive - negative).div_int(2))
}

pub fn cosh(x: &Decimal) -> MathResult {
    let (positive, negative) = exponentials(x)?;
    Ok((positive + negative).div_int(2))
}

pub fn tanh(x: &Decimal) -> MathResult {
    let (positive, negative) = exponentials(x)?;
    divide(&(&positive - &negative), &(&positive + &negative))
}

pub fn sech(x: &Decimal) -> MathResult {
    divide(&Decimal::one(), &cosh(x)?)
}

pub fn csch(x: &Decimal) -> MathResult {
    if x.is_zero() {
        return Err(ErrorKind::CschUndef);
    }
    divide(&Decimal::one(), &sinh(x)?)
}

pub fn coth(x: &Decimal) -> MathResult {
    if x.is_zero() {
        return Err(ErrorKind::CothUndef);
    }
    let (positive, negative) = exponentials(x)?;
    divide(&(&positive + &negative), &(&positive - &negative))
}

/// `ln(x + sqrt(x^2 + 1))`.
pub fn arcsinh(x: &Decimal) -> MathResult {
    let root = sqrt(&(x * x + Decimal::one()))?;
    ln(&(x + &root))
}

/// `ln(x + sqrt(x^2 - 1))`, for `x >= 1`.
pub fn arccosh(x: &Decimal) -> MathResult {
    if *x < Decimal::one() {
        return Err(ErrorKind::ArccoshUndef);
    }
    let root = sqrt(&(x * x - Decimal::one()))?;
    ln(&(x + &root))
}

/// `ln((1 + x) / (1 - x)) / 2`, for `|x| < 1`.
pub fn arctanh(x: &Decimal) -> MathResult {
    let one = Decimal::one();
    if x.abs() >= one {
        return Err(ErrorKind::ArctanhUndef);
    }
    let ratio = Decimal::from(2i64).div_nonzero(&(&one - x)) - one;
    Ok(&Decimal::from_digits("5", 1) * &ln(&ratio)?)
}

pub fn arcsech(x: &Decimal) -> MathResult {
    if !x.is_positive() || *x > Decimal::one() {
        return Err(ErrorKind::ArcsechUndef);
    }
    arccosh(&Decimal::one().div_nonzero(x))
}

pub fn arccsch(x: &Decimal) -> MathResult {
    if x.is_zero() {
        return Err(ErrorKind::ArccschUndef);
    }
    arcsinh(&Decimal::one().div_nonzero(x))
}

pub fn arccoth(x: &Decimal) -> MathResult {
    if x.abs() <= Decimal::one() {
        return Err(ErrorKind::ArccothUndef);
    }
    arctanh(&Decimal::one().div_nonzero(x))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(value: &str) -> Decimal {
        value.parse().unwrap()
    }

    fn assert_close(actual: MathResult, expected: &str) {
        let actual = actual.unwrap();
        let delta = (&actual - &d(expected)).abs();
        assert!(delta < d("1e-27"), "{} != {}", actual, expected);
    }

    #[test]
    fn forward() {
        assert_close(sinh(&d("1")), "1.175201193643801456882381850595600815156");
        assert_close(cosh(&d("1")), "1.543080634815243778477905620757061682602");
        assert_close(tanh(&d("0.5")), "0.4621171572600097585023184836436725487303");
        assert_close(sech(&d("1")), "0.6480542736638853995749773532261503231085");
        assert_close(csch(&d("1")), "0.8509181282393215451338427632871752841817");
        assert_close(coth(&d("1")), "1.313035285499331303636161246930847832912");
        assert_eq!(sinh(&Decimal::zero()).unwrap(), Decimal::zero());
        assert_eq!(csch(&Decimal::zero()), Err(ErrorKind::CschUndef));
        assert_eq!(coth(&Decimal::zero()), Err(ErrorKind::CothUndef));
    }

    #[test]
    fn inverse() {
        assert_close(arcsinh(&d("2")), "1.443635475178810342493276740273105269406");
        assert_close(arccosh(&d("2")), "1.316957896924816708625046347307968444027");
        assert_close(arctanh(&d("0.5")), "0.5493061443340548456976226184612628523237");
        assert_close(arcsech(&d("0.5")), "1.316957896924816708625046347307968444027");
        assert_close(arccsch(&d("2")), "0.4812118250596034474977589134243684231352");
        assert_close(arccoth(&d("2")), "0.5493061443340548456976226184612628523237");
        assert_eq!(arcsech(&d("1")).unwrap(), Decimal::zero());
    }

    #[test]
    fn domains() {
        assert_eq!(arccosh(&d("0.5")), Err(ErrorKind::ArccoshUndef));
        assert_eq!(arctanh(&d("1")), Err(ErrorKind::ArctanhUndef));
        assert_eq!(arcsech(&Decimal::zero()), Err(ErrorKind::ArcsechUndef));
        assert_eq!(arcsech(&d("1.5")), Err(ErrorKind::ArcsechUndef));
        assert_eq!(arccsch(&Decimal::zero()), Err(ErrorKind::ArccschUndef));
        assert_eq!(arccoth(&d("-1")), Err(ErrorKind::ArccothUndef));
    }
}
