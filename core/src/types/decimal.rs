// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::{cmp::Ordering, fmt, ops, str::FromStr};

use num::{BigInt, Integer, One, Signed, ToPrimitive, Zero};

use crate::error::ParseDecimalError;

/// Significant digits kept by every kernel and evaluator operation.
pub const PRECISION: u64 = 32;

/// Significant digits used when deciding whether a value is an
/// integer.
pub const INTEGRAL_PRECISION: u64 = 21;

/// Largest scale magnitude a parsed literal or an integer power may
/// produce.
const MAX_SCALE: i64 = i32::MAX as i64;

fn ten_pow(exp: u64) -> BigInt {
    num::pow(BigInt::from(10u8), exp as usize)
}

fn digit_count(value: &BigInt) -> u64 {
    if value.is_zero() {
        1
    } else {
        value.magnitude().to_str_radix(10).len() as u64
    }
}

/// Integer division rounding half away from zero.
fn div_half_up(numer: &BigInt, denom: &BigInt) -> BigInt {
    let (quotient, remainder) = numer.div_rem(denom);
    if (remainder.abs() << 1u32) >= denom.abs() {
        if numer.is_negative() == denom.is_negative() {
            quotient + BigInt::one()
        } else {
            quotient - BigInt::one()
        }
    } else {
        quotient
    }
}

/// An arbitrary precision decimal number, `mantissa * 10^-scale`.
///
/// Addition and subtraction are exact. Multiplication, division and
/// integer powers round to [`PRECISION`] significant digits, with
/// ties rounded away from zero.
///
/// Equality and ordering compare numeric values, so `2.50 == 2.5`
/// even though the two are stored differently.
#[derive(Clone)]
pub struct Decimal {
    mantissa: BigInt,
    scale: i64,
}

impl Decimal {
    pub fn new(mantissa: BigInt, scale: i64) -> Decimal {
        Decimal { mantissa, scale }
    }

    pub fn zero() -> Decimal {
        Decimal::new(BigInt::zero(), 0)
    }

    pub fn one() -> Decimal {
        Decimal::new(BigInt::one(), 0)
    }

    /// Builds a value from a string of ASCII digits, used for the
    /// kernel's constants.
    pub(crate) fn from_digits(digits: &str, scale: i64) -> Decimal {
        let mantissa = digits
            .bytes()
            .filter(u8::is_ascii_digit)
            .fold(BigInt::zero(), |acc, digit| {
                acc * 10u32 + BigInt::from(digit - b'0')
            });
        Decimal::new(mantissa, scale)
    }

    pub fn mantissa(&self) -> &BigInt {
        &self.mantissa
    }

    pub fn scale(&self) -> i64 {
        self.scale
    }

    /// Number of significant digits held by the mantissa.
    pub fn precision(&self) -> u64 {
        digit_count(&self.mantissa)
    }

    /// Exponent of the most significant digit, `floor(log10(|self|))`.
    pub fn adjusted_exponent(&self) -> i64 {
        self.precision() as i64 - 1 - self.scale
    }

    pub fn is_zero(&self) -> bool {
        self.mantissa.is_zero()
    }

    pub fn is_one(&self) -> bool {
        *self == Decimal::one()
    }

    pub fn is_negative(&self) -> bool {
        self.mantissa.is_negative()
    }

    pub fn is_positive(&self) -> bool {
        self.mantissa.is_positive()
    }

    pub fn abs(&self) -> Decimal {
        Decimal::new(self.mantissa.abs(), self.scale)
    }

    /// Rounds to `digits` significant digits, ties away from zero.
    pub fn round(&self, digits: u64) -> Decimal {
        let current = self.precision();
        if current <= digits {
            return self.clone();
        }
        let drop = current - digits;
        let mantissa = div_half_up(&self.mantissa, &ten_pow(drop));
        let scale = self.scale - drop as i64;
        // 999 rounds up to 1000, one digit too many.
        if digit_count(&mantissa) > digits {
            Decimal::new(mantissa / 10u32, scale - 1)
        } else {
            Decimal::new(mantissa, scale)
        }
    }

    /// Removes trailing zeros after the decimal point.
    pub fn trim_fraction(&self) -> Decimal {
        if self.is_zero() {
            return Decimal::zero();
        }
        let ten = BigInt::from(10u8);
        let mut mantissa = self.mantissa.clone();
        let mut scale = self.scale;
        while scale > 0 {
            let (quotient, remainder) = mantissa.div_rem(&ten);
            if !remainder.is_zero() {
                break;
            }
            mantissa = quotient;
            scale -= 1;
        }
        Decimal::new(mantissa, scale)
    }

    fn rescaled(&self, scale: i64) -> BigInt {
        debug_assert!(scale >= self.scale);
        &self.mantissa * ten_pow((scale - self.scale) as u64)
    }

    /// The fractional part, carrying the sign of `self`.
    pub fn fract(&self) -> Decimal {
        if self.scale <= 0 {
            return Decimal::zero();
        }
        // |self| < 1 is all fraction.
        if self.adjusted_exponent() < 0 {
            return self.clone();
        }
        Decimal::new(&self.mantissa % ten_pow(self.scale as u64), self.scale)
    }

    /// The value with its fractional part removed, rounding towards
    /// zero.
    pub fn trunc(&self) -> Decimal {
        self - &self.fract()
    }

    pub fn is_integer(&self) -> bool {
        self.fract().is_zero()
    }

    /// Whether the value keeps a fractional part once rounded to
    /// [`INTEGRAL_PRECISION`] digits.
    ///
    /// Values with more integral digits than that are compared against
    /// their rounded integer part, so a 25-digit integer with a nonzero
    /// tail also counts as fractional.
    pub fn has_fraction(&self) -> bool {
        *self != self.round(INTEGRAL_PRECISION).trunc()
    }

    /// Rounds to [`INTEGRAL_PRECISION`] digits and returns the result
    /// if it is an integer that fits in an `i64`.
    pub fn to_rounded_i64(&self) -> Option<i64> {
        let rounded = self.round(INTEGRAL_PRECISION);
        if rounded.is_integer() {
            rounded.to_i64()
        } else {
            None
        }
    }

    /// Converts an integral part to `i64`, truncating any fraction.
    pub fn to_i64(&self) -> Option<i64> {
        if self.is_zero() || self.adjusted_exponent() < 0 {
            return Some(0);
        }
        if self.adjusted_exponent() > 18 {
            return None;
        }
        let whole = if self.scale <= 0 {
            &self.mantissa * ten_pow(self.scale.unsigned_abs())
        } else {
            &self.mantissa / ten_pow(self.scale as u64)
        };
        whole.to_i64()
    }

    /// Division rounded to [`PRECISION`] digits. `rhs` must not be
    /// zero.
    pub(crate) fn div_nonzero(&self, rhs: &Decimal) -> Decimal {
        debug_assert!(!rhs.is_zero());
        if self.is_zero() {
            return Decimal::zero();
        }
        // Enough extra digits that the truncated quotient has at least
        // one digit past the precision, which is all half-up rounding
        // needs to be exact.
        let shift = (PRECISION as i64 + 1 + rhs.precision() as i64 - self.precision() as i64).max(0);
        let numer = &self.mantissa * ten_pow(shift as u64);
        let quotient = numer / &rhs.mantissa;
        Decimal::new(quotient, self.scale - rhs.scale + shift).round(PRECISION)
    }

    /// Division rounded to [`PRECISION`] digits, or `None` when
    /// dividing by zero.
    pub fn checked_div(&self, rhs: &Decimal) -> Option<Decimal> {
        if rhs.is_zero() {
            None
        } else {
            Some(self.div_nonzero(rhs))
        }
    }

    /// Division by a small nonzero integer.
    pub fn div_int(&self, divisor: u64) -> Decimal {
        self.div_nonzero(&Decimal::from(divisor))
    }

    /// Truncating remainder, with the sign of `self`.
    ///
    /// Returns `None` when `rhs` is zero or when the integral quotient
    /// needs more than [`PRECISION`] digits.
    pub fn checked_rem(&self, rhs: &Decimal) -> Option<Decimal> {
        if rhs.is_zero() {
            return None;
        }
        let scale = self.scale.max(rhs.scale);
        let numer = self.rescaled(scale);
        let denom = rhs.rescaled(scale);
        let (quotient, remainder) = numer.div_rem(&denom);
        if !quotient.is_zero() && digit_count(&quotient) > PRECISION {
            return None;
        }
        Some(Decimal::new(remainder, scale))
    }

    /// Raises to an integer power with repeated squaring, rounding to
    /// [`PRECISION`] digits.
    ///
    /// Returns `None` for zero to a negative power, and when the result
    /// would need an unrepresentable exponent.
    pub fn powi(&self, exp: i64) -> Option<Decimal> {
        if exp == 0 {
            return Some(Decimal::one());
        }
        if self.is_zero() {
            return if exp > 0 { Some(Decimal::zero()) } else { None };
        }
        let magnitude = (self.adjusted_exponent().abs() + 1).checked_mul(exp.abs())?;
        if magnitude > MAX_SCALE {
            return None;
        }

        // Squaring at a few guard digits keeps the accumulated error
        // below the last kept digit.
        let working = PRECISION + 8;
        let mut result = Decimal::one();
        let mut base = self.clone();
        let mut remaining = exp.unsigned_abs();
        while remaining > 0 {
            if remaining & 1 == 1 {
                result = result.mul_at(&base, working);
            }
            remaining >>= 1;
            if remaining > 0 {
                base = base.mul_at(&base, working);
            }
        }
        if exp < 0 {
            Some(Decimal::one().div_nonzero(&result))
        } else {
            Some(result.round(PRECISION))
        }
    }

    fn mul_at(&self, rhs: &Decimal, digits: u64) -> Decimal {
        Decimal::new(&self.mantissa * &rhs.mantissa, self.scale + rhs.scale).round(digits)
    }

    /// The value without an exponent, e.g. `0.000125` or `1500`.
    pub fn to_plain_string(&self) -> String {
        let digits = self.mantissa.magnitude().to_str_radix(10);
        let sign = if self.is_negative() { "-" } else { "" };
        if self.is_zero() {
            return "0".to_owned();
        }
        if self.scale <= 0 {
            let zeros = "0".repeat(self.scale.unsigned_abs() as usize);
            return format!("{}{}{}", sign, digits, zeros);
        }
        let scale = self.scale as usize;
        if digits.len() > scale {
            let (whole, frac) = digits.split_at(digits.len() - scale);
            format!("{}{}.{}", sign, whole, frac)
        } else {
            let zeros = "0".repeat(scale - digits.len());
            format!("{}0.{}{}", sign, zeros, digits)
        }
    }

    /// Plain notation for moderate values, `d.dddE+n` otherwise.
    pub fn to_scientific_string(&self) -> String {
        let value = self.trim_fraction();
        let adjusted = value.adjusted_exponent();
        if value.scale >= 0 && adjusted >= -6 {
            return value.to_plain_string();
        }
        let digits = value.mantissa.magnitude().to_str_radix(10);
        let sign = if value.is_negative() { "-" } else { "" };
        let (first, rest) = digits.split_at(1);
        let rest = if rest.is_empty() {
            String::new()
        } else {
            format!(".{}", rest)
        };
        format!("{}{}{}E{:+}", sign, first, rest, adjusted)
    }

    /// Like [`Decimal::to_scientific_string`], but exponents are always
    /// multiples of three.
    pub fn to_engineering_string(&self) -> String {
        let value = self.trim_fraction();
        let mut adjusted = value.adjusted_exponent();
        if value.scale >= 0 && adjusted >= -6 {
            return value.to_plain_string();
        }
        let digits = value.mantissa.magnitude().to_str_radix(10);
        let sign = if value.is_negative() { "-" } else { "" };
        let shift = adjusted.rem_euclid(3);
        adjusted -= shift;
        let whole_digits = shift as usize + 1;
        let body = if whole_digits >= digits.len() {
            format!("{}{}", digits, "0".repeat(whole_digits - digits.len()))
        } else {
            format!("{}.{}", &digits[..whole_digits], &digits[whole_digits..])
        };
        if adjusted != 0 {
            format!("{}{}E{:+}", sign, body, adjusted)
        } else {
            format!("{}{}", sign, body)
        }
    }
}

impl Default for Decimal {
    fn default() -> Self {
        Decimal::zero()
    }
}

impl From<i64> for Decimal {
    fn from(value: i64) -> Self {
        Decimal::new(BigInt::from(value), 0)
    }
}

impl From<u64> for Decimal {
    fn from(value: u64) -> Self {
        Decimal::new(BigInt::from(value), 0)
    }
}

impl From<i32> for Decimal {
    fn from(value: i32) -> Self {
        Decimal::new(BigInt::from(value), 0)
    }
}

impl From<BigInt> for Decimal {
    fn from(value: BigInt) -> Self {
        Decimal::new(value, 0)
    }
}

impl FromStr for Decimal {
    type Err = ParseDecimalError;

    /// Parses `[+-]digits[.digits][(e|E)[+-]digits]`, where either side
    /// of the point may be empty but not both.
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let err = || ParseDecimalError(input.to_owned());

        let (negative, rest) = match input.as_bytes().first() {
            Some(b'-') => (true, &input[1..]),
            Some(b'+') => (false, &input[1..]),
            _ => (false, input),
        };
        let (number, exponent) = match rest.find(|c: char| c == 'e' || c == 'E') {
            Some(pos) => (&rest[..pos], Some(&rest[pos + 1..])),
            None => (rest, None),
        };
        let (whole, frac) = match number.find('.') {
            Some(pos) => (&number[..pos], &number[pos + 1..]),
            None => (number, ""),
        };
        let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
        if (whole.is_empty() && frac.is_empty()) || !all_digits(whole) || !all_digits(frac) {
            return Err(err());
        }
        let exponent: i64 = match exponent {
            Some(text) => {
                let digits = text.strip_prefix(|c: char| c == '+' || c == '-').unwrap_or(text);
                if digits.is_empty() || !all_digits(digits) {
                    return Err(err());
                }
                text.parse().map_err(|_| err())?
            }
            None => 0,
        };
        let scale = (frac.len() as i64).checked_sub(exponent).ok_or_else(err)?;
        if scale.abs() > MAX_SCALE {
            return Err(err());
        }

        let mut mantissa = Decimal::from_digits(&format!("{}{}", whole, frac), 0).mantissa;
        if negative {
            mantissa = -mantissa;
        }
        Ok(Decimal::new(mantissa, scale))
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "{}", self.trim_fraction().to_plain_string())
    }
}

impl fmt::Debug for Decimal {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "{}e{}", self.mantissa, -self.scale)
    }
}

impl PartialEq for Decimal {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Decimal {}

impl PartialOrd for Decimal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Decimal {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.mantissa.sign().cmp(&other.mantissa.sign()) {
            Ordering::Equal => {}
            ordering => return ordering,
        }
        if self.is_zero() {
            return Ordering::Equal;
        }

        // Cheap check first so that values far apart never get
        // rescaled to a common exponent.
        let by_magnitude = self.adjusted_exponent().cmp(&other.adjusted_exponent());
        if by_magnitude != Ordering::Equal {
            return if self.is_negative() {
                by_magnitude.reverse()
            } else {
                by_magnitude
            };
        }

        let scale = self.scale.max(other.scale);
        self.rescaled(scale).cmp(&other.rescaled(scale))
    }
}

impl<'a> ops::Add for &'a Decimal {
    type Output = Decimal;

    fn add(self, rhs: Self) -> Self::Output {
        let scale = self.scale.max(rhs.scale);
        Decimal::new(self.rescaled(scale) + rhs.rescaled(scale), scale)
    }
}

impl ops::Add for Decimal {
    type Output = Decimal;

    fn add(self, rhs: Self) -> Self::Output {
        &self + &rhs
    }
}

impl<'a> ops::Add<&'a Decimal> for Decimal {
    type Output = Decimal;

    fn add(self, rhs: &'a Decimal) -> Self::Output {
        &self + rhs
    }
}

impl<'a> ops::Sub for &'a Decimal {
    type Output = Decimal;

    fn sub(self, rhs: Self) -> Self::Output {
        let scale = self.scale.max(rhs.scale);
        Decimal::new(self.rescaled(scale) - rhs.rescaled(scale), scale)
    }
}

impl ops::Sub for Decimal {
    type Output = Decimal;

    fn sub(self, rhs: Self) -> Self::Output {
        &self - &rhs
    }
}

impl<'a> ops::Sub<&'a Decimal> for Decimal {
    type Output = Decimal;

    fn sub(self, rhs: &'a Decimal) -> Self::Output {
        &self - rhs
    }
}

impl<'a> ops::Mul for &'a Decimal {
    type Output = Decimal;

    /// Rounds the product to [`PRECISION`] digits.
    fn mul(self, rhs: Self) -> Self::Output {
        self.mul_at(rhs, PRECISION)
    }
}

impl ops::Mul for Decimal {
    type Output = Decimal;

    fn mul(self, rhs: Self) -> Self::Output {
        &self * &rhs
    }
}

impl<'a> ops::Mul<&'a Decimal> for Decimal {
    type Output = Decimal;

    fn mul(self, rhs: &'a Decimal) -> Self::Output {
        &self * rhs
    }
}

impl ops::Neg for Decimal {
    type Output = Decimal;

    fn neg(mut self) -> Self::Output {
        self.mantissa = -self.mantissa;
        self
    }
}

impl<'a> ops::Neg for &'a Decimal {
    type Output = Decimal;

    fn neg(self) -> Self::Output {
        -self.clone()
    }
}
