// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::consts::{
    flush_to_zero, ARCTAN_BOUND, CONVERGENCE, DEG_TO_RAD, HALF_PI, SIXTH_PI, SQRT_3, TWO_PI,
};
use super::{sqrt, MathResult};
use crate::error::ErrorKind;
use crate::types::Decimal;

/// Reduces a non-negative angle into `[0, 2pi)`.
fn reduce_angle(x: &Decimal) -> Decimal {
    let turns = x.div_nonzero(&TWO_PI);
    &turns.fract() * &*TWO_PI
}

/// Sums `term_{n+1} = -term_n * x^2 / (i (i + 1))` for i = first,
/// first + 2, ... starting from `term`.
fn alternating_series(x: &Decimal, mut term: Decimal, first: u64) -> Decimal {
    let squared = x * x;
    let mut sum = term.clone();
    let mut i = first;
    loop {
        term = &term * &-squared.div_int(i * (i + 1));
        sum = &sum + &term;
        i += 2;
        if term.abs() < *CONVERGENCE {
            break;
        }
    }
    flush_to_zero(sum)
}

pub fn sin(x: &Decimal) -> Decimal {
    let reduced = reduce_angle(&x.abs());
    let sum = alternating_series(&reduced, reduced.clone(), 2);
    if x.is_negative() {
        -sum
    } else {
        sum
    }
}

pub fn cos(x: &Decimal) -> Decimal {
    let reduced = reduce_angle(&x.abs());
    alternating_series(&reduced, Decimal::one(), 1)
}

/// Divides, reporting `undefined` when the denominator is exactly zero.
fn ratio(numer: Decimal, denom: Decimal, undefined: ErrorKind) -> MathResult {
    numer.checked_div(&denom).ok_or(undefined)
}

pub fn tan(x: &Decimal) -> MathResult {
    ratio(sin(x), cos(x), ErrorKind::TanUndef)
}

pub fn sec(x: &Decimal) -> MathResult {
    ratio(Decimal::one(), cos(x), ErrorKind::SecUndef)
}

pub fn csc(x: &Decimal) -> MathResult {
    ratio(Decimal::one(), sin(x), ErrorKind::CscUndef)
}

pub fn cot(x: &Decimal) -> MathResult {
    ratio(cos(x), sin(x), ErrorKind::CotUndef)
}

/// Inverse tangent, in `(-pi/2, pi/2)`.
///
/// Arguments above 1 are replaced by their reciprocal, and those above
/// `2 - sqrt(3)` are rotated down by pi/6, so the series always runs on
/// a small value.
pub fn arctan(x: &Decimal) -> Decimal {
    if x.is_zero() {
        return Decimal::zero();
    }
    let one = Decimal::one();
    let mut reduced = x.abs();

    let reciprocal = reduced > one;
    if reciprocal {
        reduced = one.div_nonzero(&reduced);
    }
    let rotated = reduced > *ARCTAN_BOUND;
    if rotated {
        let numer = &*SQRT_3 * &reduced - &one;
        reduced = numer.div_nonzero(&(&*SQRT_3 + &reduced));
    }

    let squared = -(&reduced * &reduced);
    let mut numerator = reduced.clone();
    let mut sum = reduced;
    let mut i = 3;
    loop {
        numerator = &numerator * &squared;
        let term = numerator.div_int(i);
        sum = &sum + &term;
        i += 2;
        if term.abs() < *CONVERGENCE {
            break;
        }
    }

    let mut result = flush_to_zero(sum);
    if rotated {
        result = &*SIXTH_PI + &result;
    }
    if reciprocal {
        result = &*HALF_PI - &result;
    }
    if x.is_negative() {
        -result
    } else {
        result
    }
}

fn within_unit(x: &Decimal) -> bool {
    x.abs() <= Decimal::one()
}

pub fn arcsin(x: &Decimal) -> MathResult {
    if !within_unit(x) {
        return Err(ErrorKind::ArcsinUndef);
    }
    if x.is_zero() {
        return Ok(Decimal::zero());
    }
    if x.abs().is_one() {
        return Ok(if x.is_negative() {
            -&*HALF_PI
        } else {
            (*HALF_PI).clone()
        });
    }
    let cosine = sqrt(&(Decimal::one() - x * x))?;
    Ok(arctan(&x.div_nonzero(&cosine)))
}

pub fn arccos(x: &Decimal) -> MathResult {
    if !within_unit(x) {
        return Err(ErrorKind::ArccosUndef);
    }
    Ok(&*HALF_PI - &arcsin(x)?)
}

pub fn arcsec(x: &Decimal) -> MathResult {
    if x.abs() < Decimal::one() {
        return Err(ErrorKind::ArcsecUndef);
    }
    arccos(&Decimal::one().div_nonzero(x))
}

pub fn arccsc(x: &Decimal) -> MathResult {
    if x.abs() < Decimal::one() {
        return Err(ErrorKind::ArccscUndef);
    }
    arcsin(&Decimal::one().div_nonzero(x))
}

/// Inverse cotangent, `arctan(1/x)`, so negative inputs land in
/// `(-pi/2, 0)`.
pub fn arccot(x: &Decimal) -> Decimal {
    if x.is_zero() {
        (*HALF_PI).clone()
    } else {
        arctan(&Decimal::one().div_nonzero(x))
    }
}

fn to_radians(degrees: &Decimal) -> Decimal {
    degrees * &*DEG_TO_RAD
}

fn to_degrees(radians: Decimal) -> Decimal {
    radians.div_nonzero(&DEG_TO_RAD)
}

pub fn sin_deg(x: &Decimal) -> Decimal {
    sin(&to_radians(x))
}

pub fn cos_deg(x: &Decimal) -> Decimal {
    cos(&to_radians(x))
}

pub fn tan_deg(x: &Decimal) -> MathResult {
    tan(&to_radians(x))
}

pub fn sec_deg(x: &Decimal) -> MathResult {
    sec(&to_radians(x))
}

pub fn csc_deg(x: &Decimal) -> MathResult {
    csc(&to_radians(x))
}

pub fn cot_deg(x: &Decimal) -> MathResult {
    cot(&to_radians(x))
}

pub fn arcsin_deg(x: &Decimal) -> MathResult {
    arcsin(x).map(to_degrees)
}

pub fn arccos_deg(x: &Decimal) -> MathResult {
    arccos(x).map(to_degrees)
}

pub fn arctan_deg(x: &Decimal) -> Decimal {
    to_degrees(arctan(x))
}

pub fn arcsec_deg(x: &Decimal) -> MathResult {
    arcsec(x).map(to_degrees)
}

pub fn arccsc_deg(x: &Decimal) -> MathResult {
    arccsc(x).map(to_degrees)
}

pub fn arccot_deg(x: &Decimal) -> Decimal {
    if x.is_zero() {
        Decimal::from(90i64)
    } else {
        to_degrees(arccot(x))
    }
}
