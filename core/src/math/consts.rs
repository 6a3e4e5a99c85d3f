// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use once_cell::sync::Lazy;

use crate::types::Decimal;

/// Euler's number to 46 significant digits.
pub static E: Lazy<Decimal> =
    Lazy::new(|| Decimal::from_digits("2718281828459045235360287471352662497757247093", 45));

/// Pi to 46 significant digits.
pub static PI: Lazy<Decimal> =
    Lazy::new(|| Decimal::from_digits("3141592653589793238462643383279502884197169399", 45));

pub(crate) static SQRT_3: Lazy<Decimal> =
    Lazy::new(|| Decimal::from_digits("1732050807568877293527446341505872366942805253", 45));

/// Series stop once a term falls below this, and results below it
/// collapse to zero.
pub(crate) static CONVERGENCE: Lazy<Decimal> = Lazy::new(|| Decimal::from_digits("1", 30));

/// `2 / (e + 1)`. ln divides or multiplies its argument by e until it
/// lies between this and [`LN_UPPER`].
pub(crate) static LN_LOWER: Lazy<Decimal> =
    Lazy::new(|| Decimal::from(2i64).div_nonzero(&(&*E + &Decimal::one())));

/// `e * 2 / (e + 1)`.
pub(crate) static LN_UPPER: Lazy<Decimal> = Lazy::new(|| &*LN_LOWER * &*E);

/// `2 - sqrt(3)`, above which arctan shifts its argument by pi/6.
pub(crate) static ARCTAN_BOUND: Lazy<Decimal> =
    Lazy::new(|| Decimal::from_digits("267949192431122706", 18));

pub(crate) static TWO_PI: Lazy<Decimal> = Lazy::new(|| Decimal::from(2i64) * &*PI);

pub(crate) static HALF_PI: Lazy<Decimal> = Lazy::new(|| PI.div_int(2));

pub(crate) static SIXTH_PI: Lazy<Decimal> = Lazy::new(|| PI.div_int(6));

/// Radians per degree.
pub(crate) static DEG_TO_RAD: Lazy<Decimal> = Lazy::new(|| PI.div_int(180));

/// Given the tolerances of the series, values this small are zero.
pub(crate) fn flush_to_zero(value: Decimal) -> Decimal {
    if value.abs() < *CONVERGENCE {
        Decimal::zero()
    } else {
        value
    }
}
