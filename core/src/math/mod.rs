// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Elementary and transcendental functions over [`Decimal`].
//!
//! Everything here works at the kernel precision of
//! [`PRECISION`](crate::types::PRECISION) digits. Series run until a
//! term drops below `1e-30`, and any result smaller than that is
//! returned as exactly zero.
//!
//! Angles are in radians, except for the `_deg` variants which take or
//! return degrees.

pub mod consts;
mod exp;
mod hyperbolic;
mod trig;

use crate::error::ErrorKind;
use crate::types::Decimal;

pub use self::exp::{exp, ln, pow, sqrt};
pub use self::hyperbolic::{
    arccosh, arccoth, arccsch, arcsech, arcsinh, arctanh, cosh, coth, csch, sech, sinh, tanh,
};
pub use self::trig::{
    arccos, arccos_deg, arccot, arccot_deg, arccsc, arccsc_deg, arcsec, arcsec_deg, arcsin,
    arcsin_deg, arctan, arctan_deg, cos, cos_deg, cot, cot_deg, csc, csc_deg, sec, sec_deg, sin,
    sin_deg, tan, tan_deg,
};

pub type MathResult = Result<Decimal, ErrorKind>;

/// Division where a zero denominator means an intermediate value fell
/// out of range.
fn divide(numer: &Decimal, denom: &Decimal) -> MathResult {
    numer.checked_div(denom).ok_or(ErrorKind::Overflow)
}
