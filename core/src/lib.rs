// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Decicalc is a calculator that evaluates expressions written as plain
//! text, using 32-digit decimal arithmetic throughout. Exponentials,
//! logarithms, and the circular and hyperbolic functions are all
//! computed from their series, never through machine floats.
//! `decicalc_core` is the library that the frontends use.
//!
//! Decicalc is designed to be used interactively. Each calculator keeps
//! a [Session] holding its angle mode, its integration rule, and the
//! registers `ans`, `mem`, `fans` and `fmem`, so one line can build on
//! the result of the last.
//!
//! ## Example
//!
//! ```rust
//! let mut session = decicalc_core::Session::new();
//! // `one_line` preprocesses the input, evaluates it, stores the
//! // result in `ans`, and rounds it for display.
//! assert_eq!(decicalc_core::one_line(&mut session, "2(3) + 1", 6), Ok("7".to_owned()));
//! assert_eq!(decicalc_core::one_line(&mut session, "ans^2", 6), Ok("49".to_owned()));
//! assert_eq!(
//!     decicalc_core::one_line(&mut session, "1/0", 6),
//!     Err("Error. Division by 0.".to_owned())
//! );
//! ```
//!
//! ## Full precision
//!
//! [eval] returns the [Decimal] itself, at the full kernel precision.
//! Rounding for display is left to the caller.
//!
//! ```rust
//! use decicalc_core::{AngleMode, Session};
//! let mut session = Session::new();
//! session.set_angle_mode(AngleMode::Degrees);
//! let value = decicalc_core::eval(&mut session, "arccot(0)").unwrap();
//! assert_eq!(value.to_string(), "90");
//! ```
//!
//! ## Aggregates
//!
//! `integral(f, lo, hi)`, `sum(f, lo, hi)` and `product(f, lo, hi)`
//! evaluate `f` with each sample point written in place of `x`. The
//! function registers `fans` and `fmem` are expanded first, so a stored
//! function can be reused:
//!
//! ```rust
//! let mut session = decicalc_core::Session::new();
//! session.set_function_memory("x^2");
//! assert_eq!(decicalc_core::one_line(&mut session, "sum(fmem, 1, 3)", 6), Ok("14".to_owned()));
//! ```

// False positives, or make code harder to understand.
#![allow(clippy::match_like_matches_macro)]
#![allow(clippy::needless_lifetimes)]

pub mod error;
pub mod math;
pub mod parsing;
pub mod runtime;
pub mod types;

mod helpers;

pub use error::{ErrorKind, ParseDecimalError};
pub use helpers::{eval, evaluate, one_line, version};
pub use parsing::text::preprocess;
pub use runtime::{AngleMode, IntegralMode, Session};
pub use types::Decimal;
