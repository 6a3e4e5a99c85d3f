// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The expression evaluator and the session it runs against.
//!
//! Text is evaluated by splitting it at the loosest top-level operator
//! and recursing on both halves, in this order: leftmost `+`, rightmost
//! `-`, leftmost `*`, rightmost `/`, rightmost `^`, rightmost `%`. Text
//! with no top-level operator is a named function call, a constant, a
//! register or a literal.

mod aggregate;
mod eval;
mod session;
mod substitute;

pub use eval::{Function, Operation, OPERATIONS};
pub use session::{AngleMode, IntegralMode, Session};
pub use substitute::FunctionText;
