// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::session::Session;
use crate::parsing::text::{normalize_case, VARIABLE};
use crate::types::Decimal;

const FUNCTION_ANSWER: &str = "fans";
const FUNCTION_MEMORY: &str = "fmem";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Variable,
}

/// Function text split into literal runs and the slots where the
/// variable appears.
///
/// Every `x` is a slot, wherever it occurs, so rendering gives exactly
/// the text that replacing each `x` with a bracketed numeral would.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionText {
    segments: Vec<Segment>,
}

impl FunctionText {
    pub fn parse(text: &str) -> FunctionText {
        let mut segments = vec![];
        let mut literal = String::new();
        for c in text.chars() {
            if c == VARIABLE {
                if !literal.is_empty() {
                    segments.push(Segment::Literal(std::mem::take(&mut literal)));
                }
                segments.push(Segment::Variable);
            } else {
                literal.push(c);
            }
        }
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }
        FunctionText { segments }
    }

    pub fn has_variable(&self) -> bool {
        self.segments.contains(&Segment::Variable)
    }

    /// Text with every slot filled by `(value)` in plain notation.
    pub fn render(&self, value: &Decimal) -> String {
        let numeral = format!("({})", value.to_plain_string());
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Variable => out.push_str(&numeral),
            }
        }
        out
    }
}

/// Replaces `fans` and `fmem` with the session's function registers.
/// Inserted text is not scanned again.
pub(crate) fn expand_registers(function: &str, session: &Session) -> String {
    let lowered = normalize_case(function);
    let mut out = String::with_capacity(lowered.len());
    let mut rest = &lowered[..];
    while let Some(c) = rest.chars().next() {
        if rest.starts_with(FUNCTION_ANSWER) {
            out.push_str(session.function_answer());
            rest = &rest[FUNCTION_ANSWER.len()..];
        } else if rest.starts_with(FUNCTION_MEMORY) {
            out.push_str(session.function_memory());
            rest = &rest[FUNCTION_MEMORY.len()..];
        } else {
            out.push(c);
            rest = &rest[c.len_utf8()..];
        }
    }
    normalize_case(&out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn literal_replace(text: &str, value: &Decimal) -> String {
        text.replace('x', &format!("({})", value.to_plain_string()))
    }

    #[test]
    fn render_matches_literal_replacement() {
        let value: Decimal = "-0.25".parse().unwrap();
        for text in &["(x^2+x)", "(x)", "(2)", "exp(x)", "xx", "(sum(x,1,x))"] {
            let function = FunctionText::parse(text);
            assert_eq!(function.render(&value), literal_replace(text, &value));
        }
    }

    #[test]
    fn slots() {
        assert!(FunctionText::parse("(2x)").has_variable());
        assert!(!FunctionText::parse("(2)").has_variable());
        assert_eq!(
            FunctionText::parse("exp(x)").render(&Decimal::one()),
            "e(1)p((1))"
        );
    }

    #[test]
    fn registers() {
        let mut session = Session::new();
        session.set_function_answer("X^2");
        session.set_function_memory("fans");
        assert_eq!(expand_registers("(FANS+1)", &session), "(x^2+1)");
        assert_eq!(expand_registers("(fmem)", &session), "(fans)");
        assert_eq!(expand_registers("(fmem)", &Session::new()), "()");
    }
}
