// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Normalization and bracket utilities shared by the evaluator and the
//! front ends.

use crate::types::Decimal;

/// Uppercase sigma, the symbolic spelling of `sum(`.
pub const SUM_SYMBOL: char = '\u{03A3}';
/// Uppercase pi, the symbolic spelling of `product(`.
pub const PRODUCT_SYMBOL: char = '\u{03A0}';
/// Lowercase pi, the constant.
pub const PI_SYMBOL: char = '\u{03C0}';
pub const INTEGRAL_SYMBOL: char = '\u{222B}';
pub const ROOT_SYMBOL: char = '\u{221A}';

/// The letter substituted by aggregate operators.
pub const VARIABLE: char = 'x';

/// Lowercases `text`, leaving the sum and product symbols alone so they
/// stay distinct from the constant pi.
pub fn normalize_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if c == SUM_SYMBOL || c == PRODUCT_SYMBOL {
            out.push(c);
        } else {
            out.extend(c.to_lowercase());
        }
    }
    out
}

/// Whether the running count of `(` minus `)` never drops below zero
/// and ends at zero.
pub fn brackets_balanced(text: &str) -> bool {
    let mut depth = 0i64;
    for c in text.chars() {
        match c {
            '(' => depth += 1,
            ')' => depth -= 1,
            _ => (),
        }
        if depth < 0 {
            return false;
        }
    }
    depth == 0
}

/// Removes outer `(` `)` pairs for as long as what remains is still
/// balanced, so `((a+b))` becomes `a+b` but `(a)+(b)` is untouched.
pub fn strip_matched_wrapping(mut text: &str) -> &str {
    while text.len() >= 2 && text.starts_with('(') && text.ends_with(')') {
        let inner = &text[1..text.len() - 1];
        if !brackets_balanced(inner) {
            break;
        }
        text = inner;
    }
    text
}

/// Whether every character is a bracket. Empty text counts.
pub fn is_all_brackets(text: &str) -> bool {
    text.chars().all(|c| c == '(' || c == ')')
}

pub fn is_numeric_literal(text: &str) -> bool {
    text.parse::<Decimal>().is_ok()
}

/// A digit or decimal point.
pub(crate) fn is_numeral(c: char) -> bool {
    c.is_ascii_digit() || c == '.'
}

fn is_letter(c: char) -> bool {
    c.is_ascii_lowercase()
}

fn is_left_special(c: char) -> bool {
    matches!(
        c,
        SUM_SYMBOL | PI_SYMBOL | PRODUCT_SYMBOL | INTEGRAL_SYMBOL | ROOT_SYMBOL
    )
}

fn is_right_special(c: char) -> bool {
    c == PI_SYMBOL
}

/// Given that `chars[pos]` is `+` or `-`, reports whether it belongs to
/// an exponent such as `1.5e-3` rather than being an operator.
///
/// The sign must follow an `e` that follows a numeral, and must be
/// followed by a digit. When the numeral before the `e` is a bare `.`,
/// a digit has to precede that point.
pub fn is_exponent_sign(chars: &[char], pos: usize) -> bool {
    let len = chars.len();
    if pos <= 1 || pos + 1 >= len {
        return false;
    }
    let next = chars[pos + 1];
    if chars[pos - 1] != 'e' || !next.is_ascii_digit() {
        return false;
    }
    let before = chars[pos - 2];
    if !is_numeral(before) {
        return false;
    }
    if before == '.' {
        pos > 2 && chars[pos - 3].is_ascii_digit()
    } else {
        true
    }
}

/// Whether `chars[start..]` begins the `exp(` function call.
fn starts_exp_call(chars: &[char], start: usize) -> bool {
    chars[start..].starts_with(&['e', 'x', 'p', '('])
}

/// Makes adjacency explicit: `2(3)` becomes `2*(3)`, `2x` becomes
/// `2*x`, `xpi` becomes `x*pi`.
///
/// An `e` right after a numeral is left alone when a sign or digit
/// follows it, so exponent notation like `1e5` and `2e-3` survives.
/// The name `exp(` is never split.
pub fn insert_implicit_multiplication(text: &str) -> String {
    let mut chars: Vec<char> = text.chars().collect();
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        if (is_letter(c) || c == '(' || is_left_special(c)) && i > 0 {
            let prev = chars[i - 1];
            if prev == ')' || is_numeral(prev) {
                let exponent_marker = c == 'e' && is_numeral(prev) && {
                    let next = chars.get(i + 1).copied();
                    matches!(next, Some('+') | Some('-')) || next.map_or(false, is_numeral)
                };
                if !exponent_marker {
                    chars.insert(i, '*');
                }
            }
        }

        let c = chars[i];
        if c == VARIABLE || c == 'i' || c == 'e' || is_right_special(c) {
            if let Some(&next) = chars.get(i + 1) {
                let in_exp = (c == 'e' && starts_exp_call(&chars, i))
                    || (c == VARIABLE && i > 0 && starts_exp_call(&chars, i - 1));
                let joins = next == '('
                    || next == VARIABLE
                    || next == 'i'
                    || next == 'e'
                    || next == 'p'
                    || is_left_special(next);
                if joins && !in_exp {
                    chars.insert(i + 1, '*');
                }
            }
        }
        i += 1;
    }
    chars.into_iter().collect()
}

pub fn remove_whitespace(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Prepares raw user input for evaluation: strips whitespace, then
/// inserts implicit multiplication.
pub fn preprocess(text: &str) -> String {
    insert_implicit_multiplication(&remove_whitespace(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(text: &str) -> Vec<char> {
        text.chars().collect()
    }

    #[test]
    fn case_keeps_aggregate_symbols() {
        assert_eq!(normalize_case("SIN(X)"), "sin(x)");
        assert_eq!(normalize_case("\u{03A3}(X,1,2)"), "\u{03A3}(x,1,2)");
        assert_eq!(normalize_case("\u{03A0}(x,1,2)"), "\u{03A0}(x,1,2)");
    }

    #[test]
    fn wrapping() {
        assert_eq!(strip_matched_wrapping("((1+2))"), "1+2");
        assert_eq!(strip_matched_wrapping("(1)+(2)"), "(1)+(2)");
        assert_eq!(strip_matched_wrapping("()"), "");
        assert_eq!(strip_matched_wrapping("sin(1)"), "sin(1)");
    }

    #[test]
    fn balance() {
        assert!(brackets_balanced("(()())"));
        assert!(brackets_balanced(""));
        assert!(!brackets_balanced(")("));
        assert!(!brackets_balanced("(()"));
        assert!(is_all_brackets("(())"));
        assert!(is_all_brackets(""));
        assert!(!is_all_brackets("(1)"));
    }

    #[test]
    fn literals() {
        assert!(is_numeric_literal("-5"));
        assert!(is_numeric_literal("1.5e-3"));
        assert!(!is_numeric_literal("1+2"));
        assert!(!is_numeric_literal("pi"));
    }

    #[test]
    fn exponent_signs() {
        assert!(is_exponent_sign(&chars("1.5e-3"), 4));
        assert!(is_exponent_sign(&chars("2e+10"), 2));
        assert!(is_exponent_sign(&chars("1.e-3"), 3));
        assert!(!is_exponent_sign(&chars(".e-3"), 2));
        assert!(!is_exponent_sign(&chars("e-3"), 1));
        assert!(!is_exponent_sign(&chars("2e-x"), 2));
        assert!(!is_exponent_sign(&chars("xe-3"), 2));
        assert!(!is_exponent_sign(&chars("2e-"), 2));
        assert!(!is_exponent_sign(&chars("2-3"), 1));
    }

    #[test]
    fn implicit_multiplication() {
        assert_eq!(insert_implicit_multiplication("2(3)"), "2*(3)");
        assert_eq!(insert_implicit_multiplication("2x"), "2*x");
        assert_eq!(insert_implicit_multiplication("(1)(2)"), "(1)*(2)");
        assert_eq!(insert_implicit_multiplication("1e5"), "1e5");
        assert_eq!(insert_implicit_multiplication("2.5e-3"), "2.5e-3");
        assert_eq!(insert_implicit_multiplication("2e"), "2*e");
        assert_eq!(insert_implicit_multiplication("xpi"), "x*pi");
        assert_eq!(insert_implicit_multiplication("x(2)"), "x*(2)");
        assert_eq!(insert_implicit_multiplication("2sin(x)"), "2*sin(x)");
        assert_eq!(insert_implicit_multiplication("3\u{03C0}"), "3*\u{03C0}");
        assert_eq!(insert_implicit_multiplication("exp(1)"), "exp(1)");
        assert_eq!(insert_implicit_multiplication("2exp(x)"), "2*exp(x)");
        assert_eq!(insert_implicit_multiplication("ex"), "e*x");
    }

    #[test]
    fn preprocessing() {
        assert_eq!(preprocess(" 2 ( 3 ) "), "2*(3)");
        assert_eq!(preprocess("1e5"), "1e5");
    }
}
