// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use rustyline::{
    completion::{extract_word, Completer, Pair},
    highlight::Highlighter,
    hint::Hinter,
    validate::Validator,
    Helper,
};
use rustyline::{Context as LineContext, Result};

use decicalc_core::runtime::OPERATIONS;

use crate::config::Config;
use crate::fmt::{to_ansi_string, FmtToken};
use crate::runner::COMMANDS;

const REGISTERS: &[&str] = &["ans", "mem", "fans", "fmem", "pi", "e"];

/// Separators that end a completable word.
const BREAK_CHARS: &[u8] = b" +-*/^%,()";

pub struct CalcHelper {
    config: Config,
}

impl CalcHelper {
    pub fn new(config: Config) -> CalcHelper {
        CalcHelper { config }
    }

    /// Every name that can be completed. Function names keep their
    /// opening bracket.
    pub fn candidates(prefix: &str) -> Vec<&'static str> {
        let prefix = prefix.to_lowercase();
        let mut names: Vec<&'static str> = OPERATIONS
            .iter()
            .map(|(name, _)| *name)
            .chain(REGISTERS.iter().copied())
            .chain(COMMANDS.iter().copied())
            .filter(|name| name.is_ascii() && name.starts_with(&prefix[..]))
            .collect();
        names.sort_unstable();
        names.dedup();
        names
    }
}

impl Completer for CalcHelper {
    type Candidate = Pair;

    fn complete(&self, line: &str, pos: usize, _ctx: &LineContext) -> Result<(usize, Vec<Pair>)> {
        let (res_pos, name) = extract_word(line, pos, None, BREAK_CHARS);
        if name.is_empty() {
            return Ok((pos, vec![]));
        }

        let results = CalcHelper::candidates(name)
            .into_iter()
            .map(|candidate| Pair {
                display: to_ansi_string(
                    &self.config,
                    &[(FmtToken::PropName, candidate.to_owned())],
                ),
                replacement: candidate.to_owned(),
            })
            .collect();

        Ok((res_pos, results))
    }
}

impl Helper for CalcHelper {}

impl Validator for CalcHelper {}

impl Highlighter for CalcHelper {}

impl Hinter for CalcHelper {
    type Hint = String;
}

#[cfg(test)]
mod tests {
    use super::CalcHelper;

    #[test]
    fn function_names() {
        assert_eq!(
            CalcHelper::candidates("arcc"),
            vec!["arccos(", "arccosh(", "arccot(", "arccoth(", "arccsc(", "arccsch("]
        );
        assert_eq!(CalcHelper::candidates("SQ"), vec!["sqrt("]);
    }

    #[test]
    fn registers_and_commands() {
        assert_eq!(CalcHelper::candidates("fm"), vec!["fmem"]);
        assert_eq!(CalcHelper::candidates(":f"), vec![":fans", ":fsto"]);
        assert!(CalcHelper::candidates("zz").is_empty());
    }
}
