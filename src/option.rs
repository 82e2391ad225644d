//! Options for compiling `matches` pattern operands.

use regex::{Regex, RegexBuilder};

use crate::error::PredicateError;

/// Compilation settings for pattern operands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternOption {
    pub(crate) case_insensitive: bool,
    pub(crate) size_limit: usize,
    pub(crate) dfa_size_limit: usize,
}

impl Default for PatternOption {
    fn default() -> Self {
        PatternOption {
            case_insensitive: false,
            size_limit: 1024 * 1024,
            dfa_size_limit: 2 * 1024 * 1024,
        }
    }
}

impl PatternOption {
    /// Match letters regardless of case.
    #[must_use]
    pub fn case_insensitive(self, case_insensitive: bool) -> Self {
        PatternOption {
            case_insensitive,
            ..self
        }
    }

    /// Upper bound, in bytes, on the compiled program.
    #[must_use]
    pub fn size_limit(self, size_limit: usize) -> Self {
        PatternOption { size_limit, ..self }
    }

    /// Upper bound, in bytes, on the lazy DFA cache.
    #[must_use]
    pub fn dfa_size_limit(self, dfa_size_limit: usize) -> Self {
        PatternOption {
            dfa_size_limit,
            ..self
        }
    }
}

impl PatternOption {
    pub(crate) fn compile(&self, pattern: &str) -> Result<Regex, PredicateError> {
        RegexBuilder::new(pattern)
            .case_insensitive(self.case_insensitive)
            .size_limit(self.size_limit)
            .dfa_size_limit(self.dfa_size_limit)
            .build()
            .map_err(|err| PredicateError::InvalidPattern(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_overrides_defaults() {
        let option = PatternOption::default()
            .case_insensitive(true)
            .size_limit(4096);
        assert!(option.case_insensitive);
        assert_eq!(option.size_limit, 4096);
        assert_eq!(option.dfa_size_limit, PatternOption::default().dfa_size_limit);
    }

    #[test]
    fn compile_honours_case_option() {
        let strict = PatternOption::default().compile("^ab").expect("valid pattern");
        assert!(!strict.is_match("ABC"));
        let relaxed = PatternOption::default()
            .case_insensitive(true)
            .compile("^ab")
            .expect("valid pattern");
        assert!(relaxed.is_match("ABC"));
    }

    #[test]
    fn compile_reports_bad_patterns() {
        assert!(matches!(
            PatternOption::default().compile("(unclosed"),
            Err(PredicateError::InvalidPattern(_))
        ));
        assert!(matches!(
            PatternOption::default().size_limit(16).compile(r"\w{100}"),
            Err(PredicateError::InvalidPattern(_))
        ));
    }
}
