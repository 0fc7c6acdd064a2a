//! Obscenity filter
//!
//! Rejects handles containing disguised profanity. Rules are unanchored and
//! match fragments anywhere in a name, so some innocent names are filtered
//! too ("shelly" contains "hell").

use std::sync::{Arc, OnceLock};

use regex::{Regex, RegexBuilder};

/// Built-in rules, each covering common leetspeak substitutions
/// (a/4, e/3, i/l/1, o/0, s/5, t/7).
pub const BUILTIN_RULES: &[&str] = &[
    // "anal" not preceded by "c"
    "(?:^|[^c])(?:a|4)n(?:a|4)(?:l|i|1)",
    "(?:a|4)nu(?:s|5)",
    "(?:a|4)r(?:s|5)(?:e|3)",
    "(?:a|4)(?:s|5)(?:s|5)",
    "b(?:a|4)(?:l|i|1)(?:l|i|1)(?:s|5)",
    "b(?:a|4)(?:s|5)(?:t|7)(?:a|4)rd",
    "b(?:l|i|1)(?:t|7)ch",
    "b(?:l|i|1)(?:a|4)(?:t|7)ch",
    "b(?:l|i|1)(?:o|0)(?:o|0)dy",
    "b(?:l|i|1)(?:o|0)wj(?:o|0)b",
    "b(?:o|0)(?:l|i|1)(?:l|i|1)(?:o|0)ck",
    "b(?:o|0)(?:l|i|1)(?:l|i|1)(?:o|0)k",
    "b(?:o|0)n(?:e|3)r",
    "b(?:o|0)(?:o|0)b",
    "bum",
    "bu(?:t|7)(?:t|7)",
    "c(?:l|i|1)(?:l|i|1)(?:t|7)",
    "c(?:o|0)ck",
    "c(?:o|0)(?:o|0)n",
    "cr(?:a|4)p",
    "cun(?:t|7)",
    "d(?:a|4)mn",
    "d(?:l|i|1)ck",
    "d(?:l|i|1)(?:l|i|1)d(?:o|0)",
    "dyk(?:e|3)",
    "(?:e|3)r(?:o|0)(?:t|7)(?:l|i|1)c",
    "f(?:a|4)g",
    "f(?:e|3)ck",
    "f(?:e|3)(?:l|i|1)(?:l|i|1)(?:a|4)(?:t|7)",
    "f(?:e|3)(?:l|i|1)ch",
    "fuck",
    "fudg(?:e|3)p(?:a|4)ck",
    "f(?:l|i|1)(?:a|4)ng(?:e|3)",
    "h(?:e|3)(?:l|i|1)(?:l|i|1)",
    "h(?:l|i|1)(?:t|7)(?:l|i|1)(?:e|3)r",
    "h(?:o|0)m(?:o|0)",
    "j(?:e|3)rk",
    "j(?:l|i|1)zz",
    "kn(?:o|0)b(?:e|3)nd",
    "(?:l|i|1)(?:a|4)b(?:l|i|1)(?:a|4)",
    "(?:l|i|1)m(?:a|4)(?:o|0)",
    "(?:l|i|1)mf(?:a|4)(?:o|0)",
    "muff",
    "n(?:l|i|1)gg(?:(?:e|3)r|(?:a|4))",
    "(?:o|0)mg",
    "p(?:e|3)n(?:l|i|1)(?:s|5)",
    "p(?:l|i|1)(?:s|5)(?:s|5)",
    "p(?:o|0)(?:o|0)p",
    "pr(?:l|i|1)ck",
    "pub(?:e|3)",
    "pu(?:s|5)(?:s|5)y",
    "qu(?:e|3)(?:e|3)r",
    "(?:s|5)(?:a|4)(?:t|7)(?:a|4)n",
    "(?:s|5)cr(?:o|0)(?:t|7)um",
    "(?:s|5)(?:e|3)x",
    "(?:s|5)h(?:l|i|1)(?:t|7)",
    "(?:s|5)(?:l|i|1)u(?:t|7)",
    "(?:s|5)m(?:e|3)gm(?:a|4)",
    "(?:s|5)punk",
    "(?:t|7)(?:l|i|1)(?:t|7)",
    "(?:t|7)(?:o|0)(?:s|5)(?:s|5)(?:e|3)r",
    "(?:t|7)urd",
    "(?:t|7)w(?:a|4)(?:t|7)",
    "v(?:a|4)g(?:l|i|1)n(?:a|4)",
    "w(?:a|4)nk",
    "wh(?:o|0)r(?:e|3)",
    "w(?:t|7)f",
];

static BUILTIN: OnceLock<Arc<ObscenityFilter>> = OnceLock::new();

/// Ordered, immutable set of case-insensitive name rules
#[derive(Debug, Clone)]
pub struct ObscenityFilter {
    rules: Vec<Regex>,
}

impl ObscenityFilter {
    /// Compile a custom rule set
    pub fn with_rules<S: AsRef<str>>(
        patterns: impl IntoIterator<Item = S>,
    ) -> Result<Self, regex::Error> {
        let rules = patterns
            .into_iter()
            .map(|p| RegexBuilder::new(p.as_ref()).case_insensitive(true).build())
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { rules })
    }

    /// The process-wide filter built from `BUILTIN_RULES`, compiled on first use
    pub fn builtin() -> Arc<ObscenityFilter> {
        BUILTIN
            .get_or_init(|| {
                Arc::new(
                    ObscenityFilter::with_rules(BUILTIN_RULES.iter().copied())
                        .expect("built-in obscenity rules are valid patterns"),
                )
            })
            .clone()
    }

    /// An empty filter that admits every name
    pub fn permissive() -> Self {
        Self { rules: Vec::new() }
    }

    pub fn is_match(&self, name: &str) -> bool {
        self.rules.iter().any(|r| r.is_match(name))
    }

    /// First rule (in order) that matches `name`
    pub fn matching_rule(&self, name: &str) -> Option<&str> {
        self.rules
            .iter()
            .find(|r| r.is_match(name))
            .map(Regex::as_str)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
