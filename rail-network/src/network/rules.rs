//! Keyword rule engine.
//!
//! Classification of station names and route names is driven by ordered
//! lists of substring rules. The first rule with a matching keyword
//! decides the label; if none matches, the rule set's default applies.

use serde::{Deserialize, Serialize};

/// A set of keywords that, if any is a substring of the text, yields `label`.
///
/// Matching is case-sensitive. Empty keywords never match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordRule<L> {
    pub keywords: Vec<String>,
    pub label: L,
}

impl<L> KeywordRule<L> {
    pub fn new<I, S>(keywords: I, label: L) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keywords: keywords.into_iter().map(Into::into).collect(),
            label,
        }
    }

    /// Whether any keyword occurs in `text`.
    pub fn matches(&self, text: &str) -> bool {
        self.keywords
            .iter()
            .any(|k| !k.is_empty() && text.contains(k.as_str()))
    }
}

/// Ordered rules evaluated first-match-wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSet<L> {
    rules: Vec<KeywordRule<L>>,
    default: L,
}

impl<L: Copy> RuleSet<L> {
    /// An empty rule set that always yields `default`.
    pub fn new(default: L) -> Self {
        Self {
            rules: Vec::new(),
            default,
        }
    }

    /// Build from an existing rule list.
    pub fn from_rules(rules: Vec<KeywordRule<L>>, default: L) -> Self {
        Self { rules, default }
    }

    /// Append a rule; it is evaluated after all existing rules.
    pub fn with_rule(mut self, rule: KeywordRule<L>) -> Self {
        self.rules.push(rule);
        self
    }

    /// Label of the first matching rule, or the default.
    pub fn classify(&self, text: &str) -> L {
        self.rules
            .iter()
            .find(|r| r.matches(text))
            .map_or(self.default, |r| r.label)
    }

    pub fn rules(&self) -> &[KeywordRule<L>] {
        &self.rules
    }
}
