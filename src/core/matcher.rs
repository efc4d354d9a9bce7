// SocialGaze - core/matcher.rs
//
// Field predicates used by the aggregator.
// A matcher is either a single literal (equality) or a set of literals
// (membership). Conditions AND-combine matchers across fields.
// Core layer: pure logic, no I/O.

use crate::core::model::{Record, Value};
use std::collections::BTreeMap;

/// Predicate over a single field value.
#[derive(Debug, Clone, PartialEq)]
pub enum Matcher {
    /// Field equals this literal (type and value).
    Exact(Value),

    /// Field equals any literal in the set. An empty set matches nothing.
    AnyOf(Vec<Value>),
}

impl Matcher {
    pub fn exact(value: impl Into<Value>) -> Self {
        Matcher::Exact(value.into())
    }

    pub fn any_of<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Matcher::AnyOf(values.into_iter().map(Into::into).collect())
    }

    /// Test a field value. An absent field never matches.
    pub fn matches(&self, value: Option<&Value>) -> bool {
        let Some(value) = value else {
            return false;
        };
        match self {
            Matcher::Exact(expected) => value == expected,
            Matcher::AnyOf(set) => set.contains(value),
        }
    }
}

/// Mapping from field name to matcher; a record satisfies the conditions
/// only when every listed field matches. No conditions match every record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Conditions {
    clauses: BTreeMap<String, Matcher>,
}

impl Conditions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert. A repeated key replaces the earlier matcher.
    pub fn with(mut self, key: &str, matcher: Matcher) -> Self {
        self.insert(key, matcher);
        self
    }

    pub fn insert(&mut self, key: &str, matcher: Matcher) {
        self.clauses.insert(key.to_string(), matcher);
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Check if a record satisfies every clause.
    pub fn matches(&self, record: &Record) -> bool {
        self.clauses
            .iter()
            .all(|(key, matcher)| matcher.matches(record.get(key)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_requires_same_type() {
        let m = Matcher::exact("100");
        assert!(m.matches(Some(&Value::from("100"))));
        assert!(!m.matches(Some(&Value::from(100.0))));
    }

    #[test]
    fn test_absent_never_matches() {
        assert!(!Matcher::exact("True").matches(None));
        assert!(!Matcher::any_of(["High", "Medium"]).matches(None));
    }

    #[test]
    fn test_any_of_membership() {
        let m = Matcher::any_of(["High", "Medium"]);
        assert!(m.matches(Some(&Value::from("Medium"))));
        assert!(!m.matches(Some(&Value::from("Low"))));
        assert!(!m.matches(Some(&Value::from("high"))));
    }

    #[test]
    fn test_empty_set_matches_nothing() {
        let m = Matcher::AnyOf(Vec::new());
        assert!(!m.matches(Some(&Value::from("anything"))));
    }

    #[test]
    fn test_conditions_are_and_combined() {
        let record = Record::new()
            .with("region", "USA")
            .with("real_account_type", "Normal");
        let usa = Conditions::new().with("region", Matcher::exact("USA"));
        let usa_influencer = usa
            .clone()
            .with("real_account_type", Matcher::exact("Influencer"));

        assert!(usa.matches(&record));
        assert!(!usa_influencer.matches(&record));
        assert!(Conditions::new().matches(&record));
    }
}
