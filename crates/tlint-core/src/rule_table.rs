use std::fmt::Display;
use std::fmt::Formatter;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub name: String,
    /// Groups the rule belongs to, e.g. `TESTING`.
    pub categories: Vec<String>,
}

impl Rule {
    pub fn new(name: &str, categories: &str) -> Self {
        Self {
            name: name.to_string(),
            categories: categories.split(',').map(|x| x.trim().to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleTable {
    pub enabled: Vec<Rule>,
}

impl RuleTable {
    /// Creates a new empty rule table.
    pub fn empty() -> Self {
        Self { enabled: Vec::new() }
    }

    /// Returns whether the given rule should be checked.
    #[inline]
    pub fn enabled(&self, rule: &str) -> bool {
        self.enabled.iter().any(|r| r.name == rule)
    }

    /// Enables the given rule. `categories` is a comma-separated list of
    /// groups.
    #[inline]
    pub fn enable(&mut self, rule: &str, categories: &str) {
        if !self.enabled(rule) {
            self.enabled.push(Rule::new(rule, categories));
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.enabled.iter()
    }

    pub fn len(&self) -> usize {
        self.enabled.len()
    }

    pub fn is_empty(&self) -> bool {
        self.enabled.is_empty()
    }
}

impl FromIterator<Rule> for RuleTable {
    fn from_iter<T: IntoIterator<Item = Rule>>(iter: T) -> Self {
        Self { enabled: iter.into_iter().collect() }
    }
}

impl Display for RuleTable {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.enabled.iter().map(|r| r.name.as_str()).collect();
        write!(f, "Enabled rules: {}", names.join(", "))
    }
}
