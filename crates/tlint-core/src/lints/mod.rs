use crate::rule_table::RuleTable;

pub(crate) mod prefer_query_by_disappearance;

pub static RULE_GROUPS: &[&str] = &["TESTING"];

/// List of supported rules and the groups they belong to.
///
/// Possible categories:
/// - TESTING: misuse of a DOM-testing library in test files
pub fn all_rules() -> RuleTable {
    let mut rule_table = RuleTable::empty();
    rule_table.enable("prefer_query_by_disappearance", "TESTING");
    rule_table
}
