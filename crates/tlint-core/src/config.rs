use crate::{
    lints::{RULE_GROUPS, all_rules},
    rule_table::RuleTable,
    settings::Settings,
    testing_library::TestingLibrarySettings,
};
use air_workspace::resolve::PathResolver;
use anyhow::Result;
use std::{collections::HashSet, path::PathBuf};

#[derive(Clone, Debug)]
/// Arguments provided in the CLI.
pub struct ArgsConfig {
    /// Paths to files to lint.
    pub files: Vec<PathBuf>,
    /// Names of rules to use. A single string with commas between rule names.
    pub select_rules: String,
    /// Names of rules to ignore. A single string with commas between rule names.
    pub ignore_rules: String,
}

#[derive(Clone, Debug)]
pub struct Config {
    /// Paths to files to lint.
    pub paths: Vec<PathBuf>,
    /// Rules passed by the user and/or recovered from the config file.
    pub rules: RuleTable,
    /// Options of the testing-library rules.
    pub testing_library: TestingLibrarySettings,
}

pub fn build_config(
    check_config: &ArgsConfig,
    resolver: &PathResolver<Settings>,
    paths: Vec<PathBuf>,
) -> Result<Config> {
    let items = resolver.items();
    if items.len() > 1 {
        tracing::warn!(
            "Found {n} configuration files, only the one in {path} is used.",
            n = items.len(),
            path = items[0].path().display()
        );
    }
    let toml_settings = items.first().map(|item| item.value());

    let rules_cli = parse_rules_cli(&check_config.select_rules, &check_config.ignore_rules)?;
    let rules_toml = parse_rules_toml(toml_settings)?;
    let rules = reconcile_rules(rules_cli, rules_toml)?;

    let testing_library = toml_settings
        .map(|settings| settings.linter.testing_library.clone())
        .unwrap_or_default();

    tracing::debug!("{rules}");

    Ok(Config { paths, rules, testing_library })
}

type RuleSelection = (Option<HashSet<String>>, HashSet<String>);

/// Parse CLI rule arguments and return (selected_rules, ignored_rules).
///
/// Returns None for selected_rules if no --select was specified.
/// Returns empty set for ignored_rules if no --ignore was specified.
pub fn parse_rules_cli(select_rules: &str, ignore_rules: &str) -> Result<RuleSelection> {
    let selected_rules = if select_rules.is_empty() {
        None
    } else {
        let passed_by_user: Vec<&str> = select_rules.split(',').collect();
        Some(expand_rules(&passed_by_user, "`--select`")?)
    };

    let ignored_rules = if ignore_rules.is_empty() {
        HashSet::new()
    } else {
        let passed_by_user: Vec<&str> = ignore_rules.split(',').collect();
        expand_rules(&passed_by_user, "`--ignore`")?
    };

    Ok((selected_rules, ignored_rules))
}

/// Parse TOML configuration and return (selected_rules, ignored_rules).
///
/// Returns None for selected_rules if no TOML select was specified (meaning use all rules).
/// Returns empty set for ignored_rules if no TOML ignore was specified.
pub fn parse_rules_toml(toml_settings: Option<&Settings>) -> Result<RuleSelection> {
    let Some(settings) = toml_settings else {
        return Ok((None, HashSet::new()));
    };

    let linter_settings = &settings.linter;

    let selected_rules = match &linter_settings.select {
        Some(select_rules) => {
            let passed_by_user: Vec<&str> = select_rules.iter().map(|s| s.as_str()).collect();
            Some(expand_rules(&passed_by_user, "field `select` in 'tlint.toml'")?)
        }
        None => None,
    };

    let ignored_rules = match &linter_settings.ignore {
        Some(ignore_rules) => {
            let passed_by_user: Vec<&str> = ignore_rules.iter().map(|s| s.as_str()).collect();
            expand_rules(&passed_by_user, "field `ignore` in 'tlint.toml'")?
        }
        None => HashSet::new(),
    };

    Ok((selected_rules, ignored_rules))
}

/// Replaces groups by their rules and checks that every name is a known
/// rule. `origin` names where the rules come from in the error message.
fn expand_rules(passed_by_user: &[&str], origin: &str) -> Result<HashSet<String>> {
    let all_rules = all_rules();
    let expanded_rules = replace_group_rules(passed_by_user, &all_rules);

    if let Some(invalid_rules) = get_invalid_rules(&all_rules, &expanded_rules) {
        return Err(anyhow::anyhow!(
            "Unknown rules in {origin}: {}",
            invalid_rules.join(", ")
        ));
    }

    Ok(expanded_rules
        .into_iter()
        .map(|x| x.trim().to_string())
        .collect())
}

// This takes rules that refer to groups (e.g. "TESTING") and replaces them
// with the rule names.
// Returns a vector with the original rule names left unmodified and the expanded
// group names.
fn replace_group_rules(rules_passed_by_user: &[&str], all_rules: &RuleTable) -> Vec<String> {
    let rule_groups_set: HashSet<&str> = RULE_GROUPS.iter().copied().collect();
    let mut expanded_rules = Vec::new();

    for &rule_or_group in rules_passed_by_user {
        let trimmed = rule_or_group.trim();

        if rule_groups_set.contains(trimmed) {
            for rule in all_rules.iter() {
                if rule.categories.iter().any(|cat| cat == trimmed) {
                    expanded_rules.push(rule.name.clone());
                }
            }
        } else {
            // This is a rule name (or invalid input), keep as-is
            expanded_rules.push(trimmed.to_string());
        }
    }
    expanded_rules
}

// Finds invalid rule names. This must come after expanding group names to
// individual rule names.
fn get_invalid_rules(all_rules: &RuleTable, rules_passed_by_user: &[String]) -> Option<Vec<String>> {
    let invalid_rules: Vec<String> = rules_passed_by_user
        .iter()
        .filter(|rule| {
            let trimmed = rule.trim();
            trimmed.is_empty() || !all_rules.enabled(trimmed)
        })
        .map(|x| {
            if x.trim().is_empty() {
                format!("\"{x}\" (empty or whitespace-only not allowed)")
            } else {
                x.clone()
            }
        })
        .collect();

    if invalid_rules.is_empty() {
        None
    } else {
        Some(invalid_rules)
    }
}

/// Reconcile rules from CLI and TOML configuration.
///
/// Strategy:
/// - CLI select takes precedence over TOML select
/// - CLI ignore and TOML ignore are combined (both applied)
/// - If neither CLI nor TOML specify select, start with all rules
fn reconcile_rules(rules_cli: RuleSelection, rules_toml: RuleSelection) -> Result<RuleTable> {
    let all_rules = all_rules();
    let (cli_selected, cli_ignored) = rules_cli;
    let (toml_selected, toml_ignored) = rules_toml;

    let base_selected: HashSet<String> = cli_selected
        .or(toml_selected)
        .unwrap_or_else(|| all_rules.iter().map(|x| x.name.clone()).collect());

    let all_ignored: HashSet<String> = cli_ignored.union(&toml_ignored).cloned().collect();

    let final_rules: RuleTable = all_rules
        .iter()
        .filter(|r| base_selected.contains(&r.name) && !all_ignored.contains(&r.name))
        .cloned()
        .collect();

    Ok(final_rules)
}
