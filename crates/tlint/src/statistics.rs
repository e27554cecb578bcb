use colored::Colorize;
use std::{collections::HashMap, path::PathBuf};
use tlint_core::diagnostic::Diagnostic;

use crate::status::ExitStatus;

pub fn print_statistics(
    diagnostics: &[&Diagnostic],
    parent_config_path: Option<PathBuf>,
) -> anyhow::Result<ExitStatus> {
    if diagnostics.is_empty() {
        println!("All checks passed!");
        return Ok(ExitStatus::Success);
    }

    let mut counts: HashMap<&str, usize> = HashMap::new();
    for diagnostic in diagnostics {
        *counts.entry(diagnostic.message.name.as_str()).or_default() += 1;
    }

    // Most frequent first, ties by name so the output is stable.
    let mut sorted: Vec<(&str, usize)> = counts.into_iter().collect();
    sorted.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));

    for (rule, count) in sorted {
        println!("{:>5} {}", count.to_string().bold(), rule.bold().red());
    }

    // Inform the user if the config file used comes from a parent directory.
    if let Some(config_path) = parent_config_path {
        println!("\nUsed '{}'", config_path.display());
    }

    Ok(ExitStatus::Failure)
}
