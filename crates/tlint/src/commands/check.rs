use air_workspace::resolve::PathResolver;
use tlint_core::discovery::{discover_js_file_paths, discover_settings};
use tlint_core::{
    config::ArgsConfig, config::build_config, diagnostic::Diagnostic, settings::Settings,
};

use anyhow::Result;
use colored::Colorize;
use std::env;
use std::path::PathBuf;
use std::time::Instant;

use crate::args::CheckCommand;
use crate::output_format::{
    ConciseEmitter, Emitter, FullEmitter, GithubEmitter, JsonEmitter, OutputFormat,
};
use crate::statistics::print_statistics;
use crate::status::ExitStatus;

pub fn check(args: CheckCommand) -> Result<ExitStatus> {
    let start = args.with_timing.then(Instant::now);

    let mut resolver = PathResolver::new(Settings::default());

    // Track if we're using a config from a parent directory
    let mut parent_config_path: Option<PathBuf> = None;
    let cwd = env::current_dir().ok();

    for mut ds in discover_settings(&args.files)? {
        if args.no_default_exclude {
            ds.settings.linter.default_exclude = Some(false);
        }

        if let (Some(config_path), Some(current_dir)) = (&ds.config_path, &cwd)
            && let Some(config_dir) = config_path.parent()
            && config_dir != current_dir
        {
            parent_config_path = Some(config_path.clone());
        }

        resolver.add(&ds.directory, ds.settings);
    }

    let paths = discover_js_file_paths(&args.files, &resolver, args.no_default_exclude)
        .into_iter()
        .filter_map(Result::ok)
        .collect::<Vec<_>>();

    if paths.is_empty() {
        println!(
            "{}: {}",
            "Warning".yellow().bold(),
            "No JavaScript or TypeScript files found under the given path(s)."
                .white()
                .bold()
        );
        return Ok(ExitStatus::Success);
    }

    tracing::debug!("Checking {n} files", n = paths.len());

    let check_config = ArgsConfig {
        files: args.files.iter().map(|s| s.into()).collect(),
        select_rules: args.select.clone(),
        ignore_rules: args.ignore.clone(),
    };

    let config = build_config(&check_config, &resolver, paths)?;

    let file_results = tlint_core::check::check(config);

    let mut all_errors = Vec::new();
    let mut all_diagnostics = Vec::new();

    for (path, result) in file_results {
        match result {
            Ok(diagnostics) => {
                if !diagnostics.is_empty() {
                    all_diagnostics.push((path, diagnostics));
                }
            }
            Err(e) => {
                all_errors.push((path, e));
            }
        }
    }

    // Flatten all diagnostics into a single vector and sort globally
    let mut all_diagnostics_flat: Vec<&Diagnostic> = all_diagnostics
        .iter()
        .flat_map(|(_path, diagnostics)| diagnostics.iter())
        .collect();

    all_diagnostics_flat.sort();

    if args.statistics {
        let status = print_statistics(&all_diagnostics_flat, parent_config_path)?;
        return Ok(exit_status(status, &all_errors));
    }

    let mut stdout = std::io::stdout();

    match args.output_format {
        OutputFormat::Concise => {
            ConciseEmitter.emit(&mut stdout, &all_diagnostics_flat, &all_errors)?;
        }
        OutputFormat::Json => {
            JsonEmitter.emit(&mut stdout, &all_diagnostics_flat, &all_errors)?;
        }
        OutputFormat::Github => {
            GithubEmitter.emit(&mut stdout, &all_diagnostics_flat, &all_errors)?;
        }
        OutputFormat::Full => {
            FullEmitter.emit(&mut stdout, &all_diagnostics_flat, &all_errors)?;
        }
    }

    // Timing and config info would corrupt JSON/GitHub output.
    if !args.output_format.is_structured() {
        if let Some(config_path) = parent_config_path {
            println!("\nUsed '{}'", config_path.display());
        }

        if let Some(start) = start {
            let duration = start.elapsed();
            println!("\nChecked files in: {duration:?}");
        }
    }

    let status = if all_diagnostics_flat.is_empty() {
        ExitStatus::Success
    } else {
        ExitStatus::Failure
    };

    Ok(exit_status(status, &all_errors))
}

// Files that couldn't be read or parsed take precedence over diagnostics.
fn exit_status(status: ExitStatus, errors: &[(String, anyhow::Error)]) -> ExitStatus {
    if errors.is_empty() {
        status
    } else {
        ExitStatus::Error
    }
}
