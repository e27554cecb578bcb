use air_fs::relativize_path;
use annotate_snippets::{Level, Renderer, Snippet};
use clap::ValueEnum;
use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

use tlint_core::diagnostic::Diagnostic;
use tlint_core::error::ParseError;
use tlint_core::location::Location;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
pub enum OutputFormat {
    #[default]
    /// Print diagnostics with full context using annotated code snippets
    Full,
    /// Print diagnostics in a concise format, one per line
    Concise,
    /// Print diagnostics as GitHub format
    Github,
    /// Print diagnostics as JSON
    Json,
}

impl OutputFormat {
    /// Formats read by other programs: nothing but the diagnostics is printed
    /// on stdout.
    pub fn is_structured(&self) -> bool {
        matches!(self, OutputFormat::Json | OutputFormat::Github)
    }
}

/// Takes the diagnostics and parsing errors in each file and then displays
/// them in different ways depending on the `--output-format` provided by the
/// user.
pub trait Emitter {
    fn emit<W: Write>(
        &self,
        writer: &mut W,
        diagnostics: &[&Diagnostic],
        errors: &[(String, anyhow::Error)],
    ) -> anyhow::Result<()>;
}

fn use_colors() -> bool {
    colored::control::SHOULD_COLORIZE.should_colorize()
}

// Row/col are computed for every diagnostic returned by `check()`.
fn location(diagnostic: &Diagnostic) -> Location {
    diagnostic.location.unwrap_or_default()
}

// Parse errors already name the file, other errors carry it in their context.
fn print_errors(errors: &[(String, anyhow::Error)]) {
    for (_path, err) in errors {
        let root_cause = err.root_cause();
        if root_cause.is::<ParseError>() {
            eprintln!("{}: {}", "Error".red().bold(), root_cause);
        } else {
            eprintln!("{}: {:#}", "Error".red().bold(), err);
        }
    }
}

fn print_summary<W: Write>(
    writer: &mut W,
    total_diagnostics: usize,
    errors: &[(String, anyhow::Error)],
) -> anyhow::Result<()> {
    if total_diagnostics > 1 {
        writeln!(writer, "Found {total_diagnostics} errors.")?;
    } else if total_diagnostics == 1 {
        writeln!(writer, "Found 1 error.")?;
    } else if errors.is_empty() {
        writeln!(writer, "All checks passed!")?;
    }
    Ok(())
}

pub struct ConciseEmitter;

impl Emitter for ConciseEmitter {
    fn emit<W: Write>(
        &self,
        writer: &mut W,
        diagnostics: &[&Diagnostic],
        errors: &[(String, anyhow::Error)],
    ) -> anyhow::Result<()> {
        let mut writer = BufWriter::new(writer);

        print_errors(errors);

        // Cache relativized paths to avoid repeated filesystem operations
        let mut path_cache = HashMap::new();

        for diagnostic in diagnostics {
            let location = location(diagnostic);
            let relative_path = path_cache
                .entry(&diagnostic.filename)
                .or_insert_with(|| relativize_path(diagnostic.filename.clone()));

            writeln!(
                writer,
                "{} [{}:{}] {} {}",
                relative_path.white(),
                location.row(),
                location.column(),
                diagnostic.message.name.red(),
                diagnostic.message.full_body()
            )?;
        }

        if !diagnostics.is_empty() {
            writeln!(writer)?;
        }
        print_summary(&mut writer, diagnostics.len(), errors)?;

        writer.flush()?;
        Ok(())
    }
}

#[derive(Debug, Serialize)]
struct JsonOutput<'a> {
    diagnostics: Vec<JsonDiagnostic<'a>>,
    errors: Vec<JsonError>,
}

#[derive(Debug, Serialize)]
struct JsonDiagnostic<'a> {
    rule: &'a str,
    message_id: &'a str,
    message: &'a str,
    suggestion: Option<&'a str>,
    filename: String,
    location: Location,
    range: (u32, u32),
}

impl<'a> From<&'a Diagnostic> for JsonDiagnostic<'a> {
    fn from(diagnostic: &'a Diagnostic) -> Self {
        Self {
            rule: &diagnostic.message.name,
            message_id: &diagnostic.message.message_id,
            message: &diagnostic.message.body,
            suggestion: diagnostic.message.suggestion.as_deref(),
            filename: relativize_path(diagnostic.filename.clone()),
            location: location(diagnostic),
            range: (
                diagnostic.range.start().into(),
                diagnostic.range.end().into(),
            ),
        }
    }
}

#[derive(Debug, Serialize)]
struct JsonError {
    file: String,
    error: String,
}

pub struct JsonEmitter;

impl Emitter for JsonEmitter {
    fn emit<W: Write>(
        &self,
        writer: &mut W,
        diagnostics: &[&Diagnostic],
        errors: &[(String, anyhow::Error)],
    ) -> anyhow::Result<()> {
        let mut writer = BufWriter::new(writer);

        let json_errors: Vec<JsonError> = errors
            .iter()
            .map(|(path, err)| JsonError { file: path.clone(), error: format!("{err:#}") })
            .collect();

        let output = JsonOutput {
            diagnostics: diagnostics.iter().map(|x| JsonDiagnostic::from(*x)).collect(),
            errors: json_errors,
        };

        serde_json::to_writer_pretty(&mut writer, &output)?;
        writeln!(writer)?;
        writer.flush()?;
        Ok(())
    }
}

pub struct GithubEmitter;

impl Emitter for GithubEmitter {
    fn emit<W: Write>(
        &self,
        writer: &mut W,
        diagnostics: &[&Diagnostic],
        errors: &[(String, anyhow::Error)],
    ) -> anyhow::Result<()> {
        let mut writer = BufWriter::new(writer);
        for diagnostic in diagnostics {
            let location = location(diagnostic);
            let (row, col) = (location.row(), location.column());

            // The location appears twice: between the "::" markers for the
            // annotation in the PR diff, and after them for the workflow log.
            writeln!(
                writer,
                "::error title=tlint ({name}),file={file},line={row},col={col}::{file}:{row}:{col} [{name}] {message}",
                name = diagnostic.message.name,
                file = diagnostic.filename.to_string_lossy(),
                message = diagnostic.message.full_body()
            )?;
        }

        for (path, err) in errors {
            writeln!(writer, "::error title=tlint,file={path}::{path}: {err:#}")?;
        }

        writer.flush()?;
        Ok(())
    }
}

pub struct FullEmitter;

impl Emitter for FullEmitter {
    fn emit<W: Write>(
        &self,
        writer: &mut W,
        diagnostics: &[&Diagnostic],
        errors: &[(String, anyhow::Error)],
    ) -> anyhow::Result<()> {
        let mut writer = BufWriter::new(writer);
        let renderer = if use_colors() {
            Renderer::styled()
        } else {
            Renderer::plain()
        };

        print_errors(errors);
        if !errors.is_empty() && !diagnostics.is_empty() {
            eprintln!();
        }

        // Diagnostics are sorted by file, so each file is read once.
        let mut file_cache: HashMap<&Path, String> = HashMap::new();
        let mut path_cache = HashMap::new();
        let mut total_diagnostics = 0usize;

        for diagnostic in diagnostics {
            let path = diagnostic.filename.as_path();
            if !file_cache.contains_key(path) {
                match fs::read_to_string(path) {
                    Ok(content) => {
                        file_cache.insert(path, content);
                    }
                    Err(err) => {
                        writer.flush()?;
                        eprintln!(
                            "Warning: Could not read source file {}: {}",
                            path.display(),
                            err
                        );
                        continue;
                    }
                }
            }
            let Some(source) = file_cache.get(path) else {
                continue;
            };

            let start_offset: usize = diagnostic.range.start().into();
            let end_offset: usize = diagnostic.range.end().into();

            let file_path = path_cache
                .entry(&diagnostic.filename)
                .or_insert_with(|| relativize_path(diagnostic.filename.clone()));

            let snippet = Snippet::source(source)
                .origin(file_path)
                .fold(true)
                .annotation(
                    Level::Error
                        .span(start_offset..end_offset)
                        .label(&diagnostic.message.body),
                );

            let mut message = Level::Error
                .title(&diagnostic.message.name)
                .snippet(snippet);

            if let Some(suggestion) = &diagnostic.message.suggestion {
                message = message.footer(Level::Help.title(suggestion));
            }

            writeln!(writer, "{}\n", renderer.render(message))?;
            total_diagnostics += 1;
        }

        print_summary(&mut writer, total_diagnostics, errors)?;

        writer.flush()?;
        Ok(())
    }
}
