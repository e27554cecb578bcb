use std::process::Command;

use tempfile::TempDir;

use crate::helpers::CommandExt;
use crate::helpers::binary_path;
use crate::helpers::tlint_check;

const INVALID: &str = "import { screen } from '@testing-library/react';

await waitForElementToBeRemoved(() => screen.getByText('Loading'));
";

const VALID: &str = "import { screen } from '@testing-library/react';

await waitForElementToBeRemoved(() => screen.queryByText('Loading'));
";

#[test]
fn test_reports_get_by_query() -> anyhow::Result<()> {
    let directory = TempDir::new()?;
    let directory = directory.path();

    std::fs::write(directory.join("app.test.js"), INVALID)?;

    insta::assert_snapshot!(
        tlint_check(directory)
            .arg("--output-format")
            .arg("concise")
            .run()
            .normalize_os_executable_name(),
        @r"
    success: false
    exit_code: 1
    ----- stdout -----
    app.test.js [3:33] prefer_query_by_disappearance Prefer using queryBy* when waiting for disappearance.

    Found 1 error.

    ----- stderr -----

    ----- args -----
    check . --output-format concise
    "
    );

    Ok(())
}

#[test]
fn test_query_by_passes() -> anyhow::Result<()> {
    let directory = TempDir::new()?;
    let directory = directory.path();

    std::fs::write(directory.join("app.test.js"), VALID)?;

    let output = tlint_check(directory).run();
    assert_eq!(output.code(), 0);
    assert_eq!(output.stdout, "All checks passed!\n");

    Ok(())
}

#[test]
fn test_file_without_testing_library_import() -> anyhow::Result<()> {
    let directory = TempDir::new()?;
    let directory = directory.path();

    let contents = INVALID.replace("@testing-library/react", "./screen");
    std::fs::write(directory.join("app.test.js"), contents)?;

    let output = tlint_check(directory).run();
    assert_eq!(output.code(), 0);
    assert_eq!(output.stdout, "All checks passed!\n");

    Ok(())
}

#[test]
fn test_typescript_and_jsx_extensions() -> anyhow::Result<()> {
    let directory = TempDir::new()?;
    let directory = directory.path();

    std::fs::write(
        directory.join("app.test.tsx"),
        "import { render } from '@testing-library/react';

const { getByText } = render(<App />);
await waitForElementToBeRemoved(() => getByText('Loading') as HTMLElement);
await waitForElementToBeRemoved((): HTMLElement => getByText('Loading'));
",
    )?;
    std::fs::write(directory.join("other.test.mjs"), INVALID)?;
    std::fs::write(directory.join("notes.md"), INVALID)?;

    let output = tlint_check(directory)
        .arg("--output-format")
        .arg("concise")
        .run();
    assert_eq!(output.code(), 1);
    assert!(output.stdout.contains("app.test.tsx [5:33] prefer_query_by_disappearance"));
    assert!(output.stdout.contains("other.test.mjs [3:33] prefer_query_by_disappearance"));
    assert!(!output.stdout.contains("notes.md"));
    assert!(output.stdout.contains("Found 2 errors."));

    Ok(())
}

#[test]
fn test_no_js_files() -> anyhow::Result<()> {
    let directory = TempDir::new()?;
    let directory = directory.path();

    std::fs::write(directory.join("README.md"), "# Hello")?;

    insta::assert_snapshot!(
        tlint_check(directory).run().normalize_os_executable_name(),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    Warning: No JavaScript or TypeScript files found under the given path(s).

    ----- stderr -----

    ----- args -----
    check .
    "
    );

    Ok(())
}

#[test]
fn test_parse_error_is_reported() -> anyhow::Result<()> {
    let directory = TempDir::new()?;
    let directory = directory.path();

    std::fs::write(directory.join("broken.test.js"), "const = ;")?;
    std::fs::write(directory.join("app.test.js"), INVALID)?;

    let output = tlint_check(directory)
        .arg("--output-format")
        .arg("concise")
        .run();

    // Errors win over diagnostics in the exit code.
    assert_eq!(output.code(), 2);
    assert!(
        output
            .stderr
            .contains("Error: Failed to parse broken.test.js due to syntax errors.")
    );
    assert!(output.stdout.contains("app.test.js [3:33]"));

    Ok(())
}

#[test]
fn test_default_exclude() -> anyhow::Result<()> {
    let directory = TempDir::new()?;
    let directory = directory.path();

    std::fs::create_dir_all(directory.join("node_modules").join("pkg"))?;
    std::fs::write(
        directory.join("node_modules").join("pkg").join("index.test.js"),
        INVALID,
    )?;
    std::fs::write(directory.join("app.test.js"), VALID)?;

    let output = tlint_check(directory).run();
    assert_eq!(output.code(), 0);

    let output = tlint_check(directory)
        .arg("--no-default-exclude")
        .arg("--output-format")
        .arg("concise")
        .run();
    assert_eq!(output.code(), 1);
    assert!(output.stdout.contains("index.test.js [3:33]"));

    Ok(())
}

#[test]
fn test_gitignored_files_are_skipped() -> anyhow::Result<()> {
    let directory = TempDir::new()?;
    let directory = directory.path();

    std::fs::write(directory.join(".gitignore"), "generated/\n")?;
    std::fs::create_dir_all(directory.join("generated"))?;
    std::fs::write(directory.join("generated").join("app.test.js"), INVALID)?;
    std::fs::write(directory.join("app.test.js"), VALID)?;

    let output = tlint_check(directory).run();
    assert_eq!(output.code(), 0);
    assert_eq!(output.stdout, "All checks passed!\n");

    Ok(())
}

#[test]
fn test_explicit_file() -> anyhow::Result<()> {
    let directory = TempDir::new()?;
    let directory = directory.path();

    std::fs::write(directory.join("a.test.js"), INVALID)?;
    std::fs::write(directory.join("b.test.js"), INVALID)?;

    let output = Command::new(binary_path())
        .current_dir(directory)
        .env("NO_COLOR", "1")
        .arg("check")
        .arg("b.test.js")
        .arg("--output-format")
        .arg("concise")
        .run();
    assert_eq!(output.code(), 1);
    assert!(output.stdout.contains("b.test.js [3:33]"));
    assert!(!output.stdout.contains("a.test.js"));

    Ok(())
}

#[test]
fn test_statistics() -> anyhow::Result<()> {
    let directory = TempDir::new()?;
    let directory = directory.path();

    std::fs::write(directory.join("a.test.js"), INVALID)?;
    std::fs::write(directory.join("b.test.js"), INVALID)?;

    insta::assert_snapshot!(
        tlint_check(directory)
            .arg("--statistics")
            .run()
            .normalize_os_executable_name(),
        @r"
    success: false
    exit_code: 1
    ----- stdout -----
        2 prefer_query_by_disappearance

    ----- stderr -----

    ----- args -----
    check . --statistics
    "
    );

    Ok(())
}

#[test]
fn test_with_timing() -> anyhow::Result<()> {
    let directory = TempDir::new()?;
    let directory = directory.path();

    std::fs::write(directory.join("a.test.js"), VALID)?;

    let output = tlint_check(directory)
        .arg("--with-timing")
        .run()
        .normalize_timing();
    assert_eq!(output.code(), 0);
    assert_eq!(
        output.stdout,
        "All checks passed!\n\nChecked files in: [TIME]\n"
    );

    Ok(())
}

#[test]
fn test_missing_paths_argument() -> anyhow::Result<()> {
    let output = Command::new(binary_path()).arg("check").run();
    assert!(!output.status.success());
    assert!(output.stderr.contains("Usage: tlint check"));

    Ok(())
}
