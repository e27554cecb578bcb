use tempfile::TempDir;

use crate::helpers::CommandExt;
use crate::helpers::tlint_check;

const LOCAL_UTILS: &str = "import { screen } from 'test-utils';

await waitForElementToBeRemoved(() => screen.getByText('Loading'));
";

const INVALID: &str = "import { screen } from '@testing-library/react';

await waitForElementToBeRemoved(() => screen.getByText('Loading'));
";

#[test]
fn test_empty_toml_uses_all_rules() -> anyhow::Result<()> {
    let directory = TempDir::new()?;
    let directory = directory.path();

    std::fs::write(directory.join("tlint.toml"), "[lint]\n")?;
    std::fs::write(directory.join("app.test.js"), INVALID)?;

    let output = tlint_check(directory).run();
    assert_eq!(output.code(), 1);
    assert!(output.stdout.contains("Found 1 error."));

    Ok(())
}

#[test]
fn test_empty_select_array() -> anyhow::Result<()> {
    let directory = TempDir::new()?;
    let directory = directory.path();

    std::fs::write(directory.join("tlint.toml"), "[lint]\nselect = []\n")?;
    std::fs::write(directory.join("app.test.js"), INVALID)?;

    let output = tlint_check(directory).run();
    assert_eq!(output.code(), 0);
    assert_eq!(output.stdout, "All checks passed!\n");

    // The CLI selection wins over the TOML one.
    let output = tlint_check(directory)
        .arg("--select")
        .arg("prefer_query_by_disappearance")
        .run();
    assert_eq!(output.code(), 1);

    Ok(())
}

#[test]
fn test_toml_ignore() -> anyhow::Result<()> {
    let directory = TempDir::new()?;
    let directory = directory.path();

    std::fs::write(
        directory.join(".tlint.toml"),
        "[lint]\nignore = [\"TESTING\"]\n",
    )?;
    std::fs::write(directory.join("app.test.js"), INVALID)?;

    let output = tlint_check(directory).run();
    assert_eq!(output.code(), 0);
    assert_eq!(output.stdout, "All checks passed!\n");

    Ok(())
}

#[test]
fn test_unknown_rule_in_toml() -> anyhow::Result<()> {
    let directory = TempDir::new()?;
    let directory = directory.path();

    std::fs::write(directory.join("tlint.toml"), "[lint]\nselect = [\"foo\"]\n")?;
    std::fs::write(directory.join("app.test.js"), INVALID)?;

    let output = tlint_check(directory).run();
    assert_eq!(output.code(), 2);
    assert!(
        output
            .stderr
            .contains("Cause: Unknown rules in field `select` in 'tlint.toml': foo")
    );

    Ok(())
}

#[test]
fn test_invalid_toml() -> anyhow::Result<()> {
    let directory = TempDir::new()?;
    let directory = directory.path();

    std::fs::write(directory.join("tlint.toml"), "[lint]\nunknown-field = 1\n")?;
    std::fs::write(directory.join("app.test.js"), INVALID)?;

    let output = tlint_check(directory).run();
    assert_eq!(output.code(), 2);
    assert!(output.stderr.starts_with("tlint failed\n"));
    assert!(output.stderr.contains("Failed to parse"));
    assert!(output.stderr.contains("unknown-field"));

    Ok(())
}

#[test]
fn test_extend_modules() -> anyhow::Result<()> {
    let directory = TempDir::new()?;
    let directory = directory.path();

    std::fs::write(directory.join("app.test.js"), LOCAL_UTILS)?;

    // `test-utils` is not a testing-library module by default.
    let output = tlint_check(directory).run();
    assert_eq!(output.code(), 0);

    std::fs::write(
        directory.join("tlint.toml"),
        "[lint.testing-library]\nextend-modules = [\"test-utils\"]\n",
    )?;

    let output = tlint_check(directory)
        .arg("--output-format")
        .arg("concise")
        .run();
    assert_eq!(output.code(), 1);
    assert!(output.stdout.contains("app.test.js [3:33] prefer_query_by_disappearance"));

    Ok(())
}

#[test]
fn test_replace_modules() -> anyhow::Result<()> {
    let directory = TempDir::new()?;
    let directory = directory.path();

    std::fs::write(
        directory.join("tlint.toml"),
        "[lint.testing-library]\nmodules = [\"test-utils\"]\n",
    )?;
    std::fs::write(directory.join("local.test.js"), LOCAL_UTILS)?;
    std::fs::write(directory.join("react.test.js"), INVALID)?;

    let output = tlint_check(directory)
        .arg("--output-format")
        .arg("concise")
        .run();
    assert_eq!(output.code(), 1);
    assert!(output.stdout.contains("local.test.js [3:33]"));
    assert!(!output.stdout.contains("react.test.js"));

    Ok(())
}

#[test]
fn test_exclude() -> anyhow::Result<()> {
    let directory = TempDir::new()?;
    let directory = directory.path();

    std::fs::write(
        directory.join("tlint.toml"),
        "[lint]\nexclude = [\"fixtures/\"]\n",
    )?;
    std::fs::create_dir_all(directory.join("fixtures"))?;
    std::fs::write(directory.join("fixtures").join("app.test.js"), INVALID)?;

    let output = tlint_check(directory).run();
    assert_eq!(output.code(), 0);
    assert!(output.stdout.contains("No JavaScript or TypeScript files found"));

    Ok(())
}

#[test]
fn test_config_from_parent_directory() -> anyhow::Result<()> {
    let directory = TempDir::new()?;
    let directory = directory.path();

    std::fs::write(directory.join("tlint.toml"), "[lint]\nignore = [\"TESTING\"]\n")?;
    let nested = directory.join("packages").join("app");
    std::fs::create_dir_all(&nested)?;
    std::fs::write(nested.join("app.test.js"), INVALID)?;

    let output = tlint_check(&nested).run();
    assert_eq!(output.code(), 0);
    assert!(output.stdout.starts_with("All checks passed!\n"));
    assert!(output.stdout.contains("\nUsed '"));
    assert!(output.stdout.contains("tlint.toml'"));

    Ok(())
}
