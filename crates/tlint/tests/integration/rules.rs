use tempfile::TempDir;

use crate::helpers::CommandExt;
use crate::helpers::tlint_check;

const INVALID: &str = "import { screen } from '@testing-library/dom';
waitForElementToBeRemoved(screen.findByText('x'));
";

#[test]
fn test_unknown_selected_rule() -> anyhow::Result<()> {
    let directory = TempDir::new()?;
    let directory = directory.path();

    std::fs::write(directory.join("app.test.js"), INVALID)?;

    insta::assert_snapshot!(
        tlint_check(directory)
            .arg("--select")
            .arg("foo,prefer_query_by_disappearance,barbaz")
            .run()
            .normalize_os_executable_name(),
        @r"
    success: false
    exit_code: 2
    ----- stdout -----

    ----- stderr -----
    tlint failed
      Cause: Unknown rules in `--select`: foo, barbaz

    ----- args -----
    check . --select foo,prefer_query_by_disappearance,barbaz
    "
    );

    Ok(())
}

#[test]
fn test_unknown_ignored_rule() -> anyhow::Result<()> {
    let directory = TempDir::new()?;
    let directory = directory.path();

    std::fs::write(directory.join("app.test.js"), INVALID)?;

    let output = tlint_check(directory).arg("--ignore").arg("foo").run();
    assert_eq!(output.code(), 2);
    assert!(
        output
            .stderr
            .contains("Cause: Unknown rules in `--ignore`: foo")
    );

    Ok(())
}

#[test]
fn test_select_group() -> anyhow::Result<()> {
    let directory = TempDir::new()?;
    let directory = directory.path();

    std::fs::write(directory.join("app.test.js"), INVALID)?;

    let output = tlint_check(directory)
        .arg("--select")
        .arg("TESTING")
        .arg("--output-format")
        .arg("concise")
        .run();
    assert_eq!(output.code(), 1);
    assert!(output.stdout.contains("app.test.js [2:27] prefer_query_by_disappearance"));

    Ok(())
}

#[test]
fn test_ignore_rule() -> anyhow::Result<()> {
    let directory = TempDir::new()?;
    let directory = directory.path();

    std::fs::write(directory.join("app.test.js"), INVALID)?;

    for ignored in ["prefer_query_by_disappearance", "TESTING"] {
        let output = tlint_check(directory).arg("--ignore").arg(ignored).run();
        assert_eq!(output.code(), 0);
        assert_eq!(output.stdout, "All checks passed!\n");
    }

    Ok(())
}
