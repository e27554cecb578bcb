use tempfile::TempDir;

use crate::helpers::CommandExt;
use crate::helpers::tlint_check;

const INVALID: &str = "import { render } from '@testing-library/vue';

test('spinner goes away', async () => {
    const { getByTestId } = render(Component);
    await waitForElementToBeRemoved(() => getByTestId('spinner'));
});
";

#[test]
fn test_full_output() -> anyhow::Result<()> {
    let directory = TempDir::new()?;
    let directory = directory.path();

    std::fs::write(directory.join("app.test.js"), INVALID)?;

    let output = tlint_check(directory).run();
    assert_eq!(output.code(), 1);
    assert!(output.stdout.contains("prefer_query_by_disappearance"));
    assert!(output.stdout.contains("--> app.test.js"));
    assert!(output.stdout.contains("() => getByTestId('spinner')"));
    assert!(
        output
            .stdout
            .contains("Prefer using queryBy* when waiting for disappearance.")
    );
    assert!(output.stdout.ends_with("Found 1 error.\n"));

    Ok(())
}

#[test]
fn test_github_output() -> anyhow::Result<()> {
    let directory = TempDir::new()?;
    let directory = directory.path();

    std::fs::write(directory.join("app.test.js"), INVALID)?;

    let output = tlint_check(directory)
        .arg("--output-format")
        .arg("github")
        .run();
    assert_eq!(output.code(), 1);
    assert_eq!(
        output.stdout,
        "::error title=tlint (prefer_query_by_disappearance),file=app.test.js,line=5,col=37::app.test.js:5:37 [prefer_query_by_disappearance] Prefer using queryBy* when waiting for disappearance.\n"
    );

    Ok(())
}

#[test]
fn test_json_output() -> anyhow::Result<()> {
    let directory = TempDir::new()?;
    let directory = directory.path();

    std::fs::write(directory.join("app.test.js"), INVALID)?;
    std::fs::write(directory.join("broken.test.js"), "const = ;")?;

    let output = tlint_check(directory)
        .arg("--output-format")
        .arg("json")
        .arg("--with-timing")
        .run();
    assert_eq!(output.code(), 2);

    // Nothing but JSON on stdout, even with `--with-timing`.
    let value: serde_json::Value = serde_json::from_str(&output.stdout)?;

    let diagnostics = value["diagnostics"].as_array().unwrap();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0]["rule"], "prefer_query_by_disappearance");
    assert_eq!(diagnostics[0]["message_id"], "preferQueryByDisappearance");
    assert_eq!(diagnostics[0]["filename"], "app.test.js");
    assert_eq!(diagnostics[0]["location"]["row"], 5);
    assert_eq!(diagnostics[0]["location"]["column"], 37);

    let errors = value["errors"].as_array().unwrap();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0]["file"], "broken.test.js");
    assert!(
        errors[0]["error"]
            .as_str()
            .unwrap()
            .contains("Failed to parse broken.test.js due to syntax errors.")
    );

    Ok(())
}
