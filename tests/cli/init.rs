use anyhow::{Context, Result};
use serde_json::Value;

use crate::CliTest;

/// Validates config file structure and default values.
fn assert_config_content(content: &str) -> Result<()> {
    let parsed: Value = serde_json::from_str(content).context("Config should be valid JSON")?;

    assert_eq!(parsed["basePath"], "");
    assert_eq!(parsed["includes"], serde_json::json!(["src/test/java"]));
    assert_eq!(parsed["ignores"], serde_json::json!([]));

    // 2-space indentation
    assert!(
        content.contains("\n  \"basePath\""),
        "Config should use 2-space indentation"
    );

    Ok(())
}

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().arg("init").output()?;
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8(output.stdout)?,
        "\u{2713} Created .testpropsrc.json\n"
    );

    assert!(test.root().join(".testpropsrc.json").exists());
    let content = test.read_file(".testpropsrc.json")?;
    assert_config_content(&content)?;

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::with_file(".testpropsrc.json", "{}")?;

    let output = test.command().arg("init").output()?;
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        String::from_utf8(output.stderr)?,
        "Error: .testpropsrc.json already exists\n"
    );
    assert_eq!(test.read_file(".testpropsrc.json")?, "{}");

    Ok(())
}

#[test]
fn test_init_config_is_immediately_usable() -> Result<()> {
    let test = CliTest::new()?;

    test.command().arg("init").output()?;
    test.write_file("src/test/java/EmptyTest.java", "class EmptyTest {}\n")?;

    let output = test.scan_command().output()?;
    assert!(
        output.status.success(),
        "Scan should work with initialized config. stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    Ok(())
}
