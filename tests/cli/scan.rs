use anyhow::Result;
use serde_json::{Value, json};

use crate::CliTest;

const TODO_TEST: &str = r#"package com.example;

import org.junit.jupiter.api.Test;

public class TodoCommentCheckTest extends AbstractModuleTestSupport {

    @Test
    public void testFormat() throws Exception {
        final DefaultConfiguration checkConfig = createModuleConfig(TodoCommentCheck.class);
        checkConfig.addAttribute("format", "FIXME:");
        checkConfig.addAttribute("file", getPath("InputTodoComment.java"));
        final String[] expected = {};
        verify(checkConfig, getPath("InputTodoComment.java"), expected);
    }

    @Test
    public void testNotVerified() throws Exception {
        final DefaultConfiguration checkConfig = createModuleConfig(TodoCommentCheck.class);
        checkConfig.addAttribute("format", "NEVER");
    }
}
"#;

const ABBREVIATION_TEST: &str = r#"package com.example;

public class AbbreviationCheckTest {

    @Test
    public void testLength() throws Exception {
        final DefaultConfiguration config = createModuleConfig(AbbreviationCheck.class);
        config.addAttribute("allowedAbbreviationLength", "0");
        config.addAttribute("ignoreStatic", String.valueOf(true));
        verify(config, "Input.java", CommonUtil.EMPTY_STRING_ARRAY);
    }
}
"#;

fn project() -> Result<CliTest> {
    let test = CliTest::with_file(
        "src/test/java/com/example/TodoCommentCheckTest.java",
        TODO_TEST,
    )?;
    test.write_file(
        "src/test/java/com/example/AbbreviationCheckTest.java",
        ABBREVIATION_TEST,
    )?;
    Ok(test)
}

#[test]
fn test_scan_prints_verified_properties() -> Result<()> {
    let test = project()?;

    let output = test.scan_command().output()?;
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout)?;
    insta::assert_snapshot!(stdout, @r"
    AbbreviationCheck
      allowedAbbreviationLength = 0

    TodoCommentCheck
      file = src/test/resources/com/example/InputTodoComment.java
      format = FIXME:

    ✓ Extracted 3 properties for 2 modules from 2 files
    ");

    Ok(())
}

#[test]
fn test_scan_json_output() -> Result<()> {
    let test = project()?;

    let output = test
        .scan_command()
        .args(["--format", "json", "--base-path", "checkstyle/"])
        .output()?;
    assert!(output.status.success());

    let value: Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(
        value,
        json!({
            "AbbreviationCheck": [
                { "name": "allowedAbbreviationLength", "value": "0" },
            ],
            "TodoCommentCheck": [
                {
                    "name": "file",
                    "value": "checkstyle/src/test/resources/com/example/InputTodoComment.java"
                },
                { "name": "format", "value": "FIXME:" },
            ],
        })
    );

    Ok(())
}

#[test]
fn test_scan_uses_config_file() -> Result<()> {
    let test = project()?;
    test.write_file(
        ".testpropsrc.json",
        r#"{ "basePath": "cs/", "ignores": ["**/Abbreviation*"] }"#,
    )?;

    let output = test.scan_command().args(["--format", "json"]).output()?;
    assert!(output.status.success());

    let value: Value = serde_json::from_slice(&output.stdout)?;
    assert!(value.get("AbbreviationCheck").is_none());
    assert_eq!(
        value["TodoCommentCheck"][0]["value"],
        "cs/src/test/resources/com/example/InputTodoComment.java"
    );

    Ok(())
}

#[test]
fn test_scan_without_properties() -> Result<()> {
    let test = CliTest::with_file("src/test/java/PlainTest.java", "class PlainTest {}\n")?;

    let output = test.scan_command().output()?;
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8(output.stdout)?,
        "\u{2713} Scanned 1 file - no module properties found\n"
    );

    Ok(())
}

#[test]
fn test_scan_reports_unparsable_file() -> Result<()> {
    let test = project()?;
    test.write_file("src/test/java/BrokenTest.java", "class Broken {\n  void m( {\n}\n")?;

    let output = test.scan_command().output()?;
    assert_eq!(output.status.code(), Some(1));

    let stdout = String::from_utf8(output.stdout)?;
    assert!(stdout.contains("TodoCommentCheck"));
    assert!(stdout.contains("from 3 files"));
    assert_eq!(
        String::from_utf8(output.stderr)?,
        "warning: 1 file(s) could not be processed (use -v for details)\n"
    );

    Ok(())
}

#[test]
fn test_scan_verbose_lists_files_and_diagnostics() -> Result<()> {
    let test = project()?;
    test.write_file(
        "src/test/java/BrokenTest.java",
        "class Broken {\n  void m( {\n}\n",
    )?;

    let output = test.scan_command().arg("-v").output()?;
    assert_eq!(output.status.code(), Some(1));

    let stderr = String::from_utf8(output.stderr)?;
    assert!(stderr.contains("Scanning file: ./src/test/java/BrokenTest.java"));
    assert!(stderr.contains(
        "warning: ./src/test/java/com/example/AbbreviationCheckTest.java:9: skipped property of AbbreviationCheck"
    ));
    assert!(stderr.contains("error: ./src/test/java/BrokenTest.java: parse error"));
    assert!(!stderr.contains("use -v for details"));

    Ok(())
}

#[test]
fn test_scan_invalid_config_is_an_error() -> Result<()> {
    let test = CliTest::with_file(".testpropsrc.json", "{ not json")?;

    let output = test.scan_command().output()?;
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8(output.stderr)?.starts_with("Error: Failed to parse config file"));

    Ok(())
}

#[test]
fn test_no_command_prints_help() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().output()?;
    assert!(output.status.success());
    assert!(String::from_utf8(output.stdout)?.contains("scan"));

    Ok(())
}
