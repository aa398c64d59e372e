use anyhow::{Context, Result};
use serde_json::Value;

use crate::{CliTest, stderr, stdout};

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().arg("init").output()?;
    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("Created .lokeyrc.json"));
    assert!(test.root().join(".lokeyrc.json").exists());

    let content = test.read_file(".lokeyrc.json")?;
    let parsed: Value = serde_json::from_str(&content).context("Config should be valid JSON")?;
    assert_eq!(parsed["callName"], "Text");
    assert_eq!(parsed["marker"], "localized");
    assert_eq!(parsed["stringsOut"], "Localizable.strings");

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::with_file(".lokeyrc.json", "{}")?;

    let output = test.command().arg("init").output()?;
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains(".lokeyrc.json already exists"));
    assert_eq!(test.read_file(".lokeyrc.json")?, "{}");

    Ok(())
}

#[test]
fn test_init_config_is_immediately_usable() -> Result<()> {
    let test = CliTest::new()?;
    test.command().arg("init").output()?;
    test.write_file("src/View.swift", r#"Text("Hello")"#)?;

    let output = test.rewrite_command().output()?;
    assert!(
        output.status.success(),
        "Rewrite should work with initialized config. stderr: {}",
        stderr(&output)
    );

    Ok(())
}
