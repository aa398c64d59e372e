use anyhow::Result;
use insta::assert_snapshot;

use crate::{CliTest, stderr, stdout};

const CONTENT_VIEW: &str = r#"import SwiftUI

struct ContentView: View {
    var body: some View {
        VStack {
            Text("Save")
            Text("Save")
            Text("Cancel")
        }
    }
}
"#;

#[test]
fn test_rewrite_end_to_end() -> Result<()> {
    let test = CliTest::with_file("src/ContentView.swift", CONTENT_VIEW)?;
    test.write_file("src/Assets/notes.txt", "Text(\"Save\")")?;

    let mut cmd = test.rewrite_command();
    cmd.arg("--write-strings");
    let output = cmd.output()?;

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    let out = stdout(&output);
    assert!(out.contains("New keys:      2"));
    assert!(out.contains("Rewrote 3 literal(s) in 1 file(s)"));

    let rewritten = test.read_file("out/ContentView.swift")?;
    assert!(rewritten.contains(r#"            Text("save".localized)"#));
    assert_eq!(rewritten.matches(r#"Text("save".localized)"#).count(), 2);
    assert!(rewritten.contains(r#"Text("cancel".localized)"#));

    // Non-source files are copied verbatim, source tree is untouched
    assert_eq!(test.read_file("out/Assets/notes.txt")?, "Text(\"Save\")");
    assert_eq!(test.read_file("src/ContentView.swift")?, CONTENT_VIEW);

    assert_snapshot!(test.read_file("out/Localizable.strings")?.trim_end(), @r#"
    "cancel" = "Cancel";
    "save" = "Save";
    "#);

    Ok(())
}

#[test]
fn test_rewrite_reuses_and_appends_to_existing_strings() -> Result<()> {
    let test = CliTest::with_file(
        "src/Greeting.swift",
        "Text(\"Hi there\")\nText(\"Greeting\")\n",
    )?;
    test.write_file(
        "en.lproj/Localizable.strings",
        "/* Existing */\n\"hello\" = \"Hi there\";\n\"greeting\" = \"Hello\";\n",
    )?;

    let mut cmd = test.rewrite_command();
    cmd.args([
        "--strings",
        "en.lproj/Localizable.strings",
        "--write-strings",
        "--strings-out",
        "en.lproj/Localizable.strings",
    ]);
    let output = cmd.output()?;
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));

    assert_eq!(
        test.read_file("out/Greeting.swift")?,
        "Text(\"hello\".localized)\nText(\"greeting.2\".localized)\n"
    );
    assert_snapshot!(test.read_file("out/en.lproj/Localizable.strings")?.trim_end(), @r#"
    /* Existing */
    "hello" = "Hi there";
    "greeting" = "Hello";

    "greeting.2" = "Greeting";
    "#);

    Ok(())
}

#[test]
fn test_rewrite_skips_interpolated_and_format_literals() -> Result<()> {
    let source = "Text(\"Welcome, \\(name)\")\nText(\"Score: %d\")\n";
    let test = CliTest::with_file("src/Score.swift", source)?;

    let mut cmd = test.rewrite_command();
    cmd.args(["--write-strings", "-v"]);
    let output = cmd.output()?;
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));

    assert_eq!(test.read_file("out/Score.swift")?, source);
    assert_eq!(test.read_file("out/Localizable.strings")?, "");

    let out = stdout(&output);
    assert!(out.contains("--> Score.swift:1:1"));
    assert!(out.contains("--> Score.swift:2:1"));
    assert!(out.contains("literal interpolates an expression"));
    assert!(out.contains("literal contains format placeholder \"%d\""));
    assert!(out.contains("(interpolated: 1, format: 1)"));

    Ok(())
}

#[test]
fn test_rewrite_dry_run_reports_pending_work() -> Result<()> {
    let test = CliTest::with_file("src/View.swift", "Text(\"Save\")")?;

    let mut cmd = test.command();
    cmd.args(["rewrite", "--src", "src", "--dry-run", "--write-strings"]);
    let output = cmd.output()?;

    assert_eq!(output.status.code(), Some(1));
    let out = stdout(&output);
    assert!(out.contains("(dry-run)"));
    assert!(out.contains("Would rewrite 1 literal(s) in 1 file(s)."));
    assert!(out.contains("\"save\" = \"Save\""));
    assert!(!test.root().join("out").exists());

    Ok(())
}

#[test]
fn test_rewrite_dry_run_with_nothing_to_do() -> Result<()> {
    let test = CliTest::with_file("src/View.swift", "Text(\"save\".localized)")?;

    let mut cmd = test.command();
    cmd.args(["rewrite", "--src", "src", "--dry-run"]);
    let output = cmd.output()?;

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("Nothing to rewrite"));

    Ok(())
}

#[test]
fn test_rewrite_twice_is_idempotent() -> Result<()> {
    let test = CliTest::with_file("src/View.swift", "Text(\"Hello\")\n")?;

    let mut first = test.rewrite_command();
    first.arg("--write-strings");
    assert!(first.output()?.status.success());

    let mut second = test.command();
    second.args([
        "rewrite",
        "--src",
        "out",
        "--out",
        "out2",
        "--strings",
        "out/Localizable.strings",
        "--write-strings",
    ]);
    let output = second.output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    assert_eq!(
        test.read_file("out2/View.swift")?,
        test.read_file("out/View.swift")?
    );
    assert_eq!(
        test.read_file("out2/Localizable.strings")?,
        "\"hello\" = \"Hello\";\n"
    );
    assert!(stdout(&output).contains("Nothing to rewrite"));

    Ok(())
}

#[test]
fn test_rewrite_into_same_output_keeps_existing_strings() -> Result<()> {
    let test = CliTest::with_file("src/View.swift", "Text(\"Hello\")\n")?;

    let mut first = test.rewrite_command();
    first.arg("--write-strings");
    assert!(first.output()?.status.success());

    test.write_file("src/View.swift", "Text(\"Hello\")\nText(\"Bye\")\n")?;
    let mut second = test.rewrite_command();
    second.args(["--strings", "out/Localizable.strings", "--write-strings"]);
    let output = second.output()?;
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));

    assert_snapshot!(test.read_file("out/Localizable.strings")?.trim_end(), @r#"
    "hello" = "Hello";

    "bye" = "Bye";
    "#);

    Ok(())
}

#[test]
fn test_rewrite_uses_config_file() -> Result<()> {
    let test = CliTest::with_file(
        ".lokeyrc.json",
        r#"{ "callName": "Label", "marker": "tr", "ignores": ["Generated/**"] }"#,
    )?;
    test.write_file("src/View.swift", "Label(\"Open\")\nText(\"Close\")\n")?;
    test.write_file("src/Generated/Gen.swift", "Label(\"Generated\")\n")?;

    let output = test.rewrite_command().output()?;
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));

    assert_eq!(
        test.read_file("out/View.swift")?,
        "Label(\"open\".tr)\nText(\"Close\")\n"
    );
    assert_eq!(
        test.read_file("out/Generated/Gen.swift")?,
        "Label(\"Generated\")\n"
    );

    Ok(())
}

#[test]
fn test_rewrite_call_name_flag_overrides_config() -> Result<()> {
    let test = CliTest::with_file("src/View.swift", "Button(\"Go\")\n")?;

    let mut cmd = test.rewrite_command();
    cmd.args(["--call-name", "Button"]);
    let output = cmd.output()?;
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));

    assert_eq!(
        test.read_file("out/View.swift")?,
        "Button(\"go\".localized)\n"
    );

    Ok(())
}

#[test]
fn test_rewrite_rejects_overlapping_output() -> Result<()> {
    let test = CliTest::with_file("src/View.swift", "Text(\"Save\")")?;

    let mut cmd = test.command();
    cmd.args(["rewrite", "--src", "src", "--out", "src/out"]);
    let output = cmd.output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("must not overlap"));
    assert_eq!(test.read_file("src/View.swift")?, "Text(\"Save\")");

    Ok(())
}

#[test]
fn test_rewrite_rejects_output_resolving_to_source() -> Result<()> {
    let test = CliTest::with_file("src/View.swift", "Text(\"Save\")")?;

    let mut cmd = test.command();
    cmd.args(["rewrite", "--src", "src", "--out", "other/../src"]);
    let output = cmd.output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("must not overlap"));
    assert_eq!(test.read_file("src/View.swift")?, "Text(\"Save\")");

    Ok(())
}

#[test]
fn test_rewrite_requires_out_without_dry_run() -> Result<()> {
    let test = CliTest::with_file("src/View.swift", "Text(\"Save\")")?;

    let mut cmd = test.command();
    cmd.args(["rewrite", "--src", "src"]);
    let output = cmd.output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("--out is required"));

    Ok(())
}

#[test]
fn test_rewrite_invalid_config_fails() -> Result<()> {
    let test = CliTest::with_file(".lokeyrc.json", r#"{ "callName": "not valid" }"#)?;
    test.write_file("src/View.swift", "Text(\"Save\")")?;

    let output = test.rewrite_command().output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("callName"));

    Ok(())
}
