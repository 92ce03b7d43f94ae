// CLI commands for running code through the execution client
use anyhow::{bail, Context, Result};
use arena_common::config::JudgeConfig;
use arena_common::languages;
use arena_common::types::{ExecutionResult, Severity, Submission, TestCase, TestOutcome};
use arena_judge::evaluator::summarize;
use arena_judge::{ExecutionClient, ExecutionMode};
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

fn load_client(concurrency: Option<usize>) -> Result<ExecutionClient> {
    let mut config = JudgeConfig::from_env().context("Invalid judge configuration")?;
    if let Some(n) = concurrency {
        config.test_concurrency = n.max(1);
    }

    let client = ExecutionClient::new(&config).context("Failed to create execution client")?;
    if client.mode() == ExecutionMode::Simulated {
        eprintln!("⚠️  JUDGE0_API_KEY not set - results are simulated, not real executions");
    }
    Ok(client)
}

fn read_source(path: &Path) -> Result<String> {
    let source = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    if source.trim().is_empty() {
        bail!("{} is empty", path.display());
    }
    Ok(source)
}

/// Parse a JSON array of test cases
pub fn parse_test_cases(content: &str) -> Result<Vec<TestCase>> {
    let cases: Vec<TestCase> =
        serde_json::from_str(content).context("Failed to parse test cases")?;
    if cases.is_empty() {
        bail!("Test case file contains no cases");
    }
    Ok(cases)
}

fn badge(result: &ExecutionResult) -> &'static str {
    match result.status.severity() {
        Severity::Success => "✅",
        Severity::Failure => "❌",
        Severity::Neutral => "⚠️ ",
    }
}

/// Render a result the way the output panel shows it: only populated sections
pub fn format_result(result: &ExecutionResult) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} {} (status {})",
        badge(result),
        result.status.description,
        result.status.id
    );

    let sections = [
        ("Output", &result.stdout),
        ("Error", &result.stderr),
        ("Compilation", &result.compile_output),
    ];
    for (label, body) in sections {
        if let Some(text) = body.as_deref().filter(|t| !t.is_empty()) {
            let _ = writeln!(out, "\n{}:", label);
            let _ = writeln!(out, "{}", text.trim_end());
        }
    }

    let mut stats = Vec::new();
    if let Some(time) = &result.time {
        stats.push(format!("time {}s", time));
    }
    if let Some(memory) = result.memory {
        stats.push(format!("memory {} KB", memory));
    }
    if !stats.is_empty() {
        let _ = writeln!(out, "\n{}", stats.join(", "));
    }
    out
}

pub fn format_outcome(index: usize, outcome: &TestOutcome) -> String {
    let mark = if outcome.passed { "✓" } else { "✗" };
    let mut line = format!("  {} Test {}", mark, index + 1);
    if let Some(description) = &outcome.description {
        let _ = write!(line, " ({})", description);
    }
    if !outcome.passed {
        let _ = write!(
            line,
            "\n    Expected: \"{}\"\n    Got:      \"{}\"",
            outcome.expected_output.trim(),
            outcome.actual_output
        );
    }
    line
}

/// Execute a source file once; true when the judge accepted it
pub async fn run_file(
    file: &Path,
    language: &str,
    stdin: Option<String>,
    stdin_file: Option<&Path>,
) -> Result<bool> {
    let source = read_source(file)?;
    let stdin = match stdin_file {
        Some(path) => Some(
            fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?,
        ),
        None => stdin,
    };

    let client = load_client(None)?;
    let mut submission = Submission::new(source, client.language_runtime_id(language));
    submission.stdin = stdin;

    println!("🚀 Running {} as {}...", file.display(), language);
    let result = client
        .execute(&submission)
        .await
        .context("Execution failed")?;

    println!("{}", format_result(&result));
    Ok(result.status.is_accepted())
}

/// Run a source file against every case; true when all passed
pub async fn run_tests(
    file: &Path,
    cases_path: &Path,
    language: &str,
    concurrency: Option<usize>,
) -> Result<bool> {
    let source = read_source(file)?;
    let content = fs::read_to_string(cases_path)
        .with_context(|| format!("Failed to read {}", cases_path.display()))?;
    let cases = parse_test_cases(&content)?;

    let client = load_client(concurrency)?;
    let language_id = client.language_runtime_id(language);

    println!(
        "🧪 Running {} test case(s) for {} as {}...\n",
        cases.len(),
        file.display(),
        language
    );

    let outcomes = client
        .run_against_test_cases(&source, language_id, &cases)
        .await
        .context("Test run failed")?;

    for (index, outcome) in outcomes.iter().enumerate() {
        println!("{}", format_outcome(index, outcome));
    }

    let report = summarize(outcomes);
    println!("\n→ {} / {} passed", report.passed, report.total);
    Ok(report.all_passed())
}

/// List all languages with runtime ids
pub fn list_languages() {
    println!("📋 Selector Languages:\n");
    println!("{:<12} {:<12} {:<10}", "Name", "Label", "Runtime");
    println!("{}", "─".repeat(36));
    for lang in languages::supported_languages() {
        println!("{:<12} {:<12} {:<10}", lang.name, lang.label, lang.runtime_id);
    }

    println!("\n📋 All Runtimes:\n");
    for (name, id) in languages::all_runtimes() {
        println!("  {:<12} {}", name, id);
    }
}

pub fn print_template(language: &str) {
    if !languages::is_known(language) {
        eprintln!("⚠️  Unknown language '{}', showing JavaScript", language);
    }
    println!("{}", languages::starter_template(language));
}

#[cfg(test)]
mod tests {
    use super::*;
    use arena_common::types::Status;

    #[test]
    fn test_parse_test_cases() {
        let cases = parse_test_cases(
            r#"[
                {"input": "1 2", "expected_output": "3"},
                {"input": "2 2", "expectedOutput": "4", "description": "camel"}
            ]"#,
        )
        .unwrap();

        assert_eq!(cases.len(), 2);
        assert_eq!(cases[1].expected_output, "4");
        assert_eq!(cases[1].description.as_deref(), Some("camel"));
    }

    #[test]
    fn test_parse_test_cases_rejects_empty_and_malformed() {
        assert!(parse_test_cases("[]").is_err());
        assert!(parse_test_cases(r#"{"input": "1"}"#).is_err());
    }

    #[test]
    fn test_format_result_shows_only_populated_sections() {
        let result = ExecutionResult {
            stdout: None,
            stderr: None,
            compile_output: Some("Compilation Error: Syntax error\n".to_string()),
            status: Status::new(6, "Compilation Error"),
            time: Some("0.000".to_string()),
            memory: Some(0),
        };

        let text = format_result(&result);

        assert!(text.starts_with("❌ Compilation Error (status 6)"));
        assert!(text.contains("Compilation:\nCompilation Error: Syntax error"));
        assert!(!text.contains("Output:"));
        assert!(!text.contains("Error:\n"));
        assert!(text.contains("time 0.000s, memory 0 KB"));
    }

    #[test]
    fn test_format_result_without_stats() {
        let text = format_result(&ExecutionResult::internal_error("judge unreachable"));
        assert!(text.contains("Internal Error (status 13)"));
        assert!(text.contains("Error:\njudge unreachable"));
        assert!(!text.contains("memory"));
    }

    #[test]
    fn test_format_outcome() {
        let outcome = TestOutcome {
            passed: false,
            input: "2".to_string(),
            expected_output: "4\n".to_string(),
            actual_output: "5".to_string(),
            description: Some("doubling".to_string()),
        };

        let text = format_outcome(0, &outcome);
        assert!(text.starts_with("  ✗ Test 1 (doubling)"));
        assert!(text.contains("Expected: \"4\""));
        assert!(text.contains("Got:      \"5\""));

        let passed = TestOutcome {
            passed: true,
            ..outcome
        };
        assert_eq!(format_outcome(2, &passed), "  ✓ Test 3 (doubling)");
    }
}
