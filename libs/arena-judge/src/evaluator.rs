//! Test Evaluator - Outcome Comparison
//!
//! **Core Responsibility:**
//! Compare a judge result against a test case's expected output.
//!
//! **Critical Properties:**
//! - Knows nothing about HTTP or the judge's polling
//! - Knows nothing about the simulator
//! - Pure function: (test case, execution result) → outcome
//!
//! **Pass Rule:**
//! A case passes iff the normalized stdout equals the normalized expected
//! output AND the judge status is exactly 3 (Accepted).
//!
//! **Normalization Rules:**
//! - Trim leading and trailing whitespace: YES
//! - Missing stdout compares as empty: YES
//! - Case sensitivity: YES (exact match required)
//! - Internal whitespace: preserved

use arena_common::types::{ExecutionResult, TestCase, TestOutcome, TestReport};

fn normalize_output(output: &str) -> &str {
    output.trim()
}

/// Evaluate a single test case against the judge's result
pub fn evaluate_test(test_case: &TestCase, result: &ExecutionResult) -> TestOutcome {
    let actual = normalize_output(result.stdout.as_deref().unwrap_or(""));
    let expected = normalize_output(&test_case.expected_output);

    TestOutcome {
        passed: actual == expected && result.status.is_accepted(),
        input: test_case.input.clone(),
        expected_output: test_case.expected_output.clone(),
        actual_output: actual.to_string(),
        description: test_case.description.clone(),
    }
}

/// Aggregate outcomes, keeping their order
pub fn summarize(outcomes: Vec<TestOutcome>) -> TestReport {
    TestReport::from_outcomes(outcomes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use arena_common::types::Status;

    fn accepted(stdout: &str) -> ExecutionResult {
        ExecutionResult {
            stdout: Some(stdout.to_string()),
            stderr: None,
            compile_output: None,
            status: Status::new(3, "Accepted"),
            time: Some("0.010".to_string()),
            memory: Some(1000),
        }
    }

    fn with_status(stdout: &str, id: u32, description: &str) -> ExecutionResult {
        ExecutionResult {
            status: Status::new(id, description),
            ..accepted(stdout)
        }
    }

    #[test]
    fn test_normalize_output() {
        assert_eq!(normalize_output("hello"), "hello");
        assert_eq!(normalize_output("  hello  "), "hello");
        assert_eq!(normalize_output("\nhello\r\n"), "hello");
        assert_eq!(normalize_output("   "), "");
    }

    #[test]
    fn test_exact_match() {
        let case = TestCase::new("5", "120");
        let outcome = evaluate_test(&case, &accepted("120"));

        assert!(outcome.passed);
        assert_eq!(outcome.input, "5");
        assert_eq!(outcome.actual_output, "120");
    }

    #[test]
    fn test_whitespace_is_ignored_at_boundaries() {
        let case = TestCase::new("", "  hello\n");

        assert!(evaluate_test(&case, &accepted("hello")).passed);
        assert!(evaluate_test(&case, &accepted("\n\thello  \n")).passed);
        assert_eq!(evaluate_test(&case, &accepted(" hello ")).actual_output, "hello");
    }

    #[test]
    fn test_internal_whitespace_matters() {
        let case = TestCase::new("", "1 2");
        assert!(!evaluate_test(&case, &accepted("1  2")).passed);
    }

    #[test]
    fn test_case_sensitivity() {
        let case = TestCase::new("", "Hello");
        assert!(!evaluate_test(&case, &accepted("hello")).passed);
    }

    #[test]
    fn test_matching_output_with_non_accepted_status_fails() {
        let case = TestCase::new("", "42");

        assert!(!evaluate_test(&case, &with_status("42", 4, "Wrong Answer")).passed);
        assert!(!evaluate_test(&case, &with_status("42", 5, "Time Limit Exceeded")).passed);
        assert!(!evaluate_test(&case, &with_status("42", 2, "Processing")).passed);
    }

    #[test]
    fn test_missing_stdout_is_empty() {
        let mut result = accepted("");
        result.stdout = None;

        assert!(evaluate_test(&TestCase::new("", "   "), &result).passed);
        assert!(!evaluate_test(&TestCase::new("", "x"), &result).passed);
    }

    #[test]
    fn test_description_is_carried() {
        let case = TestCase::new("1", "1").described("identity");
        let outcome = evaluate_test(&case, &accepted("1"));
        assert_eq!(outcome.description.as_deref(), Some("identity"));
    }

    #[test]
    fn test_summarize_keeps_order() {
        let outcomes = vec![
            evaluate_test(&TestCase::new("a", "1"), &accepted("1")),
            evaluate_test(&TestCase::new("b", "2"), &accepted("x")),
            evaluate_test(&TestCase::new("c", "3"), &accepted("3")),
        ];

        let report = summarize(outcomes);

        assert_eq!(report.total, 3);
        assert_eq!(report.passed, 2);
        let inputs: Vec<&str> = report.outcomes.iter().map(|o| o.input.as_str()).collect();
        assert_eq!(inputs, vec!["a", "b", "c"]);
    }
}
