// Local stand-in for the remote judge.
// Sniffs the source text for markers and answers with canned results,
// so the arena stays usable without a judge credential. Nothing is run.

use crate::error::ExecutionError;
use crate::executor::Judge;
use arena_common::types::{ExecutionResult, Status, Submission};
use async_trait::async_trait;

fn canned(
    stdout: Option<&str>,
    stderr: Option<&str>,
    compile_output: Option<&str>,
    status: Status,
    time: &str,
    memory: u64,
) -> ExecutionResult {
    ExecutionResult {
        stdout: stdout.map(str::to_string),
        stderr: stderr.map(str::to_string),
        compile_output: compile_output.map(str::to_string),
        status,
        time: Some(time.to_string()),
        memory: Some(memory),
    }
}

/// Deterministic simulated verdict for a submission.
///
/// Markers are checked in order: "hello", then "error"/"throw", then
/// "syntax". Matching is case-insensitive.
pub fn simulate(submission: &Submission) -> ExecutionResult {
    let code = submission.source_code.to_lowercase();

    if code.contains("hello") {
        return canned(
            Some("Hello, World!\n"),
            None,
            None,
            Status::new(3, "Accepted"),
            "0.001",
            1024,
        );
    }

    if code.contains("error") || code.contains("throw") {
        return canned(
            None,
            Some("Runtime Error: Something went wrong\n"),
            None,
            Status::new(5, "Time Limit Exceeded"),
            "1.000",
            2048,
        );
    }

    if code.contains("syntax") {
        return canned(
            None,
            None,
            Some("Compilation Error: Syntax error\n"),
            Status::new(6, "Compilation Error"),
            "0.000",
            0,
        );
    }

    canned(
        Some("Code executed successfully!\n"),
        None,
        None,
        Status::new(3, "Accepted"),
        "0.002",
        1536,
    )
}

/// Judge backed only by the simulator
#[derive(Debug, Clone, Copy, Default)]
pub struct SimulatedJudge;

#[async_trait]
impl Judge for SimulatedJudge {
    async fn execute(&self, submission: &Submission) -> Result<ExecutionResult, ExecutionError> {
        Ok(simulate(submission))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arena_common::languages::runtime_id;

    fn run(source: &str) -> ExecutionResult {
        simulate(&Submission::new(source, runtime_id("javascript")))
    }

    #[test]
    fn test_hello_marker() {
        let result = run("console.log('hello world')");

        assert_eq!(result.stdout.as_deref(), Some("Hello, World!\n"));
        assert_eq!(result.status, Status::new(3, "Accepted"));
        assert_eq!(result.time.as_deref(), Some("0.001"));
        assert_eq!(result.memory, Some(1024));
    }

    #[test]
    fn test_markers_are_case_insensitive() {
        assert_eq!(run("print('HeLLo')").status.id, 3);
        assert_eq!(run("THROW new Oops()").status.id, 5);
        assert_eq!(run("SYNTAX").status.id, 6);
    }

    #[test]
    fn test_error_and_throw_markers() {
        for source in ["raise ValueError()", "throw 1"] {
            let result = run(source);
            assert_eq!(result.status.id, 5);
            assert_eq!(result.status.description, "Time Limit Exceeded");
            assert_eq!(
                result.stderr.as_deref(),
                Some("Runtime Error: Something went wrong\n")
            );
            assert!(result.stdout.is_none());
        }
    }

    #[test]
    fn test_syntax_marker() {
        let result = run("this is a syntax problem");

        assert_eq!(result.status.id, 6);
        assert!(result.stdout.is_none());
        assert!(!result.compile_output.unwrap_or_default().is_empty());
    }

    #[test]
    fn test_marker_precedence() {
        // hello wins over everything, error wins over syntax
        assert_eq!(run("hello syntax error").status.id, 3);
        assert_eq!(run("syntax error").status.id, 5);
    }

    #[test]
    fn test_generic_success() {
        let result = run("let x = 1 + 2;");

        assert_eq!(result.status.id, 3);
        assert_eq!(result.stdout.as_deref(), Some("Code executed successfully!\n"));
        assert_eq!(result.memory, Some(1536));
    }

    #[test]
    fn test_deterministic() {
        let submission = Submission::new("int main() {}", 54).with_stdin("5");
        assert_eq!(simulate(&submission), simulate(&submission));
    }

    #[test]
    fn test_only_expected_statuses() {
        for source in ["", "hello", "error", "syntax", "x"] {
            assert!([3, 5, 6].contains(&run(source).status.id));
        }
    }
}
