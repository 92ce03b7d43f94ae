// Prometheus counters for the execution endpoints

use arena_common::types::{ExecutionResult, TestOutcome};
use arena_judge::ExecutionMode;
use prometheus::{Encoder, Histogram, HistogramOpts, IntCounterVec, Opts, Registry, TextEncoder};
use std::time::Duration;

pub struct Metrics {
    registry: Registry,
    executions: IntCounterVec,
    test_cases: IntCounterVec,
    test_runs: IntCounterVec,
    duration: Histogram,
    test_run_duration: Histogram,
}

impl Metrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let executions = IntCounterVec::new(
            Opts::new("arena_executions_total", "Code executions by mode and outcome"),
            &["mode", "outcome"],
        )?;
        let test_cases = IntCounterVec::new(
            Opts::new("arena_test_cases_total", "Evaluated test cases by result"),
            &["result"],
        )?;
        let test_runs = IntCounterVec::new(
            Opts::new("arena_test_runs_total", "Test-suite runs by outcome"),
            &["outcome"],
        )?;
        let duration = Histogram::with_opts(
            HistogramOpts::new(
                "arena_execution_duration_seconds",
                "Wall time of a single execution request",
            )
            .buckets(vec![0.01, 0.1, 0.5, 1.0, 2.5, 5.0, 10.0, 15.0]),
        )?;
        let test_run_duration = Histogram::with_opts(
            HistogramOpts::new(
                "arena_test_run_duration_seconds",
                "Wall time of a whole test-suite request",
            )
            .buckets(vec![0.01, 0.1, 0.5, 1.0, 5.0, 15.0, 30.0, 60.0, 120.0]),
        )?;

        registry.register(Box::new(executions.clone()))?;
        registry.register(Box::new(test_cases.clone()))?;
        registry.register(Box::new(test_runs.clone()))?;
        registry.register(Box::new(duration.clone()))?;
        registry.register(Box::new(test_run_duration.clone()))?;

        Ok(Self {
            registry,
            executions,
            test_cases,
            test_runs,
            duration,
            test_run_duration,
        })
    }

    pub fn record_result(&self, mode: ExecutionMode, result: &ExecutionResult) {
        let outcome = if result.status.is_accepted() {
            "accepted"
        } else {
            "rejected"
        };
        self.record(mode, outcome);
    }

    /// Outcome label for failures that never produced a result: "error" or "timeout"
    pub fn record(&self, mode: ExecutionMode, outcome: &str) {
        let mode = mode.to_string();
        self.executions
            .with_label_values(&[mode.as_str(), outcome])
            .inc();
    }

    pub fn record_outcomes(&self, outcomes: &[TestOutcome]) {
        for outcome in outcomes {
            let label = if outcome.passed { "passed" } else { "failed" };
            self.test_cases.with_label_values(&[label]).inc();
        }
    }

    /// Outcome label: "completed", "error" or "timeout"
    pub fn record_test_run(&self, outcome: &str) {
        self.test_runs.with_label_values(&[outcome]).inc();
    }

    pub fn observe_duration(&self, elapsed: Duration) {
        self.duration.observe(elapsed.as_secs_f64());
    }

    pub fn observe_test_run_duration(&self, elapsed: Duration) {
        self.test_run_duration.observe(elapsed.as_secs_f64());
    }

    pub fn render(&self) -> Result<String, prometheus::Error> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arena_common::types::Status;

    #[test]
    fn test_render_counts() {
        let metrics = Metrics::new().unwrap();
        let result = ExecutionResult {
            stdout: None,
            stderr: None,
            compile_output: None,
            status: Status::new(3, "Accepted"),
            time: None,
            memory: None,
        };

        metrics.record_result(ExecutionMode::Simulated, &result);
        metrics.record(ExecutionMode::Remote, "timeout");
        metrics.observe_duration(Duration::from_millis(20));

        let text = metrics.render().unwrap();
        assert!(text.contains(r#"arena_executions_total{mode="simulated",outcome="accepted"} 1"#));
        assert!(text.contains(r#"arena_executions_total{mode="remote",outcome="timeout"} 1"#));
        assert!(text.contains("arena_execution_duration_seconds_count 1"));
        assert!(text.contains("arena_test_run_duration_seconds_count 0"));
    }

    #[test]
    fn test_test_runs_have_their_own_series() {
        let metrics = Metrics::new().unwrap();

        metrics.record_test_run("completed");
        metrics.record_test_run("timeout");
        metrics.observe_test_run_duration(Duration::from_millis(200));

        let text = metrics.render().unwrap();
        assert!(text.contains(r#"arena_test_runs_total{outcome="completed"} 1"#));
        assert!(text.contains(r#"arena_test_runs_total{outcome="timeout"} 1"#));
        assert!(text.contains("arena_test_run_duration_seconds_count 1"));
        assert!(!text.contains("arena_executions_total{"));
    }
}
