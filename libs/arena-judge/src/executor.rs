//! Execution Client - High-Level Orchestration
//!
//! **Responsibility:**
//! Decide where a submission runs and turn test cases into outcomes.
//!
//! **Architecture:**
//! 1. No credential configured → simulator answers, no network I/O
//! 2. Credential configured → RemoteJudge submits and polls (engine.rs)
//! 3. Remote failure → surfaced or simulated, per `FallbackPolicy`
//! 4. Test cases → one execution each, scored by the evaluator (evaluator.rs)
//!
//! A poll timeout is always surfaced, whatever the policy.

use crate::engine::RemoteJudge;
use crate::error::ExecutionError;
use crate::evaluator::evaluate_test;
use crate::simulator::simulate;
use arena_common::config::{FallbackPolicy, JudgeConfig};
use arena_common::languages;
use arena_common::types::{ExecutionResult, Submission, TestCase, TestOutcome};
use async_trait::async_trait;
use futures_util::stream::{self, StreamExt, TryStreamExt};
use std::fmt;
use tracing::{debug, error, info, warn};

/// Anything that can turn a submission into a judge result
#[async_trait]
pub trait Judge: Send + Sync {
    async fn execute(&self, submission: &Submission) -> Result<ExecutionResult, ExecutionError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionMode {
    Remote,
    Simulated,
}

impl fmt::Display for ExecutionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecutionMode::Remote => write!(f, "remote"),
            ExecutionMode::Simulated => write!(f, "simulated"),
        }
    }
}

pub struct ExecutionClient {
    remote: Option<RemoteJudge>,
    on_error: FallbackPolicy,
    test_concurrency: usize,
}

impl ExecutionClient {
    pub fn new(config: &JudgeConfig) -> Result<Self, ExecutionError> {
        let remote = match &config.api_key {
            Some(key) => Some(RemoteJudge::new(config, key.clone())?),
            None => None,
        };

        let client = Self {
            remote,
            on_error: config.on_error,
            test_concurrency: config.test_concurrency.max(1),
        };

        info!(
            mode = %client.mode(),
            api_url = %config.api_url,
            on_error = %config.on_error,
            test_concurrency = client.test_concurrency,
            "Execution client ready"
        );
        Ok(client)
    }

    /// Client that never leaves the process
    pub fn simulated() -> Self {
        Self {
            remote: None,
            on_error: FallbackPolicy::Surface,
            test_concurrency: 1,
        }
    }

    pub fn mode(&self) -> ExecutionMode {
        if self.remote.is_some() {
            ExecutionMode::Remote
        } else {
            ExecutionMode::Simulated
        }
    }

    pub fn test_concurrency(&self) -> usize {
        self.test_concurrency
    }

    /// Run one submission to a terminal result
    pub async fn execute(
        &self,
        submission: &Submission,
    ) -> Result<ExecutionResult, ExecutionError> {
        let Some(remote) = &self.remote else {
            debug!(
                language_id = submission.language_id,
                "No judge credential configured; simulating"
            );
            return Ok(simulate(submission));
        };

        match remote.run(submission).await {
            Ok(result) => Ok(result),
            Err(e) if !e.is_timeout() && self.on_error == FallbackPolicy::Simulate => {
                warn!(error = %e, "Judge call failed; answering with simulated result");
                Ok(simulate(submission))
            }
            Err(e) => {
                error!(error = %e, "Judge call failed");
                Err(e)
            }
        }
    }

    pub async fn run_against_test_cases(
        &self,
        source_code: &str,
        language_id: u32,
        test_cases: &[TestCase],
    ) -> Result<Vec<TestOutcome>, ExecutionError> {
        run_test_cases(self, source_code, language_id, test_cases, self.test_concurrency).await
    }

    pub fn language_runtime_id(&self, language: &str) -> u32 {
        languages::runtime_id(language)
    }

    pub fn starter_template(&self, language: &str) -> &'static str {
        languages::starter_template(language)
    }
}

#[async_trait]
impl Judge for ExecutionClient {
    async fn execute(&self, submission: &Submission) -> Result<ExecutionResult, ExecutionError> {
        ExecutionClient::execute(self, submission).await
    }
}

async fn run_one<J: Judge + ?Sized>(
    judge: &J,
    source_code: &str,
    language_id: u32,
    index: usize,
    test_case: &TestCase,
) -> Result<TestOutcome, ExecutionError> {
    let submission = Submission::new(source_code, language_id)
        .with_stdin(test_case.input.as_str())
        .with_expected_output(test_case.expected_output.as_str());

    let result = judge.execute(&submission).await?;
    let outcome = evaluate_test(test_case, &result);

    debug!(
        test_num = index + 1,
        status_id = result.status.id,
        passed = outcome.passed,
        "Test case evaluated"
    );
    Ok(outcome)
}

/// Execute every test case and return outcomes in input order.
///
/// With `concurrency <= 1` cases run strictly one after another. Larger
/// values keep up to that many executions in flight. The first error
/// aborts the run.
pub async fn run_test_cases<J: Judge + ?Sized>(
    judge: &J,
    source_code: &str,
    language_id: u32,
    test_cases: &[TestCase],
    concurrency: usize,
) -> Result<Vec<TestOutcome>, ExecutionError> {
    info!(
        language_id,
        test_count = test_cases.len(),
        concurrency,
        "Running test cases"
    );

    let outcomes = if concurrency <= 1 {
        let mut outcomes = Vec::with_capacity(test_cases.len());
        for (index, test_case) in test_cases.iter().enumerate() {
            outcomes.push(run_one(judge, source_code, language_id, index, test_case).await?);
        }
        outcomes
    } else {
        let runs: Vec<_> = test_cases
            .iter()
            .enumerate()
            .map(|(index, test_case)| run_one(judge, source_code, language_id, index, test_case))
            .collect();
        stream::iter(runs)
            .buffered(concurrency)
            .try_collect::<Vec<_>>()
            .await?
    };

    let passed = outcomes.iter().filter(|o: &&TestOutcome| o.passed).count();
    info!(passed, total = outcomes.len(), "Test run complete");
    Ok(outcomes)
}
