// HTTP route handlers for the Arena API

use arena_common::languages::{self, DEFAULT_LANGUAGE};
use arena_common::types::{ExecutionResult, Submission, TestCase};
use arena_judge::evaluator::summarize;
use arena_judge::ExecutionError;
use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ExecuteRequest {
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub language_id: Option<u32>,
    pub source_code: String,
    #[serde(default)]
    pub stdin: Option<String>,
    #[serde(default)]
    pub expected_output: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RunTestsRequest {
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub language_id: Option<u32>,
    pub source_code: String,
    pub test_cases: Vec<TestCase>,
}

/// An explicit runtime id wins over a selector name
fn resolve_language(language: Option<&str>, language_id: Option<u32>) -> u32 {
    language_id.unwrap_or_else(|| languages::runtime_id(language.unwrap_or(DEFAULT_LANGUAGE)))
}

fn bad_request(message: &str) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(serde_json::json!({ "error": message })),
    )
        .into_response()
}

/// Which metric series a failed request is counted on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RunKind {
    Execution,
    TestRun,
}

fn record_failure(state: &AppState, kind: RunKind, outcome: &str) {
    match kind {
        RunKind::Execution => state.metrics.record(state.client.mode(), outcome),
        RunKind::TestRun => state.metrics.record_test_run(outcome),
    }
}

fn failure_response(
    state: &AppState,
    run_id: Uuid,
    kind: RunKind,
    err: ExecutionError,
) -> Response {
    let message = err.to_string();

    match err {
        ExecutionError::TimedOut {
            token,
            attempts,
            last,
        } => {
            warn!(run_id = %run_id, token = %token, attempts, "Execution timed out");
            record_failure(state, kind, "timeout");
            (
                StatusCode::GATEWAY_TIMEOUT,
                Json(serde_json::json!({
                    "error": message,
                    "token": token,
                    "attempts": attempts,
                    "last": last,
                })),
            )
                .into_response()
        }
        other => {
            error!(run_id = %run_id, error = %other, "Execution failed");
            record_failure(state, kind, "error");
            (
                StatusCode::BAD_GATEWAY,
                Json(ExecutionResult::internal_error(format!(
                    "Failed to execute code: {}",
                    message
                ))),
            )
                .into_response()
        }
    }
}

/// POST /execute - Run code once
pub async fn execute(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ExecuteRequest>,
) -> Response {
    let run_id = Uuid::new_v4();

    if payload.source_code.trim().is_empty() {
        return bad_request("source_code must not be empty");
    }

    let submission = Submission {
        language_id: resolve_language(payload.language.as_deref(), payload.language_id),
        source_code: payload.source_code,
        stdin: payload.stdin,
        expected_output: payload.expected_output,
    };

    info!(
        run_id = %run_id,
        language_id = submission.language_id,
        source_size = submission.source_code.len(),
        mode = %state.client.mode(),
        "Execution requested"
    );

    let start = Instant::now();
    let outcome = state.client.execute(&submission).await;
    state.metrics.observe_duration(start.elapsed());

    match outcome {
        Ok(result) => {
            state.metrics.record_result(state.client.mode(), &result);
            info!(
                run_id = %run_id,
                status_id = result.status.id,
                status = %result.status.description,
                execution_ms = start.elapsed().as_millis(),
                "Execution completed"
            );
            (StatusCode::OK, Json(result)).into_response()
        }
        Err(e) => failure_response(&state, run_id, RunKind::Execution, e),
    }
}

/// POST /run-tests - Run code against every test case
pub async fn run_tests(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RunTestsRequest>,
) -> Response {
    let run_id = Uuid::new_v4();

    if payload.source_code.trim().is_empty() {
        return bad_request("source_code must not be empty");
    }
    if payload.test_cases.is_empty() {
        return bad_request("test_cases must not be empty");
    }

    let language_id = resolve_language(payload.language.as_deref(), payload.language_id);
    info!(
        run_id = %run_id,
        language_id,
        test_cases = payload.test_cases.len(),
        "Test run requested"
    );

    let start = Instant::now();
    let outcomes = state
        .client
        .run_against_test_cases(&payload.source_code, language_id, &payload.test_cases)
        .await;
    state.metrics.observe_test_run_duration(start.elapsed());

    match outcomes {
        Ok(outcomes) => {
            state.metrics.record_test_run("completed");
            state.metrics.record_outcomes(&outcomes);
            let report = summarize(outcomes);
            info!(
                run_id = %run_id,
                passed = report.passed,
                total = report.total,
                "Test run completed"
            );
            (StatusCode::OK, Json(report)).into_response()
        }
        Err(e) => failure_response(&state, run_id, RunKind::TestRun, e),
    }
}

/// GET /languages - Languages offered by the selector
pub async fn list_languages(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(serde_json::json!({
        "mode": state.client.mode().to_string(),
        "languages": languages::supported_languages(),
    }))
}

/// GET /languages/{name}/template - Starter code for a language
pub async fn language_template(Path(name): Path<String>) -> impl IntoResponse {
    Json(serde_json::json!({
        "language": name,
        "runtime_id": languages::runtime_id(&name),
        "template": languages::starter_template(&name),
    }))
}

/// GET /status - Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

/// GET /metrics - Prometheus exposition
pub async fn metrics(State(state): State<Arc<AppState>>) -> Response {
    match state.metrics.render() {
        Ok(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            body,
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "Failed to encode metrics");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
