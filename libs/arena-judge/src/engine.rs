//! Remote Judge Engine - Judge0 over HTTP
//!
//! **Core Responsibility:**
//! Hand a submission to the remote judge and wait for its verdict.
//!
//! **Round Trip:**
//! 1. `POST /submissions` returns an opaque token
//! 2. `GET /submissions/{token}` is polled after a fixed delay
//! 3. Polling stops at the first terminal status (id > 2)
//! 4. Exhausting the attempt ceiling yields `ExecutionError::TimedOut`
//!
//! The engine knows nothing about fallbacks or test cases; the executor
//! decides what to do with its errors.

use crate::error::{ExecutionError, Stage};
use arena_common::config::JudgeConfig;
use arena_common::types::{ExecutionResult, Submission};
use reqwest::{Client, RequestBuilder, Response, Url};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

const KEY_HEADER: &str = "X-RapidAPI-Key";
const HOST_HEADER: &str = "X-RapidAPI-Host";

/// Body of the create-submission request
#[derive(Debug, Serialize)]
struct CreateSubmission<'a> {
    source_code: &'a str,
    language_id: u32,
    stdin: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    expected_output: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct CreatedSubmission {
    #[serde(default)]
    token: Option<String>,
}

pub struct RemoteJudge {
    http: Client,
    api_url: Url,
    api_host: String,
    api_key: String,
    poll_interval: Duration,
    max_poll_attempts: u32,
}

impl RemoteJudge {
    /// Build an engine for a configured credential
    pub fn new(config: &JudgeConfig, api_key: String) -> Result<Self, ExecutionError> {
        let http = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(ExecutionError::Setup)?;

        let api_url = Url::parse(&config.api_url)
            .ok()
            .filter(|url| !url.cannot_be_a_base())
            .ok_or_else(|| ExecutionError::InvalidUrl(config.api_url.clone()))?;

        Ok(Self {
            http,
            api_url,
            api_host: config.api_host.clone(),
            api_key,
            poll_interval: config.poll_interval,
            max_poll_attempts: config.max_poll_attempts.max(1),
        })
    }

    /// `{api_url}/submissions`, plus the token as one escaped path segment
    fn submissions_url(&self, token: Option<&str>) -> Url {
        let mut url = self.api_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push("submissions");
            if let Some(token) = token {
                segments.push(token);
            }
        }
        url
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header(KEY_HEADER, &self.api_key)
            .header(HOST_HEADER, &self.api_host)
    }

    /// Submit and poll until the judge reaches a terminal status
    #[instrument(skip(self, submission), fields(language_id = submission.language_id))]
    pub async fn run(&self, submission: &Submission) -> Result<ExecutionResult, ExecutionError> {
        let token = self.submit(submission).await?;
        info!(token = %token, "Submission accepted by judge");

        let mut last = None;
        for attempt in 1..=self.max_poll_attempts {
            tokio::time::sleep(self.poll_interval).await;

            let result = self.fetch(&token).await?;
            debug!(
                token = %token,
                attempt,
                status_id = result.status.id,
                status = %result.status.description,
                "Polled submission"
            );

            if result.status.is_terminal() {
                info!(
                    token = %token,
                    attempts = attempt,
                    status_id = result.status.id,
                    "Submission finished"
                );
                return Ok(result);
            }
            last = Some(Box::new(result));
        }

        warn!(
            token = %token,
            attempts = self.max_poll_attempts,
            "Submission still processing after final poll"
        );
        Err(ExecutionError::TimedOut {
            token,
            attempts: self.max_poll_attempts,
            last,
        })
    }

    /// Create the submission and return its token
    pub async fn submit(&self, submission: &Submission) -> Result<String, ExecutionError> {
        let body = CreateSubmission {
            source_code: &submission.source_code,
            language_id: submission.language_id,
            stdin: submission.stdin.as_deref().unwrap_or(""),
            expected_output: submission.expected_output.as_deref(),
        };

        let request = self
            .authorized(self.http.post(self.submissions_url(None)))
            .json(&body);
        let response = send(request, Stage::Submit).await?;

        let created: CreatedSubmission = response
            .json()
            .await
            .map_err(|source| ExecutionError::Transport {
                stage: Stage::Submit,
                source,
            })?;

        created
            .token
            .filter(|token| !token.trim().is_empty())
            .ok_or(ExecutionError::MissingToken)
    }

    /// Fetch the current state of a submission
    pub async fn fetch(&self, token: &str) -> Result<ExecutionResult, ExecutionError> {
        let request = self.authorized(self.http.get(self.submissions_url(Some(token))));
        let response = send(request, Stage::Poll).await?;

        response
            .json()
            .await
            .map_err(|source| ExecutionError::Transport {
                stage: Stage::Poll,
                source,
            })
    }
}

async fn send(request: RequestBuilder, stage: Stage) -> Result<Response, ExecutionError> {
    let response = request
        .send()
        .await
        .map_err(|source| ExecutionError::Transport { stage, source })?;

    let status = response.status();
    if !status.is_success() {
        return Err(ExecutionError::Rejected {
            stage,
            status: status.as_u16(),
        });
    }
    Ok(response)
}
