use arena_common::types::ExecutionResult;
use std::fmt;
use thiserror::Error;

/// Which leg of the judge round trip failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Submit,
    Poll,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Submit => write!(f, "submit"),
            Stage::Poll => write!(f, "poll"),
        }
    }
}

/// Failures of a configured remote judge.
///
/// A missing credential is not represented here: that case never leaves
/// the simulator. A judge-reported failure (wrong answer, compile error)
/// is a normal `ExecutionResult`, not an error either.
#[derive(Debug, Error)]
pub enum ExecutionError {
    #[error("failed to build judge HTTP client: {0}")]
    Setup(#[source] reqwest::Error),

    #[error("judge API URL {0:?} cannot address submissions")]
    InvalidUrl(String),

    #[error("judge {stage} request failed: {source}")]
    Transport {
        stage: Stage,
        #[source]
        source: reqwest::Error,
    },

    #[error("judge rejected {stage} request with HTTP {status}")]
    Rejected { stage: Stage, status: u16 },

    #[error("judge accepted the submission but returned no token")]
    MissingToken,

    #[error("submission {token} still processing after {attempts} polls")]
    TimedOut {
        token: String,
        attempts: u32,
        last: Option<Box<ExecutionResult>>,
    },
}

impl ExecutionError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, ExecutionError::TimedOut { .. })
    }

    pub fn stage(&self) -> Option<Stage> {
        match self {
            ExecutionError::Transport { stage, .. } | ExecutionError::Rejected { stage, .. } => {
                Some(*stage)
            }
            ExecutionError::MissingToken => Some(Stage::Submit),
            ExecutionError::TimedOut { .. } => Some(Stage::Poll),
            ExecutionError::Setup(_) | ExecutionError::InvalidUrl(_) => None,
        }
    }
}
