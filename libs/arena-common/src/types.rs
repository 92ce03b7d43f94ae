use serde::{Deserialize, Serialize};

/// Judge0 status ids the arena cares about by name.
pub const STATUS_IN_QUEUE: u32 = 1;
pub const STATUS_PROCESSING: u32 = 2;
pub const STATUS_ACCEPTED: u32 = 3;
pub const STATUS_INTERNAL_ERROR: u32 = 13;

/// A single run request. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    pub source_code: String,
    pub language_id: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stdin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_output: Option<String>,
}

impl Submission {
    pub fn new(source_code: impl Into<String>, language_id: u32) -> Self {
        Self {
            source_code: source_code.into(),
            language_id,
            stdin: None,
            expected_output: None,
        }
    }

    pub fn with_stdin(mut self, stdin: impl Into<String>) -> Self {
        self.stdin = Some(stdin.into());
        self
    }

    pub fn with_expected_output(mut self, expected: impl Into<String>) -> Self {
        self.expected_output = Some(expected.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
    pub id: u32,
    pub description: String,
}

/// Partition of status ids into polling classes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusClass {
    InProgress,
    Success,
    Failure,
}

/// Named Judge0 statuses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusKind {
    InQueue,
    Processing,
    Accepted,
    WrongAnswer,
    TimeLimitExceeded,
    CompilationError,
    RuntimeError,
    InternalError,
    ExecFormatError,
    Other,
}

/// Badge severity shown next to a result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Success,
    Failure,
    Neutral,
}

impl Status {
    pub fn new(id: u32, description: impl Into<String>) -> Self {
        Self {
            id,
            description: description.into(),
        }
    }

    pub fn class(&self) -> StatusClass {
        match self.id {
            STATUS_IN_QUEUE | STATUS_PROCESSING => StatusClass::InProgress,
            STATUS_ACCEPTED => StatusClass::Success,
            _ => StatusClass::Failure,
        }
    }

    pub fn kind(&self) -> StatusKind {
        match self.id {
            1 => StatusKind::InQueue,
            2 => StatusKind::Processing,
            3 => StatusKind::Accepted,
            4 => StatusKind::WrongAnswer,
            5 => StatusKind::TimeLimitExceeded,
            6 => StatusKind::CompilationError,
            7..=12 => StatusKind::RuntimeError,
            13 => StatusKind::InternalError,
            14 => StatusKind::ExecFormatError,
            _ => StatusKind::Other,
        }
    }

    pub fn severity(&self) -> Severity {
        match self.id {
            STATUS_ACCEPTED => Severity::Success,
            4..=12 => Severity::Failure,
            _ => Severity::Neutral,
        }
    }

    pub fn is_in_progress(&self) -> bool {
        self.class() == StatusClass::InProgress
    }

    pub fn is_terminal(&self) -> bool {
        !self.is_in_progress()
    }

    pub fn is_accepted(&self) -> bool {
        self.id == STATUS_ACCEPTED
    }
}

/// Normalized judge outcome for one submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stdout: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stderr: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compile_output: Option<String>,
    pub status: Status,
    /// Wall time in seconds, as the judge's decimal string
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    /// Peak memory in KB
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory: Option<u64>,
}

impl ExecutionResult {
    /// Result shown when the execution pipeline itself failed
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self {
            stdout: None,
            stderr: Some(message.into()),
            compile_output: None,
            status: Status::new(STATUS_INTERNAL_ERROR, "Internal Error"),
            time: None,
            memory: None,
        }
    }

    /// Stdout with surrounding whitespace removed; missing stdout is empty
    pub fn trimmed_stdout(&self) -> &str {
        self.stdout.as_deref().map(str::trim).unwrap_or("")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestCase {
    pub input: String,
    #[serde(alias = "expectedOutput")]
    pub expected_output: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl TestCase {
    pub fn new(input: impl Into<String>, expected_output: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            expected_output: expected_output.into(),
            description: None,
        }
    }

    pub fn described(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestOutcome {
    pub passed: bool,
    pub input: String,
    pub expected_output: String,
    pub actual_output: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Outcomes of one test run, in test-case order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestReport {
    pub outcomes: Vec<TestOutcome>,
    pub passed: usize,
    pub total: usize,
}

impl TestReport {
    pub fn from_outcomes(outcomes: Vec<TestOutcome>) -> Self {
        let passed = outcomes.iter().filter(|o| o.passed).count();
        let total = outcomes.len();
        Self {
            outcomes,
            passed,
            total,
        }
    }

    pub fn all_passed(&self) -> bool {
        self.total > 0 && self.passed == self.total
    }
}
