use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExtractionStatus {
    NotStarted,
    Running,
    Succeeded,
    Failed,
}

impl ExtractionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExtractionStatus::NotStarted => "notStarted",
            ExtractionStatus::Running => "running",
            ExtractionStatus::Succeeded => "succeeded",
            ExtractionStatus::Failed => "failed",
        }
    }

    /// Parses a service status. Unknown values count as `Running`.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "notstarted" | "not-started" | "not_started" => ExtractionStatus::NotStarted,
            "succeeded" => ExtractionStatus::Succeeded,
            "failed" => ExtractionStatus::Failed,
            _ => ExtractionStatus::Running,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, ExtractionStatus::Succeeded | ExtractionStatus::Failed)
    }
}

impl fmt::Display for ExtractionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An asynchronous extraction job tracked while polling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionJob {
    pub handle: String,
    pub status: ExtractionStatus,
    pub attempts: u32,
}

impl ExtractionJob {
    pub fn new(handle: String) -> Self {
        Self {
            handle,
            status: ExtractionStatus::NotStarted,
            attempts: 0,
        }
    }

    pub fn record_poll(&mut self, status: ExtractionStatus) {
        self.attempts += 1;
        self.status = status;
    }
}
