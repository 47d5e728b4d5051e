use std::fmt;

use serde::{Deserialize, Serialize};
use shared::{domain::CalculationResult, error::ErrorPayload, protocol::ErrorResponse};

/// Status reported when no HTTP response was received at all.
pub const TRANSPORT_FAILURE_STATUS: u16 = 0;

/// Status the service uses for a failed tangent-line stage after a successful
/// derivative.
pub const PARTIAL_FAILURE_STATUS: u16 = 500;

/// Sequence number handed out by each submit action, strictly increasing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubmissionId(pub u64);

impl fmt::Display for SubmissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FailureDetail {
    /// A JSON failure body was received.
    Payload(ErrorPayload),
    /// No structured body: the raw transport or decoding error description.
    Transport(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct FailureInfo {
    pub status: u16,
    pub error: FailureDetail,
    pub dy_dx: Option<String>,
}

impl FailureInfo {
    pub fn transport(status: u16, description: impl Into<String>) -> Self {
        Self {
            status,
            error: FailureDetail::Transport(description.into()),
            dy_dx: None,
        }
    }

    pub fn from_error_response(status: u16, body: ErrorResponse) -> Self {
        Self {
            status,
            error: FailureDetail::Payload(body.error.unwrap_or_default()),
            dy_dx: body.dy_dx,
        }
    }

    /// Derivative computed but the tangent-line stage failed. Only exactly 500
    /// qualifies.
    pub fn partial_derivative(&self) -> Option<&str> {
        if self.status == PARTIAL_FAILURE_STATUS {
            self.dy_dx.as_deref()
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum UiState {
    #[default]
    Idle,
    Loading,
    Success(CalculationResult),
    Error(FailureInfo),
}

impl UiState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Success(_) | Self::Error(_))
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::Success(_) => "success",
            Self::Error(_) => "error",
        }
    }
}

/// How completions of superseded submissions are treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionPolicy {
    /// Only the latest issued submission may update the UI.
    #[default]
    LatestOnly,
    /// Every completion updates the UI; the last one to resolve wins.
    LastResolvedWins,
}

impl CompletionPolicy {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "latest_only" => Some(Self::LatestOnly),
            "last_resolved_wins" => Some(Self::LastResolvedWins),
            _ => None,
        }
    }
}
