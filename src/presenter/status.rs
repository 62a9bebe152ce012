use serde::{Deserialize, Serialize};

/// Whether the overall progression is still running or finished
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    #[default]
    InProgress,
    Completed,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::InProgress => write!(f, "in-progress"),
            Phase::Completed => write!(f, "completed"),
        }
    }
}

/// Render status of a single step. Always derived from the phase and
/// current step index, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    Pending,
    Active,
    Done,
}

impl StepStatus {
    /// Derive the status of `index` given the caller-supplied progress.
    pub fn derive(phase: Phase, current_step: usize, index: usize) -> Self {
        if phase == Phase::Completed {
            return StepStatus::Done;
        }
        match index.cmp(&current_step) {
            std::cmp::Ordering::Less => StepStatus::Done,
            std::cmp::Ordering::Equal => StepStatus::Active,
            std::cmp::Ordering::Greater => StepStatus::Pending,
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            StepStatus::Pending => "○",
            StepStatus::Active => "◉",
            StepStatus::Done => "✓",
        }
    }
}

impl std::fmt::Display for StepStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StepStatus::Pending => write!(f, "pending"),
            StepStatus::Active => write!(f, "active"),
            StepStatus::Done => write!(f, "done"),
        }
    }
}
