//! Step definitions shown by the presenter.

use serde::{Deserialize, Serialize};

/// One named stage in the deployment progression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    /// Headline (e.g., "Creating Git Repository")
    pub label: String,
    /// Small caps line under the headline
    #[serde(default)]
    pub sub_label: String,
    /// Terminal-style line shown while the step is active or done
    #[serde(default)]
    pub detail: String,
}

impl Step {
    pub fn new(
        label: impl Into<String>,
        sub_label: impl Into<String>,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            label: label.into(),
            sub_label: sub_label.into(),
            detail: detail.into(),
        }
    }

    /// Detail line for a finished step: the first trailing ellipsis becomes a check mark.
    pub fn done_detail(&self) -> String {
        self.detail.replacen("...", " ✓", 1)
    }
}

/// The agent creation steps used when no steps are configured.
pub fn default_steps() -> Vec<Step> {
    vec![
        Step::new(
            "Initializing Agent",
            "PROVISIONING · AGENT CONFIG",
            "agent.init() → bootstrapping runtime...",
        ),
        Step::new(
            "Creating Git Repository",
            "VERSION CONTROL · SCAFFOLDING",
            "git.createRepo() → setting upstream...",
        ),
        Step::new(
            "Triggering Pipeline",
            "CI/CD · DEPLOY SEQUENCE",
            "pipeline.trigger() → stages queued...",
        ),
    ]
}
