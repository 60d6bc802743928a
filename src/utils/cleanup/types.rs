use serde::{Deserialize, Serialize};
use std::fmt;

/// step of the cleanup that produced a warning
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CleanupStep {
    /// removing a consumed fragment
    RemoveFragment,
    /// staging the updated changelog
    StageChangelog,
    /// committing the release
    Commit,
    /// tagging the release
    Tag,
}

impl fmt::Display for CleanupStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CleanupStep::RemoveFragment => write!(f, "remove_fragment"),
            CleanupStep::StageChangelog => write!(f, "stage_changelog"),
            CleanupStep::Commit => write!(f, "commit"),
            CleanupStep::Tag => write!(f, "tag"),
        }
    }
}

/// non-fatal problem reported after the changelog was written
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanupWarning {
    pub step: CleanupStep,
    /// fragment path, changelog path, commit message or tag name
    pub target: String,
    pub reason: String,
}

impl CleanupWarning {
    pub fn new(step: CleanupStep, target: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            step,
            target: target.into(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for CleanupWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.step, self.target, self.reason)
    }
}

/// commit message and tag of a finalized release
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalizeRequest {
    pub commit_message: String,
    pub tag_name: String,
}

impl FinalizeRequest {
    pub fn new(commit_message: impl Into<String>, tag_name: impl Into<String>) -> Self {
        Self {
            commit_message: commit_message.into(),
            tag_name: tag_name.into(),
        }
    }
}
