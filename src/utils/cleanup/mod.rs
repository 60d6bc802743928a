// fragment removal and release finalization

pub mod types;

pub use types::{CleanupStep, CleanupWarning, FinalizeRequest};

use crate::utils::fragments::Fragment;
use crate::utils::git_ops::VersionControl;
use std::path::Path;
use tracing::{debug, warn};

fn record(warnings: &mut Vec<CleanupWarning>, warning: CleanupWarning) {
    warn!(step = %warning.step, subject = %warning.target, "{}", warning.reason);
    warnings.push(warning);
}

/// remove consumed fragments, stage the changelog and optionally finalize
///
/// runs only after the changelog was written. every failure becomes a
/// warning and later steps still run, nothing already staged is undone.
/// the commit is skipped when the changelog could not be staged and the tag
/// is skipped when there is no commit to put it on.
pub fn cleanup<V: VersionControl + ?Sized>(
    vcs: &V,
    fragments: &[Fragment],
    changelog_path: &Path,
    finalize: Option<&FinalizeRequest>,
) -> Vec<CleanupWarning> {
    let mut warnings = Vec::new();

    for fragment in fragments {
        debug!(fragment = %fragment.path.display(), "removing fragment");
        if let Err(e) = vcs.remove(&fragment.path) {
            record(
                &mut warnings,
                CleanupWarning::new(
                    CleanupStep::RemoveFragment,
                    fragment.path.display().to_string(),
                    e.to_string(),
                ),
            );
        }
    }

    let changelog = changelog_path.display().to_string();
    let staged = match vcs.stage(changelog_path) {
        Ok(()) => true,
        Err(e) => {
            record(
                &mut warnings,
                CleanupWarning::new(CleanupStep::StageChangelog, changelog.clone(), e.to_string()),
            );
            false
        }
    };

    let Some(request) = finalize else {
        return warnings;
    };

    if !staged {
        record(
            &mut warnings,
            CleanupWarning::new(
                CleanupStep::Commit,
                request.commit_message.clone(),
                format!("skipped, {} is not staged", changelog),
            ),
        );
        record(
            &mut warnings,
            CleanupWarning::new(CleanupStep::Tag, request.tag_name.clone(), "skipped, no commit"),
        );
        return warnings;
    }

    if let Err(e) = vcs.commit(&request.commit_message) {
        record(
            &mut warnings,
            CleanupWarning::new(CleanupStep::Commit, request.commit_message.clone(), e.to_string()),
        );
        record(
            &mut warnings,
            CleanupWarning::new(CleanupStep::Tag, request.tag_name.clone(), "skipped, no commit"),
        );
        return warnings;
    }

    if let Err(e) = vcs.tag(&request.tag_name) {
        record(
            &mut warnings,
            CleanupWarning::new(CleanupStep::Tag, request.tag_name.clone(), e.to_string()),
        );
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::testing::{RecordingVcs, VcsCall};
    use std::path::PathBuf;

    fn fragments() -> Vec<Fragment> {
        vec![
            Fragment::new("changelogs/unreleased/JIRA-1.md", "Fixed bug"),
            Fragment::new("changelogs/unreleased/JIRA-2.md", "Added feature"),
        ]
    }

    #[test]
    fn test_removes_fragments_then_stages_changelog() {
        let vcs = RecordingVcs::new();
        let warnings = cleanup(&vcs, &fragments(), Path::new("CHANGELOG.md"), None);

        assert!(warnings.is_empty());
        assert_eq!(
            vcs.calls(),
            vec![
                VcsCall::Remove(PathBuf::from("changelogs/unreleased/JIRA-1.md")),
                VcsCall::Remove(PathBuf::from("changelogs/unreleased/JIRA-2.md")),
                VcsCall::Stage(PathBuf::from("CHANGELOG.md")),
            ]
        );
    }

    #[test]
    fn test_failed_removal_does_not_stop_the_rest() {
        let vcs = RecordingVcs::new().fail_on_path("changelogs/unreleased/JIRA-1.md");
        let warnings = cleanup(&vcs, &fragments(), Path::new("CHANGELOG.md"), None);

        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].step, CleanupStep::RemoveFragment);
        assert_eq!(warnings[0].target, "changelogs/unreleased/JIRA-1.md");

        let calls = vcs.calls();
        assert!(calls.contains(&VcsCall::Remove(PathBuf::from(
            "changelogs/unreleased/JIRA-2.md"
        ))));
        assert!(calls.contains(&VcsCall::Stage(PathBuf::from("CHANGELOG.md"))));
    }

    #[test]
    fn test_finalize_commits_and_tags_with_version() {
        let vcs = RecordingVcs::new();
        let request = FinalizeRequest::new("Finalize version 2.0.0", "2.0.0");
        let warnings = cleanup(&vcs, &fragments(), Path::new("CHANGELOG.md"), Some(&request));

        assert!(warnings.is_empty());
        let calls = vcs.calls();
        assert_eq!(
            &calls[calls.len() - 2..],
            &[
                VcsCall::Commit("Finalize version 2.0.0".to_string()),
                VcsCall::Tag("2.0.0".to_string()),
            ]
        );
    }

    #[test]
    fn test_failed_commit_skips_tag_but_keeps_staging() {
        let vcs = RecordingVcs::new().fail_commit();
        let request = FinalizeRequest::new("Finalize version 2.0.0", "2.0.0");
        let warnings = cleanup(&vcs, &fragments(), Path::new("CHANGELOG.md"), Some(&request));

        let steps: Vec<_> = warnings.iter().map(|w| w.step).collect();
        assert_eq!(steps, vec![CleanupStep::Commit, CleanupStep::Tag]);

        let calls = vcs.calls();
        assert!(calls.contains(&VcsCall::Stage(PathBuf::from("CHANGELOG.md"))));
        assert!(!calls.iter().any(|c| matches!(c, VcsCall::Tag(_))));
    }

    #[test]
    fn test_failed_tag_is_a_warning() {
        let vcs = RecordingVcs::new().fail_tag();
        let request = FinalizeRequest::new("Finalize version 2.0.0", "2.0.0");
        let warnings = cleanup(&vcs, &fragments(), Path::new("CHANGELOG.md"), Some(&request));

        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].step, CleanupStep::Tag);
        assert!(vcs.calls().contains(&VcsCall::Commit("Finalize version 2.0.0".to_string())));
    }

    #[test]
    fn test_unstaged_changelog_skips_finalize() {
        let vcs = RecordingVcs::new().fail_on_path("CHANGELOG.md");
        let request = FinalizeRequest::new("Finalize version 2.0.0", "2.0.0");
        let warnings = cleanup(&vcs, &fragments(), Path::new("CHANGELOG.md"), Some(&request));

        let steps: Vec<_> = warnings.iter().map(|w| w.step).collect();
        assert_eq!(
            steps,
            vec![CleanupStep::StageChangelog, CleanupStep::Commit, CleanupStep::Tag]
        );
        assert!(!vcs.calls().iter().any(|c| matches!(c, VcsCall::Commit(_))));
    }
}
