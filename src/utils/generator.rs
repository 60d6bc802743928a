// release generation: read fragments, merge them into the changelog, clean up

use crate::error::Result;
use crate::utils::changelog::{ChangelogStore, format_entries, merge, release_header};
use crate::utils::cleanup::{CleanupWarning, FinalizeRequest, cleanup};
use crate::utils::config::{ChangefoldConfig, render_template};
use crate::utils::fragments::{Fragment, FragmentSource};
use crate::utils::git_ops::VersionControl;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// version and date of the release being written
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseRequest {
    pub version: String,
    pub date: String,
}

impl ReleaseRequest {
    pub fn new(version: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            date: date.into(),
        }
    }

    /// release dated with the local date
    pub fn today(version: impl Into<String>) -> Self {
        Self::new(version, chrono::Local::now().format(DATE_FORMAT).to_string())
    }
}

/// how a successful run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// no fragments, nothing was written
    NothingToDo,
    /// changelog written and every cleanup step succeeded
    Done,
    /// changelog written, some cleanup steps failed
    PartialCleanupWarning,
}

/// result of one generate run
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub outcome: Outcome,
    pub version: String,
    pub date: String,
    pub changelog: PathBuf,
    /// names of the consumed fragments, in changelog order
    pub fragments: Vec<String>,
    /// release block added to the changelog
    pub header: String,
    pub finalized: bool,
    pub warnings: Vec<CleanupWarning>,
}

impl Report {
    fn nothing_to_do(request: &ReleaseRequest, changelog: PathBuf) -> Self {
        Self {
            outcome: Outcome::NothingToDo,
            version: request.version.clone(),
            date: request.date.clone(),
            changelog,
            fragments: Vec::new(),
            header: String::new(),
            finalized: false,
            warnings: Vec::new(),
        }
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// print the report for a terminal
    pub fn display_summary(&self, fragment_dir: &std::path::Path) {
        match self.outcome {
            Outcome::NothingToDo => {
                println!(
                    "no fragments found in {}, nothing to do",
                    fragment_dir.display()
                );
            }
            Outcome::Done | Outcome::PartialCleanupWarning => {
                println!(
                    "added {} ({}) to {} with {} entr{}",
                    self.version,
                    self.date,
                    self.changelog.display(),
                    self.fragments.len(),
                    if self.fragments.len() == 1 { "y" } else { "ies" }
                );
                for name in &self.fragments {
                    println!("  {}", name);
                }
                if self.finalized {
                    println!("finalize: commit and tag requested");
                }
            }
        }

        if self.has_warnings() {
            println!();
            println!("cleanup warnings:");
            for warning in &self.warnings {
                println!("  {}", warning);
            }
        }
    }
}

/// dry-run result
#[derive(Debug, Clone, Serialize)]
pub struct Preview {
    pub fragments: Vec<String>,
    pub header: String,
    /// full changelog as it would be written
    pub document: String,
}

/// `Reader -> Formatter -> Merger -> Cleanup` over injected collaborators
pub struct ChangelogGenerator<F, C, V> {
    fragments: F,
    changelog: C,
    vcs: V,
    finalize: bool,
    commit_message: String,
    tag_name: String,
}

impl<F, C, V> ChangelogGenerator<F, C, V>
where
    F: FragmentSource,
    C: ChangelogStore,
    V: VersionControl,
{
    pub fn new(fragments: F, changelog: C, vcs: V) -> Self {
        let defaults = ChangefoldConfig::default();
        Self {
            fragments,
            changelog,
            vcs,
            finalize: defaults.finalize,
            commit_message: defaults.commit_message,
            tag_name: defaults.tag_name,
        }
    }

    /// take finalize mode and message templates from the configuration
    pub fn with_config(mut self, config: &ChangefoldConfig) -> Self {
        self.finalize = config.finalize;
        self.commit_message = config.commit_message.clone();
        self.tag_name = config.tag_name.clone();
        self
    }

    pub fn finalize(mut self, enabled: bool) -> Self {
        self.finalize = enabled;
        self
    }

    pub fn changelog(&self) -> &C {
        &self.changelog
    }

    pub fn vcs(&self) -> &V {
        &self.vcs
    }

    /// fragments that the next run would consume
    pub fn pending(&self) -> Result<Vec<Fragment>> {
        self.fragments.read_fragments()
    }

    /// merge without writing anything, `None` when there is nothing to do
    pub fn preview(&self, request: &ReleaseRequest) -> Result<Option<Preview>> {
        let fragments = self.fragments.read_fragments()?;
        if fragments.is_empty() {
            return Ok(None);
        }

        let entries = format_entries(&fragments);
        let existing = self.changelog.load()?;

        Ok(Some(Preview {
            fragments: fragments.iter().map(|f| f.name.clone()).collect(),
            header: release_header(&request.version, &request.date, &entries),
            document: merge(&existing, &request.version, &request.date, &entries),
        }))
    }

    /// write the release into the changelog and consume its fragments
    ///
    /// a missing fragment directory or a changelog read/write failure is an
    /// error and leaves every fragment in place. failures after the write are
    /// reported in the returned report.
    pub fn generate(&self, request: &ReleaseRequest) -> Result<Report> {
        debug!(location = %self.fragments.location().display(), "reading fragments");
        let fragments = self.fragments.read_fragments()?;

        if fragments.is_empty() {
            info!(
                location = %self.fragments.location().display(),
                "no fragments found, nothing to do"
            );
            return Ok(Report::nothing_to_do(
                request,
                self.changelog.path().to_path_buf(),
            ));
        }

        let entries = format_entries(&fragments);
        let existing = self.changelog.load()?;
        let merged = merge(&existing, &request.version, &request.date, &entries);
        self.changelog.save(&merged)?;
        info!(
            version = %request.version,
            changelog = %self.changelog.path().display(),
            entries = fragments.len(),
            "changelog updated"
        );

        let finalize = self.finalize.then(|| {
            FinalizeRequest::new(
                render_template(&self.commit_message, &request.version),
                render_template(&self.tag_name, &request.version),
            )
        });

        let warnings = cleanup(
            &self.vcs,
            &fragments,
            self.changelog.path(),
            finalize.as_ref(),
        );

        let outcome = if warnings.is_empty() {
            Outcome::Done
        } else {
            Outcome::PartialCleanupWarning
        };
        info!(?outcome, "release generated");

        Ok(Report {
            outcome,
            version: request.version.clone(),
            date: request.date.clone(),
            changelog: self.changelog.path().to_path_buf(),
            fragments: fragments.into_iter().map(|f| f.name).collect(),
            header: release_header(&request.version, &request.date, &entries),
            finalized: finalize.is_some(),
            warnings,
        })
    }
}
