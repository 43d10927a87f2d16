//! Orchestration of pin and update runs over workflow files
//!
//! Each file is read, its `uses:` values are extracted, every reference is
//! resolved and rewritten in turn, and the result is either written back or
//! rendered as a diff. Failures are contained to the reference or file
//! they occur in; the rest of the batch continues.
//!
//! # Modules
//!
//! - [`files`]: YAML file discovery and document I/O
//! - [`diff`]: Unified diff rendering for dry runs
//! - [`error`]: Per-file error type

pub mod diff;
pub mod error;
pub mod files;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use futures::future::join_all;
use indexmap::IndexSet;
use tracing::{debug, error, info, warn};

use crate::parser::traits::Parser;
use crate::parser::types::{ActionIdentity, ActionReference, ReferenceError};
use crate::rewrite::{RewriteTarget, rewrite};
use crate::version::classifier::{VersionKind, classify, extract_major_version, is_commit_sha};
use crate::version::resolver::{ReleaseResolver, ResolvedRelease};
use crate::version::semver::is_newer_than;

pub use error::ProcessError;
pub use files::collect_workflow_files;

/// Result of processing one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileOutcome {
    pub path: PathBuf,
    /// The rewritten content differs from the original
    pub changed: bool,
    /// The rewritten content was written back
    pub written: bool,
    /// Unified diff of the pending change (dry runs only)
    pub diff: Option<String>,
}

/// What a run does to each reference
enum Mode<'a> {
    PinAll,
    PinAction {
        action: &'a str,
        version: &'a str,
        sha: &'a str,
    },
    Update {
        action: &'a str,
    },
}

pub struct Processor {
    parser: Arc<dyn Parser>,
    resolver: ReleaseResolver,
    write: bool,
}

impl Processor {
    pub fn new(parser: Arc<dyn Parser>, resolver: ReleaseResolver, write: bool) -> Self {
        Self {
            parser,
            resolver,
            write,
        }
    }

    /// Unique action names referenced by `files`, in first-seen order
    ///
    /// Malformed and `main` references are left out.
    pub async fn find_actions_in_files(&self, files: &[PathBuf]) -> Vec<String> {
        let per_file = join_all(files.iter().map(|path| async move {
            self.load_references(path)
                .await
                .inspect_err(|e| error!("{}", e))
                .map(|(_, references)| references)
                .unwrap_or_default()
        }))
        .await;

        per_file
            .into_iter()
            .flatten()
            .map(|reference| reference.name)
            .collect::<IndexSet<_>>()
            .into_iter()
            .collect()
    }

    /// Pin every action in `files` to the commit SHA of its latest release
    pub async fn pin_all(&self, files: &[PathBuf]) -> Vec<FileOutcome> {
        let actions = self.find_actions_in_files(files).await;
        info!("Found {} actions to pin: {:?}", actions.len(), actions);

        self.process_files(files, &Mode::PinAll).await
    }

    /// Pin `action` to the commit SHA of the `version` tag
    ///
    /// The tag is resolved once; nothing is rewritten if it cannot be.
    pub async fn pin_action(
        &self,
        files: &[PathBuf],
        action: &str,
        version: &str,
    ) -> Vec<FileOutcome> {
        let Some(identity) = ActionIdentity::from_action_name(action) else {
            warn!("{} is not an owner/repo action, nothing to pin", action);
            return vec![];
        };

        let sha = match self.resolver.resolve_tag(&identity, version).await {
            Ok(Some(sha)) => sha,
            Ok(None) => {
                warn!(
                    "No SHA found for {}@{}, skipping this action",
                    action, version
                );
                return vec![];
            }
            Err(e) => {
                error!("Failed to get SHA for {}@{}: {}", action, version, e);
                return vec![];
            }
        };

        let mode = Mode::PinAction {
            action,
            version,
            sha: &sha,
        };
        self.process_files(files, &mode).await
    }

    /// Move `action` to its latest release in `files`
    pub async fn update_action(&self, files: &[PathBuf], action: &str) -> Vec<FileOutcome> {
        self.process_files(files, &Mode::Update { action }).await
    }

    async fn process_files(&self, files: &[PathBuf], mode: &Mode<'_>) -> Vec<FileOutcome> {
        let outcomes = join_all(files.iter().map(|path| async move {
            self.process_file(path, mode)
                .await
                .inspect_err(|e| error!("{}", e))
                .ok()
        }))
        .await;

        outcomes.into_iter().flatten().collect()
    }

    async fn process_file(&self, path: &Path, mode: &Mode<'_>) -> Result<FileOutcome, ProcessError> {
        let (original, references) = self.load_references(path).await?;
        let mut content = original.clone();

        for reference in references {
            let Some(target) = self.plan(&reference, mode, path).await else {
                continue;
            };

            debug!(
                "Rewriting {}@{} -> {}@{} ({}) in {}",
                reference.name,
                reference.version,
                reference.name,
                target.reference_version(),
                target.display_version,
                path.display()
            );
            content = rewrite(&content, &reference.name, &reference.version, &target);
        }

        self.finish(path, &original, content).await
    }

    /// Read a file and extract its distinct versionable references
    async fn load_references(
        &self,
        path: &Path,
    ) -> Result<(String, IndexSet<ActionReference>), ProcessError> {
        let content = files::read_document(path).await?;
        let values = self
            .parser
            .parse(&content)
            .map_err(|source| ProcessError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        let references = values
            .iter()
            .filter_map(|uses| match ActionReference::parse(&uses.value) {
                Ok(reference) => Some(reference),
                Err(ReferenceError::FloatingBranch(raw)) => {
                    debug!(
                        "Skipping {} at {}:{}: tracks main",
                        raw,
                        path.display(),
                        uses.line + 1
                    );
                    None
                }
                Err(ReferenceError::Malformed(raw)) => {
                    debug!(
                        "Skipping {} at {}:{}: not name@version",
                        raw,
                        path.display(),
                        uses.line + 1
                    );
                    None
                }
            })
            .collect();

        Ok((content, references))
    }

    /// Decide what a single reference should become, or None to leave it
    async fn plan(
        &self,
        reference: &ActionReference,
        mode: &Mode<'_>,
        path: &Path,
    ) -> Option<RewriteTarget> {
        match *mode {
            Mode::PinAll => {
                let release = self.resolve(reference).await?;
                plan_pin(reference, release, path)
            }
            Mode::PinAction {
                action,
                version,
                sha,
            } => {
                if reference.name != action {
                    return None;
                }
                if is_commit_sha(&reference.version) {
                    debug!(
                        "{} is already pinned to {} in {}",
                        action,
                        reference.version,
                        path.display()
                    );
                    return None;
                }
                Some(RewriteTarget::pin(sha, version))
            }
            Mode::Update { action } => {
                if reference.name != action {
                    return None;
                }
                let release = self.resolve(reference).await?;
                plan_update(reference, release, path)
            }
        }
    }

    /// Resolve a reference, logging and swallowing anything that is not a release
    async fn resolve(&self, reference: &ActionReference) -> Option<ResolvedRelease> {
        let Some(identity) = reference.identity() else {
            debug!("Skipping {}: not an owner/repo action", reference.name);
            return None;
        };

        match self.resolver.resolve(&identity, &reference.version).await {
            Ok(Some(release)) => Some(release),
            Ok(None) => {
                info!("No release found for {}", reference.name);
                None
            }
            Err(e) => {
                error!("Failed to get latest release for {}: {}", reference.name, e);
                None
            }
        }
    }

    async fn finish(
        &self,
        path: &Path,
        original: &str,
        updated: String,
    ) -> Result<FileOutcome, ProcessError> {
        if updated == original {
            info!("No changes to {}", path.display());
            return Ok(FileOutcome {
                path: path.to_path_buf(),
                changed: false,
                written: false,
                diff: None,
            });
        }

        if self.write {
            files::write_document(path, &updated).await?;
            info!("Updated {}", path.display());
            return Ok(FileOutcome {
                path: path.to_path_buf(),
                changed: true,
                written: true,
                diff: None,
            });
        }

        info!(
            "Dry run - not updating {} (use --write/-w to apply)",
            path.display()
        );
        Ok(FileOutcome {
            path: path.to_path_buf(),
            changed: true,
            written: false,
            diff: Some(diff::unified_diff(path, original, &updated)),
        })
    }
}

fn plan_pin(reference: &ActionReference, release: ResolvedRelease, path: &Path) -> Option<RewriteTarget> {
    if release.is_noop {
        debug!(
            "Leaving {}@{} in {}: major constraint tracks the latest release",
            reference.name,
            reference.version,
            path.display()
        );
        return None;
    }

    if release.sha.is_empty() {
        warn!(
            "No SHA found for {}@{}, skipping this action",
            reference.name, release.version
        );
        return None;
    }

    if release.sha.eq_ignore_ascii_case(&reference.version) {
        info!(
            "{} is already pinned to the latest SHA in {}",
            reference.name,
            path.display()
        );
        return None;
    }

    warn_if_not_commit(reference, &release);
    Some(RewriteTarget::pin(release.sha, release.version))
}

/// The resolver falls back to the release target when the tag lookup
/// fails, which may be a branch rather than an immutable commit
fn warn_if_not_commit(reference: &ActionReference, release: &ResolvedRelease) {
    if !is_commit_sha(&release.sha) {
        warn!(
            "{} {} resolved to {}, which is not a commit SHA; the pin is not immutable",
            reference.name, release.version, release.sha
        );
    }
}

fn plan_update(
    reference: &ActionReference,
    release: ResolvedRelease,
    path: &Path,
) -> Option<RewriteTarget> {
    let current = reference.version.as_str();

    if release.is_noop || current == release.version {
        info!(
            "{}@{} is already up to date in {}",
            reference.name,
            current,
            path.display()
        );
        return None;
    }

    match classify(current) {
        VersionKind::CommitSha => {
            if release.sha.is_empty() || release.sha.eq_ignore_ascii_case(current) {
                info!(
                    "{} is already pinned to the latest SHA in {}",
                    reference.name,
                    path.display()
                );
                return None;
            }
            info!(
                "Update available for {}: {} -> {} ({})",
                reference.name, current, release.sha, release.version
            );
            warn_if_not_commit(reference, &release);
            Some(RewriteTarget::pin(release.sha, release.version))
        }
        VersionKind::MajorConstraint => {
            if is_newer_than(current, &release.version) {
                info!(
                    "{}@{} is newer than the latest release {}",
                    reference.name, current, release.version
                );
                return None;
            }
            let major = extract_major_version(&release.version);
            info!(
                "Update available for {}: {} -> {} ({})",
                reference.name, current, major, release.version
            );
            Some(RewriteTarget::tag(major, release.version))
        }
        VersionKind::SemanticVersion | VersionKind::Other => {
            if is_newer_than(current, &release.version) {
                info!(
                    "{}@{} is newer than the latest release {}",
                    reference.name, current, release.version
                );
                return None;
            }
            info!(
                "Update available for {}: {} -> {}",
                reference.name, current, release.version
            );
            Some(RewriteTarget::tag(release.version.clone(), release.version))
        }
        VersionKind::FloatingBranch => None,
    }
}
