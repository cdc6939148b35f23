use crate::error::{RepostatsError, Result};
use crate::model::{CommitRecord, FileChange};
use chrono::{DateTime, FixedOffset};
use gix::object::tree::diff::ChangeDetached;
use gix::{discover, ObjectId, Repository};
use similar::{ChangeTag, TextDiff};
use std::collections::{HashSet, VecDeque};
use std::path::{Path, PathBuf};

/// Bytes inspected for a NUL when deciding whether a blob is binary.
const BINARY_SNIFF_LEN: usize = 8192;

pub struct GitRepo {
    repo: Repository,
    path: PathBuf,
}

impl GitRepo {
    /// Open a repository at `path`, or current dir if `None`
    pub fn open<P: AsRef<Path>>(path: Option<P>) -> Result<Self> {
        let repo_path = match path {
            Some(p) => p.as_ref().to_path_buf(),
            None => std::env::current_dir()?,
        };

        let repo = discover(&repo_path)?;
        let path = repo.workdir().unwrap_or_else(|| repo.path()).to_path_buf();

        Ok(Self { repo, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Commits the walk starts from: `HEAD` plus, unless `head_only`, the
    /// commit behind every reference.
    fn tips(&self, head_only: bool) -> Result<Vec<ObjectId>> {
        let mut tips = Vec::new();

        let mut head = self.repo.head()?;
        if !head.is_unborn() {
            tips.push(head.peel_to_commit_in_place()?.id);
        }
        if head_only {
            return Ok(tips);
        }

        let platform = self.repo.references()?;
        for reference in platform.all()? {
            let mut reference = match reference {
                Ok(reference) => reference,
                Err(e) => {
                    tracing::warn!(error = %e, "skipping unreadable reference");
                    continue;
                }
            };
            // Tags may point at trees or blobs.
            match reference.peel_to_commit() {
                Ok(commit) => tips.push(commit.id),
                Err(e) => {
                    tracing::debug!(name = %reference.name().as_bstr(), error = %e, "reference does not lead to a commit");
                }
            }
        }
        Ok(tips)
    }

    /// Every commit reachable from the walk's tips, merges skipped unless requested.
    pub fn commit_ids(&self, include_merges: bool, head_only: bool) -> Result<Vec<ObjectId>> {
        let mut ids = Vec::new();
        let mut seen: HashSet<ObjectId> = HashSet::new();
        let mut stack: VecDeque<ObjectId> = self.tips(head_only)?.into();

        while let Some(commit_id) = stack.pop_back() {
            if !seen.insert(commit_id) {
                continue;
            }

            let commit = self.repo.find_commit(commit_id)?;
            let parents: Vec<ObjectId> = commit.parent_ids().map(|id| id.into()).collect();

            if include_merges || parents.len() <= 1 {
                ids.push(commit_id);
            }
            stack.extend(parents);
        }

        tracing::debug!(commits = ids.len(), include_merges, head_only, "walked history");
        Ok(ids)
    }

    /// Builds the record for one commit, diffing against its first parent.
    pub fn commit_record(&self, commit_id: ObjectId) -> Result<CommitRecord> {
        let commit = self.repo.find_commit(commit_id)?;
        let author = commit.author()?;
        let time = author.time()?;
        let timestamp = format_timestamp(time.seconds, time.offset)?;
        let author_name = author.name.to_string();

        let commit_tree = commit.tree()?;
        let parent_tree = match commit.parent_ids().next() {
            Some(parent_id) => Some(self.repo.find_commit(parent_id)?.tree()?),
            None => None,
        };

        let changes: Vec<ChangeDetached> =
            self.repo
                .diff_tree_to_tree(parent_tree.as_ref(), Some(&commit_tree), None)?;

        let mut files = Vec::new();
        for change in changes {
            self.handle_change(change, &mut files);
        }

        CommitRecord::new(commit_id.to_string(), author_name, timestamp, Some(files), None)
    }

    fn handle_change(&self, change: ChangeDetached, files: &mut Vec<FileChange>) {
        match change {
            ChangeDetached::Addition { id, location, .. } => {
                if let Some(new) = self.find_blob(id) {
                    files.push(if is_binary(&new.data) {
                        FileChange::binary(location.to_string())
                    } else {
                        FileChange::text(location.to_string(), count_lines(&new.data), 0)
                    });
                }
            }
            ChangeDetached::Deletion { id, location, .. } => {
                if let Some(old) = self.find_blob(id) {
                    files.push(if is_binary(&old.data) {
                        FileChange::binary(location.to_string())
                    } else {
                        FileChange::text(location.to_string(), 0, count_lines(&old.data))
                    });
                }
            }
            ChangeDetached::Modification {
                previous_id,
                id,
                location,
                ..
            } => {
                if let (Some(old), Some(new)) = (self.find_blob(previous_id), self.find_blob(id)) {
                    files.push(if is_binary(&old.data) || is_binary(&new.data) {
                        FileChange::binary(location.to_string())
                    } else {
                        let (added, deleted) = line_diff(&old.data, &new.data);
                        FileChange::text(location.to_string(), added, deleted)
                    });
                }
            }
            ChangeDetached::Rewrite {
                source_id,
                id,
                location,
                ..
            } => {
                // Renames and copies are one entry under the new path, like `git log --numstat`.
                if let (Some(old), Some(new)) = (self.find_blob(source_id), self.find_blob(id)) {
                    files.push(if is_binary(&old.data) || is_binary(&new.data) {
                        FileChange::binary(location.to_string())
                    } else {
                        let (added, deleted) = line_diff(&old.data, &new.data);
                        FileChange::text(location.to_string(), added, deleted)
                    });
                }
            }
        }
    }

    // Submodule entries point at commits that live in another repository,
    // and directory entries are trees; neither counts as a changed file.
    fn find_blob(&self, id: ObjectId) -> Option<gix::Object<'_>> {
        match self.repo.find_object(id) {
            Ok(object) if object.kind == gix::object::Kind::Blob => Some(object),
            Ok(_) => None,
            Err(e) => {
                tracing::warn!(%id, error = %e, "skipping unreadable object");
                None
            }
        }
    }
}

fn format_timestamp(seconds: i64, offset: i32) -> Result<String> {
    let utc = DateTime::from_timestamp(seconds, 0)
        .ok_or_else(|| RepostatsError::InvalidDate(format!("Invalid timestamp: {seconds}")))?;
    let zone = FixedOffset::east_opt(offset)
        .ok_or_else(|| RepostatsError::InvalidDate(format!("Invalid UTC offset: {offset}")))?;
    Ok(utc.with_timezone(&zone).to_rfc3339())
}

fn is_binary(data: &[u8]) -> bool {
    data.iter().take(BINARY_SNIFF_LEN).any(|&b| b == 0)
}

// Counted on raw bytes so text in a legacy encoding still has lines.
fn count_lines(data: &[u8]) -> u64 {
    let newlines = data.iter().filter(|&&b| b == b'\n').count() as u64;
    match data.last() {
        Some(b'\n') | None => newlines,
        Some(_) => newlines + 1,
    }
}

fn line_diff(old: &[u8], new: &[u8]) -> (u64, u64) {
    let diff = TextDiff::from_lines(old, new);

    let mut added = 0;
    let mut deleted = 0;
    for change in diff.iter_all_changes() {
        match change.tag() {
            ChangeTag::Insert => added += 1,
            ChangeTag::Delete => deleted += 1,
            ChangeTag::Equal => {}
        }
    }
    (added, deleted)
}
