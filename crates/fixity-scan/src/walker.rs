//! Pruning directory traversal built on jwalk.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use jwalk::{DirEntry, DirEntryIter, Parallelism, WalkDirGeneric};
use tracing::{debug, trace};

use fixity_core::{Candidate, Classification, FilterPolicy, FixityError, RunWarning};

use crate::classify::{PathClassifier, platform_classifier};

/// jwalk client state: each entry carries its classification.
type WalkState = ((), Classification);

/// Walks a root and yields candidate files that survive the filter policy.
#[derive(Debug, Clone)]
pub struct Traversal {
    root: PathBuf,
    policy: FilterPolicy,
    classifier: Arc<dyn PathClassifier>,
}

impl Traversal {
    /// Create a traversal using the platform classifier.
    pub fn new(root: impl Into<PathBuf>, policy: FilterPolicy) -> Self {
        Self {
            root: root.into(),
            policy,
            classifier: platform_classifier(),
        }
    }

    /// Use a specific classifier strategy.
    pub fn with_classifier(mut self, classifier: Arc<dyn PathClassifier>) -> Self {
        self.classifier = classifier;
        self
    }

    /// Get the root being traversed.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get the filter policy in effect.
    pub fn policy(&self) -> FilterPolicy {
        self.policy
    }

    /// Start the traversal.
    ///
    /// Fails with [`FixityError::NotFound`] when the root does not exist.
    /// A file root yields itself unless the policy excludes it; a directory
    /// root is walked in file-name order, pruning excluded subdirectories
    /// before they are read. The directory root itself is not classified.
    pub fn candidates(&self) -> Result<Candidates, FixityError> {
        let metadata = std::fs::metadata(&self.root).map_err(|e| FixityError::io(&self.root, e))?;

        if metadata.is_file() {
            let classification = self.classifier.classify(&self.root);
            let candidate = if self.policy.excludes(classification) {
                debug!(path = %self.root.display(), ?classification, "root file excluded by policy");
                None
            } else {
                Some(Candidate::new(&self.root, classification))
            };
            return Ok(Candidates::Single(candidate));
        }

        if !metadata.is_dir() {
            return Err(FixityError::invalid_config(format!(
                "{} is neither a regular file nor a directory",
                self.root.display()
            )));
        }

        debug!(
            root = %self.root.display(),
            classifier = self.classifier.name(),
            policy = ?self.policy,
            "walking directory"
        );

        let classifier = Arc::clone(&self.classifier);
        let policy = self.policy;

        let walker = WalkDirGeneric::<WalkState>::new(&self.root)
            .parallelism(Parallelism::Serial)
            .sort(true)
            .skip_hidden(false)
            .follow_links(false)
            .process_read_dir(move |depth, _dir, _state, children| {
                // The root entry itself is never filtered.
                if depth.is_none() {
                    return;
                }
                children.retain_mut(|entry| match entry {
                    Ok(entry) => keep_entry(entry, classifier.as_ref(), policy),
                    Err(_) => true,
                });
            });

        Ok(Candidates::Walk(walker.into_iter()))
    }
}

/// Classify a child entry, recording the result; false drops it (and its subtree).
fn keep_entry(
    entry: &mut DirEntry<WalkState>,
    classifier: &dyn PathClassifier,
    policy: FilterPolicy,
) -> bool {
    let path = entry.path();
    let classification = classifier.classify(&path);
    if policy.excludes(classification) {
        trace!(path = %path.display(), ?classification, "pruned");
        return false;
    }
    entry.client_state = classification;
    true
}

/// Lazy sequence of candidate files.
///
/// Unreadable entries come through as [`RunWarning`]s; they never end the
/// sequence.
pub enum Candidates {
    Single(Option<Candidate>),
    Walk(DirEntryIter<WalkState>),
}

impl Iterator for Candidates {
    type Item = Result<Candidate, RunWarning>;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Self::Single(candidate) => candidate.take().map(Ok),
            Self::Walk(entries) => loop {
                match entries.next()? {
                    Ok(entry) => {
                        if let Some(err) = &entry.read_children_error {
                            return Some(Err(RunWarning::traversal(entry.path(), err.to_string())));
                        }
                        if entry.depth > 0 && entry.file_type().is_file() {
                            return Some(Ok(Candidate::new(entry.path(), entry.client_state)));
                        }
                    }
                    Err(err) => {
                        let path = err.path().map(Path::to_path_buf).unwrap_or_default();
                        return Some(Err(RunWarning::traversal(path, err.to_string())));
                    }
                }
            },
        }
    }
}

impl std::fmt::Debug for Candidates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Single(candidate) => f.debug_tuple("Single").field(candidate).finish(),
            Self::Walk(_) => f.write_str("Walk(..)"),
        }
    }
}

/// Traverse `root` with the platform classifier.
pub fn traverse(root: impl Into<PathBuf>, policy: FilterPolicy) -> Result<Candidates, FixityError> {
    Traversal::new(root, policy).candidates()
}
