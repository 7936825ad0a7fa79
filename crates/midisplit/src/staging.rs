//! Staging directory for channel outputs.
//!
//! Every file of a run is written into a hidden directory beside the output
//! directory and renamed into place only once all of them exist. Sharing a
//! parent keeps each commit a same-filesystem `rename()`.
//!
//! Until [`StagingArea::finish`] is called the area undoes itself on drop:
//! staged files are discarded, files already committed are removed, and the
//! output directory is removed again if this run created it and it is empty.
//! Dropping covers errors and cancelled futures alike.

use crate::error::SplitError;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tracing::{debug, warn};

#[derive(Debug)]
pub struct StagingArea {
    dir: TempDir,
    target: PathBuf,
    created_target: bool,
    committed: Vec<PathBuf>,
    finished: bool,
}

impl StagingArea {
    /// Create `target` if needed, and a staging directory next to it.
    pub fn for_target(target: &Path) -> Result<Self, SplitError> {
        let created_target = !target.exists();
        std::fs::create_dir_all(target)
            .map_err(|e| SplitError::io("failed to create output directory", target, e))?;

        let parent = target
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let name = target
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "output".to_string());

        let dir = match tempfile::Builder::new()
            .prefix(&format!(".{}-", name))
            .tempdir_in(parent)
        {
            Ok(dir) => dir,
            Err(e) => {
                if created_target {
                    let _ = std::fs::remove_dir(target);
                }
                return Err(SplitError::io("failed to create staging directory in", parent, e));
            }
        };

        debug!("staging in {}", dir.path().display());
        Ok(Self {
            dir,
            target: target.to_path_buf(),
            created_target,
            committed: Vec::new(),
            finished: false,
        })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn target(&self) -> &Path {
        &self.target
    }

    /// Where a file named `name` is written before commit.
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Move a staged file into the target directory, replacing any previous
    /// file of the same name.
    pub async fn commit(&mut self, name: &str) -> Result<PathBuf, SplitError> {
        let from = self.path_for(name);
        let to = self.target.join(name);
        tokio::fs::rename(&from, &to)
            .await
            .map_err(|e| SplitError::io("failed to move staged file into", &to, e))?;
        self.committed.push(to.clone());
        Ok(to)
    }

    /// Keep everything committed so far.
    pub fn finish(mut self) {
        self.finished = true;
    }
}

impl Drop for StagingArea {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        for path in self.committed.drain(..).rev() {
            if let Err(e) = std::fs::remove_file(&path) {
                warn!("failed to roll back {}: {}", path.display(), e);
            }
        }
        if self.created_target {
            // Only succeeds while empty.
            let _ = std::fs::remove_dir(&self.target);
        }
    }
}
