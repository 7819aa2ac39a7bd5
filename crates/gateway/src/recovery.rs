use std::fs;
use std::path::PathBuf;

use chrono::Utc;

use crate::client::Gateway;
use crate::error::GatewayError;

/// Inventory page size used for a full sweep.
const DEFAULT_PAGE_LIMIT: usize = 5000;
/// Log progress after this many written files.
const PROGRESS_INTERVAL: usize = 500;

#[derive(Debug, thiserror::Error)]
pub enum RecoveryError {
    #[error("remote inventory request failed: {0}")]
    Gateway(#[from] GatewayError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Bulk rebuild of a local pointer tree from the remote inventory.
///
/// The sweep writes into `<root>/<tag>_recovery_tmp` and renames it to
/// `<root>/<tag>_recovery` only once the full inventory has been paged
/// through, so an observer sees either a complete tree or none. Two sweeps
/// against the same root must be serialized by the caller.
pub struct Recovery {
    gateway: Gateway,
    root: PathBuf,
    page_limit: usize,
}

impl Recovery {
    pub fn new(gateway: Gateway, root: impl Into<PathBuf>) -> Self {
        Self {
            gateway,
            root: root.into(),
            page_limit: DEFAULT_PAGE_LIMIT,
        }
    }

    /// Override the inventory page size. The remote must not mutate during
    /// the sweep for offset/limit paging to visit each object exactly once.
    pub fn with_page_limit(mut self, page_limit: usize) -> Self {
        self.page_limit = page_limit;
        self
    }

    /// Run the sweep to completion and return the committed directory.
    ///
    /// On any failure the temporary directory is removed and the error
    /// surfaces; previously committed recovery output is never touched.
    pub async fn run(&self) -> Result<PathBuf, RecoveryError> {
        let tag = Utc::now().format("%Y%m%d_%H%M%S").to_string();
        let temp_dir = self.root.join(format!("{tag}_recovery_tmp"));
        let final_dir = self.root.join(format!("{tag}_recovery"));

        tracing::info!(root = %self.root.display(), "starting recovery");
        fs::create_dir_all(&temp_dir)?;
        let mut guard = TempDirGuard::new(temp_dir.clone());

        let mut offset = 0;
        let mut done = 0usize;

        loop {
            let page = self.gateway.list_page(offset, self.page_limit).await?;

            // An empty page signals a finished sweep; commit is one rename.
            if page.is_empty() {
                fs::rename(&temp_dir, &final_dir)?;
                guard.disarm();
                tracing::info!(dir = %final_dir.display(), files = done, "recovery completed");
                return Ok(final_dir);
            }

            let page_len = page.len();
            for (idx, entry) in page.into_iter().enumerate() {
                let full_path = temp_dir.join(&entry.file_name);
                if let Some(parent) = full_path.parent() {
                    fs::create_dir_all(parent)?;
                }

                if let Err(err) = fs::write(&full_path, entry.id.as_bytes()) {
                    // Known naming collision: another entry already claimed
                    // this path as a directory.
                    if full_path.is_dir() {
                        tracing::warn!(
                            path = %full_path.display(),
                            "skipping entry, destination is a directory"
                        );
                        continue;
                    }
                    return Err(err.into());
                }

                done += 1;
                if done % PROGRESS_INTERVAL == 0 || idx == page_len - 1 {
                    tracing::info!(
                        processed = idx + 1,
                        page_size = page_len,
                        total = done,
                        "recovery progress"
                    );
                }
            }

            offset += self.page_limit;
        }
    }
}

/// Removes the in-flight temporary directory unless the sweep committed.
struct TempDirGuard {
    path: PathBuf,
    armed: bool,
}

impl TempDirGuard {
    fn new(path: PathBuf) -> Self {
        Self { path, armed: true }
    }

    fn disarm(&mut self) {
        self.armed = false;
    }
}

impl Drop for TempDirGuard {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        tracing::info!(dir = %self.path.display(), "removing temporary recovery directory");
        if let Err(err) = fs::remove_dir_all(&self.path) {
            tracing::error!(
                dir = %self.path.display(),
                "failed to remove temporary recovery directory: {err}"
            );
        }
    }
}
