use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use fs4::fs_std::FileExt;
use tracing::{debug, warn};

use crate::domain::snapshot::MatchSnapshot;
use crate::domain::state::SessionId;
use crate::error::AppError;
use crate::services::collaborators::SnapshotStore;

/// One pretty-printed JSON file per session under a base directory.
///
/// Writes go to a temp file that is renamed over the target, while an
/// exclusive advisory lock is held on `<session>.lock`. Readers take the
/// same lock so they never observe a half-written rename sequence.
pub struct FileSnapshotStore {
    dir: PathBuf,
}

impl FileSnapshotStore {
    /// Create the store, creating `dir` if it does not exist yet.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, AppError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| {
            AppError::persistence(format!("cannot create snapshot dir {}", dir.display()), e)
        })?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn snapshot_path(&self, session: SessionId) -> PathBuf {
        self.dir.join(format!("{session}.json"))
    }

    fn lock_path(&self, session: SessionId) -> PathBuf {
        self.dir.join(format!("{session}.lock"))
    }

    fn acquire(&self, session: SessionId) -> Result<LockGuard, AppError> {
        let path = self.lock_path(session);
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&path)
            .map_err(|e| {
                AppError::persistence(format!("cannot open lock file {}", path.display()), e)
            })?;
        FileExt::lock_exclusive(&file).map_err(|e| {
            AppError::persistence(format!("cannot lock {}", path.display()), e)
        })?;
        Ok(LockGuard { file, path })
    }
}

/// Releases the advisory lock on drop.
struct LockGuard {
    file: File,
    path: PathBuf,
}

impl Drop for LockGuard {
    fn drop(&mut self) {
        if let Err(e) = FileExt::unlock(&self.file) {
            // Closing the handle releases the lock anyway
            debug!(lock = %self.path.display(), error = %e, "snapshot lock unlock returned error");
        }
    }
}

impl SnapshotStore for FileSnapshotStore {
    fn save(&self, session: SessionId, snapshot: &MatchSnapshot) -> Result<(), AppError> {
        let json = snapshot
            .to_json()
            .map_err(|e| AppError::serialization(format!("snapshot for {session}"), e))?;

        let _guard = self.acquire(session)?;
        let target = self.snapshot_path(session);
        let tmp = target.with_extension("json.tmp");

        let write = || -> std::io::Result<()> {
            let mut file = File::create(&tmp)?;
            file.write_all(json.as_bytes())?;
            file.sync_all()?;
            fs::rename(&tmp, &target)
        };
        if let Err(e) = write() {
            if let Err(cleanup) = fs::remove_file(&tmp) {
                warn!(path = %tmp.display(), error = %cleanup, "failed to remove temp snapshot");
            }
            return Err(AppError::persistence(
                format!("cannot write snapshot {}", target.display()),
                e,
            ));
        }

        debug!(session = %session, path = %target.display(), bytes = json.len(), "snapshot saved");
        Ok(())
    }

    fn load(&self, session: SessionId) -> Result<Option<MatchSnapshot>, AppError> {
        let target = self.snapshot_path(session);
        let _guard = self.acquire(session)?;
        let json = match fs::read_to_string(&target) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(AppError::persistence(
                    format!("cannot read snapshot {}", target.display()),
                    e,
                ))
            }
        };
        MatchSnapshot::from_json(&json)
            .map(Some)
            .map_err(|e| AppError::serialization(format!("snapshot for {session}"), e))
    }
}
