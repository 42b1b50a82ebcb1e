use std::path::{Path, PathBuf};
use uuid::Uuid;

/// A uniquely named file in the scratch directory, removed on drop.
///
/// The file itself is only created by whoever writes to `path()`.
#[derive(Debug)]
pub struct ScratchFile {
    path: PathBuf,
}

impl ScratchFile {
    pub fn new(dir: &Path) -> Self {
        Self {
            path: dir.join(format!("{}.download", Uuid::new_v4())),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

// Blocking removal: a single unlink of one downloaded image.
impl Drop for ScratchFile {
    fn drop(&mut self) {
        if !self.path.exists() {
            return;
        }
        if let Err(e) = std::fs::remove_file(&self.path) {
            tracing::warn!("Failed to remove scratch file {:?}: {}", self.path, e);
        }
    }
}
