use std::io;
use std::path::{Path, PathBuf};

use log::debug;
use tempfile::TempDir;

const PREFIX: &str = "mp3-transcribe-";

/// Scratch directory owned by one transcription request.
///
/// Everything written for the request lives here. The directory and its
/// contents are removed when the session is dropped, whether the request
/// succeeded or not.
#[derive(Debug)]
pub struct WorkspaceSession {
    dir: TempDir,
}

impl WorkspaceSession {
    /// Creates a fresh directory under `root`, or under the system temp
    /// directory when `root` is `None`.
    pub fn create(root: Option<&Path>) -> io::Result<Self> {
        let mut builder = tempfile::Builder::new();
        builder.prefix(PREFIX);
        let dir = match root {
            Some(root) => builder.tempdir_in(root)?,
            None => builder.tempdir()?,
        };
        debug!("Created workspace {}", dir.path().display());
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn audio_path(&self) -> PathBuf {
        self.dir.path().join("audio.mp3")
    }

    pub fn segment_path(&self, index: usize) -> PathBuf {
        self.dir.path().join(format!("segment-{index}.mp3"))
    }

    pub fn transcript_path(&self) -> PathBuf {
        self.dir.path().join("transcript.txt")
    }
}

impl Drop for WorkspaceSession {
    fn drop(&mut self) {
        debug!("Releasing workspace {}", self.path().display());
    }
}
