use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Everything that can stop a count. Only the first two are expected user
/// mistakes; the rest mean the environment or the file itself is broken.
#[derive(Debug, Error)]
pub enum CountError {
    #[error("{} does not exist.", .0.display())]
    PathNotFound(PathBuf),

    #[error("Unsupported file type. Only {supported} are supported.")]
    UnsupportedExtension { path: PathBuf, supported: String },

    #[error("{0} support is not available in this build")]
    CapabilityMissing(&'static str),

    #[error("failed to read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{} is not valid UTF-8 text", path.display())]
    Decode { path: PathBuf },

    #[error("{} is not a readable document: {reason}", path.display())]
    Malformed { path: PathBuf, reason: String },
}

impl CountError {
    pub fn is_usage(&self) -> bool {
        matches!(
            self,
            CountError::PathNotFound(_) | CountError::UnsupportedExtension { .. }
        )
    }

    pub fn exit_code(&self) -> u8 {
        if self.is_usage() { 1 } else { 2 }
    }
}
