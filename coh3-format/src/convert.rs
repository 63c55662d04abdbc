//! Driver for the external Coherence-to-EDF converter.
//!
//! The converter is an uncontrolled third-party application; this module
//! only covers launching it per file and the retry contract around that.

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::ConvertError;

/// Default number of attempts per file (one retry).
pub const DEFAULT_ATTEMPTS: u32 = 2;

/// Handle on the external converter executable.
#[derive(Debug, Clone)]
pub struct Converter {
    executable: PathBuf,
    attempts: u32,
}

impl Converter {
    /// Validate the executable path. A missing executable is fatal before
    /// any file is processed.
    pub fn new(executable: impl Into<PathBuf>) -> Result<Converter, ConvertError> {
        let executable = executable.into();
        if !executable.is_file() {
            return Err(ConvertError::MissingExecutable(executable));
        }
        Ok(Converter {
            executable,
            attempts: DEFAULT_ATTEMPTS,
        })
    }

    pub fn with_attempts(mut self, attempts: u32) -> Converter {
        self.attempts = attempts.max(1);
        self
    }

    pub fn executable(&self) -> &Path {
        &self.executable
    }

    /// Convert one recording, retrying with a bounded attempt counter
    /// until the converter reports success.
    pub fn convert(&self, eeg: &Path, edf: &Path) -> Result<(), ConvertError> {
        let mut remaining = self.attempts;

        loop {
            remaining -= 1;

            let status = Command::new(&self.executable)
                .arg(eeg)
                .arg(edf)
                .status()
                .map_err(|source| ConvertError::Launch {
                    path: self.executable.clone(),
                    source,
                })?;

            if status.success() {
                return Ok(());
            }

            if remaining == 0 {
                return Err(ConvertError::Failed {
                    path: eeg.to_path_buf(),
                    attempts: self.attempts,
                });
            }

            tracing::warn!(
                path = %eeg.display(),
                remaining,
                "converter exited with failure, retrying"
            );
        }
    }
}

/// Compute the `.EDF` output path for one recording: a sibling with the
/// extension swapped, or the mirrored relative path under `destination_root`.
pub fn edf_destination(
    source: &Path,
    root: &Path,
    destination_root: Option<&Path>,
) -> PathBuf {
    let mirrored = match destination_root {
        Some(destination_root) => {
            let relative = source.strip_prefix(root).unwrap_or(source);
            destination_root.join(relative)
        }
        None => source.to_path_buf(),
    };
    mirrored.with_extension("EDF")
}
