use std::path::{Path, PathBuf};

use crate::anonymise::{anonymise, FieldEdits};
use crate::error::AnonymiseError;
use crate::fs::list_files;

/// Whether `path` looks like a Coherence 3 recording (`.eeg`, any case).
pub fn is_recording(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("eeg"))
        .unwrap_or(false)
}

/// Options for a batch anonymisation run.
#[derive(Debug, Clone, Default)]
pub struct BatchOptions {
    /// Mirror each recording's relative path under this root. When absent,
    /// recordings are overwritten in place.
    pub destination_root: Option<PathBuf>,
    /// Fill the Name field with the immediate parent directory's name
    /// instead of blanking it.
    pub parent_folder_as_name: bool,
}

/// Progress notifications emitted while a batch runs.
#[derive(Debug)]
pub enum BatchEvent<'a> {
    Started {
        index: usize,
        total: usize,
        source: &'a Path,
        destination: &'a Path,
    },
    Retrying {
        source: &'a Path,
    },
    Finished {
        source: &'a Path,
        destination: &'a Path,
    },
    Failed {
        source: &'a Path,
        error: &'a AnonymiseError,
    },
}

/// Outcome counts of a batch run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchStats {
    pub processed: usize,
    pub failed: usize,
}

/// Anonymise every recording under `root`, in lexicographic order.
///
/// Per-file errors are logged and skipped; the batch never aborts. A
/// resource-exhaustion failure is retried exactly once before the file is
/// given up on.
pub fn anonymise_tree(
    root: &Path,
    options: &BatchOptions,
    mut progress: impl FnMut(BatchEvent<'_>),
) -> BatchStats {
    let mut recordings: Vec<PathBuf> = list_files(root)
        .into_iter()
        .filter(|path| is_recording(path))
        .collect();
    recordings.sort();

    let total = recordings.len();
    let mut stats = BatchStats::default();

    for (index, source) in recordings.iter().enumerate() {
        let destination = destination_for(source, root, options.destination_root.as_deref());
        progress(BatchEvent::Started {
            index: index + 1,
            total,
            source,
            destination: &destination,
        });

        let mut edits = FieldEdits::blank();
        if options.parent_folder_as_name {
            edits = edits.with_name(parent_folder_name(source));
        }

        let attempt = || anonymise(source, &destination, &edits);
        match retry_once_on_exhaustion(source, attempt, &mut progress) {
            Ok(()) => {
                stats.processed += 1;
                progress(BatchEvent::Finished {
                    source,
                    destination: &destination,
                });
            }
            Err(error) => {
                stats.failed += 1;
                tracing::error!(
                    path = %source.display(),
                    %error,
                    "failed to anonymise recording"
                );
                progress(BatchEvent::Failed {
                    source,
                    error: &error,
                });
            }
        }
    }

    stats
}

/// Run `attempt`, repeating it once if the first run failed with a
/// transient resource-exhaustion condition. Any other failure, and any
/// failure of the second run, is final.
fn retry_once_on_exhaustion(
    source: &Path,
    mut attempt: impl FnMut() -> Result<(), AnonymiseError>,
    progress: &mut impl FnMut(BatchEvent<'_>),
) -> Result<(), AnonymiseError> {
    match attempt() {
        Err(error) if error.is_resource_exhaustion() => {
            tracing::warn!(
                path = %source.display(),
                "resource exhaustion while anonymising, retrying once"
            );
            progress(BatchEvent::Retrying { source });
            attempt()
        }
        result => result,
    }
}

/// Compute the output path for one recording: its relative path mirrored
/// under the destination root, or the recording itself when overwriting in
/// place.
pub(crate) fn destination_for(
    source: &Path,
    root: &Path,
    destination_root: Option<&Path>,
) -> PathBuf {
    match destination_root {
        Some(destination_root) => {
            let relative = source.strip_prefix(root).unwrap_or(source);
            destination_root.join(relative)
        }
        None => source.to_path_buf(),
    }
}

fn parent_folder_name(path: &Path) -> String {
    path.parent()
        .and_then(|parent| parent.file_name())
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    fn exhaustion() -> AnonymiseError {
        AnonymiseError::Patch {
            path: PathBuf::from("rec.eeg"),
            source: io::Error::new(io::ErrorKind::OutOfMemory, "oom"),
        }
    }

    #[test]
    fn exhaustion_is_retried_exactly_once() {
        let mut calls = 0;
        let mut retries = 0;

        let result = retry_once_on_exhaustion(
            Path::new("rec.eeg"),
            || {
                calls += 1;
                Err(exhaustion())
            },
            &mut |event| {
                if matches!(event, BatchEvent::Retrying { .. }) {
                    retries += 1;
                }
            },
        );

        assert!(result.is_err());
        assert_eq!(calls, 2);
        assert_eq!(retries, 1);
    }

    #[test]
    fn retry_recovers_when_the_second_attempt_succeeds() {
        let mut calls = 0;
        let mut retries = 0;

        let result = retry_once_on_exhaustion(
            Path::new("rec.eeg"),
            || {
                calls += 1;
                if calls == 1 {
                    Err(exhaustion())
                } else {
                    Ok(())
                }
            },
            &mut |event| {
                if matches!(event, BatchEvent::Retrying { .. }) {
                    retries += 1;
                }
            },
        );

        assert!(result.is_ok());
        assert_eq!(calls, 2);
        assert_eq!(retries, 1);
    }

    #[test]
    fn other_failures_are_not_retried() {
        let mut calls = 0;
        let mut retries = 0;

        let result = retry_once_on_exhaustion(
            Path::new("rec.eeg"),
            || {
                calls += 1;
                Err(AnonymiseError::Patch {
                    path: PathBuf::from("rec.eeg"),
                    source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
                })
            },
            &mut |event| {
                if matches!(event, BatchEvent::Retrying { .. }) {
                    retries += 1;
                }
            },
        );

        assert!(result.is_err());
        assert_eq!(calls, 1);
        assert_eq!(retries, 0);
    }

    #[test]
    fn recording_extension_is_case_insensitive() {
        assert!(is_recording(Path::new("a/rec.eeg")));
        assert!(is_recording(Path::new("a/rec.EEG")));
        assert!(!is_recording(Path::new("a/rec.edf")));
        assert!(!is_recording(Path::new("a/eeg")));
    }

    #[test]
    fn destination_mirrors_relative_path() {
        let destination = destination_for(
            Path::new("/data/set/p1/rec.eeg"),
            Path::new("/data/set"),
            Some(Path::new("/out")),
        );
        assert_eq!(destination, PathBuf::from("/out/p1/rec.eeg"));
    }

    #[test]
    fn destination_defaults_to_in_place() {
        let source = Path::new("/data/set/p1/rec.eeg");
        assert_eq!(destination_for(source, Path::new("/data/set"), None), source);
    }

    #[test]
    fn parent_folder_name_of_nested_file() {
        assert_eq!(parent_folder_name(Path::new("/data/patient42/rec.eeg")), "patient42");
        assert_eq!(parent_folder_name(Path::new("rec.eeg")), "");
    }
}
