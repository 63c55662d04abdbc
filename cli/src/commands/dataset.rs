use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use coh3_format::{
    anonymise, find_files, is_recording, list_sources, read_manifest, FieldEdits, PatientRecord,
};

use crate::cli::DatasetArgs;
use crate::config::{self, DatasetConfig, DATASET_CONFIG_FILE};
use crate::error::{Error, Result};
use crate::util::{confirm, create_progress_bar, display_arguments, Confirmation};

pub fn run(args: DatasetArgs) -> Result<()> {
    display_arguments(&args);
    if confirm(&args.confirm) == Confirmation::Abort {
        return Ok(());
    }

    let config_path = args
        .config
        .clone()
        .unwrap_or_else(|| config::default_config_path(DATASET_CONFIG_FILE));
    let config: DatasetConfig = config::load_or_init(&config_path)?;
    if config.data_sources.is_empty() {
        return Err(Error::NoDataSources { path: config_path });
    }

    let source_names: Vec<String> = config
        .data_sources
        .iter()
        .map(|root| root.display().to_string())
        .collect();
    println!("1 - Listing files in [{}]...", source_names.join(", "));
    let sources = list_sources(&config.data_sources);

    println!("2 - Filtering files (keeping only .eeg recordings)...");
    let sources: Vec<(String, Vec<PathBuf>)> = sources
        .into_iter()
        .map(|(id, files)| {
            (
                id,
                files
                    .into_iter()
                    .filter(|file| is_recording(file))
                    .collect(),
            )
        })
        .collect();
    let found: usize = sources.iter().map(|(_, files)| files.len()).sum();
    println!("Found {found} file(s)");

    println!("3 - Reading the manifest...");
    let records = read_manifest(&args.manifest).map_err(|source| Error::Manifest {
        path: args.manifest.clone(),
        source,
    })?;

    println!("4 - Locating each recording...");
    let jobs = plan_exports(&records, &sources, &args.destination_path);

    println!("5 - Anonymising and exporting to the dataset path...");
    let pb = create_progress_bar(jobs.len() as u64, "Exporting");
    let mut failed = 0usize;

    for job in &jobs {
        let mut edits = if args.non_anonymised {
            FieldEdits::passthrough()
        } else {
            FieldEdits::blank()
        };
        if args.parent_folder_as_name && !args.non_anonymised {
            if let Some(folder) = job.destination.parent().and_then(|dir| dir.file_name()) {
                edits = edits.with_name(folder.to_string_lossy());
            }
        }

        if let Err(error) = anonymise(&job.source, &job.destination, &edits) {
            failed += 1;
            tracing::error!(
                path = %job.source.display(),
                %error,
                "failed to export recording"
            );
        }
        pb.inc(1);
    }
    pb.finish_with_message("Done");

    println!("Exported {} file(s), {} failed.", jobs.len() - failed, failed);

    Ok(())
}

#[derive(Debug)]
struct ExportJob {
    source: PathBuf,
    destination: PathBuf,
}

/// Match every manifest entry against the sources and pair each recording
/// part with its output path.
fn plan_exports(
    records: &[PatientRecord],
    sources: &[(String, Vec<PathBuf>)],
    destination_root: &Path,
) -> Vec<ExportJob> {
    let mut jobs = Vec::new();

    for record in records {
        for (file_index, prefix) in record.files.iter().enumerate() {
            if prefix.is_empty() {
                continue;
            }

            let cluster = find_files(prefix, sources);
            let parts: BTreeSet<&str> = cluster
                .iter()
                .filter_map(|path| path.file_name().and_then(|name| name.to_str()))
                .collect();

            if parts.is_empty() {
                println!("The recording \"{prefix}\" is missing.");
                continue;
            }
            println!(
                "The recording \"{prefix}\" is fragmented in {} part(s).",
                parts.len()
            );

            let Some(destination) = resolve_destination(record, file_index) else {
                tracing::warn!(prefix, "missing destination, record skipped");
                continue;
            };

            let fragment = preferred_fragment(prefix);
            for part in parts {
                let Some(best) = best_candidate(&cluster, part, &fragment) else {
                    continue;
                };
                jobs.push(ExportJob {
                    source: best.clone(),
                    destination: destination_root.join(&destination).join(part),
                });
            }
        }
    }

    jobs
}

/// Among the matched paths carrying this basename, prefer the one from the
/// acquisition station's canonical directory.
fn best_candidate<'a>(
    cluster: &'a [PathBuf],
    part: &str,
    fragment: &str,
) -> Option<&'a PathBuf> {
    let with_name = |path: &&'a PathBuf| {
        path.file_name().and_then(|name| name.to_str()) == Some(part)
    };

    cluster
        .iter()
        .filter(with_name)
        .find(|path| path.to_string_lossy().replace('\\', "/").contains(fragment))
        .or_else(|| cluster.iter().find(with_name))
}

/// This file's destination cell, falling back to the last non-empty
/// destination cell of the row.
fn resolve_destination(record: &PatientRecord, file_index: usize) -> Option<String> {
    record
        .destinations
        .get(file_index)
        .filter(|cell| !cell.is_empty())
        .cloned()
        .or_else(|| {
            record
                .destinations
                .iter()
                .rev()
                .find(|cell| !cell.is_empty())
                .cloned()
        })
}

/// Recordings live under an `L<code>/EEG2` directory on the acquisition
/// stations; candidates from there are authoritative.
fn preferred_fragment(prefix: &str) -> String {
    let code: String = prefix.chars().take(4).collect();
    format!("L{code}/EEG2")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(destinations: &[&str], files: &[&str]) -> PatientRecord {
        PatientRecord {
            destinations: destinations.iter().map(|s| s.to_string()).collect(),
            files: files.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn destination_falls_back_to_last_non_empty() {
        let record = record(&["sub/a", "", "sub/c"], &["L001", "L002", "L003"]);
        assert_eq!(resolve_destination(&record, 0).as_deref(), Some("sub/a"));
        assert_eq!(resolve_destination(&record, 1).as_deref(), Some("sub/c"));
        assert_eq!(resolve_destination(&record, 5).as_deref(), Some("sub/c"));
    }

    #[test]
    fn destination_missing_when_row_is_empty() {
        let record = record(&["", ""], &["L001"]);
        assert_eq!(resolve_destination(&record, 0), None);
    }

    #[test]
    fn preferred_fragment_uses_the_first_four_chars() {
        assert_eq!(preferred_fragment("L00123"), "LL001/EEG2");
        assert_eq!(preferred_fragment("0123456"), "L0123/EEG2");
    }

    #[test]
    fn best_candidate_prefers_the_station_directory() {
        let cluster = vec![
            PathBuf::from("/mirror/0123_1.eeg"),
            PathBuf::from("/archive/L0123/EEG2/0123_1.eeg"),
        ];
        let best = best_candidate(&cluster, "0123_1.eeg", "L0123/EEG2").unwrap();
        assert_eq!(best, &PathBuf::from("/archive/L0123/EEG2/0123_1.eeg"));
    }

    #[test]
    fn best_candidate_falls_back_to_first_match() {
        let cluster = vec![
            PathBuf::from("/mirror/0123_1.eeg"),
            PathBuf::from("/other/0123_1.eeg"),
        ];
        let best = best_candidate(&cluster, "0123_1.eeg", "L0123/EEG2").unwrap();
        assert_eq!(best, &PathBuf::from("/mirror/0123_1.eeg"));
    }

    #[test]
    fn plan_skips_empty_cells_and_missing_recordings() {
        let records = vec![record(&["sub"], &["", "L777"])];
        let sources = vec![("A".to_string(), vec![PathBuf::from("/src/L777_1.eeg")])];

        let jobs = plan_exports(&records, &sources, Path::new("/dataset"));

        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].source, PathBuf::from("/src/L777_1.eeg"));
        assert_eq!(jobs[0].destination, PathBuf::from("/dataset/sub/L777_1.eeg"));
    }
}
