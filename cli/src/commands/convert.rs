use std::path::PathBuf;

use coh3_format::{edf_destination, is_recording, list_files, Converter};

use crate::cli::ConvertArgs;
use crate::config::{self, ConvertConfig, CONVERT_CONFIG_FILE};
use crate::error::{Error, Result};
use crate::util::{confirm, create_progress_bar, display_arguments, Confirmation};

pub fn run(args: ConvertArgs) -> Result<()> {
    display_arguments(&args);
    if confirm(&args.confirm) == Confirmation::Abort {
        return Ok(());
    }

    // Resolve the converter before touching any file; a bad executable
    // path is fatal at startup.
    let executable = match &args.executable_path {
        Some(path) => path.clone(),
        None => {
            let config_path = args
                .config
                .clone()
                .unwrap_or_else(|| config::default_config_path(CONVERT_CONFIG_FILE));
            let config: ConvertConfig = config::load_or_init(&config_path)?;
            config.path_to_executable
        }
    };
    let converter =
        Converter::new(executable).map_err(|source| Error::Converter { source })?;

    println!("1 - Listing the files to convert...");
    let mut recordings: Vec<PathBuf> = list_files(&args.path)
        .into_iter()
        .filter(|path| is_recording(path))
        .collect();
    recordings.sort();
    let total = recordings.len();
    println!("{total} file(s) will be converted.");

    println!("2 - Converting files");
    let pb = create_progress_bar(total as u64, "Converting");
    let mut failed = 0usize;
    let mut skipped = 0usize;

    for source in &recordings {
        let destination = edf_destination(source, &args.path, args.destination_path.as_deref());

        if destination.is_file() && !args.overwrite {
            tracing::debug!(path = %destination.display(), "already converted, skipping");
            skipped += 1;
            pb.inc(1);
            continue;
        }

        if let Some(parent) = destination.parent() {
            if let Err(error) = std::fs::create_dir_all(parent) {
                failed += 1;
                tracing::error!(
                    path = %parent.display(),
                    %error,
                    "cannot create destination directory"
                );
                pb.inc(1);
                continue;
            }
        }

        if let Err(error) = converter.convert(source, &destination) {
            failed += 1;
            tracing::error!(path = %source.display(), %error, "conversion failed");
        }
        pb.inc(1);
    }
    pb.finish_with_message("Done");

    println!(
        "Converted {} file(s), {} skipped, {} failed.",
        total - skipped - failed,
        skipped,
        failed
    );

    Ok(())
}
