use coh3_format::{anonymise_tree, BatchEvent, BatchOptions};

use crate::cli::AnonymiseArgs;
use crate::error::Result;
use crate::util::{confirm, display_arguments, print_field_report, Confirmation};

pub fn run(args: AnonymiseArgs) -> Result<()> {
    display_arguments(&args);
    if confirm(&args.confirm) == Confirmation::Abort {
        return Ok(());
    }

    let options = BatchOptions {
        destination_root: args.destination_path.clone(),
        parent_folder_as_name: args.parent_folder_as_name,
    };

    let quiet = args.quiet;
    let stats = anonymise_tree(&args.path, &options, |event| match event {
        BatchEvent::Started {
            index,
            total,
            source,
            destination,
        } => {
            println!(
                "\nCurrent file ({index}/{total}): {} --> {}",
                source.display(),
                destination.display()
            );
            if !quiet {
                print_field_report("From:", source);
            }
        }
        BatchEvent::Finished { destination, .. } => {
            if !quiet {
                print_field_report("To:", destination);
            }
        }
        BatchEvent::Retrying { source } => {
            println!("Resource exhaustion on {}: retry...", source.display());
        }
        BatchEvent::Failed { source, error } => {
            eprintln!("Not able to process {}: {error}", source.display());
        }
    });

    println!(
        "\nDone: {} file(s) anonymised, {} failed.",
        stats.processed, stats.failed
    );

    Ok(())
}
