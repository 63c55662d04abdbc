use std::io::{self, BufRead, Write};
use std::path::Path;

use indicatif::{ProgressBar, ProgressStyle};

use crate::cli::ConfirmArgs;

/// Outcome of the interactive confirmation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Proceed,
    Abort,
}

/// Ask the user whether to run, honouring the `--yes`/`--no` flags.
///
/// Reads stdin until a recognisable answer arrives; end-of-input (^C/^D)
/// aborts silently, matching an explicit `no`.
pub fn confirm(args: &ConfirmArgs) -> Confirmation {
    if args.no {
        return Confirmation::Abort;
    }
    if args.yes {
        return Confirmation::Proceed;
    }

    println!();
    let stdin = io::stdin();
    let mut line = String::new();

    loop {
        print!("Do you want to run the program (yes/no)? ");
        let _ = io::stdout().flush();

        line.clear();
        match stdin.lock().read_line(&mut line) {
            Ok(0) | Err(_) => {
                println!();
                return Confirmation::Abort;
            }
            Ok(_) => {}
        }

        match line.trim().to_ascii_lowercase().as_str() {
            "y" | "yes" => return Confirmation::Proceed,
            "n" | "no" => return Confirmation::Abort,
            _ => continue,
        }
    }
}

/// Create a progress bar for file operations.
pub fn create_progress_bar(total: u64, message: &str) -> ProgressBar {
    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{msg} [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
            .expect("valid progress template")
            .progress_chars("=> "),
    );
    pb.set_message(message.to_string());
    pb
}

/// Print the identity fields of one recording under a `From:`/`To:` label,
/// tolerating unreadable files with a warning.
pub fn print_field_report(label: &str, path: &Path) {
    println!("{label}");
    match coh3_format::read_fields(path) {
        Ok(report) => print!("{report}"),
        Err(error) => {
            tracing::warn!(path = %path.display(), %error, "cannot display fields");
        }
    }
}

/// Echo the parsed arguments, like the confirmation prompt expects.
pub fn display_arguments(args: &impl std::fmt::Debug) {
    println!("The following arguments have been parsed:");
    println!("{args:#?}");
}
