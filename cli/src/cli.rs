use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "coh3",
    about = "Anonymise, export and convert Coherence 3 (.eeg) EEG recordings.",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    #[command(visible_alias = "a", about = "Anonymise every recording in a tree")]
    Anonymise(AnonymiseArgs),

    #[command(
        visible_alias = "d",
        about = "Build a curated dataset from a manifest of patient recordings"
    )]
    Dataset(DatasetArgs),

    #[command(visible_alias = "c", about = "Batch-convert recordings to EDF")]
    Convert(ConvertArgs),

    #[command(visible_alias = "f", about = "Print the identity fields of one recording")]
    Fields(FieldsArgs),
}

/// Confirmation-skip flags shared by the batch commands.
#[derive(Debug, clap::Args)]
pub struct ConfirmArgs {
    /// Start directly without asking for confirmation
    #[arg(short = 'y', long, conflicts_with = "no")]
    pub yes: bool,

    /// Exit directly without asking for confirmation
    #[arg(short = 'n', long)]
    pub no: bool,
}

#[derive(Debug, clap::Args)]
pub struct AnonymiseArgs {
    /// Path to the dataset to anonymise
    pub path: PathBuf,

    /// Destination of the anonymised dataset (recordings are overwritten
    /// in place when omitted)
    #[arg(short = 'd', long = "destination-path")]
    pub destination_path: Option<PathBuf>,

    /// Fill the Name field with the name of each recording's parent folder
    #[arg(long = "parent-folder-as-name")]
    pub parent_folder_as_name: bool,

    /// Suppress the per-file field dump
    #[arg(short = 'q', long)]
    pub quiet: bool,

    #[command(flatten)]
    pub confirm: ConfirmArgs,
}

#[derive(Debug, clap::Args)]
pub struct DatasetArgs {
    /// CSV manifest listing the recordings to export
    pub manifest: PathBuf,

    /// Destination root of the dataset
    pub destination_path: PathBuf,

    /// Fill the Name field with the name of each output's parent folder
    #[arg(long = "parent-folder-as-name")]
    pub parent_folder_as_name: bool,

    /// Copy the recordings without anonymising them
    #[arg(long = "non-anonymised")]
    pub non_anonymised: bool,

    /// Config file holding the data sources (generated next to the
    /// executable when missing)
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub confirm: ConfirmArgs,
}

#[derive(Debug, clap::Args)]
pub struct ConvertArgs {
    /// Path to the dataset to convert from Coherence 3 (.eeg) to EDF
    pub path: PathBuf,

    /// Destination of the converted files (EDFs are written next to their
    /// sources when omitted)
    #[arg(short = 'd', long = "destination-path")]
    pub destination_path: Option<PathBuf>,

    /// Path to the converter executable (overrides the config file)
    #[arg(short = 'e', long = "executable-path")]
    pub executable_path: Option<PathBuf>,

    /// Overwrite existing .EDF files
    #[arg(short = 'o', long)]
    pub overwrite: bool,

    /// Config file holding the converter path (generated next to the
    /// executable when missing)
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub confirm: ConfirmArgs,
}

#[derive(Debug, clap::Args)]
pub struct FieldsArgs {
    /// Path to the recording
    pub file: PathBuf,
}
