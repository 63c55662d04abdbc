use std::path::PathBuf;

use miette::Diagnostic;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error, Diagnostic)]
pub enum Error {
    #[error("Cannot read header fields of `{}`", .path.display())]
    #[diagnostic(help("Is this a Coherence 3 .eeg recording?"))]
    ReadFields {
        path: PathBuf,
        #[source]
        source: coh3_format::HeaderError,
    },

    #[error("Cannot read manifest `{}`", .path.display())]
    #[diagnostic(help(
        "The manifest is a CSV file with a `Paths` column group followed by a `Files` column group"
    ))]
    Manifest {
        path: PathBuf,
        #[source]
        source: coh3_format::ManifestError,
    },

    #[error("Cannot read config file `{}`", .path.display())]
    ReadConfig {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot parse config file `{}`", .path.display())]
    ParseConfig {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Cannot write config file `{}`", .path.display())]
    WriteConfig {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Generated a default config file at `{}`", .path.display())]
    #[diagnostic(help("Edit it to set the correct paths, then run the command again"))]
    GeneratedConfig { path: PathBuf },

    #[error("No data sources configured in `{}`", .path.display())]
    #[diagnostic(help("Add at least one path to the `data_sources` array"))]
    NoDataSources { path: PathBuf },

    #[error("Converter is not usable")]
    #[diagnostic(help("Check the `path_to_executable` entry of the config file or pass -e"))]
    Converter {
        #[source]
        source: coh3_format::ConvertError,
    },
}
