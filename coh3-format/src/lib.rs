//! Support library for Coherence 3 (`.eeg`) EEG recordings.
//!
//! The first [`HEADER_SIZE`] bytes of a recording hold patient identity
//! metadata at fixed byte offsets. Use [`read_header`] to load that region,
//! [`write_field`] to patch a single field, and [`anonymise`] to rewrite a
//! recording with replacement identity fields through the crash-safe
//! copy-then-rename protocol.
//!
//! The batch drivers live on top of that core: [`anonymise_tree`] walks a
//! dataset and anonymises every recording, [`find_files`] matches recording
//! basenames against an ordered list of sources, [`read_manifest`] parses
//! the dataset manifest, and [`Converter`] drives the external EDF
//! converter executable.

mod anonymise;
mod batch;
mod convert;
mod edit;
mod error;
mod fs;
mod header;
mod manifest;
mod matcher;
mod reader;

pub use anonymise::{anonymise, FieldEdits};
pub use batch::{anonymise_tree, is_recording, BatchEvent, BatchOptions, BatchStats};
pub use convert::{edf_destination, Converter, DEFAULT_ATTEMPTS};
pub use edit::{write_field, DEFAULT_FILLER};
pub use error::{AnonymiseError, ConvertError, HeaderError, ManifestError};
pub use fs::{list_files, list_sources};
pub use header::{Field, RecordingHeader, HEADER_SIZE};
pub use manifest::{read_manifest, PatientRecord};
pub use matcher::find_files;
pub use reader::{read_fields, read_header, FieldReport};
