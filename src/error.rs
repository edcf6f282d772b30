use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Conditions that abort a whole run.
///
/// Per-item problems (bad codes, failed requests, existing files) are never
/// turned into a `LogoError`; they are tallied in the run's report instead.
#[derive(Debug, Error)]
pub enum LogoError {
    /// The metadata file does not exist.
    #[error("Error: The file '{}' was not found.", path.display())]
    MetadataNotFound { path: PathBuf },

    /// The metadata file exists but could not be read.
    #[error("Error: Could not read '{}': {source}", path.display())]
    MetadataUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The metadata file is not a JSON array of objects.
    #[error("Error: The file '{}' is not a valid JSON file: {source}", path.display())]
    MetadataInvalid {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The Localizer's source directory is missing.
    #[error("Error: Source folder '{}' not found.", path.display())]
    SourceDirNotFound { path: PathBuf },

    /// The output directory could not be created.
    #[error("Error creating directory '{}': {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),

    #[error("Invalid progress template: {0}")]
    Template(#[from] indicatif::style::TemplateError),

    #[error(transparent)]
    Io(#[from] io::Error),
}
