//! Error types of the converter.
use std::collections::BTreeSet;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Reading an input file or writing an output file failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The RDF input could not be parsed.
    #[error("unable to parse {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error(transparent)]
    Language(#[from] LanguageError),

    /// The output path exists but is not a directory.
    #[error("could not write output, {path} is not a directory")]
    NotADirectory { path: PathBuf },

    #[error("template rendering failed: {0}")]
    Template(#[from] tinytemplate::error::Error),

    #[error("invalid configuration: {0}")]
    Config(#[from] config::ConfigError),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io { path: path.into(), source }
    }
}

/// Raised when the languages encountered in an RDF file differ from the ones the user asked for.
#[derive(Debug, Error)]
#[error("Languages encountered in RDF file differ from specified languages {file}.\n\tSpecified: {specified}\n\tActual:    {actual}")]
pub struct LanguageError {
    pub file: String,
    pub specified: String,
    pub actual: String,
}

impl LanguageError {
    pub fn new(file: &str, specified: &BTreeSet<String>, actual: &BTreeSet<String>) -> Self {
        let join = |set: &BTreeSet<String>| set.iter().map(String::as_str).collect::<Vec<_>>().join(",");
        LanguageError { file: file.to_owned(), specified: join(specified), actual: join(actual) }
    }
}
