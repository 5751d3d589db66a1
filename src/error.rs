//! # Error Handling
//!
//! This module defines the centralized error handling mechanism for the
//! `xml-merge` library. It uses the `thiserror` library to create an `Error`
//! enum that covers every anticipated failure mode of a merge or a restore.
//!
//! ## Key Components
//!
//! - **`Error`**: The main enum that represents all possible errors. Each
//!   variant carries the context needed to produce a one-line diagnostic.
//!
//! - **`Result<T>`**: A type alias for `std::result::Result<T, Error>`.
//!
//! The variants fall into three groups:
//!
//! - Invocation errors, checked eagerly by the CLI: missing parameters and
//!   missing input files.
//! - Directive errors raised while merging: a directive without a condition,
//!   a condition with no matching marker, or no element in the target to
//!   insert under.
//! - Cache errors: the backup could not be written, or there is nothing to
//!   restore.
//!
//! Everything else (parse failures, serialization, I/O) is fatal. The
//! mapping to process exit codes lives in [`Error::exit_code`] so that only
//! the outermost layer decides how the process terminates.

use std::path::PathBuf;

use thiserror::Error;

use crate::exit_codes;

/// Main error type for xml-merge operations
#[derive(Error, Debug)]
pub enum Error {
    /// A required command-line parameter was not supplied.
    #[error("--{name} is required.")]
    MissingParameter { name: String },

    /// A file named on the command line does not exist.
    #[error("{role} file can not be found: {}", path.display())]
    FileNotFound { role: String, path: PathBuf },

    /// A directive element is missing an attribute its kind requires.
    #[error("Directive on <{element}> is missing its '{attribute}' attribute")]
    MissingDirective { element: String, attribute: String },

    /// No descendant of a directive element carries the matching marker.
    #[error("Could not find condition {condition} in child elements of <{element}>")]
    ConditionNotFound { element: String, condition: String },

    /// The target has no element to append the merged element under.
    #[error("No element <{anchor}> in the target to insert <{element}> under")]
    TargetAnchorNotFound { element: String, anchor: String },

    /// The backup copy of a target file could not be created.
    #[error("Caching {} failed: {message}", path.display())]
    CacheWrite { path: PathBuf, message: String },

    /// There is no backup copy to restore from.
    #[error("{} has not been cached", path.display())]
    NoCacheEntry { path: PathBuf },

    /// A document could not be parsed as XML.
    #[error("XML parse error in {source_name}: {message}")]
    XmlParse {
        source_name: String,
        message: String,
    },

    /// A tree manipulation or serialization error from the XML backend.
    #[error("XML error: {message}")]
    Xml { message: String },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Any failure that does not fit a more specific variant, such as a
    /// broken tree invariant during a merge.
    #[error("Unexpected error: {message}")]
    Unexpected { message: String },
}

impl Error {
    /// Process exit code for this error.
    ///
    /// Invocation and cache errors get their own codes; everything else is
    /// reported as a fatal error.
    pub fn exit_code(&self) -> u8 {
        match self {
            Error::MissingParameter { .. } => exit_codes::MISSING_PARAMETER,
            Error::FileNotFound { .. } => exit_codes::FILE_NOT_FOUND,
            Error::CacheWrite { .. } | Error::NoCacheEntry { .. } => exit_codes::CACHE,
            Error::MissingDirective { .. }
            | Error::ConditionNotFound { .. }
            | Error::TargetAnchorNotFound { .. }
            | Error::XmlParse { .. }
            | Error::Xml { .. }
            | Error::Io(_)
            | Error::Unexpected { .. } => exit_codes::FATAL,
        }
    }
}

impl From<xot::Error> for Error {
    fn from(err: xot::Error) -> Self {
        Error::Xml {
            message: err.to_string(),
        }
    }
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
