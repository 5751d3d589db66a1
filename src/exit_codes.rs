//! Process exit codes returned by the `xml-merge` binary.
//!
//! - `0`: success
//! - `1`: a required parameter is missing
//! - `2`: a referenced file could not be found
//! - `3`: an unexpected or fatal error (parse failures, directive errors, I/O)
//! - `4`: caching failed during `merge`, or there is no cache entry to
//!   `restore`

/// The command completed.
pub const SUCCESS: u8 = 0;

/// A required command-line parameter was not supplied.
pub const MISSING_PARAMETER: u8 = 1;

/// A file named on the command line does not exist.
pub const FILE_NOT_FOUND: u8 = 2;

/// Any other failure.
pub const FATAL: u8 = 3;

/// The backup cache could not be written, or holds nothing to restore.
pub const CACHE: u8 = 4;
