//! CLI error type and exit codes.

use staffdb_core::DbError;
use thiserror::Error;

/// Errors surfaced to the user by the CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// A database operation failed.
    #[error(transparent)]
    Db(#[from] DbError),

    /// The JSON listing could not be produced.
    #[error("failed to render JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Returns the process exit status for this error.
    ///
    /// Each database failure kind has its own code so scripts can tell
    /// them apart. Codes start at 10 to stay clear of clap's usage errors.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Db(err) => match err {
                DbError::FileExists { .. } => 10,
                DbError::OpenFailed { .. } => 11,
                DbError::ReadError { .. } => 12,
                DbError::IncompleteRead { .. } => 13,
                DbError::ShortWrite { .. } => 14,
                DbError::SeekError { .. } => 15,
                DbError::BadMagic { .. } => 16,
                DbError::UnsupportedVersion { .. } => 17,
                DbError::CorruptFile { .. } => 18,
                DbError::CountOverflow { .. } => 19,
                DbError::CountMismatch { .. } => 20,
                DbError::MalformedInput { .. } => 21,
                DbError::InvalidHoursValue { .. } => 22,
                DbError::IndexOutOfRange { .. } => 23,
                DbError::AllocationFailed { .. } => 24,
                DbError::DatabaseLocked => 25,
                DbError::Storage(_) => 26,
            },
            Self::Json(_) => 30,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distinct_codes_per_kind() {
        let errors = [
            CliError::Db(DbError::BadMagic {
                expected: 1,
                actual: 2,
            }),
            CliError::Db(DbError::UnsupportedVersion {
                expected: 1,
                version: 2,
            }),
            CliError::Db(DbError::CorruptFile {
                declared: 12,
                actual: 13,
            }),
            CliError::Db(DbError::MalformedInput { fields: 2, empty: 0 }),
            CliError::Db(DbError::invalid_hours("x")),
        ];
        let mut codes: Vec<u8> = errors.iter().map(CliError::exit_code).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), errors.len());
        assert!(codes.iter().all(|&c| c >= 10));
    }

    #[test]
    fn db_errors_display_transparently() {
        let err = CliError::from(DbError::MalformedInput { fields: 2, empty: 0 });
        assert_eq!(
            err.to_string(),
            "malformed input: expected 3 non-empty comma-separated fields, got 2 (0 empty)"
        );
    }
}
