//! Create-or-open step shared by every invocation.

use staffdb_core::{Config, Database, DbResult};
use std::path::Path;
use tracing::info;

/// Creates a new database at `path` when `new` is set, otherwise opens
/// and validates the existing one.
pub fn run(path: &Path, new: bool, config: Config) -> DbResult<Database> {
    let db = if new {
        Database::create(path, config)?
    } else {
        Database::open(path, config)?
    };

    info!(
        "{} database {:?} with {} employee(s)",
        if new { "Created" } else { "Opened" },
        path,
        db.header().count
    );
    Ok(db)
}
