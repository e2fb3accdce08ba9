//! Append command implementation.

use staffdb_core::{Database, DbResult, ADDRESS_LEN, NAME_LEN};
use tracing::{info, warn};

/// Appends one `"name,address,hours"` employee and rewrites the file.
pub fn run(db: &mut Database, input: &str) -> DbResult<()> {
    let truncation = db.append(input)?;
    if truncation.name {
        warn!("Name longer than {} bytes was truncated", NAME_LEN - 1);
    }
    if truncation.address {
        warn!("Address longer than {} bytes was truncated", ADDRESS_LEN - 1);
    }

    db.persist()?;
    info!("Added employee {}", db.header().count - 1);
    Ok(())
}
