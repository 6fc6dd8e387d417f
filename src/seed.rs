use std::path::Path;

use tracing::{error, info};

use crate::db::{is_unique_violation, Database};
use crate::models::{Birthday, Error, NewBirthday};

/// Bulk-load birthday records from a comma-delimited file.
///
/// Expects a header row with `first_name,last_name,month,day` and optional
/// `note` / `updated_at` columns. Rows that collide with an existing
/// (first_name, last_name) pair are logged and skipped; any other error
/// aborts the load. Returns the number of rows committed.
pub async fn seed_from_csv(db: &Database, path: &Path) -> Result<usize, Error> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut committed = 0;

    for row in reader.deserialize::<NewBirthday>() {
        let birthday = Birthday::create(row?)?;

        match db.insert_birthday(&birthday).await {
            Ok(_) => committed += 1,
            Err(e) if is_unique_violation(&e) => {
                error!(
                    "Skipping duplicate record for {} {}: {}",
                    birthday.first_name, birthday.last_name, e
                );
            }
            Err(e) => return Err(e.into()),
        }
    }

    info!("Success! Added {} birthdays to the db.", committed);
    Ok(committed)
}
