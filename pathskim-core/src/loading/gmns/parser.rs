use std::fs::File;
use std::path::Path;

use log::warn;

/// Reads every well-formed row of a CSV file; malformed rows are skipped
/// and counted in a warning.
pub fn deserialize_csv_file<T>(path: &Path) -> Result<Vec<T>, std::io::Error>
where
    T: for<'de> serde::Deserialize<'de>,
{
    let file = File::open(path).map_err(|e| {
        std::io::Error::new(
            e.kind(),
            format!("Failed to open file '{}': {}", path.display(), e),
        )
    })?;

    let mut skipped = 0usize;
    let records = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(file)
        .deserialize()
        .filter_map(|record| {
            record
                .map_err(|e| {
                    if skipped == 0 {
                        warn!("Skipping malformed row in '{}': {e}", path.display());
                    }
                    skipped += 1;
                })
                .ok()
        })
        .collect::<Vec<T>>();

    if skipped > 0 {
        warn!("Skipped {skipped} malformed rows in '{}'", path.display());
    }
    Ok(records)
}
