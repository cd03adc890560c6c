use crate::seo::SeoMetadata;
use crate::SeoError;
use std::io::Write;
use std::path::Path;

const HEADER: [&str; 4] = ["URL", "Title", "Meta Description", "H1 Tags"];

/// Separator used to flatten H1 headings into one cell
const H1_SEPARATOR: &str = "|";

/// Writes metadata records as CSV
///
/// Absent title or description become empty cells; H1 headings are joined
/// with `|`.
pub fn write_csv<W: Write>(records: &[SeoMetadata], writer: W) -> Result<(), SeoError> {
    let mut writer = csv::Writer::from_writer(writer);

    writer.write_record(HEADER)?;

    for metadata in records {
        writer.write_record([
            metadata.url.as_str(),
            metadata.title.as_deref().unwrap_or_default(),
            metadata.meta_description.as_deref().unwrap_or_default(),
            metadata.h1_tags.join(H1_SEPARATOR).as_str(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

/// Exports metadata records to a CSV file
pub fn export_to_csv(records: &[SeoMetadata], path: &Path) -> Result<(), SeoError> {
    let file = std::fs::File::create(path)?;
    write_csv(records, file)?;
    tracing::info!("Exported {} records to {}", records.len(), path.display());
    Ok(())
}
