use crate::seo::SeoMetadata;
use crate::SeoError;
use std::io::Write;
use std::path::Path;

/// Writes metadata records as a pretty-printed JSON array; absent fields are `null`
pub fn write_json<W: Write>(records: &[SeoMetadata], mut writer: W) -> Result<(), SeoError> {
    serde_json::to_writer_pretty(&mut writer, records)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

/// Exports metadata records to a JSON file
pub fn export_to_json(records: &[SeoMetadata], path: &Path) -> Result<(), SeoError> {
    let file = std::fs::File::create(path)?;
    write_json(records, std::io::BufWriter::new(file))?;
    tracing::info!("Exported {} records to {}", records.len(), path.display());
    Ok(())
}
