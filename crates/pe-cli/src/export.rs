//! CSV export of the derived rows

use pe_model::ColumnDefinition;
use pe_query::DisplayResult;
use std::io::Write;

/// Write `id` plus the given columns for every shown record
///
/// Rows follow display order, buckets flattened. Values are written raw
/// (no currency or percent styling); absent values are empty cells.
pub fn write_csv<W: Write>(
    out: W,
    result: &DisplayResult<'_>,
    columns: &[&ColumnDefinition],
) -> csv::Result<usize> {
    let mut writer = csv::Writer::from_writer(out);

    let header = std::iter::once("id").chain(columns.iter().map(|c| c.key().as_str()));
    writer.write_record(header)?;

    let records = result.records();
    for record in &records {
        let row = std::iter::once(record.id().to_string()).chain(columns.iter().map(|c| {
            record
                .field(c.key().as_str())
                .map(pe_model::FieldValue::to_display_string)
                .unwrap_or_default()
        }));
        writer.write_record(row)?;
    }

    writer.flush()?;
    tracing::debug!(rows = records.len(), "wrote csv");
    Ok(records.len())
}
