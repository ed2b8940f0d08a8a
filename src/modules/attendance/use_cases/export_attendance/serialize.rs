use crate::modules::attendance::use_cases::export_attendance::errors::ExportError;
use crate::modules::attendance::use_cases::export_attendance::rows::ExportRow;
use csv::{QuoteStyle, Terminator, WriterBuilder};

/// Header line as-is, then every data field wrapped in double quotes. Lines end
/// in `\n`; output is UTF-8. Embedded quotes are doubled, so a field holding
/// `"` survives a spreadsheet import.
pub fn serialize(headers: &[&str], rows: &[ExportRow]) -> Result<String, ExportError> {
    let mut header_writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Necessary)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    header_writer.write_record(headers)?;
    let buffer = header_writer
        .into_inner()
        .map_err(|e| ExportError::Buffer(e.to_string()))?;

    let mut row_writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(buffer);
    for row in rows {
        row_writer.write_record(row.cells())?;
    }
    let buffer = row_writer
        .into_inner()
        .map_err(|e| ExportError::Buffer(e.to_string()))?;

    Ok(String::from_utf8(buffer)?)
}
