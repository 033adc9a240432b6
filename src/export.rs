use rust_xlsxwriter::{Workbook, Worksheet, XlsxError};
use serde_json::Number;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

use crate::dto::{AircraftRecord, AIRCRAFT_FIELDS};

pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("spreadsheet error: {0}")]
    Xlsx(#[from] XlsxError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Renders the records as a single-sheet workbook. The header row is always written.
pub fn render_workbook(records: &[AircraftRecord]) -> Result<Vec<u8>, ExportError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Aircraft")?;

    for (col, field) in AIRCRAFT_FIELDS.iter().enumerate() {
        worksheet.write_string(0, col as u16, *field)?;
    }

    if records.is_empty() {
        debug!("No data to save to Excel");
    }

    for (index, record) in records.iter().enumerate() {
        write_record(worksheet, index as u32 + 1, record)?;
    }

    Ok(workbook.save_to_buffer()?)
}

/// Renders the workbook and writes it to `path`.
pub async fn save_workbook(path: &Path, records: &[AircraftRecord]) -> Result<(), ExportError> {
    let buffer = render_workbook(records)?;
    tokio::fs::write(path, buffer).await?;
    debug!("Saved Excel file: {}", path.display());
    Ok(())
}

fn write_record(
    worksheet: &mut Worksheet,
    row: u32,
    record: &AircraftRecord,
) -> Result<(), XlsxError> {
    write_text(worksheet, row, 0, record.tail_number.as_deref())?;
    write_text(worksheet, row, 1, record.callsign.as_deref())?;
    write_text(worksheet, row, 2, record.origin_country.as_deref())?;
    write_number(worksheet, row, 3, record.time_position.as_ref())?;
    write_number(worksheet, row, 4, record.last_contact.as_ref())?;
    write_number(worksheet, row, 5, record.longitude.as_ref())?;
    write_number(worksheet, row, 6, record.latitude.as_ref())?;
    write_number(worksheet, row, 7, record.baro_altitude.as_ref())?;
    if let Some(on_ground) = record.on_ground {
        worksheet.write_boolean(row, 8, on_ground)?;
    }
    write_number(worksheet, row, 9, record.velocity.as_ref())?;
    write_number(worksheet, row, 10, record.heading.as_ref())?;
    write_number(worksheet, row, 11, record.vertical_rate.as_ref())?;
    Ok(())
}

fn write_text(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    value: Option<&str>,
) -> Result<(), XlsxError> {
    if let Some(value) = value {
        worksheet.write_string(row, col, value)?;
    }
    Ok(())
}

fn write_number(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    value: Option<&Number>,
) -> Result<(), XlsxError> {
    if let Some(value) = value.and_then(Number::as_f64) {
        worksheet.write_number(row, col, value)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::StateVector;
    use std::io::{Cursor, Read};

    const ZIP_MAGIC: &[u8] = b"PK\x03\x04";

    fn read_part(workbook: &[u8], name: &str) -> String {
        let mut archive = zip::ZipArchive::new(Cursor::new(workbook)).unwrap();
        let mut part = String::new();
        archive
            .by_name(name)
            .unwrap()
            .read_to_string(&mut part)
            .unwrap();
        part
    }

    fn assert_in_order(haystack: &str, needles: &[&str]) {
        let mut from = 0;
        for needle in needles {
            let pos = haystack[from..]
                .find(needle)
                .unwrap_or_else(|| panic!("{} missing or out of order", needle));
            from += pos + needle.len();
        }
    }

    fn header_cells() -> Vec<String> {
        AIRCRAFT_FIELDS
            .iter()
            .map(|field| format!(">{}</t>", field))
            .collect()
    }

    #[test]
    fn empty_export_has_only_the_header_row() {
        let buffer = render_workbook(&[]).unwrap();
        assert!(buffer.starts_with(ZIP_MAGIC));

        let strings = read_part(&buffer, "xl/sharedStrings.xml");
        let headers = header_cells();
        assert_in_order(&strings, &headers.iter().map(String::as_str).collect::<Vec<_>>());

        let sheet = read_part(&buffer, "xl/worksheets/sheet1.xml");
        assert!(sheet.contains("<row r=\"1\""));
        assert!(!sheet.contains("<row r=\"2\""));
    }

    #[test]
    fn exports_one_row_per_record_in_order() {
        let records = vec![
            AircraftRecord::from(&StateVector {
                icao24: Some("896450".into()),
                callsign: Some("ETD45   ".into()),
                origin_country: Some("United Arab Emirates".into()),
                on_ground: Some(true),
                velocity: Some(Number::from(0)),
                ..Default::default()
            }),
            AircraftRecord::from(&StateVector {
                icao24: Some("06a0af".into()),
                origin_country: Some("Qatar".into()),
                baro_altitude: Number::from_f64(10972.8),
                ..Default::default()
            }),
        ];

        let buffer = render_workbook(&records).unwrap();

        let strings = read_part(&buffer, "xl/sharedStrings.xml");
        let mut expected = header_cells();
        expected.extend(
            ["896450", "ETD45   ", "United Arab Emirates", "06a0af", "Qatar"]
                .iter()
                .map(|value| format!(">{}</t>", value)),
        );
        assert_in_order(&strings, &expected.iter().map(String::as_str).collect::<Vec<_>>());

        let sheet = read_part(&buffer, "xl/worksheets/sheet1.xml");
        assert_in_order(&sheet, &["<row r=\"1\"", "<row r=\"2\"", "<row r=\"3\""]);
        assert!(!sheet.contains("<row r=\"4\""));
        assert!(sheet.contains("<v>10972.8</v>"));
    }

    #[tokio::test]
    async fn saves_to_disk() {
        let path = std::env::temp_dir().join(format!("gulfjets-test-{}.xlsx", std::process::id()));

        save_workbook(&path, &[]).await.unwrap();
        let written = tokio::fs::read(&path).await.unwrap();
        tokio::fs::remove_file(&path).await.unwrap();

        assert!(written.starts_with(ZIP_MAGIC));
    }
}
