//! CSV report writing.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::domain::DailyRecord;

/// Column order of the generated report.
const HEADER: [&str; 8] = [
    "Date",
    "Open",
    "High",
    "Low",
    "Close",
    "Volume",
    "News Title",
    "News Summary",
];

/// Write records to a CSV file at `path`, creating or truncating it.
/// Rows are written in the order given; the caller decides the sort.
/// The parent directory must already exist.
pub fn write_report(records: &[DailyRecord], path: &Path) -> Result<(), std::io::Error> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "{}", HEADER.join(","))?;

    for record in records {
        let fields = [
            record.iso_date(),
            record.open.clone(),
            record.high.clone(),
            record.low.clone(),
            record.close.clone(),
            record.volume.clone(),
            record.news_title.clone().unwrap_or_default(),
            record.news_summary.clone().unwrap_or_default(),
        ];
        let row: Vec<String> = fields.iter().map(|field| csv_field(field)).collect();
        writeln!(writer, "{}", row.join(","))?;
    }

    writer.flush()?;
    Ok(())
}

/// Quote a field when it contains the delimiter, a quote, or a line
/// break; embedded quotes are doubled.
fn csv_field(field: &str) -> String {
    let needs_quoting = field.contains(',')
        || field.contains('"')
        || field.contains('\n')
        || field.contains('\r');
    if needs_quoting {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_owned()
    }
}
