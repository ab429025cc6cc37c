//! Tabular input and output.
//!
//! Input is a CSV table with a header row containing an `ORCID` column;
//! other columns are ignored. Output is a CSV table with one record per
//! [`OutputRow`] under the [`OUTPUT_COLUMNS`] header.

mod error;

pub use error::TableError;

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use serde::Serialize;
use tracing::debug;

use crate::enrich::{IdentifierColumn, OutputRow};

/// Header of the input column holding identifiers.
pub const IDENTIFIER_COLUMN: &str = "ORCID";

/// Output header, in column order.
pub const OUTPUT_COLUMNS: [&str; 8] = [
    "titulo",
    "tipo",
    "ano",
    "doi",
    "orcid",
    "given_name",
    "family_name",
    "country",
];

/// Default output file name.
pub const DEFAULT_OUTPUT_FILE: &str = "autores_enriquecidos_orcid.csv";

const UTF8_BOM: char = '\u{feff}';

/// Reads the identifier column from the CSV file at `path`.
///
/// # Errors
///
/// Returns [`TableError::Io`] if the file cannot be opened,
/// [`TableError::MissingColumn`] if no header is named `ORCID`, and
/// [`TableError::Csv`] for malformed CSV.
pub fn read_identifiers(path: &Path) -> Result<IdentifierColumn, TableError> {
    let file = File::open(path).map_err(|e| TableError::io(path, e))?;
    let column = read_identifiers_from_reader(BufReader::new(file))?;
    debug!(
        path = %path.display(),
        cells = column.total(),
        present = column.present(),
        "Read identifier column"
    );
    Ok(column)
}

/// Reads the identifier column from any CSV source.
///
/// Rows too short to reach the column yield blank cells.
///
/// # Errors
///
/// See [`read_identifiers`].
pub fn read_identifiers_from_reader<R: Read>(reader: R) -> Result<IdentifierColumn, TableError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = csv_reader
        .headers()?
        .iter()
        .map(|header| header.trim_start_matches(UTF8_BOM).to_string())
        .collect();

    let Some(index) = headers.iter().position(|header| header == IDENTIFIER_COLUMN) else {
        return Err(TableError::missing_column(IDENTIFIER_COLUMN, &headers));
    };

    let mut cells = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        cells.push(record.get(index).map(str::to_string));
    }

    Ok(IdentifierColumn::from_cells(cells))
}

/// Borrowed view of an [`OutputRow`] in output column order.
#[derive(Serialize)]
struct CsvRow<'a> {
    titulo: Option<&'a str>,
    tipo: Option<&'a str>,
    ano: Option<&'a str>,
    doi: Option<&'a str>,
    orcid: &'a str,
    given_name: Option<&'a str>,
    family_name: Option<&'a str>,
    country: Option<&'a str>,
}

impl<'a> From<&'a OutputRow> for CsvRow<'a> {
    fn from(row: &'a OutputRow) -> Self {
        Self {
            titulo: row.title.as_deref(),
            tipo: row.work_type.as_deref(),
            ano: row.year.as_deref(),
            doi: row.doi.as_deref(),
            orcid: &row.orcid,
            given_name: row.given_name.as_deref(),
            family_name: row.family_name.as_deref(),
            country: row.country.as_deref(),
        }
    }
}

/// Writes `rows` as CSV to the file at `path`, replacing it.
///
/// # Errors
///
/// Returns [`TableError::Io`] if the file cannot be created and
/// [`TableError::Csv`] if writing fails.
pub fn write_rows(path: &Path, rows: &[OutputRow]) -> Result<(), TableError> {
    let file = File::create(path).map_err(|e| TableError::io(path, e))?;
    write_rows_to_writer(BufWriter::new(file), rows)?;
    debug!(path = %path.display(), rows = rows.len(), "Wrote output table");
    Ok(())
}

/// Writes `rows` as CSV to any sink. The header is written even for zero rows.
///
/// # Errors
///
/// Returns [`TableError::Csv`] if encoding or flushing fails.
pub fn write_rows_to_writer<W: Write>(writer: W, rows: &[OutputRow]) -> Result<(), TableError> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    csv_writer.write_record(OUTPUT_COLUMNS)?;
    for row in rows {
        csv_writer.serialize(CsvRow::from(row))?;
    }
    csv_writer.flush().map_err(csv::Error::from)?;
    Ok(())
}
