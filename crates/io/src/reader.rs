//! Count sheet reader.
//!
//! Excel-family files go through calamine, CSV/TSV through the csv crate.
//! Either way the result is the same grid of [`CellValue`]s, header first.

use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};
use stockcheck_recon::CellValue;

use crate::error::IoError;

#[derive(Debug, Clone, Default)]
pub struct ReadOptions {
    /// Sheet to read. `None` = first sheet.
    pub sheet: Option<String>,
}

/// Rows of one sheet. Row 0 is the header.
#[derive(Debug, Clone)]
pub struct SheetRows {
    pub sheet_name: String,
    pub rows: Vec<Vec<CellValue>>,
}

impl SheetRows {
    /// Header row rendered as text (empty when the sheet is empty).
    pub fn header(&self) -> Vec<String> {
        self.rows
            .first()
            .map(|row| row.iter().map(|c| c.to_string()).collect())
            .unwrap_or_default()
    }

    /// Data rows, header excluded.
    pub fn data_len(&self) -> usize {
        self.rows.len().saturating_sub(1)
    }

    /// Number of columns in the widest row.
    pub fn width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Excel,
    Csv,
    Tsv,
}

fn detect_format(path: &Path) -> Result<Format, IoError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "xlsx" | "xlsm" | "xls" | "xlsb" | "ods" => Ok(Format::Excel),
        "csv" => Ok(Format::Csv),
        "tsv" | "tab" => Ok(Format::Tsv),
        _ => Err(IoError::UnsupportedFormat(ext)),
    }
}

/// Read one sheet of a count file into rows.
pub fn read_rows(path: &Path, options: &ReadOptions) -> Result<SheetRows, IoError> {
    let format = detect_format(path)?;
    let sheet_rows = match format {
        Format::Excel => read_excel(path, options)?,
        Format::Csv | Format::Tsv => {
            // Flat files have exactly one sheet, named after the file.
            let name = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("sheet")
                .to_string();
            if let Some(ref wanted) = options.sheet {
                if *wanted != name {
                    return Err(IoError::SheetNotFound {
                        name: wanted.clone(),
                        available: vec![name],
                    });
                }
            }
            let rows = if format == Format::Csv {
                crate::csv::import(path)?
            } else {
                crate::csv::import_tsv(path)?
            };
            SheetRows { sheet_name: name, rows }
        }
    };

    tracing::debug!(
        path = %path.display(),
        sheet = %sheet_rows.sheet_name,
        rows = sheet_rows.rows.len(),
        "read count sheet"
    );
    Ok(sheet_rows)
}

fn read_excel(path: &Path, options: &ReadOptions) -> Result<SheetRows, IoError> {
    let mut workbook = open_workbook_auto(path).map_err(|e| IoError::Open {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    let sheet_names: Vec<String> = workbook.sheet_names().to_vec();
    if sheet_names.is_empty() {
        return Err(IoError::Empty(path.display().to_string()));
    }

    let sheet_name = match options.sheet {
        Some(ref wanted) => sheet_names
            .iter()
            .find(|n| *n == wanted)
            .cloned()
            .ok_or_else(|| IoError::SheetNotFound {
                name: wanted.clone(),
                available: sheet_names.clone(),
            })?,
        None => sheet_names[0].clone(),
    };

    let range = workbook.worksheet_range(&sheet_name).map_err(|e| IoError::Read {
        sheet: sheet_name.clone(),
        message: e.to_string(),
    })?;

    // Range starts at the first non-empty cell. Pad columns back so that
    // column C stays index 2; rows start at the first non-empty one.
    let (_, start_col) = range.start().unwrap_or((0, 0));
    let pad = start_col as usize;

    let rows = range
        .rows()
        .map(|row| {
            let mut out = Vec::with_capacity(pad + row.len());
            out.resize(pad, CellValue::Empty);
            out.extend(row.iter().map(cell_value));
            out
        })
        .collect();

    Ok(SheetRows { sheet_name, rows })
}

fn cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Float(n) => CellValue::Number(*n),
        Data::Int(n) => CellValue::Number(*n as f64),
        Data::Bool(b) => CellValue::Bool(*b),
        // Dates keep their serial number; nobody labels stock with them.
        Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Error(_) => CellValue::Empty,
    }
}
