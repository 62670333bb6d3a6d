//! Result workbook writer: one sheet of surplus items, one of missing items.

use std::path::Path;

use rust_xlsxwriter::{Format, Workbook, Worksheet};
use stockcheck_recon::{Code, Reconciliation};

use crate::error::IoError;

pub const DEFAULT_SURPLUS_SHEET: &str = "Sobrando";
pub const DEFAULT_MISSING_SHEET: &str = "Faltando";

const SURPLUS_HEADERS: [&str; 4] = ["codigo", "quantidade_loja", "quantidade_arquivo", "sobrando"];
const MISSING_HEADERS: [&str; 4] = ["codigo", "quantidade_loja", "quantidade_arquivo", "faltando"];

#[derive(Debug, Clone)]
pub struct WriteOptions {
    pub surplus_sheet: String,
    pub missing_sheet: String,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            surplus_sheet: DEFAULT_SURPLUS_SHEET.to_string(),
            missing_sheet: DEFAULT_MISSING_SHEET.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteStats {
    pub surplus_rows: usize,
    pub missing_rows: usize,
}

/// Build the workbook and save it to `path`.
pub fn write_report(path: &Path, result: &Reconciliation, options: &WriteOptions) -> Result<WriteStats, IoError> {
    let (mut workbook, stats) = build_workbook(result, options)?;
    workbook
        .save(path)
        .map_err(|e| IoError::Write(format!("{}: {}", path.display(), e)))?;
    tracing::debug!(path = %path.display(), ?stats, "wrote result workbook");
    Ok(stats)
}

fn build_workbook(result: &Reconciliation, options: &WriteOptions) -> Result<(Workbook, WriteStats), IoError> {
    if options.surplus_sheet.eq_ignore_ascii_case(&options.missing_sheet) {
        return Err(IoError::Write(format!(
            "surplus and missing sheets must have different names (both {:?})",
            options.surplus_sheet
        )));
    }

    let mut workbook = Workbook::new();

    {
        let worksheet = add_sheet(&mut workbook, &options.surplus_sheet)?;
        let rows = result.surplus.iter().map(|r| (&r.code, r.recorded, r.uploaded, r.surplus));
        fill_sheet(worksheet, &SURPLUS_HEADERS, rows)?;
    }
    {
        let worksheet = add_sheet(&mut workbook, &options.missing_sheet)?;
        let rows = result.missing.iter().map(|r| (&r.code, r.recorded, r.uploaded, r.missing));
        fill_sheet(worksheet, &MISSING_HEADERS, rows)?;
    }

    let stats = WriteStats {
        surplus_rows: result.surplus.len(),
        missing_rows: result.missing.len(),
    };
    Ok((workbook, stats))
}

fn add_sheet<'a>(workbook: &'a mut Workbook, name: &str) -> Result<&'a mut Worksheet, IoError> {
    workbook
        .add_worksheet()
        .set_name(name)
        .map_err(|e| IoError::Write(format!("invalid sheet name {name:?}: {e}")))
}

fn fill_sheet<'a>(
    worksheet: &mut Worksheet,
    headers: &[&str; 4],
    rows: impl Iterator<Item = (&'a Code, usize, usize, usize)>,
) -> Result<(), IoError> {
    let xerr = |e: rust_xlsxwriter::XlsxError| IoError::Write(e.to_string());
    let bold = Format::new().set_bold();

    for (col, header) in headers.iter().enumerate() {
        worksheet
            .write_string_with_format(0, col as u16, *header, &bold)
            .map_err(xerr)?;
    }

    let mut widest_code = headers[0].len();
    for (i, (code, recorded, uploaded, delta)) in rows.enumerate() {
        let row = (i + 1) as u32;
        worksheet.write_string(row, 0, code.as_str()).map_err(xerr)?;
        worksheet.write_number(row, 1, recorded as f64).map_err(xerr)?;
        worksheet.write_number(row, 2, uploaded as f64).map_err(xerr)?;
        worksheet.write_number(row, 3, delta as f64).map_err(xerr)?;
        widest_code = widest_code.max(code.as_str().chars().count());
    }

    worksheet
        .set_column_width(0, (widest_code + 2).min(60) as f64)
        .map_err(xerr)?;
    for col in 1..4u16 {
        worksheet
            .set_column_width(col, (headers[col as usize].len() + 2) as f64)
            .map_err(xerr)?;
    }
    worksheet.set_freeze_panes(1, 0).map_err(xerr)?;

    Ok(())
}
