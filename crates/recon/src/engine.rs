use std::collections::BTreeSet;

use crate::frequency::FrequencyTable;
use crate::model::{CellValue, Code, Discrepancy, Reconciliation};
use crate::summary::compute_summary;

/// Zero-based column holding the item code in a count sheet (column C).
pub const DEFAULT_CODE_COLUMN: usize = 2;

/// Reconcile a store's recorded codes against an uploaded count sheet.
///
/// `rows[0]` is the header and is always skipped. Rows with no value in
/// `code_column` are skipped and reported in the summary. This never fails:
/// absent counts are zero.
pub fn reconcile(recorded: &[Code], rows: &[Vec<CellValue>], code_column: usize) -> Reconciliation {
    let recorded_freq = FrequencyTable::from_codes(recorded);
    let uploaded_freq = FrequencyTable::from_rows(rows, code_column);
    diff(&recorded_freq, &uploaded_freq)
}

/// Diff two frequency tables. Output lists are sorted by code.
pub fn diff(recorded: &FrequencyTable, uploaded: &FrequencyTable) -> Reconciliation {
    let union: BTreeSet<&Code> = recorded.codes().chain(uploaded.codes()).collect();

    let mut surplus = Vec::new();
    let mut missing = Vec::new();

    for code in &union {
        match Discrepancy::classify(code, recorded.count(code), uploaded.count(code)) {
            Some(Discrepancy::Surplus(r)) => surplus.push(r),
            Some(Discrepancy::Missing(r)) => missing.push(r),
            None => {}
        }
    }

    let summary = compute_summary(recorded, uploaded, union.len(), &surplus, &missing);

    Reconciliation { surplus, missing, summary }
}
