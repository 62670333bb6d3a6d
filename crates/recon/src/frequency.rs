use std::collections::BTreeMap;

use crate::model::{CellValue, Code};

/// Occurrence count per code, ordered by code.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: BTreeMap<Code, usize>,
    units: usize,
    skipped: usize,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one occurrence. Empty codes are skipped, never stored as `""`.
    pub fn record(&mut self, code: Code) {
        if code.is_empty() {
            self.skipped += 1;
            return;
        }
        *self.counts.entry(code).or_insert(0) += 1;
        self.units += 1;
    }

    /// Count a recorded code list; each occurrence is one unit.
    pub fn from_codes<'a>(codes: impl IntoIterator<Item = &'a Code>) -> Self {
        let mut table = Self::new();
        for code in codes {
            table.record(code.clone());
        }
        table
    }

    /// Count the code column of an uploaded sheet.
    ///
    /// Row 0 is the header and is skipped whatever it holds. Rows that are
    /// too short to reach `code_column`, or whose cell there is empty, are
    /// skipped and tallied in [`skipped`](Self::skipped).
    pub fn from_rows(rows: &[Vec<CellValue>], code_column: usize) -> Self {
        let mut table = Self::new();
        for row in rows.iter().skip(1) {
            match row.get(code_column).and_then(CellValue::as_code) {
                Some(code) => table.record(code),
                None => table.skipped += 1,
            }
        }
        table
    }

    pub fn count(&self, code: &Code) -> usize {
        self.counts.get(code).copied().unwrap_or(0)
    }

    /// Distinct codes in ascending order.
    pub fn codes(&self) -> impl Iterator<Item = &Code> {
        self.counts.keys()
    }

    /// Number of distinct codes.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Total counted occurrences.
    pub fn units(&self) -> usize {
        self.units
    }

    /// Entries that carried no code.
    pub fn skipped(&self) -> usize {
        self.skipped
    }
}
