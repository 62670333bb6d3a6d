use serde::Serialize;

use crate::frequency::FrequencyTable;
use crate::model::{MissingRecord, SurplusRecord};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReconSummary {
    /// Distinct codes in the union of both tables.
    pub codes_compared: usize,
    pub balanced: usize,
    pub surplus_codes: usize,
    pub missing_codes: usize,
    pub surplus_units: usize,
    pub missing_units: usize,
    pub recorded_units: usize,
    pub uploaded_units: usize,
    /// Uploaded rows (header excluded) with no code in the code column.
    pub skipped_rows: usize,
    /// Recorded entries that were empty.
    pub skipped_recorded: usize,
}

/// Compute summary statistics from the two tables and the classified records.
pub fn compute_summary(
    recorded: &FrequencyTable,
    uploaded: &FrequencyTable,
    codes_compared: usize,
    surplus: &[SurplusRecord],
    missing: &[MissingRecord],
) -> ReconSummary {
    ReconSummary {
        codes_compared,
        balanced: codes_compared - surplus.len() - missing.len(),
        surplus_codes: surplus.len(),
        missing_codes: missing.len(),
        surplus_units: surplus.iter().map(|r| r.surplus).sum(),
        missing_units: missing.iter().map(|r| r.missing).sum(),
        recorded_units: recorded.units(),
        uploaded_units: uploaded.units(),
        skipped_rows: uploaded.skipped(),
        skipped_recorded: recorded.skipped(),
    }
}
