//! `stockcheck-recon`: inventory count reconciliation engine.
//!
//! Pure engine crate: receives a recorded code list and the rows of an
//! uploaded count sheet, returns surplus and missing records.
//! No CLI, IO or network dependencies, and no failure path.

pub mod engine;
pub mod frequency;
pub mod model;
pub mod report;
pub mod summary;

pub use engine::{diff, reconcile, DEFAULT_CODE_COLUMN};
pub use frequency::FrequencyTable;
pub use model::{CellValue, Code, Discrepancy, MissingRecord, Reconciliation, SurplusRecord};
pub use report::{ReconMeta, ReconReport};
pub use summary::ReconSummary;
