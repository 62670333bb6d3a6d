use serde::Serialize;

use crate::model::{MissingRecord, Reconciliation, SurplusRecord};
use crate::summary::ReconSummary;

/// Machine-readable envelope for one run (`stockcheck run --json`).
#[derive(Debug, Clone, Serialize)]
pub struct ReconReport {
    pub meta: ReconMeta,
    pub summary: ReconSummary,
    pub surplus: Vec<SurplusRecord>,
    pub missing: Vec<MissingRecord>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReconMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_name: Option<String>,
    pub source_file: String,
    pub sheet: String,
    /// Column letter the codes were read from (e.g. `C`).
    pub code_column: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_file: Option<String>,
    pub engine_version: String,
    pub run_at: String,
}

impl ReconMeta {
    pub fn new(source_file: impl Into<String>, sheet: impl Into<String>, code_column: impl Into<String>) -> Self {
        Self {
            store_id: None,
            store_name: None,
            source_file: source_file.into(),
            sheet: sheet.into(),
            code_column: code_column.into(),
            output_file: None,
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            run_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn with_store(mut self, id: impl Into<String>, name: impl Into<String>) -> Self {
        self.store_id = Some(id.into());
        self.store_name = Some(name.into());
        self
    }

    pub fn with_output(mut self, path: impl Into<String>) -> Self {
        self.output_file = Some(path.into());
        self
    }
}

impl ReconReport {
    pub fn new(meta: ReconMeta, result: &Reconciliation) -> Self {
        Self {
            meta,
            summary: result.summary.clone(),
            surplus: result.surplus.clone(),
            missing: result.missing.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::reconcile;
    use crate::model::{CellValue, Code};

    #[test]
    fn report_json_shape() {
        let rows = vec![
            vec![CellValue::Text("codigo".into())],
            vec![CellValue::Text("X".into())],
        ];
        let result = reconcile(&[Code::new("A")], &rows, 0);
        let meta = ReconMeta::new("count.xlsx", "Plan1", "A").with_store("loja-01", "Centro");
        let report = ReconReport::new(meta, &result);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["meta"]["store_id"], "loja-01");
        assert_eq!(json["meta"]["code_column"], "A");
        assert!(json["meta"].get("output_file").is_none());
        assert!(json["meta"]["run_at"].is_string());
        assert_eq!(json["surplus"][0]["code"], "A");
        assert_eq!(json["surplus"][0]["surplus"], 1);
        assert_eq!(json["missing"][0]["code"], "X");
        assert_eq!(json["missing"][0]["recorded"], 0);
        assert_eq!(json["summary"]["codes_compared"], 2);
    }
}
