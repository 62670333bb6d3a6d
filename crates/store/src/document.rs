//! Firestore document decoding.
//!
//! Documents arrive as `{ "name": ".../documents/<collection>/<id>",
//! "fields": { "<field>": { "<type>Value": ... } } }`.

use serde::Serialize;
use serde_json::Value;
use stockcheck_recon::{CellValue, Code};

/// One entry of the store list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoreSummary {
    pub id: String,
    pub name: String,
}

/// A store's recorded inventory.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoreRecord {
    pub id: String,
    pub name: String,
    /// Recorded codes in document order; each occurrence is one unit.
    pub codes: Vec<Code>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update_time: Option<String>,
}

/// Last path segment of a document resource name.
pub(crate) fn document_id(name: &str) -> String {
    name.rsplit('/').next().unwrap_or(name).to_string()
}

/// Read a scalar field as text. Missing or non-scalar → `None`.
pub(crate) fn text_field(doc: &Value, field: &str) -> Option<String> {
    doc.get("fields")?.get(field).and_then(value_to_code).map(Code::into_string)
}

/// Read the recorded code list.
///
/// Anything other than an `arrayValue` yields an empty list. Elements that
/// are null, empty, or not scalars are skipped.
pub(crate) fn codes_field(doc: &Value, field: &str, id: &str) -> Vec<Code> {
    let Some(value) = doc.get("fields").and_then(|f| f.get(field)) else {
        tracing::warn!(store = id, field, "store record has no code list, treating as empty");
        return Vec::new();
    };
    let Some(array) = value.get("arrayValue") else {
        tracing::warn!(store = id, field, "code list is not an array, treating as empty");
        return Vec::new();
    };

    // An empty Firestore array omits "values" entirely.
    let values = array.get("values").and_then(Value::as_array);
    let Some(values) = values else {
        return Vec::new();
    };

    let codes: Vec<Code> = values.iter().filter_map(value_to_code).collect();
    if codes.len() < values.len() {
        tracing::debug!(
            store = id,
            skipped = values.len() - codes.len(),
            "skipped empty or non-scalar code entries"
        );
    }
    codes
}

/// Decode one typed Firestore value into a code.
///
/// Falsy values (empty text, zero, `false`) carry no code, the same as an
/// uploaded cell holding them.
fn value_to_code(value: &Value) -> Option<Code> {
    if let Some(s) = value.get("stringValue").and_then(Value::as_str) {
        return CellValue::Text(s.to_string()).as_code();
    }
    if let Some(n) = value.get("integerValue") {
        // int64 travels as a JSON string; keep its digits rather than round through f64.
        let digits = match n {
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            _ => return None,
        };
        return match digits.parse::<i64>() {
            Ok(0) => None,
            _ => CellValue::Text(digits).as_code(),
        };
    }
    if let Some(n) = value.get("doubleValue").and_then(Value::as_f64) {
        return CellValue::Number(n).as_code();
    }
    if let Some(b) = value.get("booleanValue").and_then(Value::as_bool) {
        return CellValue::Bool(b).as_code();
    }
    None
}

/// Decode a full document into a store record.
pub(crate) fn parse_record(doc: &Value, name_field: &str, codes_field_name: &str) -> Option<StoreRecord> {
    let id = document_id(doc.get("name")?.as_str()?);
    let name = text_field(doc, name_field).unwrap_or_default();
    let codes = codes_field(doc, codes_field_name, &id);
    let update_time = doc.get("updateTime").and_then(Value::as_str).map(String::from);
    Some(StoreRecord { id, name, codes, update_time })
}

/// Decode a document into a list entry.
pub(crate) fn parse_summary(doc: &Value, name_field: &str) -> Option<StoreSummary> {
    let id = document_id(doc.get("name")?.as_str()?);
    let name = text_field(doc, name_field).unwrap_or_default();
    Some(StoreSummary { id, name })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(fields: Value) -> Value {
        json!({
            "name": "projects/p/databases/(default)/documents/conferencias/loja-01",
            "fields": fields,
            "updateTime": "2026-03-01T12:00:00Z",
        })
    }

    #[test]
    fn id_is_last_segment() {
        assert_eq!(document_id("projects/p/databases/(default)/documents/c/abc"), "abc");
        assert_eq!(document_id("abc"), "abc");
    }

    #[test]
    fn mixed_code_types() {
        let d = doc(json!({
            "loja": { "stringValue": "Centro" },
            "texto": { "arrayValue": { "values": [
                { "stringValue": "A1" },
                { "integerValue": "7891000100103" },
                { "doubleValue": 42.0 },
                { "doubleValue": 1.5 },
                { "nullValue": null },
                { "stringValue": "" },
                { "mapValue": { "fields": {} } },
            ]}}
        }));
        let record = parse_record(&d, "loja", "texto").unwrap();
        assert_eq!(record.id, "loja-01");
        assert_eq!(record.name, "Centro");
        let codes: Vec<&str> = record.codes.iter().map(Code::as_str).collect();
        assert_eq!(codes, vec!["A1", "7891000100103", "42", "1.5"]);
        assert_eq!(record.update_time.as_deref(), Some("2026-03-01T12:00:00Z"));
    }

    #[test]
    fn falsy_values_are_skipped() {
        let d = doc(json!({
            "texto": { "arrayValue": { "values": [
                { "integerValue": "0" },
                { "doubleValue": 0.0 },
                { "booleanValue": false },
                { "booleanValue": true },
                { "stringValue": "0" },
                { "integerValue": "-3" },
            ]}}
        }));
        let record = parse_record(&d, "loja", "texto").unwrap();
        let codes: Vec<&str> = record.codes.iter().map(Code::as_str).collect();
        assert_eq!(codes, vec!["TRUE", "0", "-3"]);
    }

    #[test]
    fn non_array_code_list_is_empty() {
        let d = doc(json!({ "texto": { "stringValue": "A1,A2" } }));
        assert!(parse_record(&d, "loja", "texto").unwrap().codes.is_empty());
    }

    #[test]
    fn missing_code_list_is_empty() {
        let d = doc(json!({ "loja": { "stringValue": "Centro" } }));
        assert!(parse_record(&d, "loja", "texto").unwrap().codes.is_empty());
    }

    #[test]
    fn empty_array_has_no_values_key() {
        let d = doc(json!({ "texto": { "arrayValue": {} } }));
        assert!(parse_record(&d, "loja", "texto").unwrap().codes.is_empty());
    }

    #[test]
    fn missing_name_is_empty() {
        let d = doc(json!({}));
        let summary = parse_summary(&d, "loja").unwrap();
        assert_eq!(summary.id, "loja-01");
        assert_eq!(summary.name, "");
    }

    #[test]
    fn document_without_name_is_rejected() {
        assert!(parse_summary(&json!({ "fields": {} }), "loja").is_none());
    }
}
