use stockcheck_recon::model::{CellValue, Code};
use stockcheck_recon::{reconcile, DEFAULT_CODE_COLUMN};

fn codes(list: &[&str]) -> Vec<Code> {
    list.iter().map(|s| Code::new(*s)).collect()
}

/// Build a count sheet: header row plus one row per code in column C.
fn count_sheet(list: &[&str]) -> Vec<Vec<CellValue>> {
    let mut rows = vec![vec![
        CellValue::Text("loja".into()),
        CellValue::Text("descricao".into()),
        CellValue::Text("codigo".into()),
    ]];
    for code in list {
        rows.push(vec![
            CellValue::Text("-".into()),
            CellValue::Text("-".into()),
            CellValue::Text((*code).into()),
        ]);
    }
    rows
}

// -------------------------------------------------------------------------
// Scenarios
// -------------------------------------------------------------------------

#[test]
fn recorded_aab_against_uploaded_abb() {
    let result = reconcile(&codes(&["A", "A", "B"]), &count_sheet(&["A", "B", "B"]), DEFAULT_CODE_COLUMN);

    assert_eq!(result.surplus.len(), 1);
    let a = &result.surplus[0];
    assert_eq!(a.code.as_str(), "A");
    assert_eq!((a.recorded, a.uploaded, a.surplus), (2, 1, 1));

    assert_eq!(result.missing.len(), 1);
    let b = &result.missing[0];
    assert_eq!(b.code.as_str(), "B");
    assert_eq!((b.recorded, b.uploaded, b.missing), (1, 2, 1));
}

#[test]
fn nothing_recorded_one_uploaded() {
    let result = reconcile(&[], &count_sheet(&["X"]), DEFAULT_CODE_COLUMN);

    assert!(result.surplus.is_empty());
    assert_eq!(result.missing.len(), 1);
    let x = &result.missing[0];
    assert_eq!(x.code.as_str(), "X");
    assert_eq!((x.recorded, x.uploaded, x.missing), (0, 1, 1));
}

#[test]
fn identical_multisets_balance() {
    let list = ["A", "B", "B", "C", "C", "C"];
    let result = reconcile(&codes(&list), &count_sheet(&["C", "B", "C", "A", "C", "B"]), DEFAULT_CODE_COLUMN);

    assert!(result.surplus.is_empty());
    assert!(result.missing.is_empty());
    assert!(result.is_balanced());
    assert_eq!(result.summary.balanced, 3);
}

#[test]
fn empty_recorded_makes_every_upload_missing() {
    let result = reconcile(&[], &count_sheet(&["A", "B", "B"]), DEFAULT_CODE_COLUMN);

    assert!(result.surplus.is_empty());
    assert_eq!(result.missing.len(), 2);
    for r in &result.missing {
        assert_eq!(r.recorded, 0);
        assert_eq!(r.missing, r.uploaded);
    }
}

#[test]
fn header_only_upload_makes_every_record_surplus() {
    let result = reconcile(&codes(&["A", "B", "B"]), &count_sheet(&[]), DEFAULT_CODE_COLUMN);

    assert!(result.missing.is_empty());
    assert_eq!(result.surplus.len(), 2);
    for r in &result.surplus {
        assert_eq!(r.uploaded, 0);
        assert_eq!(r.surplus, r.recorded);
    }
}

#[test]
fn header_is_skipped_even_when_it_looks_like_a_code() {
    let mut rows = count_sheet(&["A"]);
    rows[0][2] = CellValue::Text("A".into());
    let result = reconcile(&codes(&["A"]), &rows, DEFAULT_CODE_COLUMN);
    assert!(result.is_balanced());
}

#[test]
fn empty_code_cells_never_become_codes() {
    let mut rows = count_sheet(&["A", "", "A"]);
    rows.push(vec![CellValue::Text("short row".into())]);
    rows.push(vec![CellValue::Empty, CellValue::Empty, CellValue::Empty]);

    let result = reconcile(&codes(&["A", "A"]), &rows, DEFAULT_CODE_COLUMN);

    assert!(result.is_balanced());
    assert_eq!(result.summary.skipped_rows, 3);
    assert_eq!(result.summary.codes_compared, 1);
}

#[test]
fn numeric_cells_match_recorded_strings() {
    let rows = vec![
        vec![CellValue::Empty, CellValue::Empty, CellValue::Text("codigo".into())],
        vec![CellValue::Empty, CellValue::Empty, CellValue::Number(7891000100103.0)],
        vec![CellValue::Empty, CellValue::Empty, CellValue::Text("7891000100103".into())],
    ];
    let result = reconcile(&codes(&["7891000100103", "7891000100103"]), &rows, DEFAULT_CODE_COLUMN);
    assert!(result.is_balanced());
}

#[test]
fn codes_are_compared_exactly() {
    // No case folding and no trimming.
    let result = reconcile(&codes(&["abc"]), &count_sheet(&["ABC", "abc "]), DEFAULT_CODE_COLUMN);
    assert_eq!(result.surplus.len(), 1);
    assert_eq!(result.missing.len(), 2);
}

#[test]
fn outputs_are_sorted_by_code() {
    let result = reconcile(&codes(&["d", "b"]), &count_sheet(&["c", "a"]), DEFAULT_CODE_COLUMN);
    let surplus: Vec<&str> = result.surplus.iter().map(|r| r.code.as_str()).collect();
    let missing: Vec<&str> = result.missing.iter().map(|r| r.code.as_str()).collect();
    assert_eq!(surplus, vec!["b", "d"]);
    assert_eq!(missing, vec!["a", "c"]);
}

#[test]
fn summary_totals() {
    let result = reconcile(&codes(&["A", "A", "A", "B"]), &count_sheet(&["A", "C", "C"]), DEFAULT_CODE_COLUMN);
    let s = &result.summary;
    assert_eq!(s.codes_compared, 3);
    assert_eq!(s.surplus_codes, 2);
    assert_eq!(s.missing_codes, 1);
    assert_eq!(s.surplus_units, 3);
    assert_eq!(s.missing_units, 2);
    assert_eq!(s.recorded_units, 4);
    assert_eq!(s.uploaded_units, 3);
    assert_eq!(s.balanced, 0);
}

#[test]
fn numeric_zero_and_false_cells_are_skipped() {
    // Recorded text "0" is a real code; uploaded 0 and FALSE carry none.
    let rows = vec![
        vec![CellValue::Empty, CellValue::Empty, CellValue::Text("codigo".into())],
        vec![CellValue::Empty, CellValue::Empty, CellValue::Number(0.0)],
        vec![CellValue::Empty, CellValue::Empty, CellValue::Bool(false)],
    ];
    let result = reconcile(&codes(&["0"]), &rows, DEFAULT_CODE_COLUMN);

    assert!(result.missing.is_empty());
    assert_eq!(result.surplus.len(), 1);
    let zero = &result.surplus[0];
    assert_eq!(zero.code.as_str(), "0");
    assert_eq!((zero.recorded, zero.uploaded, zero.surplus), (1, 0, 1));
    assert_eq!(result.summary.skipped_rows, 2);
}
