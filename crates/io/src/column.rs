//! Column selectors: `C`, `3` or a header name.

use crate::error::IoError;

/// Spreadsheet letters for a 0-based column index: 0 is `A`, 26 is `AA`.
pub fn col_to_letter(col: usize) -> String {
    // Bijective base 26: shift to 1-based so there is no zero digit.
    let mut rest = col + 1;
    let mut digits = Vec::new();
    while rest > 0 {
        rest -= 1;
        digits.push(b'A' + (rest % 26) as u8);
        rest /= 26;
    }
    digits.iter().rev().map(|&b| b as char).collect()
}

/// Convert an Excel column letter to its index (A = 0). `None` if not letters.
pub fn letter_to_col(letters: &str) -> Option<usize> {
    if letters.is_empty() || !letters.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    let mut col: usize = 0;
    for c in letters.to_ascii_uppercase().chars() {
        col = col.checked_mul(26)?.checked_add(c as usize - 'A' as usize + 1)?;
    }
    Some(col - 1)
}

/// Resolve a column selector against a sheet.
///
/// Order: header name (case-insensitive), then column letter, then
/// 1-indexed number. A letter or number must land inside the sheet
/// (`width` is its widest row), so a misspelled header such as `sku` is
/// reported instead of read as column SKU. A sheet with no rows at all
/// accepts any position.
pub fn resolve_column(selector: &str, headers: &[String], width: usize) -> Result<usize, IoError> {
    let selector = selector.trim();
    let selector_lower = selector.to_lowercase();
    if let Some(i) = headers.iter().position(|h| h.trim().to_lowercase() == selector_lower) {
        return Ok(i);
    }

    let as_letters = Some(selector).filter(|s| s.len() <= 3).and_then(letter_to_col);
    let positional =
        as_letters.or_else(|| selector.parse::<usize>().ok().and_then(|n| n.checked_sub(1)));

    match positional {
        Some(idx) if width == 0 || idx < width => Ok(idx),
        _ => Err(IoError::UnknownColumn {
            selector: selector.to_string(),
            available: headers.iter().filter(|h| !h.is_empty()).cloned().collect(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers() -> Vec<String> {
        vec!["Loja".into(), "Descricao".into(), "Codigo".into()]
    }

    #[test]
    fn letters_round_trip() {
        assert_eq!(col_to_letter(0), "A");
        assert_eq!(col_to_letter(2), "C");
        assert_eq!(col_to_letter(25), "Z");
        assert_eq!(col_to_letter(26), "AA");
        assert_eq!(col_to_letter(701), "ZZ");
        assert_eq!(col_to_letter(702), "AAA");
        assert_eq!(letter_to_col("c"), Some(2));
        assert_eq!(letter_to_col("AA"), Some(26));
        assert_eq!(letter_to_col("A1"), None);
        for col in [0, 1, 25, 26, 27, 51, 52, 701, 702, 16383] {
            assert_eq!(letter_to_col(&col_to_letter(col)), Some(col));
        }
    }

    #[test]
    fn header_name_wins() {
        assert_eq!(resolve_column("codigo", &headers(), 3).unwrap(), 2);
        assert_eq!(resolve_column("LOJA", &headers(), 3).unwrap(), 0);
    }

    #[test]
    fn letter_and_number() {
        assert_eq!(resolve_column("C", &headers(), 3).unwrap(), 2);
        assert_eq!(resolve_column("3", &headers(), 3).unwrap(), 2);
        // Data rows wider than the header still count.
        assert_eq!(resolve_column("E", &headers(), 5).unwrap(), 4);
    }

    #[test]
    fn position_past_the_sheet_is_rejected() {
        // "sku" parses as column SKU; it must not silently read an empty column.
        for selector in ["sku", "F", "D", "9"] {
            match resolve_column(selector, &headers(), 3) {
                Err(IoError::UnknownColumn { selector: s, available }) => {
                    assert_eq!(s, selector);
                    assert_eq!(available.len(), 3);
                }
                other => panic!("{selector}: expected UnknownColumn, got {other:?}"),
            }
        }
    }

    #[test]
    fn empty_sheet_accepts_any_position() {
        assert_eq!(resolve_column("C", &[], 0).unwrap(), 2);
    }

    #[test]
    fn unknown_selector() {
        let err = resolve_column("preco unitario", &headers(), 3).unwrap_err();
        match err {
            IoError::UnknownColumn { selector, available } => {
                assert_eq!(selector, "preco unitario");
                assert_eq!(available.len(), 3);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(resolve_column("0", &headers(), 3).is_err());
    }
}
