// CSV/TSV count sheets

use std::io::Read;
use std::path::Path;

use stockcheck_recon::CellValue;

use crate::error::IoError;

pub fn import(path: &Path) -> Result<Vec<Vec<CellValue>>, IoError> {
    let content = read_file_as_utf8(path)?;
    let delimiter = sniff_delimiter(&content);
    import_from_string(&content, delimiter).map_err(|message| IoError::Open {
        path: path.display().to_string(),
        message,
    })
}

pub fn import_tsv(path: &Path) -> Result<Vec<Vec<CellValue>>, IoError> {
    let content = read_file_as_utf8(path)?;
    import_from_string(&content, b'\t').map_err(|message| IoError::Open {
        path: path.display().to_string(),
        message,
    })
}

/// Guess the field delimiter from the first lines of a count sheet.
///
/// A candidate must split the header into at least two fields. Among those,
/// the one whose lines keep the header's width most often wins, then the
/// wider header, then candidate order. Semicolon comes first because Excel
/// in pt-BR locales exports it, with commas as decimal separators.
fn sniff_delimiter(content: &str) -> u8 {
    const CANDIDATES: [u8; 4] = [b';', b',', b'\t', b'|'];
    const SAMPLE_LINES: usize = 10;

    let sample = content.lines().take(SAMPLE_LINES).collect::<Vec<_>>().join("\n");

    CANDIDATES
        .iter()
        .filter_map(|&delim| {
            let widths = field_widths(&sample, delim);
            let header = *widths.first()?;
            if header < 2 {
                return None;
            }
            let agreeing = widths.iter().filter(|&&w| w == header).count();
            Some((delim, (agreeing, header)))
        })
        // max_by_key keeps the last maximum; reversing keeps the first candidate on ties.
        .rev()
        .max_by_key(|&(_, score)| score)
        .map(|(delim, _)| delim)
        .unwrap_or(b',')
}

/// Field count of each record in `sample` when split on `delimiter`.
fn field_widths(sample: &str, delimiter: u8) -> Vec<usize> {
    csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(sample.as_bytes())
        .records()
        .map(|record| record.map(|r| r.len()).unwrap_or(1))
        .collect()
}

/// Read file and convert to UTF-8 if needed (handles Windows-1252, Latin-1, etc.)
pub fn read_file_as_utf8(path: &Path) -> Result<String, IoError> {
    let open_err = |e: std::io::Error| IoError::Open {
        path: path.display().to_string(),
        message: e.to_string(),
    };
    let mut file = std::fs::File::open(path).map_err(open_err)?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes).map_err(open_err)?;

    match String::from_utf8(bytes) {
        Ok(s) => Ok(s.trim_start_matches('\u{feff}').to_string()),
        Err(e) => {
            // Excel on Windows exports CSV as Windows-1252
            tracing::warn!(path = %path.display(), "file is not UTF-8, decoding as Windows-1252");
            let bytes = e.into_bytes();
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(&bytes);
            Ok(decoded.into_owned())
        }
    }
}

fn import_from_string(content: &str, delimiter: u8) -> Result<Vec<Vec<CellValue>>, String> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| e.to_string())?;
        let row = record
            .iter()
            .map(|field| {
                if field.is_empty() {
                    CellValue::Empty
                } else {
                    CellValue::Text(field.to_string())
                }
            })
            .collect();
        rows.push(row);
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sniffs_semicolons() {
        let content = "loja;descricao;codigo\n01;Caneta;789\n01;Lapis;790\n";
        assert_eq!(sniff_delimiter(content), b';');
    }

    #[test]
    fn decimal_commas_do_not_fool_the_sniffer() {
        let content = "codigo;preco\nA;1,50\nB;2,00\n";
        assert_eq!(sniff_delimiter(content), b';');
    }

    #[test]
    fn ties_prefer_semicolon() {
        assert_eq!(sniff_delimiter("a;b,c\n1;2,3\n"), b';');
    }

    #[test]
    fn sniffs_tabs_and_pipes() {
        assert_eq!(sniff_delimiter("loja\tcodigo\n01\tA\n"), b'\t');
        assert_eq!(sniff_delimiter("loja|codigo\n01|A\n"), b'|');
    }

    #[test]
    fn sniffs_commas_by_default() {
        assert_eq!(sniff_delimiter("codigo\n1\n2\n"), b',');
        assert_eq!(sniff_delimiter(""), b',');
    }

    #[test]
    fn empty_fields_become_empty_cells() {
        let rows = import_from_string("a,b,c\n1,,3\n", b',').unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1][1], CellValue::Empty);
        assert_eq!(rows[1][2], CellValue::Text("3".into()));
    }

    #[test]
    fn ragged_rows_are_kept() {
        let rows = import_from_string("a,b,c\n1\n1,2,3,4\n", b',').unwrap();
        assert_eq!(rows[1].len(), 1);
        assert_eq!(rows[2].len(), 4);
    }

    #[test]
    fn windows_1252_fallback() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("contagem.csv");
        // "Sabão" in Windows-1252
        std::fs::write(&path, b"descricao,codigo\nSab\xe3o,42\n").unwrap();

        let rows = import(&path).unwrap();
        assert_eq!(rows[1][0], CellValue::Text("Sabão".into()));
        assert_eq!(rows[1][1], CellValue::Text("42".into()));
    }

    #[test]
    fn utf8_bom_is_stripped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bom.csv");
        std::fs::write(&path, "\u{feff}codigo,qtd\nA,1\n").unwrap();

        let rows = import(&path).unwrap();
        assert_eq!(rows[0][0], CellValue::Text("codigo".into()));
    }
}
