use std::fmt;

#[derive(Debug)]
pub enum IoError {
    /// File could not be opened or decoded.
    Open { path: String, message: String },
    /// Extension is not a spreadsheet format we read.
    UnsupportedFormat(String),
    /// Workbook has no sheets.
    Empty(String),
    /// Requested sheet does not exist.
    SheetNotFound { name: String, available: Vec<String> },
    /// Sheet exists but could not be read.
    Read { sheet: String, message: String },
    /// Column selector matched nothing.
    UnknownColumn { selector: String, available: Vec<String> },
    /// Result workbook could not be built or saved.
    Write(String),
}

impl fmt::Display for IoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open { path, message } => write!(f, "cannot open {path}: {message}"),
            Self::UnsupportedFormat(ext) => {
                write!(f, "unsupported file format: {ext:?} (expected xlsx, xlsm, xls, xlsb, ods, csv or tsv)")
            }
            Self::Empty(path) => write!(f, "{path} contains no sheets"),
            Self::SheetNotFound { name, available } => {
                write!(f, "sheet {name:?} not found (available: {})", available.join(", "))
            }
            Self::Read { sheet, message } => write!(f, "failed to read sheet '{sheet}': {message}"),
            Self::UnknownColumn { selector, .. } => write!(f, "unknown column: {selector:?}"),
            Self::Write(msg) => write!(f, "cannot write result workbook: {msg}"),
        }
    }
}

impl std::error::Error for IoError {}
