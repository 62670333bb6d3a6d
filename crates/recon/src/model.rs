use std::fmt;

use serde::Serialize;

use crate::summary::ReconSummary;

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// Identifier of one inventory item, held as its canonical text.
///
/// Numbers and strings meet on the same key space: a numeric cell holding
/// `123` and a recorded string `"123"` are the same code. No trimming or
/// case folding is applied.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Code(String);

impl Code {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// Render a numeric value the way a spreadsheet shows it:
    /// integral values without decimals, everything else in shortest form.
    pub fn from_number(n: f64) -> Self {
        if n.fract() == 0.0 && n.abs() < 1e15 {
            Self(format!("{}", n as i64))
        } else {
            Self(format!("{}", n))
        }
    }

    pub fn from_bool(b: bool) -> Self {
        Self(if b { "TRUE" } else { "FALSE" }.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Code {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for Code {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A single decoded spreadsheet cell.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    #[default]
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
}

impl CellValue {
    /// The code carried by this cell, or `None` when the cell holds no code.
    ///
    /// Falsy values carry no code: empty text, zero, NaN and `false`.
    /// Text `"0"` is a code; only the number zero is skipped.
    pub fn as_code(&self) -> Option<Code> {
        match self {
            CellValue::Empty => None,
            CellValue::Text(s) if s.is_empty() => None,
            CellValue::Text(s) => Some(Code::new(s.as_str())),
            CellValue::Number(n) if *n == 0.0 || n.is_nan() => None,
            CellValue::Number(n) => Some(Code::from_number(*n)),
            CellValue::Bool(false) => None,
            CellValue::Bool(true) => Some(Code::from_bool(true)),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Text(s) => f.write_str(s),
            CellValue::Number(n) => write!(f, "{}", Code::from_number(*n)),
            CellValue::Bool(b) => write!(f, "{}", Code::from_bool(*b)),
        }
    }
}

// ---------------------------------------------------------------------------
// Discrepancies
// ---------------------------------------------------------------------------

/// Recorded count exceeds the uploaded count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SurplusRecord {
    pub code: Code,
    pub recorded: usize,
    pub uploaded: usize,
    pub surplus: usize,
}

/// Uploaded count exceeds the recorded count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissingRecord {
    pub code: Code,
    pub recorded: usize,
    pub uploaded: usize,
    pub missing: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Discrepancy {
    Surplus(SurplusRecord),
    Missing(MissingRecord),
}

impl Discrepancy {
    /// Classify one code. Balanced counts produce no record.
    pub fn classify(code: &Code, recorded: usize, uploaded: usize) -> Option<Self> {
        if recorded > uploaded {
            Some(Self::Surplus(SurplusRecord {
                code: code.clone(),
                recorded,
                uploaded,
                surplus: recorded - uploaded,
            }))
        } else if uploaded > recorded {
            Some(Self::Missing(MissingRecord {
                code: code.clone(),
                recorded,
                uploaded,
                missing: uploaded - recorded,
            }))
        } else {
            None
        }
    }
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// Result of one reconciliation run. Both lists are sorted by code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reconciliation {
    pub surplus: Vec<SurplusRecord>,
    pub missing: Vec<MissingRecord>,
    pub summary: ReconSummary,
}

impl Reconciliation {
    /// True when every code balanced.
    pub fn is_balanced(&self) -> bool {
        self.surplus.is_empty() && self.missing.is_empty()
    }
}
