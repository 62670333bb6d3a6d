//! `stockcheck run`: reconcile a count sheet against recorded inventory.

use std::path::{Path, PathBuf};

use clap::{ArgGroup, Args};
use serde_json::Value;
use stockcheck_io::column::{col_to_letter, resolve_column};
use stockcheck_io::{read_rows, write_report, ReadOptions, WriteOptions};
use stockcheck_recon::{reconcile, CellValue, Code, ReconMeta, ReconReport, Reconciliation};

use crate::exit_codes::{EXIT_ERROR, EXIT_RECON_DIFFS, EXIT_USAGE};
use crate::{stores, CliError, Context};

#[derive(Args)]
#[command(group(ArgGroup::new("source").required(true).args(["store", "recorded"])))]
pub struct RunArgs {
    /// Count sheet (.xlsx, .xlsm, .xls, .xlsb, .ods, .csv, .tsv)
    pub file: PathBuf,

    /// Store id whose recorded inventory is the reference
    #[arg(long, value_name = "ID")]
    pub store: Option<String>,

    /// Local JSON file of recorded codes instead of a store lookup
    #[arg(long, value_name = "JSON_FILE")]
    pub recorded: Option<PathBuf>,

    /// Code column: header name, letter (C), or 1-indexed number (3)
    #[arg(long, value_name = "COLUMN")]
    pub column: Option<String>,

    /// Sheet to read (default: first sheet)
    #[arg(long)]
    pub sheet: Option<String>,

    /// Result workbook (default: resultado_conferencia.xlsx)
    #[arg(long, short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Print the full report as JSON on stdout
    #[arg(long)]
    pub json: bool,

    /// Exit 1 when any code is surplus or missing
    #[arg(long)]
    pub fail_on_diff: bool,
}

/// Where the recorded codes came from.
enum Recorded {
    Store { id: String, name: String, codes: Vec<Code> },
    File { codes: Vec<Code> },
}

impl Recorded {
    fn codes(&self) -> &[Code] {
        match self {
            Recorded::Store { codes, .. } | Recorded::File { codes } => codes,
        }
    }

    fn label(&self) -> String {
        match self {
            Recorded::Store { id, name, .. } if name.is_empty() => id.clone(),
            Recorded::Store { name, .. } => name.clone(),
            Recorded::File { .. } => "recorded".to_string(),
        }
    }
}

pub fn cmd_run(ctx: &Context, args: RunArgs) -> Result<(), CliError> {
    if !args.file.is_file() {
        return Err(CliError::args(format!("count sheet not found: {}", args.file.display()))
            .with_hint("pass the path of an .xlsx or .csv file"));
    }

    let recorded = match (&args.store, &args.recorded) {
        (Some(id), _) => {
            let record = stores::fetch_record(ctx, id)?;
            Recorded::Store {
                id: record.id,
                name: record.name,
                codes: record.codes,
            }
        }
        (None, Some(path)) => Recorded::File {
            codes: load_recorded_file(path)?,
        },
        (None, None) => return Err(CliError::args("one of --store or --recorded is required")),
    };

    let sheet = read_rows(&args.file, &ReadOptions { sheet: args.sheet.clone() }).map_err(CliError::io)?;

    let selector = args
        .column
        .clone()
        .unwrap_or_else(|| ctx.settings.sheet.code_column.clone());
    let code_column = resolve_column(&selector, &sheet.header(), sheet.width())
        .map_err(|e| CliError::io(e).with_hint("use a header name, a column letter (C), or a number (3)"))?;

    tracing::info!(
        file = %args.file.display(),
        sheet = %sheet.sheet_name,
        column = %col_to_letter(code_column),
        rows = sheet.data_len(),
        recorded = recorded.codes().len(),
        "reconciling"
    );

    let result = reconcile(recorded.codes(), &sheet.rows, code_column);

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(&ctx.settings.output.file));
    let options = WriteOptions {
        surplus_sheet: ctx.settings.output.surplus_sheet.clone(),
        missing_sheet: ctx.settings.output.missing_sheet.clone(),
    };
    write_report(&output, &result, &options).map_err(CliError::io)?;

    if args.json {
        let mut meta = ReconMeta::new(
            args.file.display().to_string(),
            sheet.sheet_name.clone(),
            col_to_letter(code_column),
        )
        .with_output(output.display().to_string());
        if let Recorded::Store { ref id, ref name, .. } = recorded {
            meta = meta.with_store(id.clone(), name.clone());
        }
        let report = ReconReport::new(meta, &result);
        let json = serde_json::to_string_pretty(&report)
            .map_err(|e| CliError::new(EXIT_ERROR, format!("JSON serialization error: {e}")))?;
        println!("{json}");
    }

    print_summary(&recorded.label(), &result, &output);

    if args.fail_on_diff && !result.is_balanced() {
        return Err(CliError::new(EXIT_RECON_DIFFS, "discrepancies found"));
    }
    Ok(())
}

fn print_summary(label: &str, result: &Reconciliation, output: &Path) {
    let s = &result.summary;
    eprintln!(
        "{}: {} codes compared, {} surplus ({} units), {} missing ({} units) -> {}",
        label,
        s.codes_compared,
        s.surplus_codes,
        s.surplus_units,
        s.missing_codes,
        s.missing_units,
        output.display(),
    );
    if s.skipped_rows > 0 {
        eprintln!("note: {} row(s) with no code were skipped", s.skipped_rows);
    }
    if s.skipped_recorded > 0 {
        eprintln!("note: {} empty recorded code(s) were skipped", s.skipped_recorded);
    }
}

fn load_recorded_file(path: &Path) -> Result<Vec<Code>, CliError> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| CliError::args(format!("cannot read {}: {e}", path.display())))?;
    parse_recorded(&text).map_err(|msg| {
        CliError::new(EXIT_USAGE, format!("{}: {msg}", path.display()))
            .with_hint("expected a JSON array of codes, or the output of `stockcheck show --json`")
    })
}

/// Parse recorded codes: a JSON array, or an object with a `codes` array.
///
/// Scalars follow the sheet cell rules: strings verbatim, numbers
/// canonicalized, and falsy entries (null, `""`, `0`, `false`) carry no code.
fn parse_recorded(text: &str) -> Result<Vec<Code>, String> {
    let json: Value = serde_json::from_str(text).map_err(|e| format!("invalid JSON: {e}"))?;
    let items = match json {
        Value::Array(items) => items,
        Value::Object(map) => match map.get("codes") {
            Some(Value::Array(items)) => items.clone(),
            _ => return Err("object has no \"codes\" array".to_string()),
        },
        _ => return Err("expected an array of codes".to_string()),
    };

    let mut codes = Vec::with_capacity(items.len());
    for (i, item) in items.into_iter().enumerate() {
        let cell = match item {
            Value::Null => CellValue::Empty,
            Value::String(s) => CellValue::Text(s),
            Value::Number(n) => match n.as_f64() {
                Some(f) => CellValue::Number(f),
                None => CellValue::Text(n.to_string()),
            },
            Value::Bool(b) => CellValue::Bool(b),
            other => return Err(format!("item {i} is not a code: {other}")),
        };
        // Entries without a code stay as empty codes so the engine counts them as skipped.
        codes.push(cell.as_code().unwrap_or_else(|| Code::new("")));
    }
    Ok(codes)
}
