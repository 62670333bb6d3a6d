//! `stockcheck stores` and `stockcheck show`: store lookups.

use serde::Serialize;
use stockcheck_recon::{Code, FrequencyTable};
use stockcheck_store::StoreRecord;

use crate::exit_codes::EXIT_STORE_NOT_FOUND;
use crate::{CliError, Context};

pub fn cmd_stores(ctx: &Context, json: bool) -> Result<(), CliError> {
    let client = ctx.store_client()?;

    let stores = match client.list_stores() {
        Ok(stores) => stores,
        Err(e) => {
            tracing::error!(error = %e, "failed to list stores");
            // Consumers of --json still get a parseable (empty) list.
            if json {
                println!("[]");
            }
            return Err(CliError::store(e));
        }
    };

    if json {
        let out = serde_json::to_string_pretty(&stores)
            .map_err(|e| CliError::new(crate::exit_codes::EXIT_ERROR, format!("JSON serialization error: {e}")))?;
        println!("{out}");
        return Ok(());
    }

    if stores.is_empty() {
        eprintln!("no stores in collection {:?}", client.config().collection);
        return Ok(());
    }

    let width = stores.iter().map(|s| s.id.chars().count()).max().unwrap_or(0).max(2);
    println!("{:<width$}  NAME", "ID", width = width);
    for store in &stores {
        println!("{:<width$}  {}", store.id, store.name, width = width);
    }
    eprintln!("{} store(s)", stores.len());
    Ok(())
}

#[derive(Serialize)]
struct ShowOutput<'a> {
    id: &'a str,
    name: &'a str,
    units: usize,
    distinct_codes: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    update_time: Option<&'a str>,
    codes: &'a [Code],
}

pub fn cmd_show(ctx: &Context, store_id: &str, json: bool) -> Result<(), CliError> {
    let record = fetch_record(ctx, store_id)?;
    let table = FrequencyTable::from_codes(&record.codes);

    if json {
        let out = ShowOutput {
            id: &record.id,
            name: &record.name,
            units: table.units(),
            distinct_codes: table.len(),
            update_time: record.update_time.as_deref(),
            codes: &record.codes,
        };
        let text = serde_json::to_string_pretty(&out)
            .map_err(|e| CliError::new(crate::exit_codes::EXIT_ERROR, format!("JSON serialization error: {e}")))?;
        println!("{text}");
        return Ok(());
    }

    println!("id:             {}", record.id);
    println!("name:           {}", record.name);
    println!("units:          {}", table.units());
    println!("distinct codes: {}", table.len());
    if let Some(ref updated) = record.update_time {
        println!("updated:        {}", updated);
    }
    Ok(())
}

/// Fetch a store record; a missing store is an error with a hint.
pub fn fetch_record(ctx: &Context, store_id: &str) -> Result<StoreRecord, CliError> {
    let client = ctx.store_client()?;
    client
        .fetch_store(store_id)
        .map_err(CliError::store)?
        .ok_or_else(|| {
            CliError::new(EXIT_STORE_NOT_FOUND, format!("store not found: {store_id}"))
                .with_hint("run `stockcheck stores` to list valid store ids")
        })
}
