// stockcheck CLI - reconcile a store's recorded inventory against a count sheet

mod config_cmd;
mod exit_codes;
mod run;
mod stores;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser, Subcommand};
use stockcheck_config::{ConfigError, Settings};
use stockcheck_store::{StoreClient, StoreConfig, StoreError};
use tracing_subscriber::EnvFilter;

use config_cmd::ConfigCommands;
use exit_codes::{store_exit_code, EXIT_CONFIG, EXIT_STORE_AUTH, EXIT_STORE_NOT_CONFIGURED, EXIT_SUCCESS, EXIT_USAGE};

#[derive(Parser)]
#[command(name = "stockcheck")]
#[command(about = "Compare a store's recorded inventory with an uploaded count sheet")]
#[command(version)]
struct Cli {
    /// Config file (default: <config dir>/stockcheck/config.toml)
    #[arg(long, global = true, env = "STOCKCHECK_CONFIG", value_name = "PATH")]
    config: Option<PathBuf>,

    /// Store project id (overrides [store].project_id)
    #[arg(long, global = true, env = "STOCKCHECK_PROJECT", value_name = "ID")]
    project: Option<String>,

    /// Store API key (overrides [store].api_key)
    #[arg(long, global = true, env = "STOCKCHECK_API_KEY", hide_env_values = true, value_name = "KEY")]
    api_key: Option<String>,

    /// Store REST base URL (overrides [store].base_url)
    #[arg(long, global = true, env = "STOCKCHECK_BASE_URL", value_name = "URL", hide = true)]
    base_url: Option<String>,

    /// More log output (-v info, -vv debug)
    #[arg(long, short = 'v', global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Only errors on stderr
    #[arg(long, short = 'q', global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the stores that have recorded inventory
    #[command(after_help = "\
Examples:
  stockcheck stores
  stockcheck stores --json
  STOCKCHECK_PROJECT=my-project stockcheck stores")]
    Stores {
        /// Output JSON array of {id, name}
        #[arg(long)]
        json: bool,
    },

    /// Show one store's recorded inventory
    #[command(after_help = "\
Examples:
  stockcheck show loja-centro
  stockcheck show loja-centro --json")]
    Show {
        /// Store id (see `stockcheck stores`)
        store: String,

        /// Output the full record as JSON, codes included
        #[arg(long)]
        json: bool,
    },

    /// Reconcile a count sheet against a store's recorded inventory
    #[command(after_help = "\
Examples:
  stockcheck run contagem.xlsx --store loja-centro
  stockcheck run contagem.xlsx --store loja-centro -o centro.xlsx --json
  stockcheck run contagem.csv --recorded registrados.json --column codigo
  stockcheck run contagem.xlsx --store loja-centro --fail-on-diff")]
    Run(run::RunArgs),

    /// Inspect configuration
    #[command(subcommand)]
    Config(ConfigCommands),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let result = dispatch(cli);

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

fn dispatch(cli: Cli) -> Result<(), CliError> {
    // Path lookup must work even when the file itself is broken.
    if let Commands::Config(ConfigCommands::Path) = cli.command {
        println!("{}", Context::config_path(&cli).display());
        return Ok(());
    }

    let ctx = Context::load(&cli)?;
    match cli.command {
        Commands::Stores { json } => stores::cmd_stores(&ctx, json),
        Commands::Show { store, json } => stores::cmd_show(&ctx, &store, json),
        Commands::Run(args) => run::cmd_run(&ctx, args),
        Commands::Config(cmd) => config_cmd::cmd_config(&ctx, cmd),
    }
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    };
    let filter = EnvFilter::try_from_env("STOCKCHECK_LOG").unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}

/// Effective settings for one invocation: config file plus flag/env overrides.
pub struct Context {
    pub config_path: PathBuf,
    pub settings: Settings,
}

impl Context {
    fn config_path(cli: &Cli) -> PathBuf {
        cli.config.clone().unwrap_or_else(stockcheck_config::config_path)
    }

    fn load(cli: &Cli) -> Result<Self, CliError> {
        let config_path = Self::config_path(cli);
        let mut settings = Settings::load(&config_path).map_err(CliError::config)?;
        tracing::debug!(path = %config_path.display(), "loaded settings");

        if let Some(ref project) = cli.project {
            settings.store.project_id = Some(project.clone());
        }
        if let Some(ref key) = cli.api_key {
            settings.store.api_key = Some(key.clone());
        }
        if let Some(ref url) = cli.base_url {
            settings.store.base_url = url.clone();
        }

        Ok(Self { config_path, settings })
    }

    pub fn store_config(&self) -> StoreConfig {
        self.settings.store.to_store_config()
    }

    pub fn store_client(&self) -> Result<StoreClient, CliError> {
        StoreClient::new(self.store_config()).map_err(CliError::store)
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn new(code: u8, msg: impl Into<String>) -> Self {
        Self { code, message: msg.into(), hint: None }
    }

    pub fn args(msg: impl Into<String>) -> Self {
        Self::new(EXIT_USAGE, msg)
    }

    pub fn config(err: ConfigError) -> Self {
        Self::new(EXIT_CONFIG, err.to_string())
            .with_hint("fix or remove the file; `stockcheck config path` shows where it is")
    }

    /// Create error from store error with proper exit code.
    pub fn store(err: StoreError) -> Self {
        let code = store_exit_code(&err);
        let hint = match code {
            EXIT_STORE_NOT_CONFIGURED => {
                Some("set --project, STOCKCHECK_PROJECT, or [store].project_id in the config file".to_string())
            }
            EXIT_STORE_AUTH => Some("check the API key and the collection's access rules".to_string()),
            _ => None,
        };
        Self { code, message: err.to_string(), hint }
    }

    pub fn io(err: stockcheck_io::IoError) -> Self {
        Self::new(exit_codes::io_exit_code(&err), err.to_string())
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}
