//! `stockcheck config`: where the config lives and what is in effect.

use clap::Subcommand;

use crate::exit_codes::EXIT_CONFIG;
use crate::{CliError, Context};

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the config file path
    Path,

    /// Print the effective settings (file + overrides), API key redacted
    #[command(after_help = "\
Examples:
  stockcheck config show
  STOCKCHECK_PROJECT=other stockcheck config show")]
    Show,
}

pub fn cmd_config(ctx: &Context, cmd: ConfigCommands) -> Result<(), CliError> {
    match cmd {
        ConfigCommands::Path => {
            println!("{}", ctx.config_path.display());
            Ok(())
        }
        ConfigCommands::Show => {
            let rendered = ctx
                .settings
                .to_redacted_toml()
                .map_err(|e| CliError::new(EXIT_CONFIG, format!("cannot render settings: {e}")))?;
            if !ctx.config_path.exists() {
                eprintln!("# {} not found, showing defaults", ctx.config_path.display());
            }
            print!("{rendered}");
            Ok(())
        }
    }
}
