//! Config subcommand handlers.

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::output;

pub fn handle(args: &ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Path => {
            println!("{}", sonarsync_config::config_path().display());
            Ok(())
        }

        ConfigCommand::Show => {
            let cfg = sonarsync_config::load_config()?;
            let rendered = match global.output {
                // The file's own format reads better than a flattened table.
                OutputFormat::Table => cfg.to_toml()?,
                format => output::render_single(format, &cfg.redacted())?,
            };
            output::print_output(&rendered);
            Ok(())
        }
    }
}
