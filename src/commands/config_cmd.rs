use clap::{Args, Subcommand, ValueEnum};
use std::io::Write;

use tracalorie::{Config, FileStore, ITEMS_KEY};

#[derive(Clone, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Args)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub command: ConfigSubcommand,
}

#[derive(Subcommand)]
pub enum ConfigSubcommand {
    /// Show current configuration values
    Show {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

impl ConfigCommand {
    pub fn run(
        &self,
        config: &Config,
        out: &mut dyn Write,
    ) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            ConfigSubcommand::Show { format } => {
                match format {
                    OutputFormat::Json => {
                        writeln!(out, "{}", serde_json::to_string_pretty(config)?)?;
                    }
                    OutputFormat::Text => {
                        writeln!(out, "Configuration")?;
                        writeln!(out, "=============\n")?;

                        if let Some(path) = &config.config_file {
                            writeln!(out, "Config file: {}", path.display())?;
                        } else {
                            writeln!(
                                out,
                                "Config file: {} (not found)",
                                Config::default_config_path().display()
                            )?;
                        }
                        writeln!(out)?;

                        writeln!(out, "data_dir: {}", config.data_dir.value.display())?;
                        writeln!(out, "  source: {}", config.data_dir.source)?;
                        writeln!(
                            out,
                            "  items file: {}",
                            FileStore::new(&config.data_dir.value)
                                .path(ITEMS_KEY)
                                .display()
                        )?;
                    }
                }
                Ok(())
            }
        }
    }
}
