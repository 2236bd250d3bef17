use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::{Path, PathBuf};

pub mod commands;
pub mod i18n;
pub mod interactive;
pub mod tui;
pub mod ui;

use crate::error::AppError;
use crate::settings::get_settings;
use crate::store::JsonFileStore;

use i18n::Language;

#[derive(Parser)]
#[command(
    name = "minimax-switch",
    version,
    about = "Pick the MiniMax API base URL and key",
    long_about = "Switch between the MiniMax Anthropic-compatible endpoints or enter a custom base URL, and manage the API key stored alongside it.\n\nRun without arguments to enter interactive mode."
)]
pub struct Cli {
    /// Provider settings file (defaults to ~/.minimax-switch/provider.json)
    #[arg(short, long, global = true, env = "MINIMAX_SWITCH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Interface language
    #[arg(long, global = true, value_enum)]
    pub lang: Option<Language>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the current base URL, mode and API key
    Show,

    /// List preset endpoints
    Endpoints,

    /// Switch to a preset endpoint (by URL or label)
    Use {
        /// Endpoint URL or label, e.g. api.minimaxi.com
        endpoint: String,
    },

    /// Use a custom base URL
    Custom {
        /// Base URL, written as-is
        url: String,
    },

    /// Set the API key
    SetKey {
        /// API key
        key: String,
    },

    /// Enter interactive mode
    #[command(alias = "ui")]
    Interactive,

    /// Open the full-screen form
    Tui,

    /// Generate shell completions
    Completions {
        /// The shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Open the provider settings file, honouring `--config` and the settings override.
pub fn open_store(config: Option<&Path>) -> Result<JsonFileStore, AppError> {
    let path = match config {
        Some(path) => path.to_path_buf(),
        None => get_settings().provider_config_path(),
    };
    JsonFileStore::open(path)
}

/// Generate shell completions
pub fn generate_completions(shell: Shell) {
    use clap::CommandFactory;
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_use_with_global_flags() {
        let cli = Cli::try_parse_from([
            "minimax-switch",
            "use",
            "api.minimaxi.com",
            "--config",
            "/tmp/p.json",
            "--lang",
            "zh",
        ])
        .expect("parse args");
        assert!(matches!(cli.command, Some(Commands::Use { ref endpoint }) if endpoint == "api.minimaxi.com"));
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/p.json")));
        assert_eq!(cli.lang, Some(Language::Chinese));
    }

    #[test]
    fn ui_alias_maps_to_interactive() {
        let cli = Cli::try_parse_from(["minimax-switch", "ui"]).expect("parse args");
        assert!(matches!(cli.command, Some(Commands::Interactive)));
    }
}
