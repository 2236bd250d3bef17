use clap::Parser;
use minimax_switch_lib::cli::{i18n, open_store, Cli, Commands};
use minimax_switch_lib::AppError;
use std::process;

fn main() {
    // 解析命令行参数
    let cli = Cli::parse();

    // 默认只显示错误日志，避免干扰命令输出
    let log_level = if cli.verbose { "debug" } else { "error" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    if let Some(lang) = cli.lang {
        i18n::use_language(lang);
    }

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e.message_for(i18n::is_chinese()));
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), AppError> {
    if let Some(Commands::Completions { shell }) = cli.command {
        minimax_switch_lib::cli::generate_completions(shell);
        return Ok(());
    }

    let store = open_store(cli.config.as_deref())?;
    match cli.command {
        None | Some(Commands::Interactive) => minimax_switch_lib::cli::interactive::run(&store),
        Some(Commands::Tui) => minimax_switch_lib::cli::tui::run(&store),
        Some(Commands::Show) => minimax_switch_lib::cli::commands::endpoint::show(&store),
        Some(Commands::Endpoints) => minimax_switch_lib::cli::commands::endpoint::list(&store),
        Some(Commands::Use { endpoint }) => {
            minimax_switch_lib::cli::commands::endpoint::use_preset(&store, &endpoint)
        }
        Some(Commands::Custom { url }) => {
            minimax_switch_lib::cli::commands::endpoint::use_custom(&store, &url)
        }
        Some(Commands::SetKey { key }) => {
            minimax_switch_lib::cli::commands::endpoint::set_key(&store, &key)
        }
        Some(Commands::Completions { .. }) => Ok(()),
    }
}
