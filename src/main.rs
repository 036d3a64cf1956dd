//! ExpenseDesk main entry point

use clap::Parser;
use expensedesk_api::start_server;
use expensedesk_config::error::ConfigErrorCode;
use expensedesk_config::Config;
use expensedesk_core::provider_from_config;
use std::path::PathBuf;
use tokio::runtime::Runtime;

#[derive(Parser, Debug)]
#[command(name = "expensedesk")]
#[command(author = "ExpenseDesk Contributors")]
#[command(version = "0.1.0")]
#[command(about = "Expense console: dashboard, QR payloads and transaction history", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,

    /// Print the default configuration and exit
    #[arg(long)]
    print_default_config: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.print_default_config {
        print!("{}", Config::generate_default());
        return Ok(());
    }

    let loaded = Config::load(args.config.clone());
    let level = match &loaded {
        Ok(config) => config.logging.level.clone(),
        Err(_) => "info".to_string(),
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let config = match loaded {
        Ok(config) => {
            log::info!("Config loaded from {}", args.config.display());
            config
        }
        Err(e) if e.code() == ConfigErrorCode::FileNotFound => {
            log::warn!("Config file {} not found, using defaults", args.config.display());
            Config::default()
        }
        Err(e) => {
            log::error!("Failed to load configuration:\n{}", e.to_details());
            return Err(e.into());
        }
    };

    match &config.data.transactions_file {
        Some(path) => log::info!("Transactions file: {}", path.display()),
        None => log::info!("No transactions file configured, serving sample data"),
    }
    let provider = provider_from_config(&config.data);

    let rt = Runtime::new()?;
    rt.block_on(start_server(config, provider))
}
