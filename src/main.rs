use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

mod api;
mod cancel;
mod cli;
mod command;
mod config;
mod domain;
mod flows;
mod session;
mod storage;
mod stores;

use cli::{Cli, Commands};
use command::AppContext;
use config::Config;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    });

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli).await {
        if e.downcast_ref::<cancel::Cancelled>().is_some() {
            eprintln!("Cancelled.");
            std::process::exit(130);
        }

        eprintln!("❌ {:#}", e);
        if let Some(api_error) = e.downcast_ref::<api::ApiError>() {
            eprintln!("   {}", api_error.user_hint());
        }
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let Some(command) = cli.command else {
        // No command specified, show help
        eprintln!("No command specified. Use --help for usage information.");
        eprintln!("Use 'pantry login <user>' to sign in or 'pantry ingredients add <name>' to start.");
        return Ok(());
    };

    let config = Config::resolve(cli.data_dir, cli.api_url)?;
    let ctx = AppContext::new(config)?;

    match command {
        Commands::Login { user_id } => command::run_login(&ctx, &user_id).await,
        Commands::Logout => command::run_logout(&ctx).await,
        Commands::Status => command::run_status(&ctx).await,
        Commands::Ingredients(cmd) => command::run_ingredients(&ctx, cmd).await,
        Commands::Shopping(cmd) => command::run_shopping(&ctx, cmd).await,
        Commands::Prefs(cmd) => command::run_prefs(&ctx, cmd).await,
        Commands::Recommend => command::run_recommend(&ctx).await,
        Commands::Menus => command::run_menus(&ctx).await,
        Commands::Favorites(cmd) => command::run_favorites(&ctx, cmd).await,
        Commands::History(cmd) => command::run_history(&ctx, cmd).await,
        Commands::Reviews(cmd) => command::run_reviews(&ctx, cmd).await,
    }
}
