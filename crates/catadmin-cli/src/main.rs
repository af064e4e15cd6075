use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod bootstrap;
mod commands;

use bootstrap::{AppContext, BootstrapOptions};
use commands::{
    AttributeAction, AuthAction, CategoryAction, CategoryAttributeAction, UserAction,
};

#[derive(Parser)]
#[command(name = "catadmin")]
#[command(about = "catadmin - admin console for a hierarchical product catalogue", long_about = None)]
struct Cli {
    /// Path to config.toml (default: ~/.config/catadmin/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Backend base URL, overriding config and CATADMIN_API_URL
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Keep the session in memory only
    #[arg(long, global = true)]
    ephemeral: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Auth(AuthAction),
    /// Manage categories
    Categories {
        #[command(subcommand)]
        action: CategoryAction,
    },
    /// Manage users
    Users {
        #[command(subcommand)]
        action: UserAction,
    },
    /// Manage attributes and their values
    Attributes {
        #[command(subcommand)]
        action: AttributeAction,
    },
    /// Attach attributes to categories
    CategoryAttributes {
        #[command(subcommand)]
        action: CategoryAttributeAction,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let options = BootstrapOptions {
        config: cli.config,
        api_url: cli.api_url,
        ephemeral: cli.ephemeral,
    };
    let ctx = AppContext::bootstrap(&options)?;

    match cli.command {
        Commands::Auth(action) => commands::auth::run(&ctx, action).await?,
        Commands::Categories { action } => commands::categories::run(&ctx, action).await?,
        Commands::Users { action } => commands::users::run(&ctx, action).await?,
        Commands::Attributes { action } => commands::attributes::run(&ctx, action).await?,
        Commands::CategoryAttributes { action } => {
            commands::category_attributes::run(&ctx, action).await?
        }
    }

    Ok(())
}
