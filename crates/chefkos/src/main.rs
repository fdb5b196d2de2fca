use anyhow::Result;
use chefkos_common::{logger, AppConfig};
use chefkos_recipe::{IngredientList, RecipeOrchestrator};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Find project root by looking for .git directory
fn find_project_root() -> Option<PathBuf> {
    let mut current_dir = std::env::current_dir().ok()?;

    loop {
        if current_dir.join(".git").exists() {
            return Some(current_dir);
        }

        if !current_dir.pop() {
            break;
        }
    }

    None
}

/// Load .env file from project root
fn load_dotenv_from_project_root() {
    if let Some(root) = find_project_root() {
        let env_path = root.join(".env");
        if env_path.exists() {
            dotenv::from_path(&env_path).ok();
        }
    } else {
        dotenv::dotenv().ok();
    }
}

#[derive(Parser)]
#[command(name = "chefkos")]
#[command(about = "Chef Kos - turn the ingredients you have into a recipe", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Host to bind to
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to
        #[arg(long)]
        port: Option<u16>,
    },

    /// Print one recipe to stdout
    Generate {
        /// Ingredients to cook with
        ingredients: Vec<String>,

        /// Skip provider calls and print the templated recipe
        #[arg(long)]
        offline: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load environment variables from .env at project root before config
    load_dotenv_from_project_root();

    let mut config = AppConfig::from_env()?;

    match cli.command {
        Some(Commands::Serve { host, port }) => {
            if let Some(host) = host {
                config.server_host = host;
            }
            if let Some(port) = port {
                config.server_port = port;
            }
            config.validate()?;

            serve(config).await?;
        }
        Some(Commands::Generate { ingredients, offline }) => {
            logger::setup_console_logging(&config.log_level)?;

            if offline {
                config.providers_enabled = false;
            }

            let orchestrator = RecipeOrchestrator::from_config(&config)?;
            let result = orchestrator.generate(&IngredientList::new(ingredients)).await?;

            tracing::info!("Recipe source: {}", result.source);
            println!("{}", result.text);
        }
        None => {
            serve(config).await?;
        }
    }

    Ok(())
}

async fn serve(config: AppConfig) -> Result<()> {
    logger::setup_logging(&config.log_dir, &config.log_level)?;

    tracing::info!("Chef Kos starting...");
    tracing::info!("Configuration loaded:");
    tracing::info!("  Bind: {}", config.server_bind_address());
    tracing::info!("  Providers: {}", config.providers.len());
    tracing::info!("  Failure mode: {}", config.failure_mode);

    println!("Server listening on http://{}", config.server_bind_address());

    chefkos_server::start_server(config).await?;
    Ok(())
}
