//! MagicPen command-line client

mod commands;

use anyhow::Context;
use clap::{Parser, Subcommand};
use magicpen_core::{App, Config, DEFAULT_TONE};

#[derive(Parser)]
#[command(name = "magicpen", about = "Generate LinkedIn posts with MagicPen", version)]
struct Cli {
    /// Override the API base URL (also MAGICPEN_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an account
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        /// Read from stdin when omitted
        #[arg(long)]
        password: Option<String>,
    },
    /// Sign in and remember the session
    Login {
        #[arg(long)]
        email: String,
        /// Read from stdin when omitted
        #[arg(long)]
        password: Option<String>,
    },
    /// Forget the stored session
    Logout,
    /// Show the signed-in user
    Me,
    /// Generate a post about a topic
    Generate {
        /// What the post should be about
        prompt: String,
        #[arg(long, default_value = DEFAULT_TONE)]
        tone: String,
    },
    /// List generated posts
    History {
        /// Show every post instead of the most recent ones
        #[arg(long)]
        all: bool,
    },
    /// Print one post
    Show { id: String },
    /// Delete a post
    Delete { id: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    magicpen_core::init_logging();

    let cli = Cli::parse();

    let mut config = Config::from_env().context("loading configuration")?;
    if let Some(url) = cli.api_url {
        config = config.with_api_base_url(url);
    }
    let app = App::new(config).context("starting MagicPen")?;

    match cli.command {
        Commands::Register {
            name,
            email,
            password,
        } => commands::auth::register(&app, name, email, password).await,
        Commands::Login { email, password } => commands::auth::login(&app, email, password).await,
        Commands::Logout => commands::auth::logout(&app),
        Commands::Me => commands::auth::me(&app).await,
        Commands::Generate { prompt, tone } => commands::posts::generate(&app, prompt, tone).await,
        Commands::History { all } => commands::posts::history(&app, all).await,
        Commands::Show { id } => commands::posts::show(&app, &id).await,
        Commands::Delete { id } => commands::posts::delete(&app, &id).await,
    }
}
