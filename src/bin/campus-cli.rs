use clap::{Parser, Subcommand};
use serde_json::{json, Value};
use std::path::PathBuf;

use campus_client::config::loader::load_config;
use campus_client::observability::logging::init_logging;
use campus_client::{ApiClient, ClientConfig};

#[derive(Parser)]
#[command(name = "campus-cli")]
#[command(about = "Command-line client for the campus portal API", long_about = None)]
struct Cli {
    /// Optional TOML config file; flags below override nothing in it.
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[arg(short, long, default_value = "http://localhost:8000")]
    url: String,

    /// Bearer token for this invocation.
    #[arg(short, long)]
    token: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch a resource
    Get { path: String },
    /// Send a JSON body
    Post { path: String, body: String },
    /// Send a contact-form message
    Contact { subject: String, message: String },
    /// Drop the stored session
    Logout,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => {
            let mut config = ClientConfig::default();
            config.api.base_url = cli.url.clone();
            config
        }
    };
    init_logging(&config.observability.log_level);

    let client = ApiClient::new(&config)?;
    if let Some(token) = &cli.token {
        client.session().set_token(token.clone());
    }

    match cli.command {
        Commands::Get { path } => {
            let res = client.get(&path).await?;
            print_response(res).await?;
        }
        Commands::Post { path, body } => {
            let body: Value = serde_json::from_str(&body)?;
            let res = client.post(&path, &body).await?;
            print_response(res).await?;
        }
        Commands::Contact { subject, message } => {
            let body = json!({ "subject": subject, "message": message });
            let res = client.post("/api/contact", &body).await?;
            print_response(res).await?;
        }
        Commands::Logout => {
            client.session().clear();
            println!("Session cleared");
        }
    }

    Ok(())
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: API returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
