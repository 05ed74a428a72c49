use clap::Parser;
use pokedex::mcp_interface::{execute_command, help_text, parse_command, Command};
use pokedex::{HttpApi, Pokedex, PokedexConfig};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

#[derive(Parser)]
#[command(name = "pokedex", about = "Browse the Pokedex from the terminal")]
struct Args {
    /// RON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number to show first
    #[arg(short, long, default_value_t = 1)]
    start: i64,

    /// Preferred language for descriptions and labels (e.g. "es", "en")
    #[arg(short, long)]
    language: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = PokedexConfig::resolve(args.config.as_deref(), args.language.as_deref())?;
    info!(base_url = %config.api_base_url, language = %config.languages.primary, "starting");

    let api = Arc::new(HttpApi::new(&config));
    let mut pokedex = Pokedex::new(api, config);

    println!("{}", help_text());
    println!();
    println!("{}", execute_command(&mut pokedex, Command::Go(args.start.to_string())).await);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("\n> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        match parse_command(&line) {
            Ok(Command::Quit) => break,
            Ok(command) => println!("{}", execute_command(&mut pokedex, command).await),
            Err(message) if message.is_empty() => {}
            Err(message) => println!("{}", message),
        }
    }

    Ok(())
}
