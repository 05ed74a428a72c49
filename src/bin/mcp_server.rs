//! Pokedex MCP Server
//!
//! A Model Context Protocol server using the official Rust SDK (rmcp)
//! that exposes a Pokedex browsing session for LLM interaction.

use std::borrow::Cow;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use pokedex::mcp_interface::*;
use pokedex::{HttpApi, Pokedex, PokedexConfig};
use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{ErrorData as McpError, *},
    schemars, tool, tool_handler, tool_router, ServerHandler, ServiceExt,
};
use serde::Deserialize;
use tokio::io::{stdin, stdout};
use tokio::sync::Mutex;
use tracing::info;

type SharedPokedex = Arc<Mutex<Pokedex<HttpApi>>>;

#[derive(Parser)]
#[command(name = "pokedex-mcp", about = "Pokedex browsing session over MCP (stdio)")]
struct Args {
    /// RON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Preferred language for descriptions and labels (e.g. "es", "en")
    #[arg(short, long)]
    language: Option<String>,
}

#[derive(Clone)]
pub struct PokedexService {
    tool_router: ToolRouter<PokedexService>,
    pokedex: SharedPokedex,
}

// Tool request structures
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct JumpRequest {
    #[schemars(description = "Pokedex number to show (clamped to 1-1025)")]
    pub number: i64,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct StepRequest {
    #[schemars(description = "How far to move: 1 / -1 for next / previous, 10 / -10 to skip ten")]
    pub delta: i64,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct KeyRequest {
    #[schemars(description = "Number pad key: a digit 0-9, 'c' to clear, or 'enter'")]
    pub key: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct FilterRequest {
    #[schemars(description = "Elemental type to browse, e.g. 'water' or 'fire'")]
    pub type_name: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ShowRequest {
    #[schemars(description = "Screen to show: main, species, stats, moves, evolution or all")]
    pub screen: String,
}

fn text(output: String) -> Result<CallToolResult, McpError> {
    Ok(CallToolResult::success(vec![Content::text(output)]))
}

fn invalid_params(message: String) -> McpError {
    McpError {
        code: ErrorCode(-32602),
        message: Cow::from(message),
        data: None,
    }
}

#[tool_router]
impl PokedexService {
    pub fn new(pokedex: Pokedex<HttpApi>) -> Self {
        Self {
            tool_router: Self::tool_router(),
            pokedex: Arc::new(Mutex::new(pokedex)),
        }
    }

    async fn run(&self, command: Command) -> Result<CallToolResult, McpError> {
        let mut pokedex = self.pokedex.lock().await;
        text(execute_command(&mut pokedex, command).await)
    }

    #[tool(description = "Show the Pokemon with the given Pokedex number")]
    async fn jump_to(
        &self,
        Parameters(request): Parameters<JumpRequest>,
    ) -> Result<CallToolResult, McpError> {
        self.run(Command::Go(request.number.to_string())).await
    }

    #[tool(description = "Move through the Pokedex relative to the current Pokemon")]
    async fn step(
        &self,
        Parameters(request): Parameters<StepRequest>,
    ) -> Result<CallToolResult, McpError> {
        self.run(Command::Step(request.delta)).await
    }

    #[tool(description = "Press a key on the Pokedex number pad")]
    async fn press_key(
        &self,
        Parameters(request): Parameters<KeyRequest>,
    ) -> Result<CallToolResult, McpError> {
        let key = request.key.parse().map_err(invalid_params)?;
        self.run(Command::Key(key)).await
    }

    #[tool(description = "Only browse Pokemon of one elemental type")]
    async fn apply_filter(
        &self,
        Parameters(request): Parameters<FilterRequest>,
    ) -> Result<CallToolResult, McpError> {
        self.run(Command::Filter(request.type_name)).await
    }

    #[tool(description = "Stop filtering by type")]
    async fn clear_filter(&self) -> Result<CallToolResult, McpError> {
        self.run(Command::ClearFilter).await
    }

    #[tool(description = "Show a screen of the current Pokemon")]
    async fn show(
        &self,
        Parameters(request): Parameters<ShowRequest>,
    ) -> Result<CallToolResult, McpError> {
        let screen = request.screen.parse().map_err(invalid_params)?;
        self.run(Command::Show(screen)).await
    }

    #[tool(description = "Get the current navigation state: number, filter, number pad")]
    async fn get_state(&self) -> Result<CallToolResult, McpError> {
        self.run(Command::State).await
    }
}

#[tool_handler]
impl ServerHandler for PokedexService {}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // stdout carries the protocol; logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = PokedexConfig::resolve(args.config.as_deref(), args.language.as_deref())?;
    let api = Arc::new(HttpApi::new(&config));
    let service = PokedexService::new(Pokedex::new(api, config));
    let transport = (stdin(), stdout());

    info!("starting MCP server on stdio");
    let server = service.serve(transport).await?;

    let quit_reason = server.waiting().await?;
    info!(?quit_reason, "MCP server exiting");
    Ok(())
}
