//! MCP Streamable HTTP server — entry point.

use std::sync::Arc;

use clap::{Parser, Subcommand};

use mcp_streamable_http::config::{resolve_allowed_origins, resolve_bind_addr};
use mcp_streamable_http::tools::ToolExecutor;
use mcp_streamable_http::transport;
use mcp_streamable_http::{DocumentSearchExecutor, MessageProcessor, OriginPolicy, ServerState, SessionStore};

#[derive(Parser)]
#[command(
    name = "mcp-streamable-http",
    about = "MCP server speaking the Streamable HTTP transport — JSON-RPC over HTTP with an SSE reply channel",
    version
)]
struct Cli {
    /// Listen address (host:port).
    #[arg(long)]
    addr: Option<String>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server (default).
    Serve {
        /// Listen address (host:port).
        #[arg(long)]
        addr: Option<String>,

        /// Additional allowed Origin values (exact match, repeatable).
        /// Also reads comma-separated MCP_ALLOWED_ORIGINS.
        #[arg(long = "allow-origin")]
        allow_origin: Vec<String>,
    },

    /// Print server capabilities and tools as JSON.
    Info,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command.unwrap_or(Commands::Serve {
        addr: None,
        allow_origin: Vec::new(),
    }) {
        Commands::Serve { addr, allow_origin } => {
            let effective_addr = addr.or(cli.addr);
            let bind_addr = resolve_bind_addr(effective_addr.as_deref());
            let origins = resolve_allowed_origins(allow_origin);

            let sessions = Arc::new(SessionStore::new());
            let executor = Arc::new(DocumentSearchExecutor::new());
            let processor = MessageProcessor::new(sessions, executor);
            let state = Arc::new(ServerState::new(processor, OriginPolicy::new(origins)));

            transport::serve(state, &bind_addr).await?;
        }

        Commands::Info => {
            let capabilities = mcp_streamable_http::types::InitializeResult::default_result();
            let tools = DocumentSearchExecutor::new().definitions();
            let info = serde_json::json!({
                "server": capabilities.server_info,
                "protocol_version": capabilities.protocol_version,
                "capabilities": capabilities.capabilities,
                "tools": tools.iter().map(|t| &t.name).collect::<Vec<_>>(),
                "tool_count": tools.len(),
            });
            println!("{}", serde_json::to_string_pretty(&info)?);
        }
    }

    Ok(())
}
