use agentry::core::MessageType;
use agentry::runtime::SIMPLE_AI_AGENT_NAME;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod app;
mod commands;
mod error;

use app::{App, load_config};
use commands::{SendArgs, list_agents, list_tools, parse_kind, run_tool, send};
use error::CliError;

#[derive(Parser, Debug)]
#[command(name = "agentry", version)]
#[command(about = "Agentry CLI - talk to registered agents and run tools")]
struct Cli {
    /// TOML configuration file; environment variables are used when absent
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List registered agents with availability statistics
    Agents,
    /// Send a message to an agent
    Send {
        /// Agent id or exact agent name
        #[arg(long, default_value = SIMPLE_AI_AGENT_NAME)]
        agent: String,
        /// Message type (text, query, command, ...)
        #[arg(long, default_value = "text", value_parser = parse_kind)]
        kind: MessageType,
        /// Sender recorded on the message
        #[arg(long = "from", default_value = "cli")]
        from: String,
        /// Session id placed in the execution context
        #[arg(long)]
        session: Option<String>,
        /// Message content
        content: String,
    },
    /// List available tools
    Tools,
    /// Invoke a tool
    Tool {
        /// Tool name
        name: String,
        /// Tool parameter as key=value; repeatable
        #[arg(short = 'p', long = "param")]
        params: Vec<String>,
    },
}

fn init_tracing(json: bool) {
    let env_filter = tracing_subscriber::EnvFilter::from_default_env();
    let env_filter = match "info".parse() {
        Ok(directive) => env_filter.add_directive(directive),
        Err(_) => env_filter,
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr);
    let _ = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
}

async fn run(cli: Cli) -> Result<serde_json::Value, CliError> {
    let config = load_config(cli.config.as_deref())?;
    let app = App::bootstrap(config).await?;

    let output = match &cli.command {
        Commands::Agents => list_agents(&app),
        Commands::Send {
            agent,
            kind,
            from,
            session,
            content,
        } => {
            send(
                &app,
                SendArgs {
                    agent,
                    kind: *kind,
                    from,
                    session: session.as_deref(),
                    content,
                },
            )
            .await
        }
        Commands::Tools => list_tools(&app),
        Commands::Tool { name, params } => run_tool(&app, name, params).await,
    };

    app.shutdown().await;
    output
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.json_logs);

    match run(cli).await {
        Ok(output) => match serde_json::to_string_pretty(&output) {
            Ok(text) => println!("{text}"),
            Err(e) => {
                tracing::error!(error = %e, "Failed to render output");
                std::process::exit(1);
            }
        },
        Err(e) => {
            tracing::error!(error = %e, code = e.error_code(), "Command failed");
            std::process::exit(1);
        }
    }
}
