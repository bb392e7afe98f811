//! MediaKit CLI - run the media gateway or query it once from the shell

use clap::{Parser, Subcommand, ValueEnum};
use mediakit::{
    ApiResponse, Endpoint, ErrorBody, Gateway, GatewayConfig, GatewayError, MediaRecord,
    MediaRequest, MediaType, Platform, ServerConfig,
};
use serde::Serialize;
use std::io::{self, Write};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::filter::{EnvFilter, LevelFilter};

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum TypeArg {
    Video,
    Audio,
}

/// MediaKit - media metadata gateway
#[derive(Parser, Debug)]
#[command(name = "mediakit")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log output format (filter with RUST_LOG)
    #[arg(long, global = true, default_value = "text")]
    log_format: LogFormat,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP gateway
    Serve {
        /// Bind host (overrides MEDIAKIT_HOST)
        #[arg(long)]
        host: Option<String>,

        /// Bind port (overrides MEDIAKIT_PORT)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Look up one URL and print the JSON envelope
    Fetch {
        /// Source media URL
        url: String,

        /// Endpoint to dispatch to: youtube, tiktok, twitter or universal
        #[arg(long, short, default_value = "universal")]
        platform: Endpoint,

        /// Media type (YouTube only)
        #[arg(long = "type", short)]
        media_type: Option<TypeArg>,

        /// Platform hint for the universal endpoint
        #[arg(long)]
        hint: Option<String>,
    },
    /// Print JSON Schemas for the request body and media record
    Schema,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.log_format);

    match cli.command {
        Commands::Serve { host, port } => {
            if let Err(e) = run_serve(host, port).await {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
        Commands::Fetch {
            url,
            platform,
            media_type,
            hint,
        } => {
            let request = build_request(url, media_type, hint.as_deref());
            run_fetch(platform, request).await;
        }
        Commands::Schema => {
            let schemas = serde_json::json!({
                "request": mediakit::request_schema(),
                "record": mediakit::record_schema(),
            });
            writeln_safe(&to_pretty_json(&schemas));
        }
    }
}

/// Logs go to stderr so `fetch` output stays machine-readable
fn init_tracing(format: LogFormat) {
    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();

    match format {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(env_filter)
            .with_writer(io::stderr)
            .init(),
        LogFormat::Text => tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(io::stderr)
            .init(),
    }
}

async fn run_serve(
    host: Option<String>,
    port: Option<u16>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut server = ServerConfig::from_env()?;
    if let Some(host) = host {
        server.host = host;
    }
    if let Some(port) = port {
        server.port = port;
    }

    let gateway = Gateway::new(GatewayConfig::from_env()?)?;
    info!(
        mode = gateway.config().mode.as_str(),
        upstream = gateway.upstream_enabled(),
        "Starting MediaKit gateway"
    );

    let listener = TcpListener::bind(server.addr()).await?;
    info!(addr = %listener.local_addr()?, "Listening");

    mediakit::server::serve(listener, Arc::new(gateway), shutdown_signal()).await?;
    info!("Shut down");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        // No signal handler available; run until killed
        std::future::pending::<()>().await;
    }
}

fn build_request(url: String, media_type: Option<TypeArg>, hint: Option<&str>) -> MediaRequest {
    let mut request = MediaRequest::new(url);
    if let Some(media_type) = media_type {
        request = request.media_type(match media_type {
            TypeArg::Video => MediaType::Video,
            TypeArg::Audio => MediaType::Audio,
        });
    }
    if let Some(hint) = hint {
        let Ok(platform) = hint.parse::<Platform>();
        request = request.platform(platform);
    }
    request
}

async fn run_fetch(endpoint: Endpoint, request: MediaRequest) {
    let gateway = GatewayConfig::from_env()
        .map_err(|e| e.to_string())
        .and_then(|config| Gateway::new(config).map_err(|e| e.to_string()));
    let gateway = match gateway {
        Ok(gateway) => gateway,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let result = gateway.handle(endpoint, request).await;
    let failed = result.is_err();
    writeln_safe(&format_envelope(result));
    if failed {
        std::process::exit(1);
    }
}

/// Render a gateway result exactly as the HTTP endpoint would
fn format_envelope(result: Result<MediaRecord, GatewayError>) -> String {
    match result {
        Ok(record) => to_pretty_json(&ApiResponse::ok(record)),
        Err(e) => {
            if let GatewayError::Upstream(cause) = &e {
                tracing::error!(error = %cause, "Upstream request failed");
            }
            to_pretty_json(&ErrorBody {
                error: e.public_message(),
            })
        }
    }
}

fn to_pretty_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|e| {
        eprintln!("Error serializing response: {}", e);
        std::process::exit(1);
    })
}

/// Write to stdout, exit silently on broken pipe
fn writeln_safe(s: &str) {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    if let Err(e) = writeln!(handle, "{}", s) {
        if e.kind() == io::ErrorKind::BrokenPipe {
            std::process::exit(0);
        }
        eprintln!("Error writing to stdout: {}", e);
        std::process::exit(1);
    }
}
