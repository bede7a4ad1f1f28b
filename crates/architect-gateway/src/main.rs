//! Architect Gateway — serves the n8n architect directives over HTTP

use architect_core::{BindMode, DirectiveGenerator, GatewayConfig, LogConfig};
use architect_gateway::{start_gateway, ServeOptions};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(
    name = "architect",
    about = "pump.fun n8n Automation Architect — directive gateway"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the web gateway serving the directive endpoint and demo widget
    Serve {
        #[arg(short, long, default_value = "8000")]
        port: u16,
        #[arg(short, long, default_value = "lan")]
        bind: String,
        /// Directory served read-only at the root path (default: current directory)
        #[arg(short, long)]
        static_dir: Option<PathBuf>,
        /// Also append log lines to this file
        #[arg(long)]
        log_file: Option<PathBuf>,
        /// Log level filter when RUST_LOG is unset
        #[arg(long, default_value = "info")]
        log_level: String,
    },
    /// Print the directive text to stdout
    Print,
    /// Show version
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Serve {
            port,
            bind,
            static_dir,
            log_file,
            log_level,
        }) => serve(port, bind, static_dir, log_file, log_level).await?,

        Some(Commands::Print) => {
            let generator = DirectiveGenerator::default();
            println!("{}", generator.generate());
        }

        Some(Commands::Version) => {
            println!("architect v{}", env!("CARGO_PKG_VERSION"));
        }

        // No subcommand = serve with defaults
        None => serve(8000, "lan".to_string(), None, None, "info".to_string()).await?,
    }

    Ok(())
}

async fn serve(
    port: u16,
    bind: String,
    static_dir: Option<PathBuf>,
    log_file: Option<PathBuf>,
    log_level: String,
) -> anyhow::Result<()> {
    let log = LogConfig {
        level: log_level,
        file: log_file,
    };
    // Guard flushes the non-blocking file writer; held until process exit.
    let _guard = init_logging(&log)?;

    let bind_mode = match bind.as_str() {
        "loopback" | "localhost" | "127.0.0.1" => BindMode::Loopback,
        _ => BindMode::Lan,
    };
    let static_root =
        static_dir.unwrap_or_else(|| std::env::current_dir().unwrap_or_default());

    let options = ServeOptions {
        gateway: GatewayConfig {
            port,
            bind: bind_mode,
        },
        static_root,
    };
    start_gateway(options).await
}

/// Wire tracing once at process start: console stream always, file append
/// when configured. Returns the file writer guard, if any.
fn init_logging(
    config: &LogConfig,
) -> anyhow::Result<Option<tracing_appender::non_blocking::WorkerGuard>> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!(
            "architect_gateway={level},architect_core={level},tower_http={level}",
            level = config.level
        )
        .into()
    });

    let registry = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer());

    let guard = match &config.file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)?;
            let (writer, guard) = tracing_appender::non_blocking(file);
            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_writer(writer)
                        .with_ansi(false),
                )
                .init();
            Some(guard)
        }
        None => {
            registry.init();
            None
        }
    };

    info!(
        "logging initialized: level={}, file={:?}",
        config.level, config.file
    );
    Ok(guard)
}
