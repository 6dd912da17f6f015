// crates/partita-server/src/main.rs
// ============================================================================
// Module: Partita Daemon Entry Point
// Description: Standalone API gateway binary backed by the in-memory library.
// Purpose: Load configuration, wire the gateway, and serve until failure.
// Dependencies: clap, partita-config, partita-core, partita-output, tokio
// ============================================================================

//! ## Overview
//! `partitad` starts the Partita API gateway around an empty in-memory
//! library. Deployments with real storage embed [`partita_server::ApiServer`]
//! and inject their own repository implementations instead. Security posture:
//! inputs are untrusted and must be validated; see
//! `Docs/security/threat_model.md`.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use thiserror::Error;

use partita_config::PartitaConfig;
use partita_core::CatalogRepository;
use partita_core::InMemoryLibrary;
use partita_core::LevelDeletionPolicy;
use partita_core::PodcastEpisodeRepository;
use partita_core::PodcastRepository;
use partita_core::RegistryWiring;
use partita_core::ServerCounters;
use partita_core::ServerVersion;
use partita_core::SongRepository;
use partita_core::StaticFeatureGate;
use partita_core::UserRepository;
use partita_output::JsonOutput;
use partita_server::ApiServer;
use partita_server::GatewayParts;
use partita_server::NoopMetrics;
use partita_server::StderrAuditSink;

// ============================================================================
// SECTION: CLI
// ============================================================================

/// Command-line options for the API gateway daemon.
#[derive(Parser, Debug)]
#[command(name = "partitad", about = "Partita remote API gateway")]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Listener address override (host:port).
    #[arg(long, value_name = "ADDR")]
    bind: Option<String>,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error wrapper for startup failures.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`] from a message.
    const fn new(message: String) -> Self {
        Self {
            message,
        }
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// Daemon entry point returning an exit code.
#[tokio::main(flavor = "multi_thread")]
async fn main() -> ExitCode {
    match run().await {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Loads configuration, wires the gateway, and serves until failure.
async fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();
    let mut config = PartitaConfig::load(cli.config.as_deref())
        .map_err(|err| CliError::new(format!("config load failed: {err}")))?;
    if let Some(bind) = cli.bind {
        config.server.bind = bind;
    }
    let server = ApiServer::from_parts(&config, gateway_parts(&config))
        .map_err(|err| CliError::new(format!("startup failed: {err}")))?;
    write_stderr_line(&format!("partitad listening on {}", server.bind_addr()))
        .map_err(|err| CliError::new(format!("stderr write failed: {err}")))?;
    server.serve().await.map_err(|err| CliError::new(format!("server failed: {err}")))?;
    Ok(ExitCode::SUCCESS)
}

/// Builds gateway collaborators around an empty in-memory library.
///
/// Real deployments implement the repository traits over their own storage
/// and inject them here.
fn gateway_parts(config: &PartitaConfig) -> GatewayParts {
    let library = Arc::new(InMemoryLibrary::new());
    GatewayParts {
        wiring: RegistryWiring {
            features: Arc::new(StaticFeatureGate::new(config.features.enabled())),
            songs: Arc::clone(&library) as Arc<dyn SongRepository>,
            users: Arc::clone(&library) as Arc<dyn UserRepository>,
            podcasts: Arc::clone(&library) as Arc<dyn PodcastRepository>,
            episodes: Arc::clone(&library) as Arc<dyn PodcastEpisodeRepository>,
            catalog: Arc::clone(&library) as Arc<dyn CatalogRepository>,
            counters: Arc::clone(&library) as Arc<dyn ServerCounters>,
            deletion: Arc::new(LevelDeletionPolicy),
            version: ServerVersion::current(),
        },
        output: Arc::new(JsonOutput::new(
            Arc::clone(&library) as Arc<dyn SongRepository>,
            Arc::clone(&library) as Arc<dyn UserRepository>,
        )),
        metrics: Arc::new(NoopMetrics),
        audit: Arc::new(StderrAuditSink),
    }
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Writes one line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Prints an error to stderr and maps it to a failing exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}
