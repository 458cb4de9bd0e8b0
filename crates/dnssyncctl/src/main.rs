// # dnssyncctl - DNS record sync CLI
//
// Thin command-line layer over the record providers. All record logic lives
// in the provider crates; this binary only:
//
// 1. Reads configuration from flags and environment variables
// 2. Registers the built-in providers and creates the configured one
// 3. Runs one provider operation under a cancellable `Context`
// 4. Prints the resulting records to stdout, one per line
//
// ## Configuration
//
// - `DNSSYNC_PROVIDER_TYPE`: Provider type (default: tecnocratica)
// - `DNSSYNC_API_TOKEN`: API token (required)
// - `DNSSYNC_API_URL`: API base URL (optional, provider default otherwise)
// - `DNSSYNC_LOG_LEVEL`: trace, debug, info, warn or error (default: info)
// - `DNSSYNC_TIMEOUT_SECS`: Overall deadline for the operation (optional)
//
// ## Example
//
// ```bash
// export DNSSYNC_API_TOKEN=your_token
//
// dnssyncctl list example.com
// dnssyncctl set example.com "www 3600 A 192.0.2.1" "www 3600 A 192.0.2.2"
// dnssyncctl delete example.com "_acme-challenge 60 TXT token"
// ```
//
// Logs go to stderr so stdout carries only records.

use anyhow::{Context as _, Result};
use clap::{Args, Parser, Subcommand};
use dnssync_core::{Context, Error, ProviderConfig, ProviderRegistry, Record, RecordProvider, Rr};
use std::process::ExitCode;
use std::str::FromStr;
use std::time::Duration;
use tracing::{Level, error, info};
use tracing_subscriber::FmtSubscriber;

/// Exit codes for the different outcomes
#[derive(Debug, Clone, Copy)]
enum SyncExitCode {
    /// Operation completed
    Success = 0,
    /// Configuration or input error, nothing was sent
    ConfigError = 1,
    /// The provider operation failed
    RuntimeError = 2,
    /// Interrupted by the user (128 + SIGINT)
    Cancelled = 130,
}

impl From<SyncExitCode> for ExitCode {
    fn from(code: SyncExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

/// Synchronize DNS records with a hosting provider
#[derive(Debug, Parser)]
#[command(
    name = "dnssyncctl",
    version,
    about = "List, append, set and delete DNS records at a hosting provider",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
struct Cli {
    #[command(flatten)]
    global: GlobalOpts,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Args)]
struct GlobalOpts {
    /// Provider type
    #[arg(long, env = "DNSSYNC_PROVIDER_TYPE", default_value = "tecnocratica", global = true)]
    provider: String,

    /// Provider API token
    #[arg(long, env = "DNSSYNC_API_TOKEN", global = true, hide_env_values = true)]
    api_token: Option<String>,

    /// Provider API base URL
    #[arg(long, env = "DNSSYNC_API_URL", global = true)]
    api_url: Option<String>,

    /// Log level written to stderr
    #[arg(long, env = "DNSSYNC_LOG_LEVEL", default_value = "info", global = true)]
    log_level: String,

    /// Give up after this many seconds
    #[arg(long, env = "DNSSYNC_TIMEOUT_SECS", global = true)]
    timeout_secs: Option<u64>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print every record of a zone
    List {
        /// Zone name, e.g. example.com
        zone: String,
    },
    /// Add records without touching existing ones
    Append(RecordsArgs),
    /// Replace the records of each (name, type) pair given
    Set(RecordsArgs),
    /// Delete matching records
    Delete(RecordsArgs),
}

#[derive(Debug, Args)]
struct RecordsArgs {
    /// Zone name, e.g. example.com
    zone: String,

    /// Records as "name ttl type data..."
    #[arg(required = true)]
    records: Vec<String>,
}

/// A parsed command, ready to run
enum Operation {
    List { zone: String },
    Append { zone: String, records: Vec<Record> },
    Set { zone: String, records: Vec<Record> },
    Delete { zone: String, records: Vec<Record> },
}

impl Operation {
    fn from_command(command: Command) -> Result<Self> {
        Ok(match command {
            Command::List { zone } => Self::List { zone },
            Command::Append(args) => Self::Append {
                records: parse_records(&args.records)?,
                zone: args.zone,
            },
            Command::Set(args) => Self::Set {
                records: parse_records(&args.records)?,
                zone: args.zone,
            },
            Command::Delete(args) => Self::Delete {
                records: parse_records(&args.records)?,
                zone: args.zone,
            },
        })
    }

    async fn run(
        &self,
        provider: &dyn RecordProvider,
        ctx: &Context,
    ) -> dnssync_core::Result<Vec<Record>> {
        match self {
            Self::List { zone } => provider.get_records(ctx, zone).await,
            Self::Append { zone, records } => provider.append_records(ctx, zone, records).await,
            Self::Set { zone, records } => provider.set_records(ctx, zone, records).await,
            Self::Delete { zone, records } => provider.delete_records(ctx, zone, records).await,
        }
    }
}

fn parse_records(lines: &[String]) -> Result<Vec<Record>> {
    lines
        .iter()
        .map(|line| {
            Rr::from_str(line)
                .and_then(|rr| rr.parse())
                .with_context(|| format!("invalid record {:?}", line))
        })
        .collect()
}

fn parse_level(level: &str) -> Result<Level> {
    match level.to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        _ => anyhow::bail!(
            "DNSSYNC_LOG_LEVEL '{}' is not valid. \
            Valid levels: trace, debug, info, warn, error",
            level
        ),
    }
}

fn provider_config(opts: &GlobalOpts) -> Result<ProviderConfig> {
    let api_token = opts
        .api_token
        .clone()
        .filter(|t| !t.is_empty())
        .context("DNSSYNC_API_TOKEN is required. Set it via: export DNSSYNC_API_TOKEN=your_token")?;

    let config = match opts.provider.as_str() {
        "tecnocratica" => ProviderConfig::Tecnocratica {
            api_token,
            api_url: opts.api_url.clone(),
        },
        other => anyhow::bail!(
            "DNSSYNC_PROVIDER_TYPE '{}' is not supported. Supported providers: tecnocratica",
            other
        ),
    };

    config.validate()?;
    Ok(config)
}

fn build_registry() -> ProviderRegistry {
    let registry = ProviderRegistry::new();

    #[cfg(feature = "tecnocratica")]
    dnssync_provider_tecnocratica::register(&registry);

    registry
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_level = match parse_level(&cli.global.log_level) {
        Ok(level) => level,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return SyncExitCode::ConfigError.into();
        }
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        return SyncExitCode::ConfigError.into();
    }

    let prepared = provider_config(&cli.global).and_then(|config| {
        let provider = build_registry().create_provider(&config)?;
        let operation = Operation::from_command(cli.command)?;
        Ok((provider, operation))
    });
    let (provider, operation) = match prepared {
        Ok(prepared) => prepared,
        Err(e) => {
            error!("Configuration error: {:#}", e);
            return SyncExitCode::ConfigError.into();
        }
    };

    let rt = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to create tokio runtime: {}", e);
            return SyncExitCode::RuntimeError.into();
        }
    };

    let timeout = cli.global.timeout_secs.map(Duration::from_secs);
    rt.block_on(run(provider.as_ref(), &operation, timeout))
        .into()
}

/// Run one operation, cancelling it on Ctrl-C
async fn run(
    provider: &dyn RecordProvider,
    operation: &Operation,
    timeout: Option<Duration>,
) -> SyncExitCode {
    let ctx = match timeout {
        Some(timeout) => Context::with_timeout(timeout),
        None => Context::background(),
    };

    let interrupt = ctx.clone();
    let watcher = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Interrupted, cancelling");
            interrupt.cancel();
        }
    });

    info!("Using provider {}", provider.provider_name());
    let result = operation.run(provider, &ctx).await;
    watcher.abort();

    match result {
        Ok(records) => {
            for record in &records {
                println!("{}", record);
            }
            SyncExitCode::Success
        }
        Err(Error::Cancelled) => {
            error!("Operation cancelled");
            SyncExitCode::Cancelled
        }
        Err(e) => {
            error!("Operation failed: {}", e);
            SyncExitCode::RuntimeError
        }
    }
}
