//! ENS resolution from the command line.

#![allow(clippy::print_stdout)] // CLI program intentionally uses stdout

use std::path::PathBuf;
use std::process::ExitCode;
use std::str::FromStr;

use clap::{Parser, Subcommand};
use ens_resolver::config::{ResolverConfig, load_config_from};
use ens_resolver::prelude::*;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Resolve ENS names to addresses and back
#[derive(Debug, Parser)]
#[command(name = "ens")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Configuration file path
    #[arg(short, long, env = "ENS_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// JSON-RPC endpoint (overrides config)
    #[arg(short, long, env = "ENS_RPC_URL", global = true)]
    rpc_url: Option<String>,

    /// Send calls through an alloy provider instead of raw JSON-RPC
    #[arg(long, global = true)]
    alloy: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print the namehash of a name (no network access)
    Namehash {
        /// Domain name, e.g. `alice.eth`
        name: String,
    },

    /// Resolve a name to its resolver and address
    Resolve {
        /// Domain name, e.g. `alice.eth`
        name: String,
    },

    /// Show the resolver registered for a name
    Resolver {
        /// Domain name
        name: String,
    },

    /// Show the registry owner of a name
    Owner {
        /// Domain name
        name: String,
    },

    /// Reverse-resolve an address to its primary name
    Lookup {
        /// `0x`-prefixed account address
        address: String,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            tracing::error!("failed to create tokio runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    match rt.block_on(run(cli)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

/// Initialize logging with the given verbosity level.
fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "ens={level},ens_resolver={level},{}",
            if verbosity >= 3 { "debug" } else { "warn" }
        ))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(verbosity >= 2)
        .with_writer(std::io::stderr)
        .init();
}

/// Main async entry point.
async fn run(cli: Cli) -> Result<()> {
    if let Commands::Namehash { name } = &cli.command {
        println!("{}", namehash(name));
        return Ok(());
    }

    let mut config = match &cli.config {
        Some(path) => load_config_from(path).await?,
        None => ResolverConfig::default(),
    };
    if let Some(url) = cli.rpc_url {
        config.rpc.url = url;
    }

    let client = EnsClient::new(build_executor(&config, cli.alloy).await?, config.network()?);

    match cli.command {
        Commands::Namehash { .. } => {}
        Commands::Resolve { name } => {
            let result = client.resolve(&name).await?;
            println!("resolver: {}", result.resolver);
            println!("address:  {}", result.address);
        }
        Commands::Resolver { name } => {
            println!("{}", client.resolver_of(&name).await?);
        }
        Commands::Owner { name } => {
            println!("{}", client.owner_of(&name).await?);
        }
        Commands::Lookup { address } => {
            let address = Address::from_str(address.trim())
                .map_err(|e| Error::config(format!("invalid address '{address}': {e}")))?;
            println!("{}", client.lookup(address).await?);
        }
    }

    Ok(())
}

async fn build_executor(config: &ResolverConfig, alloy: bool) -> Result<Box<dyn CallExecutor>> {
    tracing::info!(rpc_url = %config.rpc.url, alloy, "using RPC endpoint");
    if alloy {
        Ok(Box::new(ProviderExecutor::connect(&config.rpc.url).await?))
    } else {
        Ok(Box::new(HttpExecutor::from_config(config)?))
    }
}
