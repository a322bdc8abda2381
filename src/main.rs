use anyhow::Context;
use clap::{Parser, Subcommand};
use repairscope::config::Config;
use repairscope::estimate::{estimate, DamageAssessment};
use repairscope::google::GooglePlaces;
use repairscope::location::{LocationResolver, ResolvedLocation};
use repairscope::server;
use repairscope::shops::ShopRanker;
use serde::Serialize;
use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::EnvFilter;

/// RepairScope: repair cost estimates and nearby repair shops.
///
/// Examples:
///   repairscope estimate assessment.json
///   cat assessment.json | repairscope estimate -
///   repairscope locate "Chicago"
///   repairscope shops "Seattle" --radius 5000
///   repairscope --offline serve --port 8080
#[derive(Debug, Parser)]
#[command(name = "repairscope", version, about, long_about = None)]
struct Cli {
    /// Offline mode: only built-in locations and synthetic shops.
    #[arg(long, global = true)]
    offline: bool,

    /// Config file (default: <config dir>/repairscope/config.json).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Estimate repair cost from a damage assessment JSON file ("-" for stdin).
    Estimate { file: PathBuf },
    /// Resolve an address to coordinates.
    Locate { address: String },
    /// List repair shops near an address.
    Shops {
        address: String,

        /// Search radius in meters.
        #[arg(long)]
        radius: Option<u32>,
    },
    /// Run the JSON HTTP server.
    Serve {
        #[arg(long)]
        host: Option<String>,

        #[arg(long)]
        port: Option<u16>,
    },
}

fn main() -> ExitCode {
    if let Err(e) = real_main() {
        error!("{:?}", e);
        return ExitCode::from(1);
    }
    ExitCode::from(0)
}

fn real_main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("repairscope=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    match cli.cmd {
        Command::Estimate { file } => cmd_estimate(&file),
        Command::Locate { address } => {
            let resolver = resolver(&config, cli.offline);
            let resolved = resolver.resolve(&address);
            print_banner(&resolved);
            print_json(&resolved)
        }
        Command::Shops { address, radius } => {
            let resolved = resolver(&config, cli.offline).resolve(&address);
            print_banner(&resolved);

            let mut ranker = ShopRanker::new(GooglePlaces::from_config(&config));
            ranker.set_offline(cli.offline);
            let shops = ranker.search(resolved.point, radius.unwrap_or(config.search_radius_meters));
            print_json(&shops)
        }
        Command::Serve { host, port } => {
            let config = Config {
                host: host.unwrap_or(config.host),
                port: port.unwrap_or(config.port),
                ..config
            };
            let runtime = tokio::runtime::Runtime::new().context("failed to start async runtime")?;
            runtime
                .block_on(server::start(&config, cli.offline))
                .with_context(|| format!("server on {}:{} failed", config.host, config.port))
        }
    }
}

fn load_config(path: Option<&std::path::Path>) -> anyhow::Result<Config> {
    let config = match path {
        Some(p) => Config::load_from(p)?.with_env(),
        None => Config::load()?,
    };
    Ok(config)
}

fn resolver(config: &Config, offline: bool) -> LocationResolver {
    let mut resolver = LocationResolver::new(GooglePlaces::from_config(config));
    resolver.set_offline(offline);
    resolver
}

fn print_banner(resolved: &ResolvedLocation) {
    eprintln!("  {}", resolved.display_line());
    if resolved.is_default() {
        eprintln!("  \u{26A0}\u{FE0F}  Could not resolve the address, showing the default location");
    }
}

fn cmd_estimate(file: &std::path::Path) -> anyhow::Result<()> {
    let data = if file.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read assessment from stdin")?;
        buf
    } else {
        std::fs::read_to_string(file)
            .with_context(|| format!("failed to read {}", file.display()))?
    };

    let assessment: DamageAssessment =
        serde_json::from_str(&data).context("invalid damage assessment JSON")?;
    print_json(&estimate(&assessment))
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
