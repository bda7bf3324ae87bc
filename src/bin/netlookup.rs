//! netlookup: command line front-end for IP geolocation and MAC vendor lookups.

use clap::{Parser, Subcommand};
use netlookup::{LookupConfig, LookupResult, Locator};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "netlookup")]
#[command(author = "Kaitu.io")]
#[command(version = "0.1.0")]
#[command(about = "Look up IP locations and MAC vendors in binary databases", long_about = None)]
struct Cli {
    /// Local data directory containing ip/<octet>.bin and mac.bin
    #[arg(short, long, default_value = "data")]
    data_dir: PathBuf,

    /// Fetch databases from this base URL instead of the data directory
    #[arg(short, long, conflicts_with = "data_dir")]
    base_url: Option<String>,

    /// HTTP timeout in seconds
    #[arg(long, default_value_t = 10)]
    timeout: u64,

    /// Maximum concurrent lookups per batch
    #[arg(short, long)]
    jobs: Option<usize>,

    /// Disable result caching
    #[arg(long)]
    no_cache: bool,

    /// Print results as JSON
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Locate IP addresses (single, list, range or CIDR)
    Ip {
        /// Queries, e.g. "8.8.8.8", "10.0.0.1-10.0.0.9", "192.168.0.0/24; 1.1.1.1"
        #[arg(required = true)]
        queries: Vec<String>,
    },

    /// Look up MAC address manufacturers
    Mac {
        /// Queries, e.g. "00:17:F2:01:02:03" or "00-12-47-11-22-33, 0017f2"
        #[arg(required = true)]
        queries: Vec<String>,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let mut config = if cli.no_cache {
        LookupConfig::no_cache()
    } else {
        LookupConfig::default()
    }
    .http_timeout(Duration::from_secs(cli.timeout));
    if let Some(jobs) = cli.jobs {
        config = config.max_concurrency(jobs);
    }
    if let Err(e) = config.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    let locator = match &cli.base_url {
        Some(url) => Locator::open_url(url, config),
        None => {
            if !cli.data_dir.is_dir() {
                eprintln!("Error: data directory {:?} not found", cli.data_dir);
                std::process::exit(1);
            }
            Locator::with_config(netlookup::DirectorySource::new(&cli.data_dir), config)
        }
    };

    let results: Vec<LookupResult> = match &cli.command {
        Commands::Ip { queries } => queries.iter().flat_map(|q| locator.lookup_ip(q)).collect(),
        Commands::Mac { queries } => queries.iter().flat_map(|q| locator.lookup_mac(q)).collect(),
    };

    if let Err(e) = print_results(&results, cli.json) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    if results.iter().any(LookupResult::is_unavailable) {
        eprintln!("Error: server is unavailable");
        std::process::exit(1);
    }
}

fn print_results(results: &[LookupResult], json: bool) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        println!("{}", serde_json::to_string_pretty(results)?);
    } else if results.is_empty() {
        println!("no addresses to look up");
    } else {
        for result in results {
            println!("{}", result);
        }
    }
    Ok(())
}
