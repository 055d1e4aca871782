use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{debug, error, trace};
use tracing_subscriber::EnvFilter;

use love_sandwiches::config::{Config, ConfigLoader};
use love_sandwiches::items::ItemType;
use love_sandwiches::session::{ForecastOutcome, Session};
use love_sandwiches::worksheet::backends::file::create_worksheets;
use love_sandwiches::worksheet::{BackendType, Worksheet, WorksheetGateway, WorksheetStoreFactory};

/// Record market sales and keep sandwich stock in line with demand
#[derive(Parser)]
#[command(name = "love-sandwiches")]
#[command(about = "Love Sandwiches - sales, surplus and stock automation", long_about = None)]
struct Cli {
    /// Enable verbose output (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to configuration file
    #[arg(short = 'c', long, global = true)]
    config: Option<PathBuf>,

    /// Worksheet backend (file or sheets)
    #[arg(long, global = true)]
    backend: Option<BackendType>,

    /// Directory holding the CSV worksheets (file backend)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Enter sales for the last market (default command)
    Run {
        /// Only record sales and surplus, leave stock unchanged
        #[arg(long)]
        no_forecast: bool,
    },
    /// Create empty sales, surplus and stock worksheets for the file backend
    Init {
        /// Overwrite worksheets that already exist
        #[arg(long)]
        force: bool,
    },
    /// Print the most recent rows of a worksheet
    Show {
        /// Worksheet to print (sales, surplus or stock)
        worksheet: Worksheet,

        /// Number of rows to print
        #[arg(short = 'n', long, default_value = "5")]
        last: usize,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match load_config(&cli).await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(1);
        }
    };

    let log_level = match cli.verbose {
        0 => config.log_level.as_str(),
        1 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(cli.verbose >= 2)
        .init();

    debug!("love-sandwiches started with verbosity level: {}", cli.verbose);
    trace!("Full CLI args: {:?}", std::env::args().collect::<Vec<_>>());

    let result = match cli.command {
        Some(Commands::Run { no_forecast }) => run_session(config, no_forecast).await,
        Some(Commands::Init { force }) => run_init(&config, force).await,
        Some(Commands::Show { worksheet, last }) => run_show(&config, worksheet, last).await,
        None => run_session(config, false).await,
    };

    if let Err(e) = result {
        error!("Fatal error: {:#}", e);
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

/// Configuration file, then environment, then command-line flags
async fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = ConfigLoader::new(cli.config.clone())?
        .load()
        .await
        .context("Failed to load configuration")?;

    if let Some(backend) = cli.backend {
        config.storage.backend = backend;
    }
    if let Some(data_dir) = &cli.data_dir {
        config.storage.file.data_dir = data_dir.clone();
    }

    Ok(config)
}

async fn open_gateway(config: &Config) -> anyhow::Result<WorksheetGateway> {
    if config.storage.backend == BackendType::Memory {
        anyhow::bail!(
            "the memory backend starts empty and keeps nothing between runs; use the file or sheets backend"
        );
    }
    config.validate()?;
    let store = WorksheetStoreFactory::from_config(&config.storage)
        .await
        .context("Failed to open worksheets")?;
    Ok(WorksheetGateway::new(store, config.storage.header_rows))
}

async fn run_session(mut config: Config, no_forecast: bool) -> anyhow::Result<()> {
    if no_forecast {
        config.forecast.enabled = false;
    }
    let gateway = open_gateway(&config).await?;

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let report = Session::new(&gateway, config.forecast.clone(), stdin.lock(), stdout.lock())
        .run()
        .await?;

    if let ForecastOutcome::Recorded(stock) = &report.forecast {
        println!("Stock for next market: {}", stock);
    }
    Ok(())
}

async fn run_init(config: &Config, force: bool) -> anyhow::Result<()> {
    if config.storage.backend != BackendType::File {
        anyhow::bail!("init only creates worksheets for the file backend");
    }

    let data_dir = &config.storage.file.data_dir;
    let written = create_worksheets(data_dir, force)
        .await
        .with_context(|| format!("Failed to create worksheets in {}", data_dir.display()))?;

    if written.is_empty() {
        println!(
            "Worksheets already exist in {} (use --force to recreate them)",
            data_dir.display()
        );
    } else {
        for path in written {
            println!("Created {}", path.display());
        }
    }
    Ok(())
}

async fn run_show(config: &Config, worksheet: Worksheet, last: usize) -> anyhow::Result<()> {
    let gateway = open_gateway(config).await?;
    let rows = gateway.last_rows(worksheet, last).await?;

    println!("{} (last {} of its entries)", worksheet, rows.len());
    let header: Vec<String> = ItemType::ALL
        .iter()
        .map(|item| format!("{:>8}", item.name()))
        .collect();
    println!("{}", header.join(" "));
    for row in rows {
        let cells: Vec<String> = row.iter().map(|cell| format!("{:>8}", cell)).collect();
        println!("{}", cells.join(" "));
    }
    Ok(())
}
