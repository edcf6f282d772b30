use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;
mod airline;
mod error;
mod fetch;
mod localize;
mod report;
mod utils;

use error::LogoError;
use fetch::FetchConfig;
use localize::LocalizeConfig;

/// Maintain a folder of airline logos named by IATA code
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Options shared by both commands
#[derive(Args, Debug)]
struct CommonArgs {
    /// JSON array of airline records with `iata` / `icao` fields
    #[arg(short, long, env = "LOGO_FETCH_METADATA", default_value = "airlines.json")]
    metadata: PathBuf,

    /// Folder the IATA-named logos are written to
    #[arg(short, long, env = "LOGO_FETCH_OUTPUT", default_value = "logos")]
    output: PathBuf,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Download a logo for every airline with a valid IATA code
    Fetch {
        #[command(flatten)]
        common: CommonArgs,

        /// Remote logo URL; `{iata}` is replaced by the airline's code
        #[arg(
            short,
            long,
            env = "LOGO_FETCH_URL_TEMPLATE",
            default_value = "http://airlinelogos.aero/logos/{iata}.svg"
        )]
        url_template: String,

        /// Seconds to wait for each response
        #[arg(short, long, env = "LOGO_FETCH_TIMEOUT", default_value_t = 10)]
        timeout: u64,
    },
    /// Copy ICAO-named logos from a local folder under their IATA names
    Localize {
        #[command(flatten)]
        common: CommonArgs,

        /// Folder holding `<ICAO>.png` files
        #[arg(short, long, env = "LOGO_FETCH_SOURCE", default_value = "icao_logos")]
        source: PathBuf,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli.command).await {
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }
}

async fn run(command: Commands) -> Result<(), LogoError> {
    let pb = report::logo_bar()?;

    match command {
        Commands::Fetch {
            common,
            url_template,
            timeout,
        } => {
            let config = FetchConfig {
                metadata: common.metadata,
                output_dir: common.output,
                url_template,
                timeout: Duration::from_secs(timeout),
            };

            let report = fetch::fetch_logos(&config, &pb).await?;
            println!("\n{}", report);
        }
        Commands::Localize { common, source } => {
            let config = LocalizeConfig {
                metadata: common.metadata,
                source_dir: source,
                dest_dir: common.output,
            };

            let report = localize::localize_logos(&config, &pb)?;
            if report.total > 0 {
                println!("\n{}", report);
            }
        }
    }

    Ok(())
}
