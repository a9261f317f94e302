mod client;
mod interactive;
mod report;
mod session;

use std::io::{BufRead as _, IsTerminal as _};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::client::{score_rows, ApiClient, StatusCheck, DEFAULT_API_URL};

#[derive(Debug, Parser)]
#[command(name = "hsl-cli")]
#[command(about = "Headline Sentiment Lab dashboard client")]
struct Cli {
    /// Base URL of the scoring service
    #[arg(long, global = true, env = "HSL_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Check that the scoring service is up
    Status,
    /// Score headlines once and print a results table
    Score {
        /// Headlines to score; read from --file or piped stdin when omitted
        headlines: Vec<String>,

        /// Read headlines from a file, one per line
        #[arg(long)]
        file: Option<PathBuf>,

        /// Also write the results as CSV to this path
        #[arg(long)]
        csv: Option<PathBuf>,
    },
    /// Edit and score headlines interactively (default)
    Interactive,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let client = ApiClient::new(&cli.api_url)?;

    match cli.command {
        Some(Commands::Status) => run_status(&client).await,
        Some(Commands::Score {
            headlines,
            file,
            csv,
        }) => run_score(&client, headlines, file.as_deref(), csv.as_deref()).await,
        Some(Commands::Interactive) | None => interactive::run(&client).await,
    }
}

async fn run_status(client: &ApiClient) -> anyhow::Result<()> {
    match client.check_status().await {
        Ok(StatusCheck::Ok) => {
            println!("API OK");
            Ok(())
        }
        Ok(StatusCheck::BadResponse) => anyhow::bail!("API reachable, bad response"),
        Err(e) => anyhow::bail!("Failed: {e}"),
    }
}

async fn run_score(
    client: &ApiClient,
    mut headlines: Vec<String>,
    file: Option<&Path>,
    csv: Option<&Path>,
) -> anyhow::Result<()> {
    if let Some(path) = file {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read {}: {e}", path.display()))?;
        headlines.extend(contents.lines().map(ToOwned::to_owned));
    }
    if headlines.is_empty() && !std::io::stdin().is_terminal() {
        for line in std::io::stdin().lock().lines() {
            headlines.push(line?);
        }
    }

    let batch = score_rows(client, &headlines).await?;
    print!("{}", batch.render_table());
    println!("{}", batch.counts().summary());

    if let Some(path) = csv {
        batch
            .write_csv(path)
            .map_err(|e| anyhow::anyhow!("failed to write {}: {e}", path.display()))?;
        println!("wrote {} rows to {}", batch.len(), path.display());
    }
    Ok(())
}
