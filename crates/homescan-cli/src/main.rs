use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use homescan_client::{DEFAULT_BASE_URL, HtmlTextExtractor, OpenAiModel, ReqwestFetcher};
use homescan_core::{ExtractionAgent, ScrapeService, parse_target_url};

#[derive(Parser)]
#[command(name = "homescan", version, about = "Company profiles from website homepages")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Report industry, company size and location for a homepage
    Scrape {
        /// Homepage URL
        #[arg(short, long)]
        url: String,

        /// LLM model to use (e.g., "gemini-2.0-flash", "gpt-4o-mini")
        #[arg(short, long, env = "MODEL_NAME")]
        model: String,

        /// API key for the model provider
        #[arg(short, long, env = "MODEL_API_KEY", hide_env_values = true)]
        api_key: String,

        /// OpenAI-compatible API base URL
        #[arg(short, long, env = "MODEL_BASE_URL", default_value = DEFAULT_BASE_URL)]
        base_url: String,

        /// Seconds to wait for the homepage
        #[arg(long, env = "FETCH_TIMEOUT_SECS", default_value_t = 10)]
        fetch_timeout: u64,

        /// Seconds to wait for the model
        #[arg(long, env = "MODEL_TIMEOUT_SECS", default_value_t = 120)]
        model_timeout: u64,

        /// Allow fetching private and loopback addresses
        #[arg(long, default_value_t = false)]
        allow_private_urls: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Logs go to stderr so stdout stays pure JSON
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("homescan=info".parse()?))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Scrape {
            url,
            model,
            api_key,
            base_url,
            fetch_timeout,
            model_timeout,
            allow_private_urls,
        } => {
            let model = OpenAiModel::with_base_url(&api_key, &model, &base_url)
                .and_then(|m| m.with_timeout(Duration::from_secs(model_timeout)))
                .context("Failed to configure model client")?;
            let fetcher = ReqwestFetcher::with_timeout(Duration::from_secs(fetch_timeout))
                .context("Failed to create HTTP client")?;
            let fetcher = if allow_private_urls {
                fetcher
                    .allow_private_urls()
                    .context("Failed to create HTTP client")?
            } else {
                fetcher
            };

            cmd_scrape(&url, fetcher, model).await?;
        }
    }

    Ok(())
}

async fn cmd_scrape(url: &str, fetcher: ReqwestFetcher, model: OpenAiModel) -> Result<()> {
    let url = parse_target_url(url)?;

    let agent = ExtractionAgent::new(model).context("Failed to initialize extraction agent")?;
    let service = ScrapeService::new(fetcher, HtmlTextExtractor::new(), agent);

    let result = service
        .scrape(url.as_str())
        .await
        .with_context(|| format!("Scrape of {url} failed"))?;

    println!("{}", serde_json::to_string_pretty(&result)?);

    Ok(())
}
