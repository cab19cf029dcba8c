//! Detect labels in a local image with Google Cloud Vision.
//!
//! Prints one `<description> <score>` line per label on stdout.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use hansik::config::AppConfig;
use hansik::vision::{write_labels, Credentials, VisionClient};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Image to analyze
    #[arg(short, long, env = "HANSIK_LABEL_IMAGE")]
    image: PathBuf,

    /// JSON credentials file: service account key, authorized user, `api_key` or `token`
    #[arg(short, long, env = "GOOGLE_APPLICATION_CREDENTIALS")]
    credentials: Option<PathBuf>,

    /// API key; takes precedence over the credentials file
    #[arg(long, env = "GOOGLE_VISION_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Maximum number of labels to request
    #[arg(long)]
    max_results: Option<u32>,

    /// Override the annotate endpoint
    #[arg(long)]
    endpoint: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("hansik=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = AppConfig::load().context("failed to load configuration")?;

    let credentials = match (&cli.api_key, &cli.credentials) {
        (Some(key), _) => Credentials::api_key(key.clone()),
        (None, Some(path)) => Credentials::from_file(path)
            .with_context(|| format!("failed to read credentials from {}", path.display()))?,
        (None, None) => {
            tracing::info!("No key or credentials file given, using application default credentials");
            Credentials::ApplicationDefault
        }
    };

    let endpoint = cli.endpoint.unwrap_or(config.vision.endpoint);
    let max_results = cli.max_results.or(config.vision.max_results);
    let client = VisionClient::new(endpoint, credentials);

    let labels = client
        .detect_labels_in_file(&cli.image, max_results)
        .await
        .with_context(|| format!("label detection failed for {}", cli.image.display()))?;

    let stdout = std::io::stdout();
    write_labels(&mut stdout.lock(), &labels).context("failed to write labels")?;

    Ok(())
}
