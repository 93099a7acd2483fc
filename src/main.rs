use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use llmapi::{get_llm_chat, LLMClient};
use site_labels_lib::{
    run_batch, LabelConfig, API_KEY_ENV, DEFAULT_IMAGE_MIME, DEFAULT_LABEL_MODEL,
    DEFAULT_MAX_TOKENS, DEFAULT_OPENAI_ENDPOINT, DEFAULT_ROOT_DIR, DEFAULT_SEED,
    DEFAULT_TEMPERATURE,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Directory holding one subdirectory per site.
    #[arg(default_value = DEFAULT_ROOT_DIR)]
    root: PathBuf,

    /// Where responses are written. Defaults to `<ROOT>/output`.
    #[arg(long)]
    output_dir: Option<PathBuf>,

    #[arg(long, default_value = DEFAULT_LABEL_MODEL)]
    model: String,

    /// Base URL of the chat-completion API.
    #[arg(long, default_value = DEFAULT_OPENAI_ENDPOINT)]
    endpoint: String,

    #[arg(long, default_value_t = DEFAULT_MAX_TOKENS)]
    max_tokens: u32,

    #[arg(long, default_value_t = DEFAULT_TEMPERATURE)]
    temperature: f64,

    #[arg(long, default_value_t = DEFAULT_SEED)]
    seed: i64,

    /// Media type announced for every attached image.
    #[arg(long, default_value = DEFAULT_IMAGE_MIME)]
    image_mime: String,

    /// Replaces the built-in instruction with the contents of this file.
    #[arg(long)]
    instruction_file: Option<PathBuf>,
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn build_config(args: Args) -> Result<LabelConfig> {
    let mut config = LabelConfig::for_root(&args.root);
    if let Some(output_dir) = args.output_dir {
        config.output_dir = output_dir;
    }
    config.model = args.model;
    config.max_tokens = args.max_tokens;
    config.temperature = args.temperature;
    config.seed = args.seed;
    config.image_mime = args.image_mime;

    if let Some(path) = args.instruction_file {
        config.instruction = tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("Unable to read instruction file '{}'", path.display()))?;
    }

    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_logging();

    let args = Args::parse();
    let endpoint = args.endpoint.clone();
    let config = build_config(args).await?;

    let api_key = std::env::var(API_KEY_ENV).ok();
    if api_key.is_none() {
        warn!("{API_KEY_ENV} is not set; requests will be sent without authorization");
    }
    let chat = get_llm_chat(LLMClient::new(api_key, endpoint));

    info!(
        root = %config.root_dir.display(),
        output = %config.output_dir.display(),
        model = %config.model,
        "starting label run"
    );

    run_batch(&config, chat, &mut std::io::stdout()).await?;
    Ok(())
}
