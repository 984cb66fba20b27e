//! talcard: generate a company roast card image.
//!
//! Pipeline: resolve domain → fetch logo → generate roast → render card →
//! save PNG under output/. Requires GOOGLE_API_KEY.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use talcard::card;
use talcard::company::{self, CompanyRequest};
use talcard::llm::GeminiClient;
use talcard::logo::{LogoConfig, LogoFetcher};
use talcard::roast;

#[derive(Parser)]
#[command(name = "talcard", about = "Generate a company roast card image")]
struct Args {
    /// Company name to roast
    company: Option<String>,

    /// Role to target
    #[arg(default_value = "Engineers")]
    role: String,

    /// Google API key (or set GOOGLE_API_KEY)
    #[arg(long, env = "GOOGLE_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Gemini model to use
    #[arg(long, default_value = "gemini-3-pro-preview")]
    model: String,

    /// HTML card template
    #[arg(long, default_value = "assets/card-template.html")]
    template: PathBuf,

    /// Mascot image composited onto the card
    #[arg(long, default_value = "assets/shiba.png")]
    shiba: PathBuf,

    /// Output directory for rendered cards
    #[arg(long, default_value = "output")]
    out_dir: PathBuf,

    /// Logo responses smaller than this many bytes are treated as placeholders
    #[arg(long, default_value_t = 5000)]
    logo_threshold: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "talcard=info".into()),
        )
        .init();

    let args = Args::parse();

    let Some(company_name) = args.company else {
        anyhow::bail!("Usage: talcard <COMPANY> [ROLE]");
    };
    let Some(api_key) = args.api_key else {
        anyhow::bail!("Missing GOOGLE_API_KEY");
    };

    let req = CompanyRequest::new(company_name, args.role);
    let domain = company::resolve_domain(&req.name);

    tracing::info!(
        company = %req.name,
        role = %req.role,
        %domain,
        kind = company::company_type(&req.name),
        "Starting card generation"
    );

    // Step 1: company logo (best effort)
    let fetcher = LogoFetcher::new(LogoConfig {
        min_bytes: args.logo_threshold,
        ..LogoConfig::default()
    })?;
    let logo_url = fetcher.fetch(&domain).await;

    // Step 2: roast text
    let model = GeminiClient::new(api_key).with_model(&args.model);
    let result = roast::generate_roast(&model, &req).await;
    tracing::info!(
        roast = %result.text,
        input_tokens = result.input_tokens,
        output_tokens = result.output_tokens,
        cost_usd = result.cost_usd,
        "Roast ready"
    );

    // Step 3: render the card
    let template = std::fs::read_to_string(&args.template)
        .with_context(|| format!("Failed to read template {}", args.template.display()))?;
    let shiba = card::shiba_data_url(&args.shiba);
    let html = card::populate_template(&template, &req, &result.text, &shiba, logo_url.as_deref());

    tracing::info!("Rendering card");
    let png = tokio::task::spawn_blocking(move || {
        card::render_card(&html, card::CARD_WIDTH, card::CARD_HEIGHT)
    })
    .await??;

    // Step 4: save
    let path = card::save_card(&png, &req.name, &args.out_dir)?;
    println!("Card saved to {}", path.display());

    Ok(())
}
