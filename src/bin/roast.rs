//! roast: standalone entry point that prints just the roast text.
//!
//! Keeps stdout clean for callers that capture it; logs go to stderr.

use anyhow::Result;
use clap::Parser;

use talcard::company::CompanyRequest;
use talcard::llm::GeminiClient;
use talcard::roast;

#[derive(Parser)]
#[command(name = "roast", about = "Generate a company roast (text only)")]
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
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "talcard=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let Some(company_name) = args.company else {
        anyhow::bail!("Usage: roast <COMPANY> [ROLE]");
    };
    let Some(api_key) = args.api_key else {
        anyhow::bail!("Missing GOOGLE_API_KEY");
    };

    let req = CompanyRequest::new(company_name, args.role);
    let model = GeminiClient::new(api_key).with_model(&args.model);
    let result = roast::generate_roast(&model, &req).await;

    // Just the roast, nothing else, so callers can capture stdout.
    println!("{}", result.text);

    Ok(())
}
