//! Roast generation: prompt construction, output cleanup, validation, and a
//! bounded retry loop around the model call.
//!
//! The validity filter only guards against a known failure mode of prompted
//! generation: the model talking *about* producing the roast (preambles,
//! self-labels, markdown artifacts) instead of emitting it directly.

use std::sync::LazyLock;

use regex::Regex;

use crate::company::CompanyRequest;
use crate::llm::TextModel;

/// Returned verbatim when every generation attempt fails or is rejected.
pub const FALLBACK_ROAST: &str = "Your LinkedIn writes checks your JIRA can't cash.";

const MAX_ATTEMPTS: u32 = 3;

// gemini-3-pro-preview pricing, per 1M tokens / per search query.
const INPUT_PRICE_PER_M: f64 = 2.00;
const OUTPUT_PRICE_PER_M: f64 = 12.00;
const SEARCH_PRICE_PER_QUERY: f64 = 14.00 / 1000.0;

const ROAST_GUIDELINES: &str = "
TAL is the friend who roasts you so hard the group chat goes silent.

PRINCIPLES (not templates):

1. MAKE THEM SEE IT
   Paint a picture. \"Aggressive eye contact while dumping rice\" > \"serving food rudely\"

2. BE PAINFULLY SPECIFIC
   Real tools, real places, real jargon. Generic = forgettable.

3. FIND THE ABSURDITY THEY'VE NORMALIZED
   What ridiculous thing do they do daily without questioning it?

4. THE PUNCHLINE IS EVERYTHING
   Build to it. Land on it. Stop.

5. WOULD THEY TAG THEIR COWORKER?
   If not, it's not sharp enough.

6. SURPRISE THEM
   If they can predict where it's going, rewrite it.

NO TEMPLATES. NO FORMULAS. Just be funny and true.
Write like a comedian, not a corporate copywriter.

Max 25 words. Must hit.
";

/// The accepted roast plus token/cost accounting across all attempts.
#[derive(Debug, Clone)]
pub struct RoastResult {
    pub text: String,
    pub input_tokens: u64,
    pub output_tokens: u64,
    pub cost_usd: f64,
}

/// Build the generation prompt. Identical on every retry.
pub fn build_prompt(req: &CompanyRequest) -> String {
    format!(
        "You're a comedian writing a roast about {role} at {company}.\n\
         \n\
         {ROAST_GUIDELINES}\n\
         Research {company}. Get in their heads. What's the funniest, most painfully \
         accurate thing you could say that would make them screenshot it and send to \
         their work group chat?\n\
         \n\
         Be creative. Surprise me. No lazy takes.\n\
         \n\
         OUTPUT ONLY THE ROAST:",
        role = req.role,
        company = req.name,
    )
}

static EDGE_QUOTES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^["'`]|["'`]$"#).expect("edge quote pattern"));
static EDGE_ASTERISKS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\*+|\*+$").expect("edge asterisk pattern"));
static INLINE_EMPHASIS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*([^*]+)\*").expect("inline emphasis pattern"));
static LEADING_BULLET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-•]\s*").expect("bullet pattern"));
static FILLER_OPENER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(Here's|Based on|OK,|Okay,|Alright,|Sure,).+?:").expect("filler pattern")
});
static SELF_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(The roast|Roast|My roast|Output):\s*").expect("label pattern")
});
static NEWLINES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n+").expect("newline pattern"));
static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern"));

/// Clean up raw model output: strip quoting, markdown emphasis, bullets,
/// filler openers and self-labels, then normalize whitespace.
///
/// Pure transform, idempotent on already-clean input.
pub fn clean_roast(raw: &str) -> String {
    let s = EDGE_QUOTES.replace_all(raw, "");
    let s = EDGE_ASTERISKS.replace_all(&s, "");
    let s = INLINE_EMPHASIS.replace_all(&s, "$1");
    let s = LEADING_BULLET.replace(&s, "");
    let s = FILLER_OPENER.replace(&s, "");
    let s = SELF_LABEL.replace(&s, "");
    let s = NEWLINES.replace_all(&s, " ");
    let s = WHITESPACE.replace_all(&s, " ");
    s.trim().to_string()
}

static GARBAGE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        // Meta-commentary / thinking-out-loud openers
        r"(?i)^(Here|Based|OK|I |Let me|Background|Research|Context|Think|Step|First)",
        // Self-labeling prefixes
        r"(?i)^(The roast|Roast:|Output:|My roast)",
        // Markdown bold anywhere
        r"\*\*",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("garbage pattern"))
    .collect()
});

/// Accept a cleaned candidate only if it looks like an actual roast:
/// reasonable length, no preamble, no leftover markdown.
pub fn is_valid_roast(roast: &str) -> bool {
    if roast.is_empty() {
        return false;
    }
    let len = roast.chars().count();
    if len <= 20 || len >= 250 {
        return false;
    }
    !GARBAGE_PATTERNS.iter().any(|p| p.is_match(roast))
}

/// Generate a roast with up to three attempts against the same prompt.
///
/// Attempt errors and rejected candidates are logged and absorbed; this
/// always returns a result, falling back to [`FALLBACK_ROAST`] on exhaustion.
pub async fn generate_roast(model: &impl TextModel, req: &CompanyRequest) -> RoastResult {
    let prompt = build_prompt(req);

    let mut input_tokens: u64 = 0;
    let mut output_tokens: u64 = 0;

    for attempt in 1..=MAX_ATTEMPTS {
        match model.generate(&prompt).await {
            Ok(completion) => {
                input_tokens += completion.usage.prompt_token_count;
                output_tokens += completion.usage.candidates_token_count;

                let cleaned = clean_roast(&completion.text);
                if is_valid_roast(&cleaned) {
                    tracing::info!(attempt, roast = %cleaned, "Roast accepted");
                    return RoastResult {
                        text: cleaned,
                        input_tokens,
                        output_tokens,
                        cost_usd: estimate_cost(input_tokens, output_tokens),
                    };
                }
                tracing::warn!(attempt, candidate = %cleaned, "Rejected roast candidate");
            }
            Err(e) => {
                tracing::warn!(attempt, error = %e, "Generation attempt failed");
            }
        }
    }

    tracing::warn!("All attempts exhausted, using fallback roast");
    RoastResult {
        text: FALLBACK_ROAST.to_string(),
        input_tokens: 0,
        output_tokens: 0,
        cost_usd: 0.0,
    }
}

fn estimate_cost(input_tokens: u64, output_tokens: u64) -> f64 {
    let input = (input_tokens as f64 / 1_000_000.0) * INPUT_PRICE_PER_M;
    let output = (output_tokens as f64 / 1_000_000.0) * OUTPUT_PRICE_PER_M;
    input + output + SEARCH_PRICE_PER_QUERY
}
