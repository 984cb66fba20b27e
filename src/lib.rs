//! talcard: company roast card generation.
//!
//! Generates a short comedic roast about a company/role via the Gemini API,
//! looks up the company logo, and composites both onto a rendered PNG card.

pub mod card;
pub mod company;
pub mod llm;
pub mod logo;
pub mod roast;
