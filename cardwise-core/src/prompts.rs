//! Fixed prompt text and transcript rendering.
//!
//! Everything the model sees is assembled here: the interviewer system
//! prompt, the opening greeting, the extraction schema prompt, and the
//! `sender: text` transcript format shared by chat and extraction.

use crate::types::{Message, SPENDING_CATEGORIES};

/// Seeded as the first message of every new session.
pub const OPENING_MESSAGE: &str = "Hello! 👋 I can help you find the best credit card for your needs. To get started, may I know your age?";

/// Reply used when the chat completion fails; the turn still completes.
pub const CHAT_FALLBACK_REPLY: &str =
    "Sorry, I ran into a problem generating a reply. Please try again.";

/// Interviewer instructions prepended to every chat completion.
pub const SYSTEM_PROMPT: &str = r#"You are a helpful credit card recommendation assistant.
Your job is to guide the user through a series of targeted, conversational questions to gather the information needed to recommend the best Indian credit cards for them. Ask one question at a time and wait for the user's response before proceeding. Make the tone friendly but professional.
Collect the following information:
1. The user's age.
2. Their monthly or annual income.
3. Their average monthly spending in each of these categories (ask separately):
   - Fuel
   - Travel
   - Groceries
   - Dining
   - Online shopping
   - Utilities (electricity, water, DTH, etc.)
   - Any other significant spending category (if any)
4. The type of rewards or benefits they prefer (e.g., cashback, travel rewards, lounge access, dining discounts, no annual fee, fuel surcharge waiver, etc.).
5. Any preference for a specific bank or card issuer.
6. Any special features or perks they want (e.g., complimentary lounge visits, fuel surcharge waiver, dining discounts, etc.).
7. Whether they want a card with a low or waived annual/joining fee.
8. Their credit score (approximate or "unknown" is allowed).
9. Whether they already use any credit cards.
Once all relevant information is collected, say:
"DONE. Based on your preferences, here are the top credit cards for you…""#;

/// Renders history as `sender: text` lines, one per message, in order.
pub fn render_transcript(history: &[Message]) -> String {
    history
        .iter()
        .map(|m| format!("{}: {}", m.sender.label(), m.text))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Builds the schema-description prompt for preference extraction.
///
/// The schema block mirrors [`crate::types::Preferences`] exactly: field
/// names, types, and nullability. The model is asked for JSON only.
pub fn extraction_prompt(transcript: &str) -> String {
    // schema lists the fixed categories so the model fills exactly those keys
    let spending_fields = SPENDING_CATEGORIES
        .iter()
        .map(|category| format!("    \"{category}\": int"))
        .collect::<Vec<_>>()
        .join(",\n");

    format!(
        r#"You are a data extractor.

Given the following chat history between a user and a credit card assistant, extract the user's preferences in valid JSON format with these exact fields and types:

{{
  "age": int or null,
  "income": int or null,
  "income_period": "monthly" or "annual" or null,
  "spending": {{
{spending_fields}
  }},
  "custom_spending": {{
    "<other_category_name>": int
  }},
  "reward_preferences": [string],
  "bank_preference": string or null,
  "special_features": [string],
  "annual_fee_preference": true or false or null,
  "credit_score": string or null,
  "existing_cards": [string]
}}

Respond with JSON only, no prose and no markdown.

Chat history:
{transcript}"#
    )
}
