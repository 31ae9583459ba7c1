//! Core domain types: conversation messages, extracted preferences, cards,
//! and recommendation results.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Sender of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

impl Sender {
    /// Lowercase label used in transcripts and persisted JSON.
    pub fn label(self) -> &'static str {
        match self {
            Sender::User => "user",
            Sender::Bot => "bot",
        }
    }
}

/// A single chat message. Immutable once appended to a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub sender: Sender,
    pub text: String,
}

impl Message {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::User,
            text: text.into(),
        }
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::Bot,
            text: text.into(),
        }
    }
}

/// Income period qualifier for [`Preferences::income`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IncomePeriod {
    Monthly,
    Annual,
}

impl IncomePeriod {
    pub fn label(self) -> &'static str {
        match self {
            IncomePeriod::Monthly => "monthly",
            IncomePeriod::Annual => "annual",
        }
    }
}

/// Fixed spending categories the assistant asks about, in canonical order.
pub const SPENDING_CATEGORIES: [&str; 6] = [
    "fuel",
    "travel",
    "groceries",
    "dining",
    "online_shopping",
    "utilities",
];

/// Structured user preferences extracted from the conversation.
///
/// Every field carries a serde default so that a partial model reply still
/// deserializes into a fully-populated record; the all-defaults value is also
/// the fallback when extraction fails entirely.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub age: Option<u32>,
    pub income: Option<u64>,
    pub income_period: Option<IncomePeriod>,
    /// Monthly amounts for the fixed categories in [`SPENDING_CATEGORIES`].
    pub spending: BTreeMap<String, u64>,
    /// Monthly amounts for user-specific categories outside the fixed set.
    pub custom_spending: BTreeMap<String, u64>,
    pub reward_preferences: Vec<String>,
    pub bank_preference: Option<String>,
    pub special_features: Vec<String>,
    pub annual_fee_preference: Option<bool>,
    pub credit_score: Option<String>,
    pub existing_cards: Vec<String>,
}

/// A recommendable credit card. Stored as vector-index metadata; read-only
/// to this system except at seeding time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Card {
    pub name: String,
    pub issuer: String,
    pub joining_fee: String,
    pub annual_fee: String,
    pub reward_type: String,
    /// Free-text reward description; drives the reward estimator's pattern matching.
    pub reward_rate: String,
    pub eligibility: String,
    pub special_perks: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apply_link: Option<String>,
}

/// A retrieved card annotated for the user. Computed per request, never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct Recommendation {
    #[serde(flatten)]
    pub card: Card,
    pub reward_simulation: String,
    pub reward_details: Vec<String>,
    pub llm_reason: String,
}

/// Per-user conversation state, keyed by a client-supplied session id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub history: Vec<Message>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub preferences: Option<Preferences>,
}
