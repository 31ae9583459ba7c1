//! Annual reward estimation.
//!
//! Two layers: [`RewardSimulator`] asks the LLM for a structured estimate and
//! falls back to [`estimate`], a pure regex heuristic over the card's
//! free-text reward description. The heuristic is inherently brittle and
//! best-effort only; its output is never authoritative.

use std::collections::BTreeMap;
use std::sync::Arc;

use llm_client::LlmClient;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use tracing::warn;

use crate::extract::strip_code_fence;
use crate::types::{Card, Preferences};

/// Fixed rupee value of one reward point.
const POINT_VALUE: f64 = 0.25;

/// Summary returned when no spending category matched any pattern.
pub const NO_SIMULATION: &str = "Reward simulation not available";

static GENERIC_CASHBACK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+)% on (?:all|other|any) spends").unwrap());
static GENERIC_POINTS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+) points per [₹rs. ]*(\d+)").unwrap());

/// Estimates annual rewards for `spending` against the card's reward_rate
/// text. Categories are processed in map order; underscores in category
/// names are matched as spaces. Returns the summary line and one detail line
/// per matched category.
pub fn estimate(card: &Card, spending: &BTreeMap<String, u64>) -> (String, Vec<String>) {
    let rate_text = card.reward_rate.to_lowercase();

    let generic_cashback_pct: Option<f64> = GENERIC_CASHBACK
        .captures(&rate_text)
        .and_then(|caps| caps[1].parse().ok());
    let generic_points: Option<(f64, f64)> = GENERIC_POINTS.captures(&rate_text).and_then(|caps| {
        let pts = caps[1].parse().ok()?;
        let per: f64 = caps[2].parse().ok()?;
        (per > 0.0).then_some((pts, per))
    });

    let mut total = 0.0;
    let mut details = Vec::new();

    for (category, &monthly) in spending {
        if monthly == 0 {
            continue;
        }
        // f64 from the start: extracted amounts are untrusted and a large
        // value would overflow u64 multiplication.
        let annual = monthly as f64 * 12.0;
        let label = category.replace('_', " ");
        let escaped = regex::escape(&label);

        // Category-specific cashback, e.g. "5% on dining".
        if let Some(pct) = category_capture(&format!(r"(\d+)%.*{escaped}"), &rate_text) {
            let reward = annual * pct / 100.0;
            total += reward;
            details.push(format!("{pct:.0}% cashback on {label}: ₹{reward:.0}/year"));
            continue;
        }

        // Category-specific points, e.g. "2 points per ₹100 spent on travel".
        if let Some((pts, per)) =
            category_points_capture(&format!(r"(\d+) points per [₹rs. ]*(\d+).*{escaped}"), &rate_text)
        {
            let points = annual / per * pts;
            let value = points * POINT_VALUE;
            total += value;
            details.push(format!(
                "{pts:.0} points per ₹{per:.0} on {label}: {points:.0} points/year (~₹{value:.0}/year)"
            ));
            continue;
        }

        // Generic cashback anywhere in the description, applied to this category.
        if let Some(pct) = generic_cashback_pct {
            let reward = annual * pct / 100.0;
            total += reward;
            details.push(format!(
                "{pct:.0}% cashback on {label}: ₹{reward:.0}/year (generic)"
            ));
            continue;
        }

        // Generic points pattern, same treatment.
        if let Some((pts, per)) = generic_points {
            let points = annual / per * pts;
            let value = points * POINT_VALUE;
            total += value;
            details.push(format!(
                "{pts:.0} points per ₹{per:.0} on {label}: {points:.0} points/year (~₹{value:.0}/year, generic)"
            ));
        }
    }

    if details.is_empty() {
        (NO_SIMULATION.to_string(), Vec::new())
    } else {
        (format!("You could earn approx. ₹{total:.0}/year"), details)
    }
}

fn category_capture(pattern: &str, text: &str) -> Option<f64> {
    let re = Regex::new(pattern).ok()?;
    let caps = re.captures(text)?;
    caps[1].parse().ok()
}

fn category_points_capture(pattern: &str, text: &str) -> Option<(f64, f64)> {
    let re = Regex::new(pattern).ok()?;
    let caps = re.captures(text)?;
    let pts = caps[1].parse().ok()?;
    let per: f64 = caps[2].parse().ok()?;
    (per > 0.0).then_some((pts, per))
}

/// LLM-first reward simulation with the regex heuristic as fallback.
#[derive(Clone)]
pub struct RewardSimulator {
    llm: Arc<dyn LlmClient>,
}

#[derive(Deserialize)]
struct SimulationReply {
    #[serde(default)]
    total_rewards_inr: f64,
    #[serde(default)]
    details: Vec<String>,
}

impl RewardSimulator {
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self { llm }
    }

    /// Returns (summary, detail lines). Falls back to [`estimate`] when the
    /// model fails, replies with invalid JSON, or produces no details.
    pub async fn simulate(&self, card: &Card, prefs: &Preferences) -> (String, Vec<String>) {
        match self.try_simulate(card, prefs).await {
            Ok((summary, details)) if !details.is_empty() => (summary, details),
            Ok(_) => estimate(card, &prefs.spending),
            Err(e) => {
                warn!(
                    card = %card.name,
                    error = %e,
                    "reward simulation failed, falling back to pattern matching"
                );
                estimate(card, &prefs.spending)
            }
        }
    }

    async fn try_simulate(
        &self,
        card: &Card,
        prefs: &Preferences,
    ) -> anyhow::Result<(String, Vec<String>)> {
        let card_json = serde_json::to_string_pretty(card)?;
        let spending_json = serde_json::to_string_pretty(&prefs.spending)?;
        let prompt = format!(
            r#"You are a financial assistant. Given the following credit card details and user spending preferences, estimate the total annual rewards the user could earn with this card.

Card details (JSON):
{card_json}

User spending preferences (JSON):
{spending_json}

Please:
- Calculate the total estimated annual rewards (in INR) for this user, based on the reward structure and spending.
- Show a breakdown by category if possible.
- If the reward structure is unclear, say so.
- Respond in valid JSON with fields: {{"total_rewards_inr": int, "details": [string]}}."#
        );

        let reply = self.llm.complete(&prompt).await?;
        let parsed: SimulationReply = serde_json::from_str(strip_code_fence(&reply))?;
        Ok((
            format!("You could earn approx. ₹{:.0}/year", parsed.total_rewards_inr),
            parsed.details,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card_with_rate(rate: &str) -> Card {
        Card {
            name: "Test Card".to_string(),
            reward_rate: rate.to_string(),
            ..Default::default()
        }
    }

    fn spending(entries: &[(&str, u64)]) -> BTreeMap<String, u64> {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), *v))
            .collect()
    }

    #[test]
    fn category_match_plus_generic_fallback() {
        let card = card_with_rate("5% on dining, 2% on all spends");
        let (summary, details) =
            estimate(&card, &spending(&[("dining", 1000), ("travel", 500)]));

        // dining: 5% x 12 x 1000 = 600; travel: generic 2% x 12 x 500 = 120
        assert_eq!(summary, "You could earn approx. ₹720/year");
        assert_eq!(details.len(), 2);
        assert_eq!(details[0], "5% cashback on dining: ₹600/year");
        assert_eq!(details[1], "2% cashback on travel: ₹120/year (generic)");
    }

    #[test]
    fn category_points_pattern() {
        let card = card_with_rate("4 points per ₹100 spent on travel");
        let (summary, details) = estimate(&card, &spending(&[("travel", 1000)]));

        // 12000 / 100 * 4 = 480 points, at ₹0.25 each = ₹120
        assert_eq!(summary, "You could earn approx. ₹120/year");
        assert_eq!(
            details,
            vec!["4 points per ₹100 on travel: 480 points/year (~₹120/year)"]
        );
    }

    #[test]
    fn generic_points_fallback() {
        let card = card_with_rate("2 points per rs. 50");
        let (_, details) = estimate(&card, &spending(&[("groceries", 500)]));
        // 6000 / 50 * 2 = 240 points, at ₹0.25 each = ₹60
        assert_eq!(
            details,
            vec!["2 points per ₹50 on groceries: 240 points/year (~₹60/year, generic)"]
        );
    }

    #[test]
    fn underscored_category_matches_spaced_text() {
        let card = card_with_rate("5% on online shopping");
        let (_, details) = estimate(&card, &spending(&[("online_shopping", 1000)]));
        assert_eq!(details, vec!["5% cashback on online shopping: ₹600/year"]);
    }

    #[test]
    fn zero_spend_categories_are_skipped() {
        let card = card_with_rate("5% on dining");
        let (summary, details) =
            estimate(&card, &spending(&[("dining", 0), ("fuel", 0)]));
        assert_eq!(summary, NO_SIMULATION);
        assert!(details.is_empty());
    }

    #[test]
    fn very_large_spend_amounts_do_not_overflow() {
        // extracted spending is untrusted; a huge amount must still estimate
        let card = card_with_rate("5% on dining");
        let (summary, details) = estimate(&card, &spending(&[("dining", u64::MAX / 6)]));
        assert_eq!(details.len(), 1);
        assert!(summary.starts_with("You could earn approx. ₹"));
    }

    #[test]
    fn no_match_returns_sentinel() {
        let card = card_with_rate("complimentary lounge visits");
        let (summary, details) = estimate(&card, &spending(&[("dining", 1000)]));
        assert_eq!(summary, NO_SIMULATION);
        assert!(details.is_empty());
    }
}
